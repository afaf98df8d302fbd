pub mod caster;
pub mod error;
pub mod math;
pub mod shadow;
pub mod tessellation;

pub use error::{Result, UmbraError};
