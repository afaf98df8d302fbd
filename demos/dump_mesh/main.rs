//! Builds shadow meshes for a few contours and logs their statistics.
//!
//! ```text
//! cargo run --example dump_mesh
//! RUST_LOG=umbra=debug cargo run --example dump_mesh
//! ```

use std::f64::consts::TAU;

use umbra::caster::{Light2D, ShadowCaster, ShadowCasterStore};
use umbra::math::Point3;
use umbra::shadow::{ProjectShadow, ShadowMeshParams, ShadowVertex};

fn regular_polygon(sides: u32, radius: f64) -> Vec<Point3> {
    (0..sides)
        .map(|i| {
            let a = TAU * f64::from(i) / f64::from(sides);
            Point3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

fn main() -> umbra::Result<()> {
    // Default: WARN for everything, INFO for the demo and the kernel.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dump_mesh=info".parse().unwrap_or_default())
        .add_directive("umbra=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut store = ShadowCasterStore::new();
    store.add(ShadowCaster::default());
    for (i, sides) in [3u32, 6, 12].into_iter().enumerate() {
        let mut caster = ShadowCaster::new(regular_polygon(sides, 1.0));
        #[allow(clippy::cast_precision_loss)]
        caster.set_position(Point3::new(3.0 * (i + 1) as f64, 0.0, 0.0));
        store.add(caster);
    }

    let rebuilt = store.update_all(&ShadowMeshParams::default())?;
    tracing::info!(rebuilt, "shadow casters ready");

    for (id, caster) in store.iter() {
        let mesh = caster.mesh();
        tracing::info!(
            ?id,
            vertices = mesh.vertex_count(),
            interior = mesh.source_triangle_count(),
            skirt = mesh.extrusion_triangles().len(),
            bytes = mesh.vertex_count() * ShadowVertex::STRIDE,
            min = ?mesh.bounds.min.coords.as_slice(),
            max = ?mesh.bounds.max.coords.as_slice(),
            "shadow mesh"
        );
    }

    let light = Light2D::new(Point3::new(4.0, -3.0, 0.0), 5.0);
    for id in store.casters_for_light(&light, 0) {
        let caster = store.caster(id)?;
        let local_light = light.position - caster.position().coords;
        let projected = ProjectShadow::new(local_light, light.radius).execute(caster.mesh());
        let moved = projected
            .iter()
            .zip(&caster.mesh().positions)
            .filter(|(a, b)| a != b)
            .count();
        tracing::info!(?id, moved, "projected shadow");
    }

    Ok(())
}
