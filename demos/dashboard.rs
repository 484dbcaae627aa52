//! Headless walk through the dashboard operations.
//!
//! Usage:
//! ```text
//! cargo run --example dashboard                      # default furnace
//! cargo run --example dashboard -- furnace.json      # partial JSON overrides
//! ```

use std::error::Error;
use std::time::Duration;

use thermwatch::catalog::case_names;
use thermwatch::config::FurnaceConfig;
use thermwatch::geometry::ClipAxis;
use thermwatch::math::Point3;
use thermwatch::sensor::{SensorFeed, SensorSeries, DEFAULT_WINDOW};
use thermwatch::view::OrbitDirection;
use thermwatch::ThermalPipeline;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for thermwatch.
    // Override with RUST_LOG env var (e.g. RUST_LOG=thermwatch=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dashboard=info".parse().unwrap_or_default())
        .add_directive("thermwatch=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => FurnaceConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => FurnaceConfig::default(),
    };

    let mut feed = SensorFeed::start(
        SensorSeries::new(DEFAULT_WINDOW, config.seed)?,
        Duration::from_millis(100),
    )?;

    let mut pipeline = ThermalPipeline::new(config)?;
    println!("cases: {}", case_names().join(", "));

    for name in case_names() {
        let snapshot = pipeline.set_case(name);
        let m = snapshot.metrics.rounded();
        println!(
            "{}: min {} / avg {} / max {} deg C, hottest {} ({}) at {}",
            snapshot.case_name, m.min, m.avg, m.max, m.hot_zone_name, m.hot_material_name, m.hot_zone_peak
        );
        for row in &snapshot.zones {
            println!("  [{}] {}", row.zone_id, row.summary());
        }
    }

    pipeline.set_iso_value(1200.0);
    println!(
        "shell: {} triangles, isotherm @1200: {} triangles",
        pipeline.shell().triangle_count(),
        pipeline.isotherm().triangle_count()
    );

    pipeline.set_visible_zones([1, 2, 3]);
    pipeline.set_clip(true, ClipAxis::Y, Point3::origin());
    println!(
        "bottom band, clipped at y = 0: {} triangles",
        pipeline.shell().triangle_count()
    );

    let probe = pipeline.shell().vertices.first().copied();
    if let Some(p) = probe {
        println!("{}", pipeline.pick(&p).label());
    }
    println!("{}", pipeline.pick(&Point3::new(50.0, 0.0, 0.0)).label());
    println!("{}", pipeline.zone_label(2));

    pipeline.orbit_step(OrbitDirection::Right);
    pipeline.zoom(1.2);
    println!("camera at {:?}", pipeline.camera().position());

    std::thread::sleep(Duration::from_millis(350));
    feed.stop();
    let sensor = feed.snapshot();
    if let (Some(t), Some(v)) = (sensor.times.last(), sensor.measured.last()) {
        println!("live sensor A at t = {t}: {v:.1} deg C");
    }
    Ok(())
}
