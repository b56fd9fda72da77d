//! Resilience report over a small scenario table.
//!
//! Run with: `RUST_LOG=resilience=debug cargo run --example resilience_report`

use resilience::{Column, Performance, ResilienceConfig, TimeAxis, Thresholds, analyze_column};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Minutes since the start of the recording.
const MINUTES: [u32; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Normalized throughput of three recorded scenarios.
const NOMINAL: [f64; 16] = [1.0; 16];
const OUTAGE: [f64; 16] = [
    1.0, 1.0, 0.95, 0.4, 0.1, 0.1, 0.3, 0.6, 0.85, 0.95, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];
const FLAPPING: [f64; 16] = [
    1.0, 0.7, 1.0, 1.0, 0.6, 1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.8, 1.0,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resilience=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Resilience Report ===\n");

    let axis = TimeAxis::new(&MINUTES)?;
    let config = ResilienceConfig::new(Thresholds::new(0.9, 0.0)?)
        .with_event_separation(2.0)
        .with_inferred_signal_width(&axis);

    println!(
        "Pa = {}, Pmax = {}, failure when {} Pa, separation {} min, signal width {} min\n",
        config.thresholds.acceptable(),
        config.thresholds.max_failure(),
        config.thresholds.direction(),
        config.event_separation,
        config.signal_width,
    );

    let table = Performance::Table(vec![
        Column::new("nominal", &NOMINAL),
        Column::new("outage", &OUTAGE),
        Column::new("flapping", &FLAPPING),
    ]);

    for column in table.columns() {
        let report = analyze_column(&axis, column, &config)?;
        println!("{}", report.summary);
        for event in &report.events {
            println!(
                "  event t=[{}, {}] dur={} worst_P={} trec={} ({:.1}%) Sev={:.4}",
                event.begin_time,
                event.end_time,
                event.duration,
                event.worst_p,
                event.trec,
                event.trec_percent,
                event.sev,
            );
        }
    }

    Ok(())
}
