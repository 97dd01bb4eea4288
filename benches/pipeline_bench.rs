//! Benchmarks for stage 1 routing and stage 2 aggregation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ops_kpi_pipeline::app::services::aggregator::{aggregate_assets, aggregate_plants};
use ops_kpi_pipeline::app::services::asset_registry::AssetRegistry;
use ops_kpi_pipeline::{
    AssetInfo, FieldValue, HealthScoreConfig, RawReading, RecordProcessor, ValidationConfig,
};
use std::hint::black_box;
use std::time::Duration;

const ASSETS: usize = 200;

/// Synthetic day of readings with roughly 2% duplicates and 3% bad rows
fn synthetic_readings(count: usize) -> Vec<RawReading> {
    (0..count)
        .map(|i| {
            let id = if i % 50 == 0 && i > 0 { i - 1 } else { i };
            let temperature = if i % 33 == 0 { 250.0 } else { 40.0 + (i % 60) as f64 };
            let state = if i % 4 == 0 { "idle" } else { "running" };
            RawReading {
                reading_id: Some(FieldValue::from(format!("RDG-{:08}", id).as_str())),
                asset_id: Some(FieldValue::from(format!("AST-{:05}", i % ASSETS).as_str())),
                ts_utc: Some(FieldValue::from("2026-02-02T00:00:00Z")),
                temperature_c: Some(FieldValue::from(temperature)),
                vibration_mm_s: Some(FieldValue::from((i % 40) as f64 / 10.0)),
                pressure_bar: Some(FieldValue::from(6.5)),
                flow_l_min: Some(FieldValue::from(120.0)),
                rpm: Some(FieldValue::from(2900i64)),
                operating_state: Some(FieldValue::from(state)),
                sample_interval_sec: Some(FieldValue::from(900i64)),
            }
        })
        .collect()
}

fn synthetic_registry() -> AssetRegistry {
    AssetRegistry::from_assets((0..ASSETS).map(|i| AssetInfo {
        asset_id: format!("AST-{:05}", i),
        plant_id: Some(format!("PLT-{:03}", i % 8)),
        asset_type: Some("pump".to_string()),
        criticality: Some("medium".to_string()),
        maintenance_strategy: Some("preventive".to_string()),
        ..AssetInfo::default()
    }))
}

fn bench_record_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_processing");
    group.measurement_time(Duration::from_secs(8));

    let processor = RecordProcessor::new(ValidationConfig::default());
    for count in [1_000, 10_000, 100_000] {
        let readings = synthetic_readings(count);
        group.bench_with_input(BenchmarkId::new("process", count), &readings, |b, readings| {
            b.iter(|| processor.process(black_box(readings.clone())))
        });
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    let registry = synthetic_registry();
    let health = HealthScoreConfig::default();
    for count in [10_000, 100_000] {
        let clean = RecordProcessor::new(ValidationConfig::default())
            .process(synthetic_readings(count))
            .clean;
        group.bench_with_input(BenchmarkId::new("assets_and_plants", count), &clean, |b, clean| {
            b.iter(|| {
                let assets = aggregate_assets(black_box(clean), &registry, "2026-02-02", &health);
                aggregate_plants(&assets, "2026-02-02")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_processing, bench_aggregation);
criterion_main!(benches);
