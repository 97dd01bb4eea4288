//! Tests for the per-plant rollup

use super::*;
use crate::app::services::aggregator::plant_kpis::aggregate_plants;

#[test]
fn test_mean_of_asset_means() {
    let assets = vec![
        summary("PLANT-A", "AST-1", 10, 1.0, Some(50.0), Some(1.0), 92.0),
        summary("PLANT-A", "AST-2", 2, 0.5, None, Some(3.0), 76.0),
    ];

    let kpis = aggregate_plants(&assets, TEST_DATE);
    assert_eq!(kpis.len(), 1);

    let kpi = &kpis[0];
    assert_eq!(kpi.date, TEST_DATE);
    assert_eq!(kpi.plant_id, "PLANT-A");
    assert_eq!(kpi.assets_count, 2);
    assert_eq!(kpi.total_readings, 12);
    // Unweighted by reading count
    assert_eq!(kpi.avg_running_ratio, Some(0.75));
    // AST-2 has no temperature and does not count
    assert_eq!(kpi.avg_temperature_c, Some(50.0));
    assert_eq!(kpi.avg_vibration_mm_s, Some(2.0));
    assert_eq!(kpi.avg_health_score, Some(84.0));
}

#[test]
fn test_plant_without_channel_data() {
    let assets = vec![summary("PLANT-B", "AST-5", 4, 0.25, None, None, 100.0)];

    let kpis = aggregate_plants(&assets, TEST_DATE);
    let kpi = &kpis[0];

    assert_eq!(kpi.avg_temperature_c, None);
    assert_eq!(kpi.avg_vibration_mm_s, None);
    assert_eq!(kpi.avg_running_ratio, Some(0.25));
    assert_eq!(kpi.avg_health_score, Some(100.0));
}

#[test]
fn test_plants_sorted_by_id() {
    let assets = vec![
        summary("UNKNOWN", "AST-9", 1, 1.0, None, None, 100.0),
        summary("PLANT-B", "AST-1", 1, 1.0, None, None, 100.0),
        summary("PLANT-A", "AST-2", 1, 1.0, None, None, 100.0),
        summary("PLANT-B", "AST-3", 1, 1.0, None, None, 100.0),
    ];

    let kpis = aggregate_plants(&assets, TEST_DATE);
    let plants: Vec<&str> = kpis.iter().map(|k| k.plant_id.as_str()).collect();
    assert_eq!(plants, vec!["PLANT-A", "PLANT-B", "UNKNOWN"]);
    assert_eq!(kpis[1].assets_count, 2);
}

#[test]
fn test_health_average_rounded_to_two_places() {
    let assets = vec![
        summary("PLANT-A", "AST-1", 1, 1.0, None, None, 90.1),
        summary("PLANT-A", "AST-2", 1, 1.0, None, None, 90.0),
        summary("PLANT-A", "AST-3", 1, 1.0, None, None, 90.0),
    ];

    let kpis = aggregate_plants(&assets, TEST_DATE);
    assert_eq!(kpis[0].avg_health_score, Some(90.03));
}

#[test]
fn test_counts_add_up() {
    let assets = vec![
        summary("PLANT-A", "AST-1", 7, 1.0, Some(40.0), Some(1.0), 92.0),
        summary("PLANT-B", "AST-2", 3, 0.0, Some(60.0), Some(2.0), 84.0),
        summary("PLANT-B", "AST-3", 5, 0.2, Some(70.0), Some(2.5), 80.0),
    ];

    let kpis = aggregate_plants(&assets, TEST_DATE);
    let assets_total: u64 = kpis.iter().map(|k| k.assets_count).sum();
    let readings_total: u64 = kpis.iter().map(|k| k.total_readings).sum();

    assert_eq!(assets_total, 3);
    assert_eq!(readings_total, 15);
}

#[test]
fn test_empty_input() {
    assert!(aggregate_plants(&[], TEST_DATE).is_empty());
}
