//! Tests for per-function demand, totals, and area aggregation.

use super::*;

use crate::metrics::{AreaValue, FunctionColor, FunctionMetric};

fn office_and_residential() -> Vec<FunctionMetric> {
    vec![
        FunctionMetric::measured("office", "Office", "#7FB8E0", 1000.0),
        FunctionMetric::measured("residential", "Residential", "#F2C14E", 500.0),
    ]
}

fn ratios(entries: &[(&str, f64)]) -> RatioMap {
    entries
        .iter()
        .map(|(id, ratio)| (id.to_string(), *ratio))
        .collect()
}

// -------------------------------------------------------------------------
// spots_for_area
// -------------------------------------------------------------------------

#[test]
fn test_spots_divides_and_rounds() {
    assert_eq!(spots_for_area(AreaValue::Measured(1000.0), Some(50.0)), 20);
    // 1010 / 50 = 20.2 -> 20
    assert_eq!(spots_for_area(AreaValue::Measured(1010.0), Some(50.0)), 20);
    // 1040 / 50 = 20.8 -> 21
    assert_eq!(spots_for_area(AreaValue::Measured(1040.0), Some(50.0)), 21);
}

#[test]
fn test_spots_half_rounds_away_from_zero() {
    // 125 / 50 = 2.5 -> 3
    assert_eq!(spots_for_area(AreaValue::Measured(125.0), Some(50.0)), 3);
    // 25 / 50 = 0.5 -> 1
    assert_eq!(spots_for_area(AreaValue::Measured(25.0), Some(50.0)), 1);
}

#[test]
fn test_spots_below_half_rounds_to_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(24.0), Some(50.0)), 0);
}

#[test]
fn test_spots_missing_ratio_is_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(1_000_000.0), None), 0);
}

#[test]
fn test_spots_zero_ratio_is_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(1000.0), Some(0.0)), 0);
}

#[test]
fn test_spots_negative_ratio_is_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(1000.0), Some(-50.0)), 0);
}

#[test]
fn test_spots_non_finite_ratio_is_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(1000.0), Some(f64::NAN)), 0);
    assert_eq!(
        spots_for_area(AreaValue::Measured(1000.0), Some(f64::INFINITY)),
        0
    );
}

#[test]
fn test_spots_unmeasured_area_is_zero() {
    assert_eq!(spots_for_area(AreaValue::UnableToCalculate, Some(50.0)), 0);
}

#[test]
fn test_spots_negative_area_is_zero() {
    assert_eq!(spots_for_area(AreaValue::Measured(-500.0), Some(50.0)), 0);
}

#[test]
fn test_spots_tiny_ratio_saturates() {
    let spots = spots_for_area(AreaValue::Measured(1.0e12), Some(1.0e-6));
    assert_eq!(spots, u32::MAX);
}

#[test]
fn test_spots_fractional_ratio() {
    // 100 / 12.5 = 8
    assert_eq!(spots_for_area(AreaValue::Measured(100.0), Some(12.5)), 8);
}

// -------------------------------------------------------------------------
// compute_demand / total_demand
// -------------------------------------------------------------------------

#[test]
fn test_compute_demand_reference_site() {
    let demand = compute_demand(
        &office_and_residential(),
        &ratios(&[("office", 50.0), ("residential", 25.0)]),
    );
    assert_eq!(demand.get("office"), Some(20));
    assert_eq!(demand.get("residential"), Some(20));
    assert_eq!(total_demand(&demand), 40);
}

#[test]
fn test_compute_demand_uninitialized_ratios() {
    let demand = compute_demand(&office_and_residential(), &RatioMap::new());
    assert_eq!(demand.get("office"), Some(0));
    assert_eq!(demand.get("residential"), Some(0));
    assert_eq!(total_demand(&demand), 0);
}

#[test]
fn test_compute_demand_lists_every_function() {
    let mut functions = office_and_residential();
    functions.push(FunctionMetric {
        function_id: "retail".to_string(),
        function_name: "Retail".to_string(),
        function_color: FunctionColor::new("#E07F7F"),
        area: AreaValue::UnableToCalculate,
    });
    let demand = compute_demand(&functions, &ratios(&[("office", 50.0), ("retail", 10.0)]));
    assert_eq!(demand.len(), 3);
    assert_eq!(demand.get("retail"), Some(0));
    assert_eq!(demand.get("residential"), Some(0));
    assert_eq!(total_demand(&demand), 20);
}

#[test]
fn test_compute_demand_ignores_ratios_for_absent_functions() {
    let demand = compute_demand(
        &office_and_residential(),
        &ratios(&[("office", 50.0), ("hotel", 1.0)]),
    );
    assert_eq!(demand.len(), 2);
    assert!(demand.get("hotel").is_none());
}

#[test]
fn test_total_demand_equals_sum_of_parts() {
    let functions: Vec<FunctionMetric> = (0..25)
        .map(|i| {
            FunctionMetric::measured(
                format!("f{i}"),
                format!("Function {i}"),
                "#888888",
                137.0 * i as f64,
            )
        })
        .collect();
    let ratio_map: RatioMap = (0..25)
        .map(|i| (format!("f{i}"), 10.0 + i as f64))
        .collect();

    let demand = compute_demand(&functions, &ratio_map);
    let expected: u32 = functions
        .iter()
        .map(|m| spots_for_area(m.area, ratio_map.get(&m.function_id)))
        .sum();
    assert_eq!(total_demand(&demand), expected);

    // Order of the input must not matter.
    let mut reversed = functions.clone();
    reversed.reverse();
    assert_eq!(compute_demand(&reversed, &ratio_map), demand);
}

#[test]
fn test_total_demand_empty_map() {
    assert_eq!(total_demand(&DemandMap::default()), 0);
}

#[test]
fn test_total_demand_saturates() {
    let demand: DemandMap = vec![("a".to_string(), u32::MAX), ("b".to_string(), 5)]
        .into_iter()
        .collect();
    assert_eq!(total_demand(&demand), u32::MAX);
}

// -------------------------------------------------------------------------
// total_area
// -------------------------------------------------------------------------

#[test]
fn test_total_area_skips_unmeasured() {
    let mut functions = office_and_residential();
    functions.push(FunctionMetric {
        function_id: "retail".to_string(),
        function_name: "Retail".to_string(),
        function_color: FunctionColor::default(),
        area: AreaValue::UnableToCalculate,
    });
    assert!((total_area(&functions) - 1500.0).abs() < f64::EPSILON);
}

#[test]
fn test_total_area_empty() {
    assert!(total_area(&[]).abs() < f64::EPSILON);
}
