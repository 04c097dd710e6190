//! Tests for the spot balance, its classification and the progress fraction.

use super::*;

use crate::config::EMPTY_DEMAND_PROGRESS;

// -------------------------------------------------------------------------
// evaluate
// -------------------------------------------------------------------------

#[test]
fn test_evaluate_deficit() {
    let balance = evaluate(40, 35);
    assert_eq!(balance.difference, -5);
    assert_eq!(balance.status(), BalanceStatus::Deficit(5));
    assert_eq!(balance.status().label(), "Missing parking spots 5");
}

#[test]
fn test_evaluate_exact_match() {
    let balance = evaluate(40, 40);
    assert_eq!(balance.difference, 0);
    assert_eq!(balance.status(), BalanceStatus::Exact);
    assert_eq!(balance.status().label(), "Exact match");
}

#[test]
fn test_evaluate_surplus() {
    let balance = evaluate(40, 52);
    assert_eq!(balance.difference, 12);
    assert_eq!(balance.status(), BalanceStatus::Surplus(12));
    assert_eq!(balance.status().label(), "Excess parking spots 12");
}

#[test]
fn test_evaluate_keeps_inputs() {
    let balance = evaluate(7, 3);
    assert_eq!(balance.total_demand, 7);
    assert_eq!(balance.available_spots, 3);
}

#[test]
fn test_evaluate_extremes_do_not_overflow() {
    let balance = evaluate(u32::MAX, 0);
    assert_eq!(balance.difference, -(u32::MAX as i64));
    assert_eq!(balance.status(), BalanceStatus::Deficit(u32::MAX));

    let balance = evaluate(0, u32::MAX);
    assert_eq!(balance.status(), BalanceStatus::Surplus(u32::MAX));
}

// -------------------------------------------------------------------------
// progress_fraction
// -------------------------------------------------------------------------

#[test]
fn test_progress_partial() {
    assert!((progress_fraction(35, 40) - 0.875).abs() < 1e-6);
}

#[test]
fn test_progress_capped_at_one() {
    assert!((progress_fraction(80, 40) - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_progress_no_spots() {
    assert!(progress_fraction(0, 40).abs() < f32::EPSILON);
}

#[test]
fn test_progress_zero_demand_is_finite() {
    for available in [0, 1, 35, u32::MAX] {
        let fraction = evaluate(0, available).progress_fraction();
        assert!(fraction.is_finite(), "available={available}");
        assert!((fraction - EMPTY_DEMAND_PROGRESS).abs() < f32::EPSILON);
    }
}

#[test]
fn test_progress_always_in_unit_range() {
    for (available, demand) in [(0, 1), (1, 3), (2, 3), (3, 3), (4, 3), (u32::MAX, 1)] {
        let fraction = progress_fraction(available, demand);
        assert!(
            (0.0..=1.0).contains(&fraction),
            "available={available} demand={demand} fraction={fraction}"
        );
    }
}

#[test]
fn test_default_balance_is_exact() {
    assert_eq!(SpotBalance::default().status(), BalanceStatus::Exact);
}
