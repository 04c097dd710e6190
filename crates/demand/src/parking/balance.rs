//! Available spots versus total demand.

use crate::config::EMPTY_DEMAND_PROGRESS;

/// Comparison of the site's drawn parking against what its floor area needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpotBalance {
    pub available_spots: u32,
    pub total_demand: u32,
    /// `available_spots - total_demand`; negative when spots are missing.
    pub difference: i64,
}

/// How the balance reads to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// More spots than required, by this many.
    Surplus(u32),
    /// Fewer spots than required, by this many.
    Deficit(u32),
    Exact,
}

impl BalanceStatus {
    pub fn label(&self) -> String {
        match self {
            BalanceStatus::Surplus(n) => format!("Excess parking spots {n}"),
            BalanceStatus::Deficit(n) => format!("Missing parking spots {n}"),
            BalanceStatus::Exact => "Exact match".to_string(),
        }
    }
}

impl SpotBalance {
    pub fn status(&self) -> BalanceStatus {
        let magnitude = u32::try_from(self.difference.unsigned_abs()).unwrap_or(u32::MAX);
        match self.difference {
            d if d > 0 => BalanceStatus::Surplus(magnitude),
            d if d < 0 => BalanceStatus::Deficit(magnitude),
            _ => BalanceStatus::Exact,
        }
    }

    /// Share of the demand covered by available spots, capped at 1.0.
    pub fn progress_fraction(&self) -> f32 {
        progress_fraction(self.available_spots, self.total_demand)
    }
}

/// Compare demand with supply.
pub fn evaluate(total_demand: u32, available_spots: u32) -> SpotBalance {
    SpotBalance {
        available_spots,
        total_demand,
        difference: i64::from(available_spots) - i64::from(total_demand),
    }
}

/// `min(available / demand, 1.0)`, or [`EMPTY_DEMAND_PROGRESS`] when nothing
/// is demanded. Always finite and within `0.0..=1.0`.
pub fn progress_fraction(available_spots: u32, total_demand: u32) -> f32 {
    if total_demand == 0 {
        return EMPTY_DEMAND_PROGRESS;
    }
    (f64::from(available_spots) / f64::from(total_demand)).min(1.0) as f32
}
