//! Read-only view of parking demand for the panel, and parsing of the
//! panel's ratio input.
//!
//! The panel never reads `ParkingDemand` fields directly; it renders a
//! [`DemandPanelView`] and reports edits as `SetRatioEvent`s.

use crate::metrics::FunctionColor;
use crate::parking::{BalanceStatus, FetchPhase, ParkingDemand, SpotBalance};

/// One function's settings row.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRow {
    pub function_id: String,
    pub function_name: String,
    pub color: FunctionColor,
    /// Ratio shown in the input; 0 when the function has no ratio yet.
    pub sqm_per_spot: f64,
    pub demand: u32,
}

/// Everything the panel shows, derived from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandPanelView {
    pub phase: FetchPhase,
    pub rows: Vec<FunctionRow>,
    pub balance: SpotBalance,
    /// Fill of the spots progress bar, within `0.0..=1.0`.
    pub progress: f32,
    pub status: BalanceStatus,
    /// Generation of the metrics snapshot the rows come from.
    pub snapshot: u64,
}

impl DemandPanelView {
    pub fn from_state(state: &ParkingDemand) -> Self {
        let rows = state
            .functions
            .iter()
            .map(|metric| FunctionRow {
                function_id: metric.function_id.clone(),
                function_name: metric.function_name.clone(),
                color: metric.function_color.clone(),
                sqm_per_spot: state.ratios.get(&metric.function_id).unwrap_or(0.0),
                demand: state.demand.get(&metric.function_id).unwrap_or(0),
            })
            .collect();

        Self {
            phase: state.phase.clone(),
            rows,
            balance: state.balance,
            progress: state.balance.progress_fraction(),
            status: state.balance.status(),
            snapshot: state.snapshot,
        }
    }

    /// "available / required", e.g. `35 / 40`.
    pub fn spot_summary(&self) -> String {
        format!(
            "{} / {}",
            self.balance.available_spots, self.balance.total_demand
        )
    }

    /// Status line under the progress bar.
    pub fn status_line(&self) -> String {
        self.status.label()
    }
}

/// Parse ratio text typed into the panel.
///
/// Blank text counts as 0, like the host's numeric inputs. Anything that is
/// not a finite number is rejected and the previous ratio stays in place.
pub fn parse_ratio_input(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text for a ratio input box: `50` rather than `50.0`.
pub fn format_ratio(sqm_per_spot: f64) -> String {
    format!("{sqm_per_spot}")
}
