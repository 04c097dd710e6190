//! Pure demand computation: floor area and ratio in, parking spots out.

use std::collections::BTreeMap;

use crate::metrics::{AreaValue, FunctionMetric};

use super::ratio_store::RatioMap;

/// Required parking spots per function id. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandMap(BTreeMap<String, u32>);

impl DemandMap {
    pub fn get(&self, function_id: &str) -> Option<u32> {
        self.0.get(function_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, spots)| (id.as_str(), *spots))
    }
}

impl FromIterator<(String, u32)> for DemandMap {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Spots required for `area` at `ratio` square metres per spot.
///
/// Rounds half away from zero (`f64::round`). Returns 0 when the area is
/// unavailable or when the ratio is missing, zero, negative or non-finite.
/// A negative area also yields 0.
pub fn spots_for_area(area: AreaValue, ratio: Option<f64>) -> u32 {
    let Some(area) = area.measured() else {
        return 0;
    };
    let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return 0;
    };
    let spots = (area / ratio).round();
    if !spots.is_finite() || spots <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate, so absurd areas pin at u32::MAX.
    spots as u32
}

/// Demand for every function in `functions`, including the ones that
/// contribute nothing.
pub fn compute_demand(functions: &[FunctionMetric], ratios: &RatioMap) -> DemandMap {
    functions
        .iter()
        .map(|metric| {
            let spots = spots_for_area(metric.area, ratios.get(&metric.function_id));
            (metric.function_id.clone(), spots)
        })
        .collect()
}

/// Sum of all per-function demand; 0 for an empty map.
pub fn total_demand(demand: &DemandMap) -> u32 {
    demand
        .iter()
        .fold(0u32, |acc, (_, spots)| acc.saturating_add(spots))
}

/// Total measured floor area. Functions the host could not measure are left out.
pub fn total_area(functions: &[FunctionMetric]) -> f64 {
    functions.iter().filter_map(|m| m.area.measured()).sum()
}
