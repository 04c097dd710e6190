//! Host floor-area metrics: the per-function gross floor area breakdown and
//! the number of parking spots actually drawn on the site.
//!
//! The host platform is a black box behind [`MetricsProvider`]. Payloads use
//! the host's camelCase JSON shape; an area the host could not compute is
//! reported as the string `"UNABLE_TO_CALCULATE"` instead of a number.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::UNSPECIFIED_FUNCTION_ID;

// =============================================================================
// Area values
// =============================================================================

/// Floor area attributed to a function, or the host's "unable to calculate"
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAreaValue", into = "RawAreaValue")]
pub enum AreaValue {
    Measured(f64),
    UnableToCalculate,
}

impl AreaValue {
    /// The measured area, if any.
    pub fn measured(self) -> Option<f64> {
        match self {
            AreaValue::Measured(area) => Some(area),
            AreaValue::UnableToCalculate => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAreaValue {
    Number(f64),
    Marker(AreaMarker),
}

#[derive(Serialize, Deserialize)]
enum AreaMarker {
    #[serde(rename = "UNABLE_TO_CALCULATE")]
    UnableToCalculate,
}

impl From<RawAreaValue> for AreaValue {
    fn from(raw: RawAreaValue) -> Self {
        match raw {
            RawAreaValue::Number(area) => AreaValue::Measured(area),
            RawAreaValue::Marker(AreaMarker::UnableToCalculate) => AreaValue::UnableToCalculate,
        }
    }
}

impl From<AreaValue> for RawAreaValue {
    fn from(value: AreaValue) -> Self {
        match value {
            AreaValue::Measured(area) => RawAreaValue::Number(area),
            AreaValue::UnableToCalculate => RawAreaValue::Marker(AreaMarker::UnableToCalculate),
        }
    }
}

// =============================================================================
// Function colors
// =============================================================================

/// CSS color token the host assigns to a building function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionColor(pub String);

impl FunctionColor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses `#rgb` and `#rrggbb` hex tokens. Anything else yields `None`.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        let hex = self.0.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let nibble = c.to_digit(16)? as u8;
                    rgb[i] = nibble * 17;
                }
                Some(rgb)
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some([channel(0)?, channel(2)?, channel(4)?])
            }
            _ => None,
        }
    }
}

// =============================================================================
// Function metrics
// =============================================================================

/// Gross floor area of one building function, as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetric {
    pub function_id: String,
    pub function_name: String,
    pub function_color: FunctionColor,
    #[serde(rename = "value")]
    pub area: AreaValue,
}

impl FunctionMetric {
    /// Convenience constructor for a function with a measured area.
    pub fn measured(
        function_id: impl Into<String>,
        function_name: impl Into<String>,
        function_color: impl Into<String>,
        area: f64,
    ) -> Self {
        Self {
            function_id: function_id.into(),
            function_name: function_name.into(),
            function_color: FunctionColor::new(function_color),
            area: AreaValue::Measured(area),
        }
    }
}

/// One refresh cycle's worth of host metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostMetrics {
    pub function_breakdown: Vec<FunctionMetric>,
    pub parking_spots: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsPayload {
    built_in_metrics: BuiltInMetrics,
    #[serde(default)]
    parking_statistics: Option<ParkingStatistics>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuiltInMetrics {
    gross_floor_area: GrossFloorArea,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrossFloorArea {
    #[serde(default)]
    function_breakdown: Vec<FunctionMetric>,
}

#[derive(Deserialize)]
struct ParkingStatistics {
    spots: u32,
}

impl HostMetrics {
    /// Parse the host's `calculate` result.
    ///
    /// A payload without `parkingStatistics` is accepted with zero spots.
    pub fn from_json(json: &str) -> Result<Self, MetricsError> {
        let payload: MetricsPayload =
            serde_json::from_str(json).map_err(|e| MetricsError::Parse(e.to_string()))?;
        let parking_spots = match payload.parking_statistics {
            Some(stats) => stats.spots,
            None => {
                warn!("Host metrics carry no parking statistics; assuming 0 available spots");
                0
            }
        };
        Ok(Self {
            function_breakdown: payload.built_in_metrics.gross_floor_area.function_breakdown,
            parking_spots,
        })
    }

    /// The functions that take part in demand: drops the `unspecified`
    /// sentinel, entries with an empty id, and repeated ids (first wins).
    pub fn specified_functions(&self) -> Vec<FunctionMetric> {
        let mut seen = HashSet::new();
        let mut functions = Vec::with_capacity(self.function_breakdown.len());
        for metric in &self.function_breakdown {
            if metric.function_id == UNSPECIFIED_FUNCTION_ID {
                continue;
            }
            if metric.function_id.is_empty() {
                warn!("Skipping function '{}' with empty id", metric.function_name);
                continue;
            }
            if !seen.insert(metric.function_id.as_str()) {
                warn!("Skipping duplicate function id '{}'", metric.function_id);
                continue;
            }
            functions.push(metric.clone());
        }
        functions
    }
}

// =============================================================================
// Provider seam
// =============================================================================

/// Errors raised while obtaining host metrics.
#[derive(Debug)]
pub enum MetricsError {
    /// Reading the metrics source failed.
    Io(std::io::Error),
    /// The payload did not match the expected shape.
    Parse(String),
    /// The host has nothing to report (no site open, provider not wired up).
    Unavailable(String),
    /// The fetch was still pending when the timeout elapsed.
    TimedOut(Duration),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::Io(e) => write!(f, "I/O error: {e}"),
            MetricsError::Parse(msg) => write!(f, "Malformed metrics: {msg}"),
            MetricsError::Unavailable(msg) => write!(f, "Metrics unavailable: {msg}"),
            MetricsError::TimedOut(after) => {
                write!(f, "Metrics request timed out after {}s", after.as_secs())
            }
        }
    }
}

impl std::error::Error for MetricsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetricsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MetricsError {
    fn from(e: std::io::Error) -> Self {
        MetricsError::Io(e)
    }
}

/// The host's area-metrics calculator.
///
/// Called off the main thread on the async compute pool, once per fetch.
pub trait MetricsProvider: Send + Sync + 'static {
    fn calculate(&self) -> Result<HostMetrics, MetricsError>;
}

/// Provider that hands out a fixed snapshot, or fails if it has none.
#[derive(Debug, Clone, Default)]
pub struct StaticMetricsProvider {
    metrics: Option<HostMetrics>,
}

impl StaticMetricsProvider {
    pub fn new(metrics: HostMetrics) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    /// A provider whose every fetch fails with `MetricsError::Unavailable`.
    pub fn failing() -> Self {
        Self { metrics: None }
    }
}

impl MetricsProvider for StaticMetricsProvider {
    fn calculate(&self) -> Result<HostMetrics, MetricsError> {
        self.metrics
            .clone()
            .ok_or_else(|| MetricsError::Unavailable("no site metrics available".to_string()))
    }
}
