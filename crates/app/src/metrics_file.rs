//! Host metrics read from a JSON file, plus the demo site used when no file
//! is given.

use std::fs;
use std::path::PathBuf;

use demand::{FunctionMetric, HostMetrics, MetricsError, MetricsProvider};

/// Reads the host's `calculate` payload from `path` on every fetch, so a
/// refresh picks up an updated export.
#[derive(Debug, Clone)]
pub struct JsonFileMetrics {
    path: PathBuf,
}

impl JsonFileMetrics {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsProvider for JsonFileMetrics {
    fn calculate(&self) -> Result<HostMetrics, MetricsError> {
        let json = fs::read_to_string(&self.path)?;
        HostMetrics::from_json(&json)
    }
}

/// A small mixed-use site.
pub fn demo_site() -> HostMetrics {
    HostMetrics {
        function_breakdown: vec![
            FunctionMetric::measured("residential", "Residential", "#F2C14E", 4200.0),
            FunctionMetric::measured("office", "Office", "#7FB8E0", 2600.0),
            FunctionMetric::measured("retail", "Retail", "#E07F7F", 750.0),
            FunctionMetric::measured("unspecified", "Unspecified", "#CCCCCC", 310.0),
        ],
        parking_spots: 120,
    }
}
