//! Parking demand for a building site: required spots per building function
//! from host floor-area metrics, user-overridable area-per-spot ratios that
//! persist across sessions, and the balance against the spots on site.
//!
//! Everything runs inside a Bevy app: add [`ParkingDemandPlugin`], insert a
//! [`MetricsSource`] and (optionally) a durable [`RatioStore`], and read
//! [`ParkingDemand`] or a [`panel_view::DemandPanelView`] from it.

pub mod config;
pub mod kv_store;
pub mod metrics;
pub mod panel_view;
pub mod parking;
pub mod store_error;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use config::DemandSettings;
pub use kv_store::{KeyValueStore, MemoryStore};
pub use metrics::{
    AreaValue, FunctionColor, FunctionMetric, HostMetrics, MetricsError, MetricsProvider,
    StaticMetricsProvider,
};
pub use parking::{
    FetchPhase, MetricsSource, ParkingDemand, ParkingDemandPlugin, RatioMap, RatioStore,
    RefreshMetricsEvent, SetRatioEvent,
};
pub use store_error::StoreError;
