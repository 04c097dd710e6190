use std::time::Duration;

use bevy::prelude::*;

/// Square metres of floor area per parking spot used for every function
/// until the user overrides it.
pub const DEFAULT_SQM_PER_SPOT: f64 = 50.0;

/// Fixed namespace the ratio overrides are persisted under.
pub const RATIO_STORE_KEY: &str = "parking-demand-extension";

/// Host sentinel for floor area that is not attributed to any function.
/// Never shown and never given a ratio.
pub const UNSPECIFIED_FUNCTION_ID: &str = "unspecified";

/// How long a metrics fetch may stay in flight before it is treated as failed.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Progress shown when no spots are demanded at all.
/// Nothing is required, so any supply (including zero) fully covers it.
pub const EMPTY_DEMAND_PROGRESS: f32 = 1.0;

/// Runtime-tunable settings for the parking demand pipeline.
///
/// Insert before `ParkingDemandPlugin` to override the defaults.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DemandSettings {
    /// Ratio seeded for every function the first time the site is initialized.
    pub default_sqm_per_spot: f64,
    /// Fetches still pending after this long move to `FetchPhase::Failed`.
    pub fetch_timeout: Duration,
}

impl Default for DemandSettings {
    fn default() -> Self {
        Self {
            default_sqm_per_spot: DEFAULT_SQM_PER_SPOT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
