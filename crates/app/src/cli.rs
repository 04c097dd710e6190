//! Launch options for the `parking-demand` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use demand::config::DEFAULT_FETCH_TIMEOUT;
use demand::DemandSettings;
use save::DEFAULT_STORE_FILE;
use ui::PanelMode;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "parking-demand",
    version,
    about = "Required parking spots per building function, compared with the spots on site"
)]
pub struct LaunchOptions {
    /// Host area-metrics JSON to read on every refresh. A built-in demo site
    /// is used when omitted.
    #[arg(long, env = "PARKING_DEMAND_METRICS")]
    pub metrics: Option<PathBuf>,

    /// File the area-per-spot ratios are persisted to.
    #[arg(long, env = "PARKING_DEMAND_STORE", default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Show the floating placeholder panel instead of the side panel.
    #[arg(long, default_value_t = false)]
    pub floating: bool,

    /// Seconds to wait for host metrics before giving up.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl LaunchOptions {
    pub fn settings(&self) -> DemandSettings {
        DemandSettings {
            fetch_timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }

    /// Options for a browser build: defaults, with the panel taken from the
    /// page URL.
    #[cfg(any(target_arch = "wasm32", test))]
    pub fn for_page(floating: bool) -> Self {
        Self {
            metrics: None,
            store: PathBuf::from(DEFAULT_STORE_FILE),
            floating,
            timeout: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }

    pub fn panel_mode(&self) -> PanelMode {
        if self.floating {
            PanelMode::Floating
        } else {
            PanelMode::Side
        }
    }
}
