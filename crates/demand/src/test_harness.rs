//! # TestSite — headless harness for parking demand integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` and `ParkingDemandPlugin`,
//! so tests can feed host metrics, send panel events, tick, and assert on
//! `ParkingDemand` without a window or renderer.

use std::thread;
use std::time::Duration;

use bevy::prelude::*;

use crate::config::DemandSettings;
use crate::kv_store::KeyValueStore;
use crate::metrics::{HostMetrics, MetricsProvider, StaticMetricsProvider};
use crate::panel_view::DemandPanelView;
use crate::parking::{
    FetchPhase, MetricsFetch, MetricsSource, ParkingDemand, ParkingDemandPlugin, RatioMap,
    RatioStore, RefreshMetricsEvent, SetRatioEvent,
};

/// Upper bound on updates spent waiting for an async fetch to resolve.
const MAX_SETTLE_UPDATES: usize = 2_000;

/// A headless Bevy App running the parking demand pipeline.
pub struct TestSite {
    app: App,
}

/// Builder for [`TestSite`]; everything is inserted before the first update
/// so the startup fetch sees it.
pub struct TestSiteBuilder {
    provider: Option<MetricsSource>,
    store: Option<RatioStore>,
    settings: DemandSettings,
}

impl TestSite {
    /// Start describing a site. Without a provider the startup fetch fails.
    pub fn builder() -> TestSiteBuilder {
        TestSiteBuilder {
            provider: None,
            store: None,
            settings: DemandSettings::default(),
        }
    }

    /// A site whose host reports `metrics`, settled into its first result.
    pub fn with_metrics(metrics: HostMetrics) -> Self {
        let mut site = Self::builder().metrics(metrics).build();
        site.settle();
        site
    }

    // -----------------------------------------------------------------------
    // Driving the app
    // -----------------------------------------------------------------------

    /// Run `n` app updates.
    pub fn tick(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.app.update();
        }
        self
    }

    /// Update until no fetch is in flight, yielding so the async compute
    /// pool can finish. Panics if the fetch never resolves.
    pub fn settle(&mut self) -> &mut Self {
        for _ in 0..MAX_SETTLE_UPDATES {
            self.app.update();
            let in_flight = self.app.world().contains_resource::<MetricsFetch>();
            if !in_flight && self.demand().phase != FetchPhase::Loading {
                return self;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("TestSite: metrics fetch did not resolve");
    }

    /// Send a ratio edit as the panel would, then apply it.
    pub fn set_ratio(&mut self, function_id: &str, sqm_per_spot: f64) -> &mut Self {
        self.app.world_mut().send_event(SetRatioEvent {
            function_id: function_id.to_string(),
            sqm_per_spot,
        });
        self.tick(1)
    }

    /// Ask for fresh metrics and wait for the result.
    pub fn refresh(&mut self) -> &mut Self {
        self.app.world_mut().send_event(RefreshMetricsEvent);
        self.settle()
    }

    /// Swap the host provider, e.g. to simulate the site changing between fetches.
    pub fn replace_provider(&mut self, provider: impl MetricsProvider) -> &mut Self {
        self.app.insert_resource(MetricsSource::new(provider));
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn demand(&self) -> &ParkingDemand {
        self.app.world().resource::<ParkingDemand>()
    }

    pub fn view(&self) -> DemandPanelView {
        DemandPanelView::from_state(self.demand())
    }

    /// Ratios as the store would hand them to the next session.
    pub fn persisted_ratios(&self) -> RatioMap {
        self.app.world().resource::<RatioStore>().load()
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

impl TestSiteBuilder {
    pub fn metrics(mut self, metrics: HostMetrics) -> Self {
        self.provider = Some(MetricsSource::new(StaticMetricsProvider::new(metrics)));
        self
    }

    pub fn provider(mut self, provider: impl MetricsProvider) -> Self {
        self.provider = Some(MetricsSource::new(provider));
        self
    }

    /// Back the ratio store with `backend` (e.g. one seeded by an earlier session).
    pub fn store(mut self, backend: impl KeyValueStore) -> Self {
        self.store = Some(RatioStore::new(backend));
        self
    }

    pub fn settings(mut self, settings: DemandSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the app and run the first update, which starts the fetch.
    pub fn build(self) -> TestSite {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Inserted before the plugin so its init_resource calls keep them.
        app.insert_resource(self.settings);
        if let Some(store) = self.store {
            app.insert_resource(store);
        }
        if let Some(provider) = self.provider {
            app.insert_resource(provider);
        }
        app.add_plugins(ParkingDemandPlugin);

        app.update();
        TestSite { app }
    }
}
