//! Parking demand state, the fetch lifecycle, the ECS systems that drive it,
//! and plugin registration.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};

use crate::config::DemandSettings;
use crate::metrics::{FunctionMetric, HostMetrics, MetricsError, MetricsProvider};

use super::balance::{evaluate, SpotBalance};
use super::demand::{compute_demand, total_area, total_demand, DemandMap};
use super::ratio_store::{RatioMap, RatioStore};

// =============================================================================
// Resource: parking demand state
// =============================================================================

/// Where the site is in its metrics lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No fetch has been started yet.
    #[default]
    Uninitialized,
    /// A metrics fetch is in flight.
    Loading,
    /// Metrics are applied and demand is computed.
    Ready,
    /// The last fetch failed or timed out; holds a readable reason.
    Failed(String),
}

/// Current metrics snapshot plus everything derived from it.
///
/// Systems and the panel read this resource; it only changes through
/// `apply_metrics`, `fail` and `set_ratio`, each of which recomputes demand
/// and balance before returning.
#[derive(Resource, Debug, Clone, Default)]
pub struct ParkingDemand {
    pub phase: FetchPhase,
    /// Functions of the current snapshot, `unspecified` already removed.
    pub functions: Vec<FunctionMetric>,
    /// Spots drawn on the site, as reported by the host.
    pub available_spots: u32,
    /// Working copy of the persisted ratios.
    pub ratios: RatioMap,
    pub demand: DemandMap,
    pub balance: SpotBalance,
    /// Incremented every time a fresh metrics snapshot is applied.
    pub snapshot: u64,
}

impl ParkingDemand {
    pub fn is_ready(&self) -> bool {
        self.phase == FetchPhase::Ready
    }

    /// Mark a fetch as started. The previous snapshot is kept until the
    /// fetch resolves, but the phase hides it from the panel.
    pub fn begin_fetch(&mut self) {
        self.phase = FetchPhase::Loading;
    }

    /// Install a fresh snapshot: seed or load the ratios, then recompute.
    pub fn apply_metrics(
        &mut self,
        metrics: &HostMetrics,
        store: &mut RatioStore,
        default_sqm_per_spot: f64,
    ) {
        let functions = metrics.specified_functions();
        let defaults = RatioMap::uniform(
            functions.iter().map(|m| m.function_id.as_str()),
            default_sqm_per_spot,
        );
        self.ratios = store.initialize_if_absent(defaults);
        self.functions = functions;
        self.available_spots = metrics.parking_spots;
        self.snapshot = self.snapshot.wrapping_add(1);
        self.phase = FetchPhase::Ready;
        self.recompute();
    }

    /// Drop the snapshot and record why. Ratios are kept.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.phase = FetchPhase::Failed(reason.into());
        self.functions.clear();
        self.available_spots = 0;
        self.recompute();
    }

    /// Apply a user edit: update the ratio, persist the whole map, then
    /// recompute from the current snapshot.
    ///
    /// Returns `false` (and changes nothing) for a non-finite ratio.
    pub fn set_ratio(
        &mut self,
        function_id: &str,
        sqm_per_spot: f64,
        store: &mut RatioStore,
    ) -> bool {
        if !sqm_per_spot.is_finite() {
            debug!(
                "Ignoring non-finite ratio {} for function '{}'",
                sqm_per_spot, function_id
            );
            return false;
        }
        self.ratios.insert(function_id, sqm_per_spot);
        if let Err(e) = store.save(&self.ratios) {
            warn!("Failed to persist parking ratios: {}", e);
        }
        self.recompute();
        true
    }

    /// Rebuild demand and balance from the snapshot and ratios.
    pub fn recompute(&mut self) {
        self.demand = compute_demand(&self.functions, &self.ratios);
        self.balance = evaluate(total_demand(&self.demand), self.available_spots);
    }

    /// Measured floor area across all functions of the snapshot.
    pub fn total_area(&self) -> f64 {
        total_area(&self.functions)
    }
}

// =============================================================================
// Resources: metrics source and in-flight fetch
// =============================================================================

/// The host metrics provider the fetch systems call.
#[derive(Resource, Clone)]
pub struct MetricsSource(pub Arc<dyn MetricsProvider>);

impl MetricsSource {
    pub fn new(provider: impl MetricsProvider) -> Self {
        Self(Arc::new(provider))
    }
}

/// The one outstanding metrics fetch. Removing the resource drops (and so
/// cancels) the task.
#[derive(Resource)]
pub struct MetricsFetch {
    task: Task<Result<HostMetrics, MetricsError>>,
    started_at: Duration,
}

/// Whether a fetch started at `started_at` has been pending for `timeout` by `now`.
pub fn fetch_timed_out(started_at: Duration, now: Duration, timeout: Duration) -> bool {
    now.saturating_sub(started_at) >= timeout
}

// =============================================================================
// Events
// =============================================================================

/// A user edit of one function's area-per-spot ratio.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SetRatioEvent {
    pub function_id: String,
    pub sqm_per_spot: f64,
}

/// Ask the host for fresh metrics. Ignored while a fetch is in flight.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RefreshMetricsEvent;

// =============================================================================
// Systems
// =============================================================================

fn start_fetch(
    commands: &mut Commands,
    source: Option<&MetricsSource>,
    demand: &mut ParkingDemand,
    now: Duration,
) {
    let Some(source) = source else {
        warn!("No metrics provider configured; parking demand cannot load");
        demand.fail("no metrics provider configured");
        return;
    };
    let provider = Arc::clone(&source.0);
    let task = AsyncComputeTaskPool::get().spawn(async move { provider.calculate() });
    commands.insert_resource(MetricsFetch {
        task,
        started_at: now,
    });
    demand.begin_fetch();
    info!("Requested area metrics from host");
}

/// Startup system: the single fetch every session begins with.
pub fn request_initial_metrics(
    mut commands: Commands,
    source: Option<Res<MetricsSource>>,
    time: Res<Time>,
    mut demand: ResMut<ParkingDemand>,
) {
    start_fetch(&mut commands, source.as_deref(), &mut demand, time.elapsed());
}

/// System: start a new fetch when a refresh is requested and none is pending.
pub fn handle_refresh_requests(
    mut commands: Commands,
    mut requests: EventReader<RefreshMetricsEvent>,
    in_flight: Option<Res<MetricsFetch>>,
    source: Option<Res<MetricsSource>>,
    time: Res<Time>,
    mut demand: ResMut<ParkingDemand>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if in_flight.is_some() {
        debug!("Refresh ignored: a metrics fetch is already in flight");
        return;
    }
    start_fetch(&mut commands, source.as_deref(), &mut demand, time.elapsed());
}

/// System: poll the in-flight fetch and apply its result, or fail it once
/// the timeout elapses.
pub fn poll_metrics_fetch(
    mut commands: Commands,
    fetch: Option<ResMut<MetricsFetch>>,
    time: Res<Time>,
    settings: Res<DemandSettings>,
    mut demand: ResMut<ParkingDemand>,
    mut store: ResMut<RatioStore>,
) {
    let Some(mut fetch) = fetch else {
        return;
    };

    match block_on(futures_lite::future::poll_once(&mut fetch.task)) {
        Some(Ok(metrics)) => {
            commands.remove_resource::<MetricsFetch>();
            demand.apply_metrics(&metrics, &mut store, settings.default_sqm_per_spot);
            info!(
                "Parking demand ready: {} function(s), {} spot(s) required, {} available",
                demand.functions.len(),
                demand.balance.total_demand,
                demand.balance.available_spots
            );
        }
        Some(Err(e)) => {
            commands.remove_resource::<MetricsFetch>();
            warn!("Area metrics fetch failed: {}", e);
            demand.fail(e.to_string());
        }
        None => {
            if fetch_timed_out(fetch.started_at, time.elapsed(), settings.fetch_timeout) {
                commands.remove_resource::<MetricsFetch>();
                let err = MetricsError::TimedOut(settings.fetch_timeout);
                warn!("{}", err);
                demand.fail(err.to_string());
            }
        }
    }
}

/// System: apply ratio edits in the order they were sent.
pub fn apply_ratio_edits(
    mut edits: EventReader<SetRatioEvent>,
    mut demand: ResMut<ParkingDemand>,
    mut store: ResMut<RatioStore>,
) {
    for edit in edits.read() {
        demand.set_ratio(&edit.function_id, edit.sqm_per_spot, &mut store);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct ParkingDemandPlugin;

impl Plugin for ParkingDemandPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DemandSettings>()
            .init_resource::<ParkingDemand>()
            .init_resource::<RatioStore>()
            .add_event::<SetRatioEvent>()
            .add_event::<RefreshMetricsEvent>()
            .add_systems(Startup, request_initial_metrics)
            .add_systems(
                Update,
                (
                    handle_refresh_requests,
                    poll_metrics_fetch,
                    apply_ratio_edits,
                )
                    .chain(),
            );
    }
}
