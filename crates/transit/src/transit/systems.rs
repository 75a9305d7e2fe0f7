//! ECS systems and plugin for the transit feature.

use bevy::prelude::*;

use crate::citizen::CitizenRoster;
use crate::economy::CityBudget;
use crate::notifications::NotificationEvent;
use crate::sim_rng::SimRng;
use crate::stats::CityStats;
use crate::time_of_day::{GameClock, SIM_SECONDS_PER_TICK};
use crate::SlowTickTimer;

use super::arrivals::dispatch_riders;
use super::ledger::EconomyBridge;
use super::service::TransitService;
use super::stops::StopRegistry;

// =============================================================================
// City ledger adapter
// =============================================================================

/// `EconomyBridge` over the city's budget, stats, and notification feed.
pub struct CityLedger<'a, 'w> {
    pub budget: &'a mut CityBudget,
    pub stats: &'a mut CityStats,
    pub notifications: &'a mut EventWriter<'w, NotificationEvent>,
}

impl EconomyBridge for CityLedger<'_, '_> {
    fn credit(&mut self, amount: f64) {
        self.budget.credit_fares(amount);
    }

    fn notify(&mut self, message: String) {
        self.notifications.send(NotificationEvent { text: message });
    }

    fn remove_population(&mut self, count: u32) {
        self.stats.remove_population(count);
    }
}

// =============================================================================
// Events
// =============================================================================

/// Request to release every live vehicle (scene or level unload).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TransitTeardown;

// =============================================================================
// Systems
// =============================================================================

/// Send idle citizens to nearby stops. Runs on the slow tick.
pub fn send_riders_to_stops(
    slow_timer: Res<SlowTickTimer>,
    clock: Res<GameClock>,
    transit: Res<TransitService>,
    mut rng: ResMut<SimRng>,
    mut roster: ResMut<CitizenRoster>,
    mut stops: ResMut<StopRegistry>,
) {
    if !slow_timer.should_run() || clock.paused {
        return;
    }
    let sent = dispatch_riders(
        &mut rng.0,
        &mut roster,
        &mut stops,
        transit.config(),
        clock.is_rush_hour(),
    );
    if sent > 0 {
        debug!("{} citizens headed to transit stops", sent);
    }
}

/// Advance every vehicle by one fixed tick.
pub fn advance_transit(
    clock: Res<GameClock>,
    mut transit: ResMut<TransitService>,
    mut stops: ResMut<StopRegistry>,
    mut roster: ResMut<CitizenRoster>,
    mut budget: ResMut<CityBudget>,
    mut stats: ResMut<CityStats>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    if clock.paused {
        return;
    }
    let mut city = CityLedger {
        budget: &mut budget,
        stats: &mut stats,
        notifications: &mut notifications,
    };
    // Game speed changes how often this runs, not how much game time a tick
    // covers, so the headway stays in step with `GameClock`.
    transit.advance(SIM_SECONDS_PER_TICK, &mut stops, &mut *roster, &mut city);
}

/// Tear down the transit service when requested.
pub fn handle_teardown(
    mut requests: EventReader<TransitTeardown>,
    mut transit: ResMut<TransitService>,
    mut roster: ResMut<CitizenRoster>,
) {
    if requests.read().count() == 0 {
        return;
    }
    transit.teardown(&mut *roster);
}

// =============================================================================
// Plugin
// =============================================================================

pub struct TransitPlugin;

impl Plugin for TransitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransitService>()
            .init_resource::<StopRegistry>()
            .init_resource::<CitizenRoster>()
            .init_resource::<SimRng>()
            .add_event::<TransitTeardown>()
            .add_systems(
                FixedUpdate,
                (handle_teardown, send_riders_to_stops, advance_transit)
                    .chain()
                    .in_set(crate::SimulationSet::Simulation),
            );
    }
}
