//! # TestCity: headless integration test harness for the transit simulation
//!
//! Wraps `bevy::app::App` + `TransitSimulationPlugin` so tests can place stops,
//! queue riders, tick the fixed schedule, and inspect resources without a
//! window or renderer.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::citizen::{CitizenId, CitizenRoster};
use crate::config::TransitConfig;
use crate::economy::CityBudget;
use crate::notifications::NotificationLog;
use crate::sim_rng::SimRng;
use crate::stats::CityStats;
use crate::time_of_day::{GameClock, BASE_TIMESTEP_MS};
use crate::transit::{StopId, StopRegistry, TransitService, TransitTeardown};
use crate::SlowTickTimer;
use crate::TransitSimulationPlugin;

/// A headless Bevy App wrapping `TransitSimulationPlugin` for integration testing.
pub struct TestCity {
    app: App,
    stops: Vec<StopId>,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty corridor with default config, budget, and zero population.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Every update advances virtual time by exactly one fixed step.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            BASE_TIMESTEP_MS,
        )));
        app.add_plugins(TransitSimulationPlugin);

        // The first update only primes the clocks; no fixed step runs.
        app.update();

        Self {
            app,
            stops: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // World Setup (builder pattern: consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Replace the transit config. Drops any live vehicles.
    pub fn with_config(mut self, config: TransitConfig) -> Self {
        self.app
            .world_mut()
            .insert_resource(TransitService::new(config));
        self
    }

    /// Place a stop at `position`. Stops are numbered in placement order for
    /// `stop_id`.
    pub fn with_stop(mut self, position: f32) -> Self {
        let name = format!("Stop {}", self.stops.len() + 1);
        let mut registry = self.app.world_mut().resource_mut::<StopRegistry>();
        if let Some(id) = registry.add_stop(position, name) {
            self.stops.push(id);
        }
        self
    }

    /// Queue `count` new citizens at the `index`-th placed stop.
    pub fn with_waiting_citizens(mut self, index: usize, count: usize) -> Self {
        let stop = self.stop_id(index);
        let world = self.app.world_mut();
        world.resource_scope(|world, mut roster: Mut<CitizenRoster>| {
            let mut registry = world.resource_mut::<StopRegistry>();
            let Some(position) = registry.get(stop).map(|s| s.position) else {
                return;
            };
            for _ in 0..count {
                let id = roster.admit(position);
                if registry.enqueue_waiting(stop, id) {
                    roster.send_to_stop(id, stop);
                }
            }
        });
        self
    }

    /// Add `count` idle citizens at `position`.
    pub fn with_walking_citizens(mut self, position: f32, count: usize) -> Self {
        let mut roster = self.app.world_mut().resource_mut::<CitizenRoster>();
        for _ in 0..count {
            roster.admit(position);
        }
        self
    }

    /// Set the city treasury to the given amount.
    pub fn with_budget(mut self, treasury: f64) -> Self {
        self.app.world_mut().resource_mut::<CityBudget>().treasury = treasury;
        self
    }

    pub fn with_population(mut self, population: u32) -> Self {
        self.app.world_mut().resource_mut::<CityStats>().population = population;
        self
    }

    /// Seed rider arrivals.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().resource_mut::<SimRng>().reseed(seed);
        self
    }

    /// Set the game speed multiplier. The fixed step follows on the next update.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.app.world_mut().resource_mut::<GameClock>().speed = speed;
        self
    }

    /// Set the time of day (0.0..24.0).
    pub fn with_time(mut self, hour: f32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<GameClock>()
            .set_hour(hour);
        self
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run `n` app updates of 100ms. At 1x speed each is one fixed tick
    /// (one game minute).
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run until the SlowTickTimer fires at least once (~100 ticks).
    pub fn tick_slow_cycle(&mut self) {
        self.tick(SlowTickTimer::INTERVAL);
    }

    /// Run ticks until `done` holds, up to `max_ticks`. Returns the ticks run.
    pub fn tick_until(&mut self, max_ticks: u32, mut done: impl FnMut(&TestCity) -> bool) -> u32 {
        for n in 0..max_ticks {
            if done(&*self) {
                return n;
            }
            self.tick(1);
        }
        max_ticks
    }

    pub fn pause(&mut self) {
        self.app.world_mut().resource_mut::<GameClock>().paused = true;
    }

    pub fn resume(&mut self) {
        self.app.world_mut().resource_mut::<GameClock>().paused = false;
    }

    pub fn request_teardown(&mut self) {
        self.app.world_mut().send_event(TransitTeardown);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn transit(&self) -> &TransitService {
        self.resource::<TransitService>()
    }

    pub fn stops(&self) -> &StopRegistry {
        self.resource::<StopRegistry>()
    }

    pub fn roster(&self) -> &CitizenRoster {
        self.resource::<CitizenRoster>()
    }

    pub fn budget(&self) -> &CityBudget {
        self.resource::<CityBudget>()
    }

    pub fn stats(&self) -> &CityStats {
        self.resource::<CityStats>()
    }

    pub fn notifications(&self) -> &NotificationLog {
        self.resource::<NotificationLog>()
    }

    /// Id of the `index`-th stop placed with `with_stop`.
    pub fn stop_id(&self, index: usize) -> StopId {
        self.stops[index]
    }

    pub fn waiting_at(&self, index: usize) -> &[CitizenId] {
        self.stops().waiting_at(self.stop_id(index))
    }

    /// Game minutes elapsed since day 1, 00:00.
    pub fn game_minutes(&self) -> u32 {
        let clock = self.resource::<GameClock>();
        (clock.day - 1) * 24 * 60 + clock.minute_of_day
    }

    pub fn vehicle_count(&self) -> usize {
        self.transit().vehicles().len()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_vehicle_count(&self, expected: usize) {
        let count = self.vehicle_count();
        assert_eq!(count, expected, "Expected {expected} vehicles, got {count}");
    }

    pub fn assert_population(&self, expected: u32) {
        let population = self.stats().population;
        assert_eq!(
            population, expected,
            "Expected population {expected}, got {population}"
        );
    }

    /// Assert treasury is above a given amount.
    pub fn assert_budget_above(&self, amount: f64) {
        let treasury = self.budget().treasury;
        assert!(
            treasury > amount,
            "Expected treasury > {amount}, got {treasury}"
        );
    }

    pub fn assert_waiting(&self, index: usize, expected: usize) {
        let waiting = self.waiting_at(index).len();
        assert_eq!(
            waiting, expected,
            "Expected {expected} waiting at stop {index}, got {waiting}"
        );
    }
}
