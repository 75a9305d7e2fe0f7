use bevy::prelude::*;

pub mod citizen;
pub mod config;
pub mod economy;
pub mod notifications;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stats;
pub mod time_of_day;
pub mod transit;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Shared throttle timer for systems that don't need to run every tick.
#[derive(Resource, Default)]
pub struct SlowTickTimer {
    pub counter: u32,
}

impl SlowTickTimer {
    pub const INTERVAL: u32 = 100; // run slow systems every 100 ticks (~10 seconds at 10Hz)

    pub fn tick(&mut self) {
        self.counter += 1;
    }

    pub fn should_run(&self) -> bool {
        self.counter % Self::INTERVAL == 0
    }
}

pub fn tick_slow_timer(mut timer: ResMut<SlowTickTimer>, mut tick: ResMut<TickCounter>) {
    timer.tick();
    tick.0 = tick.0.wrapping_add(1);
}

/// The transit core plus the city resources it reads and writes.
pub struct TransitSimulationPlugin;

impl Plugin for TransitSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<SlowTickTimer>()
            .add_systems(FixedUpdate, tick_slow_timer.in_set(SimulationSet::PreSim));

        app.add_plugins((
            time_of_day::TimeOfDayPlugin,
            economy::EconomyPlugin,
            notifications::NotificationsPlugin,
            transit::TransitPlugin,
        ));
    }
}
