//! Fixed-headway vehicle spawner driven by game minutes.

use crate::config::TransitConfig;

use super::stops::StopRegistry;
use super::types::VehicleId;
use super::vehicle::Vehicle;

/// Result of one scheduler tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Headway has not elapsed yet.
    NotDue,
    /// Headway elapsed but there was nothing to serve.
    Skipped,
    Spawned(Vehicle),
}

/// Accumulates game time and releases a new vehicle every headway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchScheduler {
    minutes_since_last_spawn: f32,
    next_vehicle_id: VehicleId,
}

impl DispatchScheduler {
    /// Add `dt_minutes` of game time and spawn a vehicle if the headway elapsed.
    ///
    /// The accumulator resets whenever the headway elapses, including when no
    /// stops exist, so an empty corridor is only re-checked once per headway.
    pub fn maybe_spawn(
        &mut self,
        dt_minutes: f32,
        stops: &StopRegistry,
        config: &TransitConfig,
    ) -> Dispatch {
        self.minutes_since_last_spawn += dt_minutes.max(0.0);
        if self.minutes_since_last_spawn < config.spawn_interval_minutes {
            return Dispatch::NotDue;
        }
        self.minutes_since_last_spawn = 0.0;

        match Vehicle::spawn(self.next_vehicle_id, stops.route_snapshot(), config) {
            Some(vehicle) => {
                self.next_vehicle_id += 1;
                Dispatch::Spawned(vehicle)
            }
            None => Dispatch::Skipped,
        }
    }

    pub fn minutes_since_last_spawn(&self) -> f32 {
        self.minutes_since_last_spawn
    }

    /// Restart the headway without forgetting issued vehicle ids.
    pub fn reset(&mut self) {
        self.minutes_since_last_spawn = 0.0;
    }
}
