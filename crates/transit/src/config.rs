use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::transit::{
    VehicleKind, ARRIVAL_RADIUS, DWELL_SECONDS, FARE_PER_RIDER, MAX_WAITING_PER_STOP,
    MAX_WALK_TO_STOP, RIDER_ARRIVAL_CHANCE, SIM_MINUTES_PER_SECOND, SPAWN_INTERVAL_MINUTES,
    VEHICLE_CAPACITY, VEHICLE_SPEED, WORLD_ENTRY_POSITION, WORLD_EXIT_POSITION,
};

pub const GRID_WIDTH: usize = 256;
pub const CELL_SIZE: f32 = 16.0;
pub const WORLD_WIDTH: f32 = GRID_WIDTH as f32 * CELL_SIZE;

/// Tunable parameters of the transit corridor.
///
/// Every field falls back to the matching constant in [`crate::transit`], so a
/// config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub capacity: u32,
    pub fare_per_rider: f64,
    pub dwell_seconds: f32,
    pub spawn_interval_minutes: f32,
    /// World units per second.
    pub speed: f32,
    pub arrival_radius: f32,
    pub entry_position: f32,
    pub exit_position: f32,
    pub sim_minutes_per_second: f32,
    pub vehicle_kind: VehicleKind,
    pub rider_arrival_chance: f64,
    pub max_walk_to_stop: f32,
    pub max_waiting_per_stop: usize,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            capacity: VEHICLE_CAPACITY,
            fare_per_rider: FARE_PER_RIDER,
            dwell_seconds: DWELL_SECONDS,
            spawn_interval_minutes: SPAWN_INTERVAL_MINUTES,
            speed: VEHICLE_SPEED,
            arrival_radius: ARRIVAL_RADIUS,
            entry_position: WORLD_ENTRY_POSITION,
            exit_position: WORLD_EXIT_POSITION,
            sim_minutes_per_second: SIM_MINUTES_PER_SECOND,
            vehicle_kind: VehicleKind::default(),
            rider_arrival_chance: RIDER_ARRIVAL_CHANCE,
            max_walk_to_stop: MAX_WALK_TO_STOP,
            max_waiting_per_stop: MAX_WAITING_PER_STOP,
        }
    }
}

impl TransitConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Parse a config from JSON, logging a warning and returning the defaults on failure.
    pub fn from_json_or_default(text: &str) -> Self {
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "TransitConfig: failed to parse {} bytes, falling back to default: {}",
                    text.len(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Convert a fixed-timestep delta into game minutes.
    pub fn sim_minutes(&self, dt_seconds: f32) -> f32 {
        dt_seconds * self.sim_minutes_per_second
    }
}
