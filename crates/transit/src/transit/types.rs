//! Data types and constants for the scheduled transit system.

use serde::{Deserialize, Serialize};

use crate::citizen::CitizenId;
use crate::config::{CELL_SIZE, WORLD_WIDTH};

// =============================================================================
// Constants
// =============================================================================

/// Maximum passengers per vehicle.
pub const VEHICLE_CAPACITY: u32 = 200;

/// Fare per ride (revenue).
pub const FARE_PER_RIDER: f64 = 3.0;

/// Seconds a vehicle stays docked at a stop before departing.
pub const DWELL_SECONDS: f32 = 3.0;

/// Headway between vehicle spawns in minutes (game time).
pub const SPAWN_INTERVAL_MINUTES: f32 = 60.0;

/// Vehicle speed in world units per second.
pub const VEHICLE_SPEED: f32 = 400.0;

/// Length of a vehicle in world units.
pub const VEHICLE_LENGTH: f32 = 4.0 * CELL_SIZE;

/// A travelling vehicle docks once it is closer than this to its next stop.
pub const ARRIVAL_RADIUS: f32 = VEHICLE_LENGTH;

/// Corridor position where new vehicles enter the world.
pub const WORLD_ENTRY_POSITION: f32 = -VEHICLE_LENGTH * 2.0;

/// Corridor position past which vehicles leave the world.
pub const WORLD_EXIT_POSITION: f32 = WORLD_WIDTH + VEHICLE_LENGTH * 2.0;

/// Game minutes that elapse per second of fixed-timestep time (10 Hz, 1 min/tick).
pub const SIM_MINUTES_PER_SECOND: f32 = 10.0;

/// Two stops may not be placed closer than this.
pub const MIN_STOP_SPACING: f32 = CELL_SIZE;

/// Maximum walking distance from a citizen to a stop (in world units).
/// ~1200m / 16m = 75 cells.
pub const MAX_WALK_TO_STOP: f32 = 75.0 * CELL_SIZE;

/// Chance per slow tick that an idle citizen near a stop heads there.
pub const RIDER_ARRIVAL_CHANCE: f64 = 0.1;

/// Upper bound on citizens queued at a single stop.
pub const MAX_WAITING_PER_STOP: usize = 2 * VEHICLE_CAPACITY as usize;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a transit stop.
pub type StopId = u32;

/// Unique identifier for a spawned vehicle.
pub type VehicleId = u64;

// =============================================================================
// Vehicle descriptors
// =============================================================================

/// Visual variant of a vehicle. Only rendering branches on this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    #[default]
    CommuterTrain,
    FreightTrain,
    Tram,
}

impl VehicleKind {
    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::CommuterTrain => "commuter train",
            VehicleKind::FreightTrain => "freight train",
            VehicleKind::Tram => "tram",
        }
    }
}

/// Direction of travel along the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Towards increasing positions.
    Forward,
    /// Towards decreasing positions.
    Reverse,
}

impl Heading {
    /// Heading that carries a vehicle from `from` towards `to`.
    pub fn between(from: f32, to: f32) -> Self {
        if to >= from {
            Heading::Forward
        } else {
            Heading::Reverse
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Heading::Forward => 1.0,
            Heading::Reverse => -1.0,
        }
    }
}

/// Movement state of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VehicleState {
    Travelling,
    /// Docked at the stop under `current_stop_index`; `dwell` counts seconds docked.
    Docked { dwell: f32 },
}

impl VehicleState {
    pub fn is_docked(self) -> bool {
        matches!(self, VehicleState::Docked { .. })
    }
}

/// A stop as captured in a vehicle's route at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub id: StopId,
    pub position: f32,
}

// =============================================================================
// Results and reports
// =============================================================================

/// Outcome of a single boarding event at a docked stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardingResult {
    /// Riders moved from the stop's waiting set into the manifest.
    pub boarded: u32,
    /// `boarded * fare`, credited to the city once.
    pub fare_collected: f64,
    /// Riders removed from the city because this was the final stop.
    pub unloaded: u32,
}

/// A boarding event together with where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardingEvent {
    pub vehicle: VehicleId,
    pub stop: StopId,
    pub result: BoardingResult,
}

/// Everything that happened during one call to `TransitService::advance`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitTick {
    pub spawned: Option<VehicleId>,
    pub boardings: Vec<BoardingEvent>,
    /// Stragglers force-unloaded while retiring vehicles.
    pub forced_unloads: u32,
    pub retired: Vec<VehicleId>,
}

impl TransitTick {
    pub fn fare_collected(&self) -> f64 {
        self.boardings.iter().map(|b| b.result.fare_collected).sum()
    }

    pub fn boarded(&self) -> u32 {
        self.boardings.iter().map(|b| b.result.boarded).sum()
    }
}

/// Read-only view of a live vehicle, for rendering and UI panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub position: f32,
    pub heading: Heading,
    pub state: VehicleState,
    pub current_stop_index: usize,
    pub route_len: usize,
    pub passengers: u32,
    pub capacity: u32,
}

/// Aggregate statistics for the transit system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitStats {
    pub vehicles_spawned: u64,
    pub vehicles_retired: u64,
    /// Spawn windows that elapsed while no stops existed.
    pub skipped_spawns: u64,
    pub cumulative_boardings: u64,
    pub cumulative_departures: u64,
    pub cumulative_fare_revenue: f64,
}

/// Manifest entries are citizen handles; the vehicle owns them while aboard.
pub type Manifest = Vec<CitizenId>;
