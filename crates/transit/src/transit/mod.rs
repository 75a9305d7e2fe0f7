//! Scheduled transit along a single corridor.
//!
//! A dispatcher releases a vehicle every headway. Each vehicle runs the
//! ordered stops it snapshotted at spawn, docking at each one for a fixed
//! dwell. On docking, riders queued at that stop board first-come-first-served
//! up to the free seats and pay a fare. At the final stop everyone aboard
//! leaves the city. Vehicles retire once past the world-exit boundary.
//!
//! ## Data model
//! - `Stop` / `StopRegistry`: stops placed along the corridor with their waiting queues
//! - `Vehicle`: a `Travelling` / `Docked` state machine with a capacity-bounded manifest
//! - `DispatchScheduler`: the fixed-headway spawner
//! - `TransitService`: the per-tick facade the host calls with `advance(dt)`
//!
//! ## Collaborators
//! - `AgentLedger`: the citizen pool (`CitizenRoster` by default)
//! - `EconomyBridge`: fares, population, and notifications (`CityLedger` in the ECS)
//!
//! ## Costs
//! - Fare revenue: $3 per ride

mod arrivals;
mod boarding;
mod dispatch;
mod ledger;
mod service;
mod stops;
mod systems;
mod types;
mod vehicle;


// Re-export all public items so external code sees a flat API.
pub use arrivals::dispatch_riders;
pub use boarding::{board, unload};
pub use dispatch::{Dispatch, DispatchScheduler};
pub use ledger::{AgentLedger, EconomyBridge};
pub use service::TransitService;
pub use stops::{Stop, StopRegistry};
pub use systems::{
    advance_transit, handle_teardown, send_riders_to_stops, CityLedger, TransitPlugin,
    TransitTeardown,
};
pub use types::*;
pub use vehicle::{StepOutcome, Vehicle};
