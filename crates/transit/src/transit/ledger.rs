//! Narrow interfaces the transit core uses to touch state it does not own.

use crate::citizen::{CitizenId, TripState};

use super::types::StopId;

/// The externally-owned pool of citizens.
///
/// Transit only reads where a citizen is and which stop they are headed for,
/// and only performs the `Waiting -> Aboard -> Departed` transitions.
pub trait AgentLedger {
    /// Corridor position of the citizen, if they are still in the pool.
    fn position(&self, id: CitizenId) -> Option<f32>;

    /// The stop the citizen intends to board at. A lookup key, never ownership.
    fn assigned_stop(&self, id: CitizenId) -> Option<StopId>;

    fn trip_state(&self, id: CitizenId) -> Option<TripState>;

    fn set_trip_state(&mut self, id: CitizenId, state: TripState);

    /// Remove the citizen from the active pool. Returns `false` if they were not in it.
    fn depart(&mut self, id: CitizenId) -> bool;

    /// Hand back a citizen whose vehicle was torn down before their trip ended.
    fn release(&mut self, id: CitizenId);
}

/// Write access to the shared city ledger and notification sink.
pub trait EconomyBridge {
    fn credit(&mut self, amount: f64);

    fn notify(&mut self, message: String);

    /// Subtract departed riders from the population counter.
    fn remove_population(&mut self, count: u32);
}
