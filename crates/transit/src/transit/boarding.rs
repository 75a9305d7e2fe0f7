//! Capacity-bounded boarding at a docked stop and the final-stop unload.

use bevy::prelude::*;

use crate::citizen::TripState;

use super::ledger::{AgentLedger, EconomyBridge};
use super::stops::StopRegistry;
use super::types::BoardingResult;
use super::vehicle::Vehicle;

/// Board riders waiting at the stop `vehicle` is docked at.
///
/// Must run once per dock event. Riders are taken first-come-first-served,
/// never beyond the free seats, and only if their assigned stop is this one.
/// At the last stop of the route the whole manifest is unloaded afterwards.
pub fn board(
    vehicle: &mut Vehicle,
    stops: &mut StopRegistry,
    agents: &mut impl AgentLedger,
    economy: &mut impl EconomyBridge,
    fare_per_rider: f64,
) -> BoardingResult {
    let Some(stop) = vehicle.docked_stop() else {
        return BoardingResult::default();
    };

    let mut boarded = 0u32;
    let available = vehicle.available_seats();
    if available > 0 {
        let selected = stops.take_waiting(stop.id, available as usize, |citizen| {
            agents.assigned_stop(citizen) == Some(stop.id)
                && agents.trip_state(citizen) == Some(TripState::Waiting)
                && !vehicle.is_aboard(citizen)
        });

        for citizen in selected {
            if vehicle.admit(citizen) {
                agents.set_trip_state(citizen, TripState::Aboard);
                boarded += 1;
            } else {
                // Unreachable while the selection honours the seat count;
                // put the rider back rather than lose them.
                stops.enqueue_waiting(stop.id, citizen);
            }
        }
        stops.record_boardings(stop.id, boarded);
    }

    let fare_collected = boarded as f64 * fare_per_rider;
    if boarded > 0 {
        economy.credit(fare_collected);
        debug!(
            "Vehicle {} boarded {} riders at stop {} (fare {:.2})",
            vehicle.id(),
            boarded,
            stop.id,
            fare_collected
        );
    }

    let unloaded = if vehicle.at_last_stop() {
        unload(vehicle, agents, economy)
    } else {
        0
    };

    BoardingResult {
        boarded,
        fare_collected,
        unloaded,
    }
}

/// Remove every rider from the vehicle and from the city.
///
/// Ignores capacity; drains the full manifest. Population drops by the number
/// of riders that actually left the pool.
pub fn unload(
    vehicle: &mut Vehicle,
    agents: &mut impl AgentLedger,
    economy: &mut impl EconomyBridge,
) -> u32 {
    let mut departed = 0u32;
    for citizen in vehicle.drain_manifest() {
        agents.set_trip_state(citizen, TripState::Departed);
        if agents.depart(citizen) {
            departed += 1;
        }
    }
    if departed > 0 {
        economy.remove_population(departed);
    }
    departed
}
