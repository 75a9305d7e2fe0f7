//! Idle citizens walking to the nearest stop to wait for a vehicle.

use rand::Rng;

use crate::citizen::CitizenRoster;
use crate::config::TransitConfig;

use super::ledger::AgentLedger;
use super::stops::StopRegistry;

/// Send idle citizens within walking range of a stop to queue there.
///
/// Each idle citizen in range rolls once against the arrival chance (doubled
/// during rush hour). Queues are capped at `max_waiting_per_stop`. Returns the
/// number of citizens sent.
pub fn dispatch_riders(
    rng: &mut impl Rng,
    roster: &mut CitizenRoster,
    stops: &mut StopRegistry,
    config: &TransitConfig,
    rush_hour: bool,
) -> u32 {
    if stops.is_empty() {
        return 0;
    }

    let multiplier = if rush_hour { 2.0 } else { 1.0 };
    let chance = (config.rider_arrival_chance * multiplier).clamp(0.0, 1.0);

    let mut sent = 0u32;
    for citizen in roster.walking() {
        let Some(position) = roster.position(citizen) else {
            continue;
        };
        let Some(stop) = stops.nearest_stop(position, config.max_walk_to_stop) else {
            continue;
        };
        let stop_id = stop.id;
        let queued = stop.waiting().len();

        if !rng.gen_bool(chance) || queued >= config.max_waiting_per_stop {
            continue;
        }
        if !roster.send_to_stop(citizen, stop_id) {
            continue;
        }
        if !stops.enqueue_waiting(stop_id, citizen) {
            // Keep roster and queue in agreement.
            roster.release(citizen);
            continue;
        }
        sent += 1;
    }
    sent
}
