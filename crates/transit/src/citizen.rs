use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::transit::{AgentLedger, StopId};

/// Unique identifier for a citizen in the roster.
pub type CitizenId = u64;

// ---------------------------------------------------------------------------
// Trip state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripState {
    /// Idle in the city, not heading for transit.
    Walking,
    /// Queued at `assigned_stop`.
    Waiting,
    /// In a vehicle's manifest.
    Aboard,
    /// Left the city at the end of a ride.
    Departed,
}

impl TripState {
    pub fn is_riding(self) -> bool {
        matches!(self, Self::Aboard)
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Self::Walking)
    }
}

// ---------------------------------------------------------------------------
// Citizen record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    /// Position along the transit corridor.
    pub position: f32,
    pub assigned_stop: Option<StopId>,
    pub state: TripState,
}

// ---------------------------------------------------------------------------
// Roster resource
// ---------------------------------------------------------------------------

/// The city's pool of citizens that can use transit, ordered by id.
#[derive(Resource, Debug, Clone, Default)]
pub struct CitizenRoster {
    citizens: BTreeMap<CitizenId, Citizen>,
    next_id: CitizenId,
    /// Citizens that have left the city by transit.
    pub departed_total: u64,
}

impl CitizenRoster {
    /// Add a walking citizen at the given corridor position.
    pub fn admit(&mut self, position: f32) -> CitizenId {
        let id = self.next_id;
        self.next_id += 1;
        self.citizens.insert(
            id,
            Citizen {
                id,
                position,
                assigned_stop: None,
                state: TripState::Walking,
            },
        );
        id
    }

    /// Point a citizen at a stop and mark them as waiting there.
    /// The caller is responsible for enqueueing them in the stop's waiting set.
    pub fn send_to_stop(&mut self, id: CitizenId, stop: StopId) -> bool {
        match self.citizens.get_mut(&id) {
            Some(citizen) if citizen.state.is_idle() => {
                citizen.assigned_stop = Some(stop);
                citizen.state = TripState::Waiting;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: CitizenId) -> Option<&Citizen> {
        self.citizens.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Citizen> {
        self.citizens.values()
    }

    /// Ids of idle citizens, in id order.
    pub fn walking(&self) -> Vec<CitizenId> {
        self.citizens
            .values()
            .filter(|c| c.state.is_idle())
            .map(|c| c.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.citizens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
    }

    pub fn count_in_state(&self, state: TripState) -> usize {
        self.citizens.values().filter(|c| c.state == state).count()
    }
}

impl AgentLedger for CitizenRoster {
    fn position(&self, id: CitizenId) -> Option<f32> {
        self.citizens.get(&id).map(|c| c.position)
    }

    fn assigned_stop(&self, id: CitizenId) -> Option<StopId> {
        self.citizens.get(&id).and_then(|c| c.assigned_stop)
    }

    fn trip_state(&self, id: CitizenId) -> Option<TripState> {
        self.citizens.get(&id).map(|c| c.state)
    }

    fn set_trip_state(&mut self, id: CitizenId, state: TripState) {
        if let Some(citizen) = self.citizens.get_mut(&id) {
            citizen.state = state;
        }
    }

    fn depart(&mut self, id: CitizenId) -> bool {
        if self.citizens.remove(&id).is_some() {
            self.departed_total += 1;
            true
        } else {
            false
        }
    }

    fn release(&mut self, id: CitizenId) {
        if let Some(citizen) = self.citizens.get_mut(&id) {
            citizen.state = TripState::Walking;
            citizen.assigned_stop = None;
        }
    }
}
