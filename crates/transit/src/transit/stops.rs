//! Stop placement, ordering, and the per-stop waiting queues.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::citizen::CitizenId;

use super::types::{RouteStop, StopId, MIN_STOP_SPACING};

/// A stop placed along the transit corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    /// Position along the corridor in world units.
    pub position: f32,
    /// Human-readable stop name.
    pub name: String,
    /// Citizens waiting here, in arrival order. No duplicates.
    waiting: Vec<CitizenId>,
    /// Cumulative boardings at this stop.
    pub total_boardings: u64,
}

impl Stop {
    pub fn waiting(&self) -> &[CitizenId] {
        &self.waiting
    }

    pub fn is_waiting(&self, citizen: CitizenId) -> bool {
        self.waiting.contains(&citizen)
    }
}

/// All stops on the corridor. Stops outlive every vehicle that visits them.
#[derive(Resource, Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
    next_stop_id: StopId,
}

impl StopRegistry {
    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    /// Place a stop at `position`. Returns `None` if the position is not finite
    /// or another stop is closer than `MIN_STOP_SPACING`.
    pub fn add_stop(&mut self, position: f32, name: String) -> Option<StopId> {
        if !position.is_finite() {
            return None;
        }
        if self
            .stops
            .iter()
            .any(|s| (s.position - position).abs() < MIN_STOP_SPACING)
        {
            return None;
        }

        let id = self.next_stop_id;
        self.next_stop_id += 1;
        self.stops.push(Stop {
            id,
            position,
            name,
            waiting: Vec::new(),
            total_boardings: 0,
        });
        Some(id)
    }

    /// Remove a stop and its waiting queue. Citizens that were queued keep
    /// their stale assignment and are simply never picked up.
    pub fn remove_stop(&mut self, id: StopId) -> bool {
        let before = self.stops.len();
        self.stops.retain(|s| s.id != id);
        self.stops.len() < before
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops sorted by ascending position (ties broken by id).
    pub fn ordered_stops(&self) -> Vec<&Stop> {
        let mut ordered: Vec<&Stop> = self.stops.iter().collect();
        ordered.sort_by(|a, b| a.position.total_cmp(&b.position).then(a.id.cmp(&b.id)));
        ordered
    }

    /// Snapshot of the ordered stops for a vehicle route.
    pub fn route_snapshot(&self) -> Vec<RouteStop> {
        self.ordered_stops()
            .into_iter()
            .map(|s| RouteStop {
                id: s.id,
                position: s.position,
            })
            .collect()
    }

    /// Find the stop nearest to `position` within `max_distance`.
    pub fn nearest_stop(&self, position: f32, max_distance: f32) -> Option<&Stop> {
        self.stops
            .iter()
            .filter(|s| (s.position - position).abs() <= max_distance)
            .min_by(|a, b| {
                (a.position - position)
                    .abs()
                    .total_cmp(&(b.position - position).abs())
                    .then(a.id.cmp(&b.id))
            })
    }

    pub fn waiting_at(&self, id: StopId) -> &[CitizenId] {
        self.get(id).map(Stop::waiting).unwrap_or(&[])
    }

    /// Total citizens waiting across all stops.
    pub fn total_waiting(&self) -> usize {
        self.stops.iter().map(|s| s.waiting.len()).sum()
    }

    // -------------------------------------------------------------------------
    // Waiting queues
    // -------------------------------------------------------------------------

    /// Append a citizen to a stop's queue. Returns `false` if the stop does not
    /// exist or the citizen is already queued anywhere.
    pub fn enqueue_waiting(&mut self, stop: StopId, citizen: CitizenId) -> bool {
        if self.stops.iter().any(|s| s.is_waiting(citizen)) {
            return false;
        }
        match self.stops.iter_mut().find(|s| s.id == stop) {
            Some(s) => {
                s.waiting.push(citizen);
                true
            }
            None => false,
        }
    }

    /// Remove up to `limit` citizens accepted by `eligible` from the front of a
    /// stop's queue, preserving the order of those left behind.
    pub(crate) fn take_waiting(
        &mut self,
        stop: StopId,
        limit: usize,
        mut eligible: impl FnMut(CitizenId) -> bool,
    ) -> Vec<CitizenId> {
        let Some(s) = self.stops.iter_mut().find(|s| s.id == stop) else {
            return Vec::new();
        };

        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(s.waiting.len());
        for citizen in s.waiting.drain(..) {
            if taken.len() < limit && eligible(citizen) {
                taken.push(citizen);
            } else {
                kept.push(citizen);
            }
        }
        s.waiting = kept;
        taken
    }

    pub(crate) fn record_boardings(&mut self, stop: StopId, count: u32) {
        if let Some(s) = self.stops.iter_mut().find(|s| s.id == stop) {
            s.total_boardings += count as u64;
        }
    }
}
