//! Per-vehicle movement and docking state machine.

use crate::citizen::CitizenId;
use crate::config::TransitConfig;

use super::types::{
    Heading, Manifest, RouteStop, StopId, VehicleId, VehicleKind, VehicleSnapshot, VehicleState,
};

/// What a single `Vehicle::step` did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still travelling.
    Moving,
    /// Just arrived at this stop. Boarding runs once for this event.
    Docked(StopId),
    /// Still docked, dwell timer running.
    Dwelling,
    /// Dwell finished; left this stop.
    Departed(StopId),
    /// Past the last stop and beyond the world-exit boundary.
    Exited,
}

/// A vehicle running along a route snapshotted at spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: VehicleId,
    kind: VehicleKind,
    position: f32,
    heading: Heading,
    speed: f32,
    capacity: u32,
    exit_position: f32,
    /// Stops in visiting order. Never mutated after spawn.
    route: Vec<RouteStop>,
    current_stop_index: usize,
    manifest: Manifest,
    state: VehicleState,
}

impl Vehicle {
    /// Create a vehicle at the world-entry boundary. Returns `None` for an empty route.
    pub fn spawn(id: VehicleId, mut route: Vec<RouteStop>, config: &TransitConfig) -> Option<Self> {
        if route.is_empty() {
            return None;
        }
        let heading = Heading::between(config.entry_position, config.exit_position);
        if heading == Heading::Reverse {
            route.reverse();
        }
        Some(Self {
            id,
            kind: config.vehicle_kind,
            position: config.entry_position,
            heading,
            speed: config.speed.max(0.0),
            capacity: config.capacity,
            exit_position: config.exit_position,
            route,
            current_stop_index: 0,
            manifest: Manifest::with_capacity(config.capacity as usize),
            state: VehicleState::Travelling,
        })
    }

    // -------------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------------

    /// Advance the vehicle by `dt` seconds.
    pub fn step(&mut self, dt: f32, config: &TransitConfig) -> StepOutcome {
        match self.state {
            VehicleState::Docked { dwell } => {
                let dwell = dwell + dt;
                if dwell >= config.dwell_seconds {
                    let stop = self.route[self.current_stop_index].id;
                    self.current_stop_index += 1;
                    self.state = VehicleState::Travelling;
                    StepOutcome::Departed(stop)
                } else {
                    self.state = VehicleState::Docked { dwell };
                    StepOutcome::Dwelling
                }
            }
            VehicleState::Travelling => self.travel(dt, config.arrival_radius.max(f32::EPSILON)),
        }
    }

    fn travel(&mut self, dt: f32, arrival_radius: f32) -> StepOutcome {
        self.skip_passed_stops(arrival_radius);
        let travel = self.speed * dt;

        let Some(target) = self.next_stop() else {
            self.position += self.heading.sign() * travel;
            return if self.has_exited() {
                StepOutcome::Exited
            } else {
                StepOutcome::Moving
            };
        };

        if self.distance_to(target) >= arrival_radius {
            // Never carry a vehicle past the stop it is heading for.
            let ahead = (target.position - self.position) * self.heading.sign();
            if travel >= ahead {
                self.position = target.position;
            } else {
                self.position += self.heading.sign() * travel;
            }
        }

        if self.distance_to(target) < arrival_radius {
            self.state = VehicleState::Docked { dwell: 0.0 };
            StepOutcome::Docked(target.id)
        } else {
            StepOutcome::Moving
        }
    }

    /// Stops already behind the vehicle (possible if the entry boundary lies
    /// past a stop) can never be reached; move the pointer beyond them.
    fn skip_passed_stops(&mut self, arrival_radius: f32) {
        while let Some(target) = self.next_stop() {
            let ahead = (target.position - self.position) * self.heading.sign();
            if ahead > -arrival_radius {
                break;
            }
            self.current_stop_index += 1;
        }
    }

    fn distance_to(&self, stop: RouteStop) -> f32 {
        (self.position - stop.position).abs()
    }

    /// The stop the vehicle is travelling towards or docked at.
    pub fn next_stop(&self) -> Option<RouteStop> {
        self.route.get(self.current_stop_index).copied()
    }

    /// The stop the vehicle is docked at, if docked.
    pub fn docked_stop(&self) -> Option<RouteStop> {
        if self.state.is_docked() {
            self.next_stop()
        } else {
            None
        }
    }

    /// Docked at the final stop of the route.
    pub fn at_last_stop(&self) -> bool {
        self.state.is_docked() && self.current_stop_index + 1 == self.route.len()
    }

    /// Every stop visited and the world-exit boundary passed.
    pub fn has_exited(&self) -> bool {
        self.current_stop_index >= self.route.len()
            && (self.position - self.exit_position) * self.heading.sign() >= 0.0
    }

    // -------------------------------------------------------------------------
    // Manifest
    // -------------------------------------------------------------------------

    /// Put a citizen aboard. Refused when full or already aboard.
    pub(crate) fn admit(&mut self, citizen: CitizenId) -> bool {
        if self.available_seats() == 0 || self.is_aboard(citizen) {
            return false;
        }
        self.manifest.push(citizen);
        true
    }

    /// Empty the manifest, handing its entries to the caller.
    pub(crate) fn drain_manifest(&mut self) -> Manifest {
        std::mem::take(&mut self.manifest)
    }

    pub fn is_aboard(&self, citizen: CitizenId) -> bool {
        self.manifest.contains(&citizen)
    }

    pub fn available_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.passengers())
    }

    pub fn passengers(&self) -> u32 {
        self.manifest.len() as u32
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current_stop_index(&self) -> usize {
        self.current_stop_index
    }

    pub fn route(&self) -> &[RouteStop] {
        &self.route
    }

    pub fn manifest(&self) -> &[CitizenId] {
        &self.manifest
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            heading: self.heading,
            state: self.state,
            current_stop_index: self.current_stop_index,
            route_len: self.route.len(),
            passengers: self.passengers(),
            capacity: self.capacity,
        }
    }
}
