//! `TransitService`: the per-tick facade over scheduler, vehicles, and boarding.

use bevy::prelude::*;

use crate::config::TransitConfig;

use super::boarding::{board, unload};
use super::dispatch::{Dispatch, DispatchScheduler};
use super::ledger::{AgentLedger, EconomyBridge};
use super::stops::StopRegistry;
use super::types::{BoardingEvent, TransitStats, TransitTick, VehicleId, VehicleSnapshot};
use super::vehicle::{StepOutcome, Vehicle};

/// Owns every live vehicle and drives them once per fixed tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct TransitService {
    config: TransitConfig,
    scheduler: DispatchScheduler,
    /// Live vehicles in spawn order.
    vehicles: Vec<Vehicle>,
    stats: TransitStats,
}

impl TransitService {
    pub fn new(config: TransitConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Run one simulation tick of `dt_seconds`.
    ///
    /// Phases run in a fixed order: dispatch, then each vehicle in spawn order
    /// (with boarding right after its dock transition), then retirement.
    pub fn advance(
        &mut self,
        dt_seconds: f32,
        stops: &mut StopRegistry,
        agents: &mut impl AgentLedger,
        economy: &mut impl EconomyBridge,
    ) -> TransitTick {
        let mut tick = TransitTick::default();
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            warn!("TransitService: ignoring invalid tick delta {}", dt_seconds);
            return tick;
        }

        // Dispatch
        let dt_minutes = self.config.sim_minutes(dt_seconds);
        match self.scheduler.maybe_spawn(dt_minutes, stops, &self.config) {
            Dispatch::Spawned(vehicle) => {
                info!(
                    "Dispatched {} {} with {} stops",
                    vehicle.kind().label(),
                    vehicle.id(),
                    vehicle.route().len()
                );
                economy.notify(format!(
                    "A {} is arriving, serving {} stops",
                    vehicle.kind().label(),
                    vehicle.route().len()
                ));
                self.stats.vehicles_spawned += 1;
                tick.spawned = Some(vehicle.id());
                self.vehicles.push(vehicle);
            }
            Dispatch::Skipped => {
                debug!("No transit stops placed; skipping dispatch window");
                self.stats.skipped_spawns += 1;
            }
            Dispatch::NotDue => {}
        }

        // Movement and boarding
        for vehicle in &mut self.vehicles {
            let StepOutcome::Docked(stop) = vehicle.step(dt_seconds, &self.config) else {
                continue;
            };
            let result = board(vehicle, stops, agents, economy, self.config.fare_per_rider);
            self.stats.cumulative_boardings += result.boarded as u64;
            self.stats.cumulative_departures += result.unloaded as u64;
            self.stats.cumulative_fare_revenue += result.fare_collected;
            tick.boardings.push(BoardingEvent {
                vehicle: vehicle.id(),
                stop,
                result,
            });
        }

        // Retirement
        let mut live = Vec::with_capacity(self.vehicles.len());
        for mut vehicle in self.vehicles.drain(..) {
            if !vehicle.has_exited() {
                live.push(vehicle);
                continue;
            }
            if vehicle.passengers() > 0 {
                warn!(
                    "Vehicle {} left the world with {} riders aboard; unloading",
                    vehicle.id(),
                    vehicle.passengers()
                );
                let departed = unload(&mut vehicle, agents, economy);
                tick.forced_unloads += departed;
                self.stats.cumulative_departures += departed as u64;
            }
            info!("Retired {} {}", vehicle.kind().label(), vehicle.id());
            self.stats.vehicles_retired += 1;
            tick.retired.push(vehicle.id());
        }
        self.vehicles = live;

        tick
    }

    /// Release every live vehicle, handing riders back to the agent pool.
    /// Returns the number of riders released.
    pub fn teardown(&mut self, agents: &mut impl AgentLedger) -> u32 {
        let mut released = 0u32;
        for mut vehicle in self.vehicles.drain(..) {
            for citizen in vehicle.drain_manifest() {
                agents.release(citizen);
                released += 1;
            }
        }
        self.scheduler.reset();
        info!("Transit teardown released {} riders", released);
        released
    }

    /// Put an already-built vehicle on the corridor, bypassing the scheduler.
    #[cfg(test)]
    pub(crate) fn adopt_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    // -------------------------------------------------------------------------
    // Read-only queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    pub fn snapshots(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(Vehicle::snapshot).collect()
    }

    pub fn stats(&self) -> &TransitStats {
        &self.stats
    }

    /// Game minutes until the next dispatch window.
    pub fn minutes_until_next_dispatch(&self) -> f32 {
        (self.config.spawn_interval_minutes - self.scheduler.minutes_since_last_spawn()).max(0.0)
    }

    /// Total riders currently aboard any vehicle.
    pub fn riders_aboard(&self) -> u32 {
        self.vehicles.iter().map(Vehicle::passengers).sum()
    }
}
