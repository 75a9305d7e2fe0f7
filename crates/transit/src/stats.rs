use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Default, Debug, Clone, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    /// Residents that left the city by transit.
    pub departed_by_transit: u64,
}

impl CityStats {
    /// Decrease population by `count`, never below zero.
    pub fn remove_population(&mut self, count: u32) {
        let removed = count.min(self.population);
        self.population -= removed;
        self.departed_by_transit += count as u64;
    }
}
