use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::stats::CityStats;
use crate::time_of_day::GameClock;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct CityBudget {
    pub treasury: f64,
    /// Fare income since the last monthly rollover.
    pub monthly_transit_income: f64,
    /// Fare income of the last completed month.
    pub last_month_transit_income: f64,
    pub last_collection_day: u32,
}

impl Default for CityBudget {
    fn default() -> Self {
        Self {
            treasury: 10000.0,
            monthly_transit_income: 0.0,
            last_month_transit_income: 0.0,
            last_collection_day: 0,
        }
    }
}

impl CityBudget {
    /// Add fare revenue to the treasury. Non-positive or non-finite amounts are ignored.
    pub fn credit_fares(&mut self, amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.treasury += amount;
        self.monthly_transit_income += amount;
    }
}

/// Roll the monthly transit income counter every 30 days.
pub fn roll_monthly_income(clock: Res<GameClock>, mut budget: ResMut<CityBudget>) {
    if clock.day <= budget.last_collection_day + 30 {
        return;
    }
    budget.last_collection_day = clock.day;
    budget.last_month_transit_income = budget.monthly_transit_income;
    budget.monthly_transit_income = 0.0;
}

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityBudget>()
            .init_resource::<CityStats>()
            .add_systems(
                FixedUpdate,
                roll_monthly_income.in_set(crate::SimulationSet::PostSim),
            );
    }
}
