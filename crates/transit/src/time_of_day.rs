use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed-update rate at 1x speed.
pub const BASE_TIMESTEP_MS: u64 = 100;

/// Game-time seconds covered by one fixed tick, whatever the game speed.
/// Speed only changes how often ticks run, so each tick is always one game
/// minute (see `SIM_MINUTES_PER_SECOND`).
pub const SIM_SECONDS_PER_TICK: f32 = BASE_TIMESTEP_MS as f32 / 1000.0;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Game calendar. One fixed tick is one game minute.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    /// Minutes since midnight, `0..1440`.
    pub minute_of_day: u32,
    pub speed: f32,
    pub paused: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            minute_of_day: 6 * 60,
            speed: 1.0,
            paused: false,
        }
    }
}

impl GameClock {
    /// Clock set to `hour` (fractional hours allowed) on day 1.
    pub fn at_hour(hour: f32) -> Self {
        let mut clock = Self::default();
        clock.set_hour(hour);
        clock
    }

    pub fn set_hour(&mut self, hour: f32) {
        let minutes = (hour.rem_euclid(24.0) * 60.0) as u32;
        self.minute_of_day = minutes.min(MINUTES_PER_DAY - 1);
    }

    /// Advance one game minute. No-op while paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.minute_of_day += 1;
        if self.minute_of_day >= MINUTES_PER_DAY {
            self.minute_of_day = 0;
            self.day += 1;
        }
    }

    /// Speed multiplier actually applied to the fixed step. Paused or
    /// non-positive speeds count as 1x.
    pub fn effective_speed(&self) -> f32 {
        if self.paused || self.speed <= 0.0 {
            1.0
        } else {
            self.speed.clamp(0.25, 16.0)
        }
    }

    pub fn hour(&self) -> f32 {
        self.minute_of_day as f32 / 60.0
    }

    pub fn hour_of_day(&self) -> u32 {
        self.minute_of_day / 60
    }

    /// Morning (7-8) or evening (17-18) commute.
    pub fn is_rush_hour(&self) -> bool {
        matches!(self.hour_of_day(), 7..=8 | 17..=18)
    }

    pub fn formatted(&self) -> String {
        format!(
            "Day {} {:02}:{:02}",
            self.day,
            self.minute_of_day / 60,
            self.minute_of_day % 60
        )
    }
}

pub fn tick_game_clock(mut clock: ResMut<GameClock>) {
    clock.tick();
}

/// Scale the FixedUpdate timestep with the clock speed: 100 ms at 1x,
/// 50 ms at 2x, and so on. Paused keeps the base step.
pub fn sync_fixed_timestep(clock: Res<GameClock>, mut time: ResMut<Time<Fixed>>) {
    if !clock.is_changed() {
        return;
    }
    // Whole nanoseconds so 1x stays exactly on the base step.
    let nanos = (BASE_TIMESTEP_MS * 1_000_000) as f64 / clock.effective_speed() as f64;
    let effective = Duration::from_nanos(nanos.round() as u64);
    if time.timestep() != effective {
        time.set_timestep(effective);
    }
}

pub struct TimeOfDayPlugin;

impl Plugin for TimeOfDayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameClock>()
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(
                BASE_TIMESTEP_MS,
            )))
            .add_systems(Update, sync_fixed_timestep)
            .add_systems(
                FixedUpdate,
                tick_game_clock.in_set(crate::SimulationSet::PreSim),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_rolls_over_to_next_day() {
        let mut clock = GameClock::at_hour(23.75);
        for _ in 0..20 {
            clock.tick();
        }
        assert_eq!(clock.day, 2);
        assert_eq!(clock.minute_of_day, 5);
    }

    #[test]
    fn test_paused_clock_holds() {
        let mut clock = GameClock {
            paused: true,
            ..Default::default()
        };
        clock.tick();
        assert_eq!(clock, GameClock { paused: true, ..Default::default() });
    }

    #[test]
    fn test_rush_hours() {
        assert!(GameClock::at_hour(7.5).is_rush_hour());
        assert!(GameClock::at_hour(18.9).is_rush_hour());
        assert!(!GameClock::at_hour(12.0).is_rush_hour());
        assert!(!GameClock::at_hour(9.0).is_rush_hour());
    }

    #[test]
    fn test_tick_is_one_transit_minute() {
        let config = crate::config::TransitConfig::default();
        assert_eq!(config.sim_minutes(SIM_SECONDS_PER_TICK), 1.0);
    }

    #[test]
    fn test_effective_speed_clamps_and_ignores_pause() {
        let paused = GameClock {
            speed: 4.0,
            paused: true,
            ..Default::default()
        };
        assert_eq!(paused.effective_speed(), 1.0);
        assert_eq!(GameClock { speed: 100.0, ..Default::default() }.effective_speed(), 16.0);
    }

    #[test]
    fn test_formatted() {
        let clock = GameClock {
            day: 3,
            ..GameClock::at_hour(8.5)
        };
        assert_eq!(clock.formatted(), "Day 3 08:30");
    }
}
