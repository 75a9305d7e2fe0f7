//! Integration tests for the transit simulation using the `TestCity` harness.
//!
//! These tests spin up a headless Bevy App with `TransitSimulationPlugin` and
//! drive the fixed schedule tick by tick.

mod transit_scenarios;

use crate::economy::CityBudget;
use crate::test_harness::TestCity;
use crate::time_of_day::GameClock;
use crate::transit::{StopRegistry, TransitService};
use crate::{SlowTickTimer, TickCounter};

// =============================================================================
// Plugin wiring
// =============================================================================

#[test]
fn test_plugin_initializes_resources() {
    let city = TestCity::new();
    assert!(city.transit().vehicles().is_empty());
    assert!(city.resource::<StopRegistry>().is_empty());
    assert_eq!(city.resource::<CityBudget>().treasury, 10000.0);
    assert_eq!(city.resource::<TickCounter>().0, 0);
    assert_eq!(
        city.resource::<TransitService>().config(),
        &crate::config::TransitConfig::default()
    );
}

#[test]
fn test_each_tick_runs_one_fixed_step() {
    let mut city = TestCity::new();
    let start = city.resource::<GameClock>().minute_of_day;
    city.tick(60);
    assert_eq!(city.resource::<TickCounter>().0, 60);
    assert_eq!(city.resource::<GameClock>().minute_of_day, start + 60);
}

#[test]
fn test_slow_timer_fires_once_per_cycle() {
    let mut city = TestCity::new();
    city.tick_slow_cycle();
    assert!(city.resource::<SlowTickTimer>().should_run());
}
