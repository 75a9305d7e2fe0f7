use crate::citizen::TripState;
use crate::config::TransitConfig;
use crate::test_harness::TestCity;
use crate::transit::AgentLedger;

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_first_vehicle_arrives_after_one_headway() {
    let mut city = TestCity::new().with_stop(400.0);

    city.tick(59);
    city.assert_vehicle_count(0);

    city.tick(1);
    city.assert_vehicle_count(1);
    assert_eq!(city.transit().stats().vehicles_spawned, 1);
    assert!(
        city.notifications()
            .active
            .iter()
            .any(|n| n.text.contains("arriving")),
        "Expected an arrival notification"
    );
}

#[test]
fn test_no_stops_means_no_vehicles_across_ten_windows() {
    let mut city = TestCity::new();
    city.tick(600);
    city.assert_vehicle_count(0);
    assert_eq!(city.transit().stats().skipped_spawns, 10);
    assert!(city.notifications().active.is_empty());
}

#[test]
fn test_paused_clock_freezes_transit() {
    let mut city = TestCity::new().with_stop(400.0);
    city.pause();
    city.tick(200);
    city.assert_vehicle_count(0);

    city.resume();
    city.tick(60);
    city.assert_vehicle_count(1);
}

#[test]
fn test_headway_follows_game_clock_at_double_speed() {
    let mut city = TestCity::new().with_speed(2.0).with_stop(400.0);
    let start = city.game_minutes();

    city.tick(20);
    let elapsed = city.game_minutes() - start;
    assert!(elapsed > 20, "2x should run more than one step per update, got {elapsed}");
    city.assert_vehicle_count(0);
    assert_eq!(
        city.transit().minutes_until_next_dispatch(),
        60.0 - elapsed as f32,
        "dispatch timer drifted from the game clock"
    );

    let updates = city.tick_until(100, |c| c.game_minutes() - start >= 70);
    assert!(updates < 100);
    city.assert_vehicle_count(1);
}

#[test]
fn test_headway_follows_game_clock_at_quarter_speed() {
    let mut city = TestCity::new().with_speed(0.25).with_stop(400.0);
    let start = city.game_minutes();

    // At 0.25x a fixed step spans four updates.
    city.tick(200);
    let elapsed = city.game_minutes() - start;
    assert!(elapsed < 60, "expected under one headway, got {elapsed}");
    city.assert_vehicle_count(0);
    assert_eq!(
        city.transit().minutes_until_next_dispatch(),
        60.0 - elapsed as f32
    );
}

// =============================================================================
// Boarding and fares
// =============================================================================

#[test]
fn test_waiting_riders_board_and_pay_into_treasury() {
    let mut city = TestCity::new()
        .with_budget(1000.0)
        .with_population(50)
        .with_stop(400.0)
        .with_stop(2400.0)
        .with_waiting_citizens(0, 50);

    let ticks = city.tick_until(300, |c| c.transit().riders_aboard() > 0);
    assert!(ticks < 300, "vehicle never picked anyone up");

    assert_eq!(city.transit().riders_aboard(), 50);
    city.assert_waiting(0, 0);
    assert_eq!(city.budget().treasury, 1150.0);
    assert_eq!(city.budget().monthly_transit_income, 150.0);
    city.assert_budget_above(1000.0);
    assert_eq!(city.roster().count_in_state(TripState::Aboard), 50);
}

#[test]
fn test_overflow_waits_for_next_vehicle() {
    let config = TransitConfig {
        capacity: 80,
        ..Default::default()
    };
    let mut city = TestCity::new()
        .with_config(config)
        .with_stop(400.0)
        .with_stop(2400.0)
        .with_waiting_citizens(0, 100);

    city.tick_until(300, |c| c.transit().riders_aboard() > 0);
    assert_eq!(city.transit().riders_aboard(), 80);
    city.assert_waiting(0, 20);

    // The next vehicle clears the rest of the queue.
    city.tick_until(300, |c| c.waiting_at(0).is_empty());
    city.assert_waiting(0, 0);
    assert_eq!(city.transit().stats().cumulative_boardings, 100);
}

// =============================================================================
// Departures
// =============================================================================

#[test]
fn test_riders_leave_city_at_last_stop() {
    let mut city = TestCity::new()
        .with_population(100)
        .with_stop(400.0)
        .with_stop(1200.0)
        .with_waiting_citizens(0, 30);

    let ticks = city.tick_until(1000, |c| c.transit().stats().cumulative_departures > 0);
    assert!(ticks < 1000, "riders never reached the last stop");

    city.assert_population(70);
    assert_eq!(city.stats().departed_by_transit, 30);
    assert_eq!(city.roster().departed_total, 30);
    assert!(city.roster().is_empty());
    assert_eq!(city.transit().riders_aboard(), 0);
}

#[test]
fn test_vehicle_retires_after_leaving_the_world() {
    let config = TransitConfig {
        spawn_interval_minutes: 10_000.0,
        ..Default::default()
    };
    let mut city = TestCity::new()
        .with_config(config)
        .with_stop(400.0)
        .with_waiting_citizens(0, 5);

    // One headway of 10_000 minutes at one minute per tick.
    city.tick(10_000);
    city.assert_vehicle_count(1);

    let ticks = city.tick_until(2000, |c| c.transit().stats().vehicles_retired == 1);
    assert!(ticks < 2000, "vehicle never retired");
    city.assert_vehicle_count(0);
    assert_eq!(city.transit().stats().cumulative_departures, 5);
}

// =============================================================================
// Rider arrivals and teardown
// =============================================================================

#[test]
fn test_rush_hour_walkers_queue_at_nearby_stop() {
    let config = TransitConfig {
        rider_arrival_chance: 0.5,
        spawn_interval_minutes: 10_000.0,
        ..Default::default()
    };
    let mut city = TestCity::new()
        .with_config(config)
        .with_seed(11)
        .with_time(7.0)
        .with_stop(400.0)
        .with_walking_citizens(420.0, 5);

    city.tick_slow_cycle();

    city.assert_waiting(0, 5);
    let stop = city.stop_id(0);
    for citizen in city.waiting_at(0) {
        assert_eq!(city.roster().assigned_stop(*citizen), Some(stop));
    }
}

#[test]
fn test_teardown_hands_riders_back() {
    let mut city = TestCity::new()
        .with_population(20)
        .with_stop(400.0)
        .with_stop(3000.0)
        .with_waiting_citizens(0, 20);

    city.tick_until(300, |c| c.transit().riders_aboard() > 0);
    assert_eq!(city.transit().riders_aboard(), 20);

    city.request_teardown();
    city.tick(1);

    city.assert_vehicle_count(0);
    city.assert_population(20);
    assert_eq!(city.roster().count_in_state(TripState::Walking), 20);
    assert_eq!(city.roster().count_in_state(TripState::Aboard), 0);
}
