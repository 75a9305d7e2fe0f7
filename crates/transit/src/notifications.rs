//! Announcement feed for the transit service.
//!
//! Simulation systems send `NotificationEvent`s. `collect_notifications`
//! stamps them with the game time during `PostSim` and files them into
//! `NotificationLog`, which shows each one for a while and archives all of
//! them in a bounded journal.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::time_of_day::GameClock;
use crate::TickCounter;

/// Ticks an announcement stays on screen (~60 seconds at 10 Hz).
pub const NOTIFICATION_LIFETIME_TICKS: u64 = 600;

/// Journal entries kept before the oldest are dropped.
pub const MAX_JOURNAL_ENTRIES: usize = 500;

/// Request to show an announcement.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub text: String,
}

/// An announcement stamped with when it was posted.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub day: u32,
    pub minute_of_day: u32,
    /// First tick at which it is no longer shown.
    pub expires_at: u64,
}

impl Notification {
    pub fn is_expired(&self, tick: u64) -> bool {
        tick >= self.expires_at
    }
}

#[derive(Resource, Debug, Default)]
pub struct NotificationLog {
    /// Announcements currently on screen, oldest first.
    pub active: Vec<Notification>,
    /// Every announcement ever posted, oldest first, capped at `MAX_JOURNAL_ENTRIES`.
    pub journal: VecDeque<Notification>,
}

impl NotificationLog {
    pub fn post(&mut self, text: String, clock: &GameClock, tick: u64) {
        let notification = Notification {
            text,
            day: clock.day,
            minute_of_day: clock.minute_of_day,
            expires_at: tick + NOTIFICATION_LIFETIME_TICKS,
        };
        if self.journal.len() == MAX_JOURNAL_ENTRIES {
            self.journal.pop_front();
        }
        self.journal.push_back(notification.clone());
        self.active.push(notification);
    }

    /// Drop announcements whose display time has run out.
    pub fn expire(&mut self, tick: u64) {
        self.active.retain(|n| !n.is_expired(tick));
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.journal.back()
    }
}

fn collect_notifications(
    mut events: EventReader<NotificationEvent>,
    mut log: ResMut<NotificationLog>,
    clock: Res<GameClock>,
    tick: Res<TickCounter>,
) {
    for event in events.read() {
        log.post(event.text.clone(), &clock, tick.0);
    }
    log.expire(tick.0);
}

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotificationLog>()
            .add_event::<NotificationEvent>()
            .add_systems(
                FixedUpdate,
                collect_notifications.in_set(crate::SimulationSet::PostSim),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_stamps_game_time() {
        let mut log = NotificationLog::default();
        let clock = GameClock::at_hour(8.5);
        log.post("Tram arriving".into(), &clock, 40);

        let latest = log.latest().expect("posted");
        assert_eq!(latest.text, "Tram arriving");
        assert_eq!(latest.minute_of_day, 8 * 60 + 30);
        assert_eq!(latest.expires_at, 40 + NOTIFICATION_LIFETIME_TICKS);
        assert_eq!(log.active.len(), 1);
    }

    #[test]
    fn test_expired_announcements_leave_screen_but_stay_in_journal() {
        let mut log = NotificationLog::default();
        let clock = GameClock::default();
        log.post("first".into(), &clock, 0);
        log.post("second".into(), &clock, 300);

        log.expire(NOTIFICATION_LIFETIME_TICKS);
        assert_eq!(log.active.len(), 1);
        assert_eq!(log.active[0].text, "second");
        assert_eq!(log.journal.len(), 2);
    }

    #[test]
    fn test_journal_is_bounded() {
        let mut log = NotificationLog::default();
        let clock = GameClock::default();
        for i in 0..(MAX_JOURNAL_ENTRIES + 3) {
            log.post(format!("#{i}"), &clock, 0);
        }
        assert_eq!(log.journal.len(), MAX_JOURNAL_ENTRIES);
        assert_eq!(log.journal.front().map(|n| n.text.as_str()), Some("#3"));
    }
}
