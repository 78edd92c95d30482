use chrono::Duration;

use super::common::fixed_now;
use crate::workflows::clients::notifications::{
    NotificationId, NotificationKind, NotificationLog,
};

#[test]
fn newest_notification_is_first() {
    let mut log = NotificationLog::new();
    log.record("A", NotificationKind::Client, fixed_now());
    log.record("B", NotificationKind::Status, fixed_now() + Duration::minutes(1));
    log.record("C", NotificationKind::System, fixed_now() + Duration::minutes(2));

    let messages: Vec<&str> = log
        .notifications()
        .iter()
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(messages, ["C", "B", "A"]);
}

#[test]
fn insertion_order_wins_over_equal_timestamps() {
    let mut log = NotificationLog::new();
    log.record("first", NotificationKind::System, fixed_now());
    log.record("second", NotificationKind::System, fixed_now());

    assert_eq!(log.notifications()[0].message, "second");
    assert_eq!(log.notifications()[1].message, "first");
}

#[test]
fn record_assigns_fresh_ids_and_unread_state() {
    let mut log = NotificationLog::new();
    let first = log.record("one", NotificationKind::Client, fixed_now());
    let second = log.record("two", NotificationKind::Client, fixed_now());

    assert_ne!(first.id, second.id);
    assert!(!first.read);
    assert_eq!(log.unread_count(), 2);
}

#[test]
fn mark_read_is_idempotent() {
    let mut log = NotificationLog::new();
    let notification = log.record("check results", NotificationKind::Status, fixed_now());

    assert!(log.mark_read(notification.id));
    let after_first = log.notifications().to_vec();

    assert!(!log.mark_read(notification.id));
    assert_eq!(log.notifications(), &after_first[..]);
    assert_eq!(log.unread_count(), 0);
}

#[test]
fn mark_read_ignores_unknown_ids() {
    let mut log = NotificationLog::new();
    log.record("only entry", NotificationKind::System, fixed_now());

    assert!(!log.mark_read(NotificationId(999)));
    assert_eq!(log.unread_count(), 1);
}

#[test]
fn mark_all_read_clears_unread_count() {
    let mut log = NotificationLog::new();
    log.record("one", NotificationKind::Client, fixed_now());
    log.record("two", NotificationKind::Status, fixed_now());
    log.record("three", NotificationKind::System, fixed_now());

    log.mark_all_read();
    assert_eq!(log.unread_count(), 0);
    assert!(log.notifications().iter().all(|n| n.read));

    // A second pass changes nothing.
    log.mark_all_read();
    assert_eq!(log.unread_count(), 0);
}

#[test]
fn from_entries_resumes_id_sequence() {
    let mut log = NotificationLog::new();
    log.record("persisted", NotificationKind::System, fixed_now());
    let entries = log.notifications().to_vec();

    let mut restored = NotificationLog::from_entries(entries);
    let fresh = restored.record("new", NotificationKind::Client, fixed_now());
    assert!(fresh.id.0 > 0);
}
