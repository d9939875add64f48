//! Full polling-driver walk across one task's lifecycle:
//! contact -> overdue escalation -> reply -> pending operator closure.

use chrono::{Duration, NaiveDate};
use vigil_core::{Escalation, MemoryTasker, Task, TaskHandle, Tasker};

#[test]
fn driver_cycle_contact_escalate_verify() {
    let tasker = MemoryTasker::new();

    let event_time = NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let task = Task::new("vpn login", "alice", "geo anomaly", Some(event_time))
        .unwrap()
        .with_description("login from new country")
        .with_url("https://alerts.internal/a/123")
        .with_escalation(Escalation::new("bob", 300));
    tasker.insert(task).unwrap();

    // first poll: send the initial contact, mark in progress
    let mut new = tasker.get_new_tasks().unwrap();
    assert_eq!(new.len(), 1);
    new[0].set_in_progress().unwrap();
    assert!(tasker.get_new_tasks().unwrap().is_empty());

    // second poll, 200s after the event: alice is not overdue yet
    let mut active = tasker.get_active_tasks().unwrap();
    assert_eq!(active.len(), 1);
    let handle = &mut active[0];
    let t0 = handle.task().event_time;
    let esc = handle.task().escalation.clone().unwrap();
    assert!(!esc.should_notify(Duration::seconds(200)));

    // third poll, 400s after the event: page bob, record the dispatch
    let now = t0 + Duration::seconds(400);
    let mut esc = handle.task().escalation.clone().unwrap();
    assert!(esc.should_notify(now - t0));
    esc.set_notified();
    handle.set_escalated(esc).unwrap();

    // later polls see the page on record and never page twice
    let mut active = tasker.get_active_tasks().unwrap();
    let handle = &mut active[0];
    let esc = handle.task().escalation.clone().unwrap();
    assert!(esc.is_notified());
    assert!(!esc.should_notify(Duration::seconds(9999)));

    // alice replies: advance to verification
    handle.set_verifying().unwrap();
    assert!(tasker.get_active_tasks().unwrap().is_empty());
    let pending = tasker.get_pending_tasks().unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].task().is_verifying());
    assert_eq!(pending[0].task().username, "alice");
}
