//! Shared calendar.

use chrono::{Duration, TimeZone, Utc};

use crate::core::social::{demo_hub, EventDraft, EventType, SocialError, SocialHub};

fn draft(title: &str, start_hour: u32, hours: i64) -> EventDraft {
    let start = Utc.with_ymd_and_hms(2026, 3, 14, start_hour, 0, 0).unwrap();
    EventDraft {
        title: title.to_string(),
        start_time: start,
        end_time: start + Duration::hours(hours),
        location: None,
        event_type: EventType::Dnd,
        group_id: Some("g1".to_string()),
    }
}

fn empty_calendar() -> SocialHub {
    let mut hub = demo_hub("u1").unwrap();
    let ids: Vec<String> = hub.events().iter().map(|e| e.id.clone()).collect();
    for id in ids {
        hub.delete_event(&id).unwrap();
    }
    hub
}

#[test]
fn test_add_event() {
    let mut hub = empty_calendar();
    let event = hub.add_event(draft("Session 5", 18, 3)).unwrap();
    assert_eq!(event.title, "Session 5");
    assert!(!event.id.is_empty());
    assert_eq!(hub.events().len(), 1);
}

#[test]
fn test_zero_length_event_is_allowed() {
    let mut hub = empty_calendar();
    assert!(hub.add_event(draft("Reminder", 9, 0)).is_ok());
}

#[test]
fn test_event_validation() {
    let mut hub = empty_calendar();

    assert!(matches!(
        hub.add_event(draft("  ", 18, 3)),
        Err(SocialError::Invalid { field: "title", .. })
    ));
    assert!(matches!(
        hub.add_event(draft("Backwards", 18, -1)),
        Err(SocialError::Invalid { field: "end_time", .. })
    ));
    assert!(hub.events().is_empty());
}

#[test]
fn test_update_and_delete_event() {
    let mut hub = empty_calendar();
    let mut event = hub.add_event(draft("Session 5", 18, 3)).unwrap().clone();

    event.location = Some("Bob's basement".to_string());
    event.event_type = EventType::Hangout;
    let updated = hub.update_event(event.clone()).unwrap();
    assert_eq!(updated.location.as_deref(), Some("Bob's basement"));

    let mut invalid = event.clone();
    invalid.end_time = invalid.start_time - Duration::minutes(1);
    assert!(hub.update_event(invalid).is_err());
    assert_eq!(hub.events()[0].end_time, event.end_time);

    let removed = hub.delete_event(&event.id).unwrap();
    assert_eq!(removed.id, event.id);
    assert!(matches!(hub.delete_event(&event.id), Err(SocialError::NotFound { .. })));
}

#[test]
fn test_events_for_group() {
    let mut hub = empty_calendar();
    hub.add_event(draft("Session 5", 18, 3)).unwrap();
    let mut other = draft("Board games", 12, 2);
    other.group_id = None;
    hub.add_event(other).unwrap();

    let titles: Vec<&str> = hub.events_for_group("g1").iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Session 5"]);
}

#[test]
fn test_upcoming_events_skip_finished_and_sort_by_start() {
    let mut hub = empty_calendar();
    hub.add_event(draft("Evening", 18, 3)).unwrap();
    hub.add_event(draft("Morning", 8, 1)).unwrap();
    hub.add_event(draft("Afternoon", 13, 2)).unwrap();

    let now = Utc.with_ymd_and_hms(2026, 3, 14, 14, 0, 0).unwrap();
    let titles: Vec<&str> = hub.upcoming_events(now).iter().map(|e| e.title.as_str()).collect();
    // "Afternoon" is still running at 14:00.
    assert_eq!(titles, ["Afternoon", "Evening"]);
}

#[test]
fn test_demo_events_are_upcoming() {
    let hub = demo_hub("u2").unwrap();
    assert_eq!(hub.upcoming_events(Utc::now()).len(), 2);
}
