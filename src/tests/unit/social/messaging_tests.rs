//! Group chat and direct messages.

use crate::core::social::{demo_hub, SocialError};

#[test]
fn test_group_message_carries_sender() {
    let mut hub = demo_hub("u2").unwrap();

    let message = hub.send_group_message("g1", "Bringing snacks").unwrap().unwrap();
    assert_eq!(message.sender_id, "u2");
    assert_eq!(message.sender_name, "Alice Walker");
    assert_eq!(hub.group_messages("g1").len(), 1);
}

#[test]
fn test_blank_group_message_is_ignored() {
    let mut hub = demo_hub("u2").unwrap();
    assert!(hub.send_group_message("g1", " \n ").unwrap().is_none());
    assert!(hub.group_messages("g1").is_empty());
}

#[test]
fn test_group_message_to_unknown_group() {
    let mut hub = demo_hub("u2").unwrap();
    assert!(matches!(
        hub.send_group_message("g404", "hello"),
        Err(SocialError::NotFound { kind: "Group", .. })
    ));
}

#[test]
fn test_create_thread_reuses_existing_pair() {
    let mut hub = demo_hub("u1").unwrap();
    let first = hub.create_thread("u2").unwrap().id.clone();
    assert!(first.starts_with("thread-"));

    let again = hub.create_thread("u2").unwrap().id.clone();
    assert_eq!(first, again);

    // The other side opening a chat lands in the same thread.
    hub.switch_user("u2").unwrap();
    assert_eq!(hub.create_thread("u1").unwrap().id, first);
}

#[test]
fn test_create_thread_with_unknown_user() {
    let mut hub = demo_hub("u1").unwrap();
    assert!(hub.create_thread("ghost").is_err());
    assert!(hub.threads().is_empty());
}

#[test]
fn test_send_direct_message() {
    let mut hub = demo_hub("u1").unwrap();
    let thread_id = hub.create_thread("u3").unwrap().id.clone();

    let message = hub.send_direct_message(&thread_id, "Session moved to 7pm").unwrap().unwrap();
    assert_eq!(message.sender_id, "u1");
    let sent_at = message.timestamp;

    let thread = hub.thread(&thread_id).unwrap();
    assert_eq!(thread.last_message().map(|m| m.content.as_str()), Some("Session moved to 7pm"));
    assert_eq!(thread.last_updated, sent_at);
    assert_eq!(thread.unread_count, 0);
}

#[test]
fn test_blank_direct_message_is_ignored() {
    let mut hub = demo_hub("u1").unwrap();
    let thread_id = hub.create_thread("u3").unwrap().id.clone();

    assert!(hub.send_direct_message(&thread_id, "   ").unwrap().is_none());
    assert!(hub.thread(&thread_id).unwrap().messages.is_empty());
    assert!(hub.send_direct_message("thread-missing", "hi").is_err());
}

#[test]
fn test_threads_are_private_and_most_recent_first() {
    let mut hub = demo_hub("u1").unwrap();
    let with_bob = hub.create_thread("u3").unwrap().id.clone();
    let with_alice = hub.create_thread("u2").unwrap().id.clone();
    hub.send_direct_message(&with_alice, "first").unwrap();
    hub.send_direct_message(&with_bob, "second").unwrap();

    let order: Vec<&str> = hub.threads().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, [with_bob.as_str(), with_alice.as_str()]);

    hub.switch_user("u4").unwrap();
    assert!(hub.threads().is_empty());

    hub.switch_user("u2").unwrap();
    let visible: Vec<&str> = hub.threads().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(visible, [with_alice.as_str()]);
}
