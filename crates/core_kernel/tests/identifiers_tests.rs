//! Tests for strongly-typed identifiers

use std::collections::HashSet;

use core_kernel::{SubmissionId, UserId};
use uuid::Uuid;

#[test]
fn test_user_id_round_trip() {
    let id = UserId::new();
    let parsed: UserId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_user_id_parses_bare_uuid() {
    let uuid = Uuid::new_v4();
    let parsed: UserId = uuid.to_string().parse().unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_submission_id_prefix() {
    assert_eq!(SubmissionId::prefix(), "SUB");
    assert!(SubmissionId::new().to_string().starts_with("SUB-"));
}

#[test]
fn test_ids_are_unique() {
    let ids: HashSet<UserId> = (0..100).map(|_| UserId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_v7_ids_are_time_ordered_format() {
    // v7 identifiers still parse and display like any other id
    let id = SubmissionId::new_v7();
    let parsed: SubmissionId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_serde_transparent() {
    let id = UserId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serialized form is the bare UUID, no prefix
    assert!(!json.contains("USR-"));
    let back: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
