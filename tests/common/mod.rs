//! Shared helpers for taskwire integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use taskwire::{Item, Priority, StaticIdentity};

/// Fixed creation instant used across tests.
pub const CREATED: i64 = 1_700_000_000;

/// Identity provider injected into every decode call in tests.
pub fn identity() -> StaticIdentity {
    StaticIdentity::new("device-test")
}

/// Second-precision timestamp from epoch seconds.
pub fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}

/// A record with every optional field populated.
pub fn full_item() -> Item {
    Item::builder("write the report; then send it", Priority::Important, "dev-9")
        .id("tw-f0f0f0f0f0f0")
        .deadline(ts(CREATED + 86_400))
        .done(true)
        .color_tag("#00ff88")
        .created_at(ts(CREATED))
        .changed_at(ts(CREATED + 3_600))
        .build()
}

/// A record with only the required fields.
pub fn sparse_item() -> Item {
    Item::builder("call bob", Priority::Basic, "dev-9")
        .id("tw-0a0a0a0a0a0a")
        .created_at(ts(CREATED))
        .build()
}

/// Field-by-field comparison; `==` on records only checks ids.
pub fn assert_same_content(left: &Item, right: &Item) {
    assert_eq!(left.id(), right.id());
    assert_eq!(left.text(), right.text());
    assert_eq!(left.deadline(), right.deadline());
    assert_eq!(left.is_done(), right.is_done());
    assert_eq!(left.color_tag(), right.color_tag());
    assert_eq!(left.priority(), right.priority());
    assert_eq!(left.created_at(), right.created_at());
    assert_eq!(left.changed_at(), right.changed_at());
    assert_eq!(left.updated_by(), right.updated_by());
}
