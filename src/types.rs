//! Core data types for taskwire records.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::builder::ItemBuilder;
use crate::fields::Field;
use crate::identity::IdentityProvider;

/// A single task record.
///
/// Identity and content fields are fixed at construction; only the
/// completion flag, the change timestamp, and the writing actor can be
/// mutated afterwards. Two records with the same `id` are the same
/// logical item regardless of content, so equality compares ids only.
///
/// Time fields are carried at whole-second precision to match both wire
/// formats; sub-second fractions are dropped on construction and
/// mutation.
#[derive(Debug, Clone)]
pub struct Item {
    id: String,
    text: String,
    deadline: Option<DateTime<Utc>>,
    is_done: bool,
    color_tag: Option<String>,
    priority: Priority,
    created_at: DateTime<Utc>,
    changed_at: Option<DateTime<Utc>>,
    updated_by: String,
}

impl Item {
    /// Create a record from the required fields; everything else takes
    /// its default (fresh id, creation time of now, nothing done yet).
    pub fn new(text: impl Into<String>, priority: Priority, updated_by: impl Into<String>) -> Self {
        ItemBuilder::new(text, priority, updated_by).build()
    }

    /// Start building a record, for callers that also want to set the
    /// optional fields.
    pub fn builder(
        text: impl Into<String>,
        priority: Priority,
        updated_by: impl Into<String>,
    ) -> ItemBuilder {
        ItemBuilder::new(text, priority, updated_by)
    }

    /// Assemble a record from already-decoded parts, in wire order.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        text: String,
        deadline: Option<DateTime<Utc>>,
        is_done: bool,
        color_tag: Option<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
        changed_at: Option<DateTime<Utc>>,
        updated_by: String,
    ) -> Self {
        Self {
            id,
            text,
            deadline,
            is_done,
            color_tag,
            priority,
            created_at,
            changed_at,
            updated_by,
        }
    }

    /// Unique identifier, assigned at construction. Never empty.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Task description. May contain any character, including the
    /// delimited format's separator.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Optional due time.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Whether the task is completed.
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Optional free-form tag, e.g. a color code.
    pub fn color_tag(&self) -> Option<&str> {
        self.color_tag.as_deref()
    }

    /// Urgency of the task.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Creation time. Always present.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last content change, if any.
    pub fn changed_at(&self) -> Option<DateTime<Utc>> {
        self.changed_at
    }

    /// Actor/device that last wrote the record.
    pub fn updated_by(&self) -> &str {
        &self.updated_by
    }

    /// Set the completion flag.
    pub fn set_done(&mut self, flag: bool) {
        self.is_done = flag;
    }

    /// Record when the content last changed.
    pub fn set_changed(&mut self, at: DateTime<Utc>) {
        self.changed_at = Some(at.trunc_subsecs(0));
    }

    /// Record which actor last wrote the record.
    pub fn set_updated_by(&mut self, actor: impl Into<String>) {
        self.updated_by = actor.into();
    }

    /// Stamp the record with the identity collaborator's current actor,
    /// for writes where no explicit actor is supplied.
    pub fn refresh_updated_by(&mut self, identity: &dyn IdentityProvider) {
        self.updated_by = identity.current_actor();
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

/// Urgency of a task record.
///
/// `Basic` is the default and counts as "no information": sparse
/// encodings omit it, and decoders restore it for absent or unrecognized
/// tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Basic,
    Important,
}

impl Priority {
    /// Canonical wire token.
    pub fn as_token(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Basic => "basic",
            Priority::Important => "important",
        }
    }

    /// Parse a wire token. Never fails: empty or unknown tokens fall
    /// back to `Basic`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "low" => Priority::Low,
            "basic" | "" => Priority::Basic,
            "important" => Priority::Important,
            other => {
                log::warn!("unknown priority token {:?}, falling back to basic", other);
                Priority::Basic
            }
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Wire-level default detection for sparse encodings.
///
/// A value equal to its wire default carries no information: encoders
/// omit it and decoders restore it when the field is absent.
pub trait WireDefault {
    fn is_wire_default(&self) -> bool;
}

impl WireDefault for Priority {
    fn is_wire_default(&self) -> bool {
        matches!(self, Priority::Basic)
    }
}

impl<T> WireDefault for Option<T> {
    fn is_wire_default(&self) -> bool {
        self.is_none()
    }
}

impl WireDefault for str {
    fn is_wire_default(&self) -> bool {
        self.is_empty()
    }
}

/// Fatal decode failures.
///
/// Only the mandatory parts of a record produce these; optional fields
/// degrade to their documented defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Delimited line did not split into the expected column count.
    ColumnCount { expected: usize, found: usize },
    /// Structured payload was not a key/value mapping.
    NotAMapping,
    /// A mandatory field was absent.
    MissingField(Field),
    /// A mandatory field held an unusable value.
    InvalidField(Field),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::ColumnCount { expected, found } => {
                write!(f, "expected {} columns, found {}", expected, found)
            }
            DecodeError::NotAMapping => write!(f, "payload is not a key/value mapping"),
            DecodeError::MissingField(field) => {
                write!(f, "missing mandatory field '{}'", field.name())
            }
            DecodeError::InvalidField(field) => {
                write!(f, "invalid value for mandatory field '{}'", field.name())
            }
        }
    }
}

impl std::error::Error for DecodeError {}
