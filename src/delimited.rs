//! Delimited single-line wire format.
//!
//! One record per line: nine `;`-separated columns in canonical field
//! order, no header line. Column position is the contract, so the order
//! must never change. Literal separators inside the text column are
//! replaced by a control-character sentinel before joining and restored
//! on decode; nothing else is escaped. Time columns carry integer
//! seconds since the Unix epoch; absent optional values encode as empty
//! columns.

use chrono::{DateTime, Utc};

use crate::fields::Field;
use crate::identity::IdentityProvider;
use crate::types::{DecodeError, Item, Priority, WireDefault};

/// Column separator.
pub const SEPARATOR: char = ';';

/// Stand-in for literal separators inside the text column. A control
/// character outside the printable range, so it cannot occur in user
/// text.
pub const SENTINEL: char = '\u{1}';

/// Encode a record as a single delimited line. Never fails.
pub fn encode(item: &Item) -> String {
    let mut line = String::new();
    for field in Field::ORDER {
        if field.index() > 0 {
            line.push(SEPARATOR);
        }
        push_column(&mut line, item, field);
    }
    line
}

fn push_column(line: &mut String, item: &Item, field: Field) {
    match field {
        Field::Id => line.push_str(item.id()),
        Field::Text => line.extend(
            item.text()
                .chars()
                .map(|c| if c == SEPARATOR { SENTINEL } else { c }),
        ),
        Field::Deadline => {
            if let Some(at) = item.deadline() {
                line.push_str(&at.timestamp().to_string());
            }
        }
        Field::IsDone => line.push_str(if item.is_done() { "true" } else { "false" }),
        Field::ColorTag => {
            if let Some(tag) = item.color_tag() {
                line.push_str(tag);
            }
        }
        Field::Priority => {
            if !item.priority().is_wire_default() {
                line.push_str(item.priority().as_token());
            }
        }
        Field::CreatedAt => line.push_str(&item.created_at().timestamp().to_string()),
        Field::ChangedAt => {
            if let Some(at) = item.changed_at() {
                line.push_str(&at.timestamp().to_string());
            }
        }
        Field::UpdatedBy => line.push_str(item.updated_by()),
    }
}

/// Decode a delimited line back into a record.
///
/// Fatal: wrong column count, empty id, unusable createdAt or isDone.
/// Optional columns degrade to their defaults instead of failing, and an
/// empty updatedBy column adopts the identity provider's current actor.
pub fn decode(line: &str, identity: &dyn IdentityProvider) -> Result<Item, DecodeError> {
    let columns: Vec<&str> = line.split(SEPARATOR).collect();
    if columns.len() != Field::COUNT {
        return Err(DecodeError::ColumnCount {
            expected: Field::COUNT,
            found: columns.len(),
        });
    }
    let column = |field: Field| columns[field.index()];

    let id = column(Field::Id);
    if id.is_empty() {
        return Err(DecodeError::MissingField(Field::Id));
    }

    // Sentinel reversal applies to the text column only.
    let text: String = column(Field::Text)
        .chars()
        .map(|c| if c == SENTINEL { SEPARATOR } else { c })
        .collect();

    let created_raw = column(Field::CreatedAt);
    if created_raw.is_empty() {
        return Err(DecodeError::MissingField(Field::CreatedAt));
    }
    let created_at =
        parse_timestamp(created_raw).ok_or(DecodeError::InvalidField(Field::CreatedAt))?;

    let is_done = column(Field::IsDone)
        .parse::<bool>()
        .map_err(|_| DecodeError::InvalidField(Field::IsDone))?;

    let deadline = optional_timestamp(column(Field::Deadline), Field::Deadline);
    let changed_at = optional_timestamp(column(Field::ChangedAt), Field::ChangedAt);

    let color_tag = match column(Field::ColorTag) {
        "" => None,
        tag => Some(tag.to_string()),
    };

    let priority = Priority::from_token(column(Field::Priority));

    let updated_by = match column(Field::UpdatedBy) {
        "" => identity.current_actor(),
        actor => actor.to_string(),
    };

    Ok(Item::from_parts(
        id.to_string(),
        text,
        deadline,
        is_done,
        color_tag,
        priority,
        created_at,
        changed_at,
        updated_by,
    ))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn optional_timestamp(raw: &str, field: Field) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        log::warn!(
            "unparsable {} column {:?}, treating as absent",
            field.name(),
            raw
        );
    }
    parsed
}
