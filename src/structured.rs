//! Structured key/value wire format.
//!
//! One JSON-style object per record, keyed by the canonical field names.
//! Mandatory keys (`id`, `text`, `isDone`, `createdAt`) are always
//! present; optional keys are written only when they carry a non-default
//! value, so typical records stay small. Time values are integer seconds
//! since the Unix epoch.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::fields::Field;
use crate::identity::IdentityProvider;
use crate::types::{DecodeError, Item, Priority, WireDefault};

/// Encode a record as a sparse key/value mapping. Never fails.
pub fn encode(item: &Item) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert(Field::Id.name().to_string(), Value::from(item.id()));
    object.insert(Field::Text.name().to_string(), Value::from(item.text()));
    object.insert(Field::IsDone.name().to_string(), Value::from(item.is_done()));
    object.insert(
        Field::CreatedAt.name().to_string(),
        Value::from(item.created_at().timestamp()),
    );

    if let Some(at) = item.deadline() {
        object.insert(Field::Deadline.name().to_string(), Value::from(at.timestamp()));
    }
    if let Some(tag) = item.color_tag() {
        object.insert(Field::ColorTag.name().to_string(), Value::from(tag));
    }
    if !item.priority().is_wire_default() {
        object.insert(
            Field::Priority.name().to_string(),
            Value::from(item.priority().as_token()),
        );
    }
    if let Some(at) = item.changed_at() {
        object.insert(Field::ChangedAt.name().to_string(), Value::from(at.timestamp()));
    }
    if !item.updated_by().is_wire_default() {
        object.insert(Field::UpdatedBy.name().to_string(), Value::from(item.updated_by()));
    }

    object
}

/// Decode a record from a key/value mapping.
///
/// Fatal: absent or wrong-typed `id`, `text`, `createdAt`, `isDone`.
/// Every other key is optional; wrong-typed optional values degrade to
/// their defaults, and an absent updatedBy adopts the identity
/// provider's current actor.
pub fn decode(
    object: &Map<String, Value>,
    identity: &dyn IdentityProvider,
) -> Result<Item, DecodeError> {
    let id = required_str(object, Field::Id)?;
    if id.is_empty() {
        return Err(DecodeError::MissingField(Field::Id));
    }
    let text = required_str(object, Field::Text)?;

    let created_at = match object.get(Field::CreatedAt.name()) {
        None => return Err(DecodeError::MissingField(Field::CreatedAt)),
        Some(value) => value
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(DecodeError::InvalidField(Field::CreatedAt))?,
    };

    let is_done = match object.get(Field::IsDone.name()) {
        None => return Err(DecodeError::MissingField(Field::IsDone)),
        Some(value) => value
            .as_bool()
            .ok_or(DecodeError::InvalidField(Field::IsDone))?,
    };

    let deadline = optional_timestamp(object, Field::Deadline);
    let changed_at = optional_timestamp(object, Field::ChangedAt);
    let color_tag = optional_str(object, Field::ColorTag);

    let priority = match object.get(Field::Priority.name()) {
        None => Priority::Basic,
        Some(value) => match value.as_str() {
            Some(token) => Priority::from_token(token),
            None => {
                log::warn!(
                    "non-string {} value {}, falling back to basic",
                    Field::Priority.name(),
                    value
                );
                Priority::Basic
            }
        },
    };

    let updated_by =
        optional_str(object, Field::UpdatedBy).unwrap_or_else(|| identity.current_actor());

    Ok(Item::from_parts(
        id,
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

/// Decode a record from an arbitrary JSON value.
///
/// The value must be an object; anything else is rejected up front
/// rather than probed at runtime.
pub fn decode_value(value: &Value, identity: &dyn IdentityProvider) -> Result<Item, DecodeError> {
    match value {
        Value::Object(object) => decode(object, identity),
        _ => Err(DecodeError::NotAMapping),
    }
}

fn required_str(object: &Map<String, Value>, field: Field) -> Result<String, DecodeError> {
    match object.get(field.name()) {
        None => Err(DecodeError::MissingField(field)),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or(DecodeError::InvalidField(field)),
    }
}

fn optional_str(object: &Map<String, Value>, field: Field) -> Option<String> {
    let value = object.get(field.name())?;
    match value.as_str() {
        Some("") => None,
        Some(s) => Some(s.to_string()),
        None => {
            log::warn!(
                "non-string {} value {}, treating as absent",
                field.name(),
                value
            );
            None
        }
    }
}

fn optional_timestamp(object: &Map<String, Value>, field: Field) -> Option<DateTime<Utc>> {
    let value = object.get(field.name())?;
    let parsed = value.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0));
    if parsed.is_none() {
        log::warn!(
            "unusable {} value {}, treating as absent",
            field.name(),
            value
        );
    }
    parsed
}

/// Records serialize as their sparse structured mapping, so
/// `serde_json::to_string(&item)` emits the structured format directly.
/// The inverse deliberately goes through [`decode`], which needs the
/// identity collaborator.
impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn identity() -> StaticIdentity {
        StaticIdentity::new("device-test")
    }

    #[test]
    fn test_mandatory_keys_always_present() {
        let item = Item::builder("call bob", Priority::Basic, "dev1")
            .id("a1")
            .created_at(ts(1_700_000_000))
            .build();
        let object = encode(&item);

        assert_eq!(object.get("id"), Some(&Value::from("a1")));
        assert_eq!(object.get("text"), Some(&Value::from("call bob")));
        assert_eq!(object.get("isDone"), Some(&Value::from(false)));
        assert_eq!(object.get("createdAt"), Some(&Value::from(1_700_000_000_i64)));
    }

    #[test]
    fn test_default_fields_omitted() {
        let item = Item::builder("call bob", Priority::Basic, "")
            .id("a1")
            .created_at(ts(1_700_000_000))
            .build();
        let object = encode(&item);

        assert!(!object.contains_key("deadline"));
        assert!(!object.contains_key("colorTag"));
        assert!(!object.contains_key("priority"));
        assert!(!object.contains_key("changedAt"));
        assert!(!object.contains_key("updatedBy"));
        assert_eq!(object.len(), 4);
    }

    #[test]
    fn test_non_default_fields_present() {
        let item = Item::builder("ship it", Priority::Important, "dev2")
            .id("a2")
            .deadline(ts(1_700_000_100))
            .color_tag("#aabbcc")
            .changed_at(ts(1_700_000_050))
            .created_at(ts(1_700_000_000))
            .build();
        let object = encode(&item);

        assert_eq!(object.get("deadline"), Some(&Value::from(1_700_000_100_i64)));
        assert_eq!(object.get("colorTag"), Some(&Value::from("#aabbcc")));
        assert_eq!(object.get("priority"), Some(&Value::from("important")));
        assert_eq!(object.get("changedAt"), Some(&Value::from(1_700_000_050_i64)));
        assert_eq!(object.get("updatedBy"), Some(&Value::from("dev2")));
    }

    #[test]
    fn test_serialize_matches_encode() {
        let item = Item::builder("call bob", Priority::Low, "dev1")
            .id("a1")
            .created_at(ts(1_700_000_000))
            .build();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, Value::Object(encode(&item)));
    }

    #[test]
    fn test_decode_restores_fields() {
        let item = Item::builder("ship it", Priority::Low, "dev2")
            .id("a2")
            .deadline(ts(1_700_000_100))
            .done(true)
            .created_at(ts(1_700_000_000))
            .build();
        let decoded = decode(&encode(&item), &identity()).unwrap();

        assert_eq!(decoded.id(), "a2");
        assert_eq!(decoded.text(), "ship it");
        assert_eq!(decoded.deadline(), Some(ts(1_700_000_100)));
        assert!(decoded.is_done());
        assert_eq!(decoded.priority(), Priority::Low);
        assert_eq!(decoded.updated_by(), "dev2");
    }

    #[test]
    fn test_decode_value_rejects_non_object() {
        let result = decode_value(&Value::from("a1;call bob"), &identity());
        assert_eq!(result.unwrap_err(), DecodeError::NotAMapping);

        let result = decode_value(&Value::from(42), &identity());
        assert_eq!(result.unwrap_err(), DecodeError::NotAMapping);
    }
}
