//! Canonical field table shared by both wire formats.

/// The nine record fields, in canonical wire order.
///
/// The order doubles as the column order of the delimited format and is a
/// durable contract: reordering it breaks every previously stored line.
/// The names are the keys of the structured format. Both codecs consult
/// this table rather than hardcoding positions or names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Text,
    Deadline,
    IsDone,
    ColorTag,
    Priority,
    CreatedAt,
    ChangedAt,
    UpdatedBy,
}

impl Field {
    /// All fields in wire order.
    pub const ORDER: [Field; 9] = [
        Field::Id,
        Field::Text,
        Field::Deadline,
        Field::IsDone,
        Field::ColorTag,
        Field::Priority,
        Field::CreatedAt,
        Field::ChangedAt,
        Field::UpdatedBy,
    ];

    /// Column count of the delimited format.
    pub const COUNT: usize = Self::ORDER.len();

    /// Zero-based column index in the delimited format.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical key in the structured format.
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Text => "text",
            Field::Deadline => "deadline",
            Field::IsDone => "isDone",
            Field::ColorTag => "colorTag",
            Field::Priority => "priority",
            Field::CreatedAt => "createdAt",
            Field::ChangedAt => "changedAt",
            Field::UpdatedBy => "updatedBy",
        }
    }

    /// Look a field up by its structured-format key.
    pub fn from_name(name: &str) -> Option<Field> {
        Self::ORDER.into_iter().find(|field| field.name() == name)
    }
}
