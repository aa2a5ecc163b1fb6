//! Builder API for constructing task records.

use chrono::{DateTime, SubsecRound, Utc};

use crate::id::generate_id;
use crate::types::{Item, Priority};

/// Builder for records with a fluent API.
///
/// The required fields come up front; everything else defaults and can
/// be filled in with chained setters.
///
/// # Example
///
/// ```
/// use taskwire::{Item, Priority};
///
/// let item = Item::builder("water the plants", Priority::Important, "dev-3")
///     .color_tag("#22aa44")
///     .done(false)
///     .build();
///
/// assert_eq!(item.text(), "water the plants");
/// assert_eq!(item.priority(), Priority::Important);
/// ```
pub struct ItemBuilder {
    text: String,
    priority: Priority,
    updated_by: String,
    id: Option<String>,
    deadline: Option<DateTime<Utc>>,
    done: bool,
    color_tag: Option<String>,
    created_at: Option<DateTime<Utc>>,
    changed_at: Option<DateTime<Utc>>,
}

impl ItemBuilder {
    /// Start a builder from the required fields.
    pub fn new(
        text: impl Into<String>,
        priority: Priority,
        updated_by: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            priority,
            updated_by: updated_by.into(),
            id: None,
            deadline: None,
            done: false,
            color_tag: None,
            created_at: None,
            changed_at: None,
        }
    }

    /// Use an existing identifier instead of generating a fresh one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the due time.
    pub fn deadline(mut self, at: DateTime<Utc>) -> Self {
        self.deadline = Some(at);
        self
    }

    /// Set the completion flag.
    pub fn done(mut self, flag: bool) -> Self {
        self.done = flag;
        self
    }

    /// Set the free-form tag.
    pub fn color_tag(mut self, tag: impl Into<String>) -> Self {
        self.color_tag = Some(tag.into());
        self
    }

    /// Use an explicit creation time instead of now.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Set the last-change time.
    pub fn changed_at(mut self, at: DateTime<Utc>) -> Self {
        self.changed_at = Some(at);
        self
    }

    /// Build the record, applying defaults and the whole-second rule.
    pub fn build(self) -> Item {
        let created_at = self.created_at.unwrap_or_else(Utc::now).trunc_subsecs(0);
        // An empty id would break the identity contract; generate instead.
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_id(&self.text, created_at));

        Item::from_parts(
            id,
            self.text,
            self.deadline.map(|at| at.trunc_subsecs(0)),
            self.done,
            self.color_tag,
            self.priority,
            created_at,
            self.changed_at.map(|at| at.trunc_subsecs(0)),
            self.updated_by,
        )
    }
}
