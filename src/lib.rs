//! Taskwire: a dual wire codec for single task records.
//!
//! A record round-trips between its in-memory form and two textual wire
//! formats: a nine-column delimited line and a sparse key/value mapping.
//! Both formats share one canonical field table, carry time values as
//! integer seconds since the Unix epoch, and substitute documented
//! defaults for malformed optional data instead of failing. Decoding
//! fails only when a mandatory field (`id`, `text`, `isDone`,
//! `createdAt`) is unusable.
//!
//! Encode and decode are pure, synchronous functions; the one impure
//! input — the current actor identifier used as the `updatedBy`
//! fallback — comes from an injected [`IdentityProvider`].
//!
//! # Example
//!
//! ```
//! use taskwire::{delimited, structured, Item, Priority, StaticIdentity};
//!
//! let identity = StaticIdentity::new("dev-7");
//!
//! let item = Item::builder("call bob", Priority::Low, "dev-7")
//!     .color_tag("#ff5500")
//!     .build();
//!
//! // One line, nine `;`-separated columns.
//! let line = delimited::encode(&item);
//! let restored = delimited::decode(&line, &identity).unwrap();
//! assert_eq!(restored, item);
//!
//! // Sparse key/value mapping; default-valued fields are omitted.
//! let object = structured::encode(&item);
//! assert!(!object.contains_key("deadline"));
//! let restored = structured::decode(&object, &identity).unwrap();
//! assert_eq!(restored.text(), "call bob");
//! ```

mod builder;
mod fields;
mod id;
mod types;

pub mod delimited;
pub mod identity;
pub mod structured;

// Re-export public API
pub use builder::ItemBuilder;
pub use fields::Field;
pub use identity::{IdentityProvider, StaticIdentity};
pub use types::{DecodeError, Item, Priority, WireDefault};
