//! formatted-text-core - entity model and serialization
//!
//! This crate provides the data structures shared by the `formatted-text`
//! parser and its bindings: the entity model, the Unicode tables used to
//! decide Markdown delimiter flanking, and serialization of formatted text
//! back to HTML markup.
//!
//! # Architecture
//!
//! ```text
//! Editor HTML ──parse──▶ ┌─────────────────────────┐
//!                        │ FormattedText           │
//!                        │  text + Vec<Entity>     │ ──to_html──▶ HTML markup
//! Node tree ────parse──▶ │                         │
//!                        └─────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use formatted_text_core::{to_html, Entity, EntityKind, FormattedText};
//!
//! let text = FormattedText::new(
//!     "Hello World",
//!     vec![Entity::new(EntityKind::Bold, 6, 5)],
//! );
//!
//! assert_eq!(to_html(&text), "Hello <b>World</b>");
//! ```

pub mod chars;
mod entity;
mod options;
mod serialize;

pub use chars::{is_punctuation, is_whitespace, Flank};
pub use entity::{
    utf16_len, Entity, EntityData, EntityKind, FormattedText, UnknownEntityKind,
};
pub use options::ParseOptions;
pub use serialize::to_html;
