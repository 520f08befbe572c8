//! # formatted-text
//!
//! Parse rich-text editor HTML with inline Markdown into plain text plus a
//! list of formatting entities.
//!
//! Formatting may come from markup (`<b>`, `<a href>`, `<pre>`, elements
//! carrying `data-entity-type`) or from Markdown sigils typed into the text
//! (`**bold**`, `__italic__`, `~~strike~~`, `||spoiler||`, `` `code` ``,
//! ```` ```pre``` ````, and optionally `[label](url)` links). The result is a
//! [`FormattedText`]: the visible text and entities with UTF-16 offsets.
//!
//! ## Design
//!
//! Parsing runs in stages over an arena node tree:
//!
//! - **cleanup**: editor `div`/`br`/`&nbsp;` markup becomes newlines
//! - **tokenize**: elements become open/close tokens, text is scanned for sigils
//! - **match**: openers pair with closers, leftovers turn back into text
//! - **emit**: matched pairs become entities over the concatenated text
//!
//! Any HTML parser can feed the pipeline by building a [`Fragment`]; the
//! `html` feature (default) provides one based on scraper.
//!
//! ## Example
//!
//! ```rust
//! use formatted_text::{parse_html_as_formatted_text, EntityKind};
//!
//! let formatted = parse_html_as_formatted_text("<b>Hello</b> __World__", false, false);
//! assert_eq!(formatted.text, "Hello World");
//!
//! let kinds: Vec<_> = formatted.entities().iter().map(|e| e.kind).collect();
//! assert_eq!(kinds, vec![EntityKind::Bold, EntityKind::Italic]);
//! ```
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use formatted_text::{Fragment, FormattedTextParser};
//!
//! let mut fragment = Fragment::new();
//! let code = fragment.append_element(fragment.root(), "code", []);
//! fragment.append_text(code, "let x = 1;");
//!
//! let formatted = FormattedTextParser::new().parse_fragment(&fragment);
//! assert_eq!(formatted.text, "let x = 1;");
//! assert_eq!(formatted.entities()[0].length, 10);
//! ```

mod cleanup;
mod emitter;
#[cfg(feature = "html")]
pub mod html;
mod matcher;
pub mod node;
mod parser;
mod token;
mod tokenizer;

pub use cleanup::{cleanup_html, fix_image_content, normalize_input};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use matcher::resolve_link;
pub use node::{Fragment, Node, NodeId, NodeType};
#[cfg(feature = "html")]
pub use parser::parse_html_as_formatted_text;
pub use parser::FormattedTextParser;
pub use tokenizer::{classify_element, entity_kind_for_tag};

pub use formatted_text_core::{
    to_html, utf16_len, Entity, EntityData, EntityKind, FormattedText, ParseOptions,
    UnknownEntityKind,
};
