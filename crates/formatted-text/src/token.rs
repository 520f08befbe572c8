//! Tokens produced by the tokenizer and resolved by the matcher.

use formatted_text_core::{EntityData, EntityKind};

/// What a token currently stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text (also what unmatched formatting tokens are demoted to)
    Text,
    /// A formatting delimiter for the given entity kind
    Format(EntityKind),
}

/// Where a formatting token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// An HTML element
    Markup,
    /// A Markdown sigil in text
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text; formatting tokens carry their sigil here
    pub text: String,
    pub origin: Origin,
    pub can_open: bool,
    pub can_close: bool,
    /// Excluded from the output text
    pub suppressed: bool,
    pub data: Option<EntityData>,
}

impl Token {
    pub fn text(text: &str) -> Self {
        Self {
            kind: TokenKind::Text,
            text: text.to_string(),
            origin: Origin::Markdown,
            can_open: false,
            can_close: false,
            suppressed: false,
            data: None,
        }
    }

    /// Opening token for an HTML element
    pub fn markup_open(kind: EntityKind, data: Option<EntityData>) -> Self {
        Self {
            kind: TokenKind::Format(kind),
            text: String::new(),
            origin: Origin::Markup,
            can_open: true,
            can_close: false,
            suppressed: false,
            data,
        }
    }

    /// Closing token for an HTML element
    pub fn markup_close(kind: EntityKind, data: Option<EntityData>) -> Self {
        Self {
            can_open: false,
            can_close: true,
            ..Self::markup_open(kind, data)
        }
    }

    /// Markdown delimiter token
    pub fn sigil(kind: EntityKind, text: &str, can_open: bool, can_close: bool) -> Self {
        Self {
            kind: TokenKind::Format(kind),
            text: text.to_string(),
            origin: Origin::Markdown,
            can_open,
            can_close,
            suppressed: false,
            data: None,
        }
    }

    /// `[` starting a Markdown link label
    pub fn link_label() -> Self {
        Self::sigil(EntityKind::Url, "[", true, false)
    }

    /// `](` separating a Markdown link label from its target
    pub fn link_target() -> Self {
        Self::sigil(EntityKind::Url, "](", false, false)
    }

    /// `)` ending a Markdown link
    pub fn link_end() -> Self {
        Self::sigil(EntityKind::Url, ")", false, true)
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self.kind {
            TokenKind::Format(kind) => Some(kind),
            TokenKind::Text => None,
        }
    }

    fn is_markdown_link(&self) -> bool {
        self.origin == Origin::Markdown && self.kind == TokenKind::Format(EntityKind::Url)
    }

    pub fn is_link_label(&self) -> bool {
        self.is_markdown_link() && self.can_open
    }

    pub fn is_link_target(&self) -> bool {
        self.is_markdown_link() && !self.can_open && !self.can_close
    }

    pub fn is_link_end(&self) -> bool {
        self.is_markdown_link() && self.can_close
    }

    /// Turn an unmatched formatting token into literal text
    pub fn demote(&mut self) {
        self.kind = TokenKind::Text;
    }
}
