//! Formatting entities and the formatted text they annotate.

use std::fmt;
use std::str::FromStr;

/// Error returned when an entity type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type: {0}")]
pub struct UnknownEntityKind(pub String);

/// The kind of a formatting entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Spoiler,
    Code,
    Pre,
    /// Link whose visible text is the URL itself
    Url,
    /// Link with a separate target URL
    TextUrl,
    /// Mention of a user by id
    MentionName,
    CustomEmoji,
    Email,
    Phone,
    Blockquote,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Bold,
        EntityKind::Italic,
        EntityKind::Underline,
        EntityKind::Strike,
        EntityKind::Spoiler,
        EntityKind::Code,
        EntityKind::Pre,
        EntityKind::Url,
        EntityKind::TextUrl,
        EntityKind::MentionName,
        EntityKind::CustomEmoji,
        EntityKind::Email,
        EntityKind::Phone,
        EntityKind::Blockquote,
    ];

    /// Wire name, as used by `data-entity-type` attributes
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Bold => "MessageEntityBold",
            EntityKind::Italic => "MessageEntityItalic",
            EntityKind::Underline => "MessageEntityUnderline",
            EntityKind::Strike => "MessageEntityStrike",
            EntityKind::Spoiler => "MessageEntitySpoiler",
            EntityKind::Code => "MessageEntityCode",
            EntityKind::Pre => "MessageEntityPre",
            EntityKind::Url => "MessageEntityUrl",
            EntityKind::TextUrl => "MessageEntityTextUrl",
            EntityKind::MentionName => "MessageEntityMentionName",
            EntityKind::CustomEmoji => "MessageEntityCustomEmoji",
            EntityKind::Email => "MessageEntityEmail",
            EntityKind::Phone => "MessageEntityPhone",
            EntityKind::Blockquote => "MessageEntityBlockquote",
        }
    }

    /// Kinds whose content is rendered verbatim; nothing nests inside them
    pub fn is_monospace(self) -> bool {
        matches!(self, EntityKind::Code | EntityKind::Pre)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts the wire name (`MessageEntityBold`) or the bare name (`Bold`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("MessageEntity").unwrap_or(s);
        EntityKind::ALL
            .into_iter()
            .find(|kind| &kind.as_str()["MessageEntity".len()..] == bare)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// Kind-specific payload carried by an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityData {
    /// Target of a `TextUrl` (or `Url`) entity
    Url(String),
    /// User referenced by a `MentionName` entity
    UserId(String),
    /// Language tag of a `Pre` entity
    Language(String),
    /// Custom emoji document of a `CustomEmoji` entity
    DocumentId(String),
}

/// A formatting annotation over a span of the plain text.
///
/// `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    pub data: Option<EntityData>,
}

impl Entity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            data: None,
        }
    }

    pub fn with_data(mut self, data: EntityData) -> Self {
        self.data = Some(data);
        self
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether `other` lies within this entity's span
    pub fn contains(&self, other: &Entity) -> bool {
        self.offset <= other.offset && other.end() <= self.end()
    }

    pub fn url(&self) -> Option<&str> {
        match &self.data {
            Some(EntityData::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match &self.data {
            Some(EntityData::UserId(id)) => Some(id),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.data {
            Some(EntityData::Language(language)) => Some(language),
            _ => None,
        }
    }

    pub fn document_id(&self) -> Option<&str> {
        match &self.data {
            Some(EntityData::DocumentId(id)) => Some(id),
            _ => None,
        }
    }
}

/// Plain text plus the entities formatting it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedText {
    pub text: String,
    /// `None` when no entity survived parsing, never an empty list
    pub entities: Option<Vec<Entity>>,
}

impl FormattedText {
    pub fn new(text: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            text: text.into(),
            entities: if entities.is_empty() {
                None
            } else {
                Some(entities)
            },
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: None,
        }
    }

    /// Entities as a slice (empty when there are none)
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_deref().unwrap_or_default()
    }

    /// Length of the text in UTF-16 code units
    pub fn utf16_len(&self) -> usize {
        utf16_len(&self.text)
    }
}

/// Length of a string in UTF-16 code units
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}
