#![deny(clippy::all)]

use napi_derive::napi;

use formatted_text as ft;
use formatted_text::{EntityData, EntityKind, ParseOptions, UnknownEntityKind};

#[napi(object)]
pub struct Options {
    pub with_markdown_links: Option<bool>,
    pub skip_markdown: Option<bool>,
}

impl From<Options> for ParseOptions {
    fn from(opts: Options) -> Self {
        ParseOptions::new(
            opts.with_markdown_links.unwrap_or_default(),
            opts.skip_markdown.unwrap_or_default(),
        )
    }
}

/// Entity as seen from JavaScript: `{ type, offset, length, ... }`
#[napi(object)]
pub struct MessageEntity {
    #[napi(js_name = "type")]
    pub kind: String,
    pub offset: u32,
    pub length: u32,
    pub url: Option<String>,
    pub user_id: Option<String>,
    pub language: Option<String>,
    pub document_id: Option<String>,
}

/// Convert a UTF-16 position to the `u32` JavaScript receives
fn to_u32(value: usize, field: &str) -> napi::Result<u32> {
    u32::try_from(value)
        .map_err(|_| napi::Error::from_reason(format!("entity {field} {value} exceeds u32")))
}

impl TryFrom<&ft::Entity> for MessageEntity {
    type Error = napi::Error;

    fn try_from(entity: &ft::Entity) -> napi::Result<Self> {
        Ok(Self {
            kind: entity.kind.as_str().to_string(),
            offset: to_u32(entity.offset, "offset")?,
            length: to_u32(entity.length, "length")?,
            url: entity.url().map(str::to_string),
            user_id: entity.user_id().map(str::to_string),
            language: entity.language().map(str::to_string),
            document_id: entity.document_id().map(str::to_string),
        })
    }
}

impl TryFrom<MessageEntity> for ft::Entity {
    type Error = UnknownEntityKind;

    fn try_from(entity: MessageEntity) -> Result<Self, Self::Error> {
        let kind: EntityKind = entity.kind.parse()?;
        let data = match kind {
            EntityKind::TextUrl => entity.url.map(EntityData::Url),
            EntityKind::MentionName => entity.user_id.map(EntityData::UserId),
            EntityKind::Pre => entity.language.map(EntityData::Language),
            EntityKind::CustomEmoji => entity.document_id.map(EntityData::DocumentId),
            _ => None,
        };
        Ok(ft::Entity {
            kind,
            offset: entity.offset as usize,
            length: entity.length as usize,
            data,
        })
    }
}

#[napi(object)]
pub struct FormattedText {
    pub text: String,
    pub entities: Option<Vec<MessageEntity>>,
}

impl TryFrom<ft::FormattedText> for FormattedText {
    type Error = napi::Error;

    fn try_from(formatted: ft::FormattedText) -> napi::Result<Self> {
        let entities = formatted
            .entities
            .as_deref()
            .map(|entities| {
                entities
                    .iter()
                    .map(MessageEntity::try_from)
                    .collect::<napi::Result<Vec<_>>>()
            })
            .transpose()?;
        Ok(Self {
            text: formatted.text,
            entities,
        })
    }
}

#[napi]
pub struct FormattedTextParser {
    inner: ft::FormattedTextParser,
}

#[napi]
impl FormattedTextParser {
    #[napi(constructor)]
    pub fn new(options: Option<Options>) -> Self {
        let inner = match options {
            Some(opts) => ft::FormattedTextParser::with_options(opts.into()),
            None => ft::FormattedTextParser::new(),
        };
        Self { inner }
    }

    /// Parse editor HTML into text and entities
    #[napi]
    pub fn parse(&self, html: String) -> napi::Result<FormattedText> {
        self.inner.parse(&html).try_into()
    }
}

#[napi]
pub fn parse_html_as_formatted_text(
    html: String,
    with_markdown_links: Option<bool>,
    skip_markdown: Option<bool>,
) -> napi::Result<FormattedText> {
    ft::parse_html_as_formatted_text(
        &html,
        with_markdown_links.unwrap_or_default(),
        skip_markdown.unwrap_or_default(),
    )
    .try_into()
}

/// Render text and entities back into HTML markup
#[napi]
pub fn formatted_text_to_html(value: FormattedText) -> napi::Result<String> {
    let entities = value
        .entities
        .unwrap_or_default()
        .into_iter()
        .map(ft::Entity::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    Ok(ft::to_html(&ft::FormattedText::new(value.text, entities)))
}
