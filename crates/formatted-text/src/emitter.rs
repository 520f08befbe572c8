//! Entity emission: turns matched tokens into text plus entities.

use formatted_text_core::{utf16_len, Entity, EntityData, EntityKind, FormattedText};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::{Token, TokenKind};

// A code block whose first line is a bare word names its language
static PRE_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\n.+").expect("PRE_LANGUAGE: hardcoded regex is valid")
});

static PRE_LANGUAGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+\n+").expect("PRE_LANGUAGE_LINE: hardcoded regex is valid")
});

#[derive(Debug)]
struct Frame {
    kind: EntityKind,
    token: usize,
    offset: usize,
    skip: bool,
    data: Option<EntityData>,
}

/// Last text or non-skipped opener that reached the output; closers leave it alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Nothing,
    Text,
    Opened { token: usize, kind: EntityKind },
}

#[derive(Debug)]
struct Emitter {
    text: String,
    /// Length of `text` in UTF-16 code units
    length: usize,
    /// Text up to here is covered by emitted entities and never trimmed
    emitted: usize,
    frames: Vec<Frame>,
    entities: Vec<Entity>,
    previous: Previous,
}

impl Emitter {
    fn new() -> Self {
        Self {
            text: String::new(),
            length: 0,
            emitted: 0,
            frames: Vec::new(),
            entities: Vec::new(),
            previous: Previous::Nothing,
        }
    }

    fn token(&mut self, index: usize, token: &Token) {
        match token.kind {
            TokenKind::Text if !token.suppressed => self.push_text(&token.text),
            TokenKind::Text => {}
            TokenKind::Format(_) if token.suppressed => {}
            TokenKind::Format(kind) if token.can_open => self.open(index, kind, token),
            TokenKind::Format(_) => self.close(token),
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut text = text;

        if let Previous::Opened {
            token,
            kind: EntityKind::Pre,
        } = self.previous
        {
            if let Some(caps) = PRE_LANGUAGE.captures(text) {
                if let Some(frame) = self.frames.iter_mut().rev().find(|f| f.token == token) {
                    frame.data = Some(EntityData::Language(caps[1].to_string()));
                }
            }
            if let Some(line) = PRE_LANGUAGE_LINE.find(text) {
                text = &text[line.end()..];
            }
        }

        if self.previous != Previous::Text {
            text = text.trim_start_matches('\n');
        }

        self.text.push_str(text);
        self.length += utf16_len(text);
        self.previous = Previous::Text;
    }

    fn open(&mut self, index: usize, kind: EntityKind, token: &Token) {
        let skip = self
            .frames
            .iter()
            .any(|frame| frame.kind == kind || frame.kind.is_monospace());
        self.frames.push(Frame {
            kind,
            token: index,
            offset: self.length,
            skip,
            data: token.data.clone(),
        });
        if !skip {
            self.previous = Previous::Opened { token: index, kind };
        }
    }

    fn close(&mut self, token: &Token) {
        let Some(frame) = self.frames.pop() else {
            log::debug!("closer {:?} without an open frame", token.kind);
            return;
        };
        if frame.skip {
            return;
        }

        let floor = frame.offset.max(self.emitted);
        while self.length > floor && self.text.ends_with('\n') {
            self.text.pop();
            self.length -= 1;
        }

        self.entities.push(Entity {
            kind: frame.kind,
            offset: frame.offset,
            length: self.length - frame.offset,
            data: frame.data.or_else(|| token.data.clone()),
        });
        self.emitted = self.length;
    }

    fn finish(self) -> FormattedText {
        FormattedText::new(self.text, self.entities)
    }
}

/// Build the output text and entity list from matched tokens
pub fn emit(tokens: &[Token]) -> FormattedText {
    let mut emitter = Emitter::new();
    for (index, token) in tokens.iter().enumerate() {
        emitter.token(index, token);
    }
    emitter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::text(s)
    }

    fn open(kind: EntityKind) -> Token {
        Token::markup_open(kind, None)
    }

    fn close(kind: EntityKind) -> Token {
        Token::markup_close(kind, None)
    }

    #[test]
    fn test_plain_text() {
        let result = emit(&[text("hello")]);
        assert_eq!(result.text, "hello");
        assert_eq!(result.entities, None);
    }

    #[test]
    fn test_nested_entities() {
        let result = emit(&[
            open(EntityKind::Bold),
            text("a"),
            open(EntityKind::Italic),
            text("b"),
            close(EntityKind::Italic),
            close(EntityKind::Bold),
        ]);
        assert_eq!(result.text, "ab");
        assert_eq!(
            result.entities(),
            &[
                Entity::new(EntityKind::Italic, 1, 1),
                Entity::new(EntityKind::Bold, 0, 2),
            ]
        );
    }

    #[test]
    fn test_same_kind_nesting_is_flattened() {
        let result = emit(&[
            open(EntityKind::Bold),
            text("a"),
            open(EntityKind::Bold),
            text("b"),
            close(EntityKind::Bold),
            close(EntityKind::Bold),
        ]);
        assert_eq!(result.entities(), &[Entity::new(EntityKind::Bold, 0, 2)]);
    }

    #[test]
    fn test_nothing_nests_in_code() {
        let result = emit(&[
            open(EntityKind::Code),
            open(EntityKind::Bold),
            text("x"),
            close(EntityKind::Bold),
            close(EntityKind::Code),
        ]);
        assert_eq!(result.entities(), &[Entity::new(EntityKind::Code, 0, 1)]);
    }

    #[test]
    fn test_pre_language_line() {
        let result = emit(&[
            open(EntityKind::Pre),
            text("rust\nfn main() {}\n"),
            close(EntityKind::Pre),
        ]);
        assert_eq!(result.text, "fn main() {}");
        assert_eq!(
            result.entities(),
            &[Entity::new(EntityKind::Pre, 0, 12)
                .with_data(EntityData::Language("rust".to_string()))]
        );
    }

    #[test]
    fn test_newlines_trimmed_around_entities() {
        let result = emit(&[
            text("a"),
            open(EntityKind::Blockquote),
            text("\nquote\n\n"),
            close(EntityKind::Blockquote),
            text("\nb"),
        ]);
        assert_eq!(result.text, "aquote\nb");
        assert_eq!(
            result.entities(),
            &[Entity::new(EntityKind::Blockquote, 1, 5)]
        );
    }

    #[test]
    fn test_newline_after_closed_entity_is_kept() {
        let result = emit(&[
            open(EntityKind::Bold),
            text("hi"),
            close(EntityKind::Bold),
            text("\nthere"),
        ]);
        assert_eq!(result.text, "hi\nthere");
        assert_eq!(result.entities(), &[Entity::new(EntityKind::Bold, 0, 2)]);
    }

    #[test]
    fn test_pre_language_line_overrides_attribute() {
        let result = emit(&[
            Token::markup_open(
                EntityKind::Pre,
                Some(EntityData::Language("rust".to_string())),
            ),
            text("python\nx = 1"),
            Token::markup_close(
                EntityKind::Pre,
                Some(EntityData::Language("rust".to_string())),
            ),
        ]);
        assert_eq!(result.text, "x = 1");
        assert_eq!(
            result.entities(),
            &[Entity::new(EntityKind::Pre, 0, 5)
                .with_data(EntityData::Language("python".to_string()))]
        );
    }

    #[test]
    fn test_trim_stops_at_entity_start() {
        let result = emit(&[
            text("a\n"),
            open(EntityKind::Bold),
            close(EntityKind::Bold),
        ]);
        assert_eq!(result.text, "a\n");
        assert_eq!(result.entities(), &[Entity::new(EntityKind::Bold, 2, 0)]);
    }

    #[test]
    fn test_trim_keeps_emitted_entities_in_bounds() {
        let result = emit(&[
            open(EntityKind::Bold),
            text("a\n"),
            open(EntityKind::Italic),
            close(EntityKind::Italic),
            close(EntityKind::Bold),
        ]);
        assert_eq!(result.text, "a\n");
        assert_eq!(
            result.entities(),
            &[
                Entity::new(EntityKind::Italic, 2, 0),
                Entity::new(EntityKind::Bold, 0, 2),
            ]
        );
    }

    #[test]
    fn test_suppressed_tokens_are_skipped() {
        let mut hidden = text("hidden");
        hidden.suppressed = true;
        let result = emit(&[text("shown"), hidden]);
        assert_eq!(result.text, "shown");
    }

    #[test]
    fn test_utf16_offsets() {
        let result = emit(&[
            text("😀"),
            open(EntityKind::Italic),
            text("é"),
            close(EntityKind::Italic),
        ]);
        assert_eq!(result.entities(), &[Entity::new(EntityKind::Italic, 2, 1)]);
    }
}
