//! Tokenizer: walks the node tree and scans text nodes for Markdown sigils.

use formatted_text_core::{EntityData, EntityKind, Flank};
use smallvec::SmallVec;

use crate::node::{Fragment, NodeId, NodeType};
use crate::token::Token;

/// Entity kind implied by an element name alone
pub fn entity_kind_for_tag(node_name: &str) -> Option<EntityKind> {
    match node_name.to_ascii_uppercase().as_str() {
        "B" | "STRONG" => Some(EntityKind::Bold),
        "I" | "EM" => Some(EntityKind::Italic),
        "INS" | "U" => Some(EntityKind::Underline),
        "S" | "STRIKE" | "DEL" => Some(EntityKind::Strike),
        "CODE" => Some(EntityKind::Code),
        "PRE" => Some(EntityKind::Pre),
        "BLOCKQUOTE" => Some(EntityKind::Blockquote),
        _ => None,
    }
}

/// Classify an element and extract its entity payload.
///
/// An explicit `data-entity-type` wins, then the tag name, then the anchor
/// and custom emoji rules.
pub fn classify_element(
    fragment: &Fragment,
    id: NodeId,
) -> Option<(EntityKind, Option<EntityData>)> {
    let node = fragment.get(id);
    if !node.is_element() {
        return None;
    }

    let explicit = node.attr("data-entity-type").and_then(|name| {
        let kind = name.parse::<EntityKind>();
        if let Err(err) = &kind {
            log::trace!("ignoring {err} on <{}>", node.tag_name());
        }
        kind.ok()
    });

    let kind = explicit
        .or_else(|| entity_kind_for_tag(&node.node_name))
        .or_else(|| match node.node_name.as_str() {
            "A" => classify_anchor(fragment, id),
            "IMG" if node.attr("data-document-id").is_some() => Some(EntityKind::CustomEmoji),
            _ => None,
        })?;

    let data = match kind {
        EntityKind::TextUrl => node
            .attr("href")
            .map(|href| EntityData::Url(href.to_string())),
        EntityKind::MentionName => node
            .attr("data-user-id")
            .map(|id| EntityData::UserId(id.to_string())),
        EntityKind::Pre => node
            .attr("data-language")
            .filter(|language| !language.is_empty())
            .map(|language| EntityData::Language(language.to_string())),
        EntityKind::CustomEmoji => node
            .attr("data-document-id")
            .map(|id| EntityData::DocumentId(id.to_string())),
        _ => None,
    };

    Some((kind, data))
}

fn classify_anchor(fragment: &Fragment, id: NodeId) -> Option<EntityKind> {
    let href = fragment.get(id).attr("href")?;
    if href.starts_with("mailto:") {
        Some(EntityKind::Email)
    } else if href.starts_with("tel:") {
        Some(EntityKind::Phone)
    } else if href != fragment.text_content(id) {
        Some(EntityKind::TextUrl)
    } else {
        Some(EntityKind::Url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sigil {
    Star,
    Underscore,
    Tilde,
    Pipe,
}

impl Sigil {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Sigil::Star),
            '_' => Some(Sigil::Underscore),
            '~' => Some(Sigil::Tilde),
            '|' => Some(Sigil::Pipe),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Sigil::Star => '*',
            Sigil::Underscore => '_',
            Sigil::Tilde => '~',
            Sigil::Pipe => '|',
        }
    }

    fn entity_kind(self) -> EntityKind {
        match self {
            Sigil::Star => EntityKind::Bold,
            Sigil::Underscore => EntityKind::Italic,
            Sigil::Tilde => EntityKind::Strike,
            Sigil::Pipe => EntityKind::Spoiler,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Emphasis(Sigil),
    Backtick,
}

impl ScanState {
    /// State entered when `c` follows a finished emphasis run.
    /// Only another sigil restarts a run immediately; a backtick does not.
    fn after(c: Option<char>) -> Self {
        c.and_then(Sigil::from_char)
            .map_or(ScanState::Idle, ScanState::Emphasis)
    }
}

/// Character positions of one text node
struct Chars<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
}

impl<'a> Chars<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn get(&self, i: usize) -> Option<char> {
        self.chars.get(i).map(|&(_, c)| c)
    }

    fn byte(&self, i: usize) -> usize {
        self.chars.get(i).map_or(self.text.len(), |&(b, _)| b)
    }

    /// Text between two character positions, empty if the range is
    fn slice(&self, start: usize, end: usize) -> &'a str {
        if end <= start {
            return "";
        }
        &self.text[self.byte(start)..self.byte(end)]
    }
}

/// Turns a node tree into a flat token sequence
pub struct Tokenizer {
    tokens: Vec<Token>,
    with_markdown_links: bool,
}

impl Tokenizer {
    pub fn new(with_markdown_links: bool) -> Self {
        Self {
            tokens: Vec::new(),
            with_markdown_links,
        }
    }

    /// Tokenize a whole fragment
    pub fn tokenize(mut self, fragment: &Fragment) -> Vec<Token> {
        self.walk(fragment);
        self.tokens
    }

    fn walk(&mut self, fragment: &Fragment) {
        enum Step {
            Enter(NodeId),
            Exit(Token),
        }

        let mut work = vec![Step::Enter(fragment.root())];
        while let Some(step) = work.pop() {
            let id = match step {
                Step::Enter(id) => id,
                Step::Exit(token) => {
                    self.tokens.push(token);
                    continue;
                }
            };

            let node = fragment.get(id);
            match node.node_type {
                NodeType::Comment => {}
                NodeType::Text => self.scan_text(node.node_value.as_deref().unwrap_or_default()),
                NodeType::Element | NodeType::DocumentFragment => {
                    if let Some((kind, data)) = classify_element(fragment, id) {
                        self.tokens.push(Token::markup_open(kind, data.clone()));
                        work.push(Step::Exit(Token::markup_close(kind, data)));
                    }
                    let children: SmallVec<[NodeId; 8]> = fragment.children(id).collect();
                    work.extend(children.into_iter().rev().map(Step::Enter));
                }
            }
        }
    }

    /// Append literal text, merging with a preceding text token
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.tokens.last_mut() {
            Some(last) if last.is_text() => last.text.push_str(text),
            _ => self.tokens.push(Token::text(text)),
        }
    }

    /// Scan one text node.
    ///
    /// Positions run one past the last character so runs ending the node are
    /// finished with "no character" after them.
    pub fn scan_text(&mut self, text: &str) {
        let chars = Chars::new(text);
        let mut state = ScanState::Idle;
        let mut start = 0;
        let mut before = Flank::default();
        let mut prev: Option<char> = None;

        for i in 0..=chars.len() {
            let ch = chars.get(i);

            match state {
                ScanState::Idle => {
                    if let Some(sigil) = ch.and_then(Sigil::from_char) {
                        self.push_text(chars.slice(start, i));
                        state = ScanState::Emphasis(sigil);
                        before = Flank::of(prev);
                        start = i;
                    } else if ch == Some('`') {
                        self.push_text(chars.slice(start, i));
                        state = ScanState::Backtick;
                        start = i;
                    }
                }
                ScanState::Backtick => {
                    if ch != Some('`') {
                        let run = chars.slice(start, i);
                        let finished = match i - start {
                            1 => {
                                self.tokens.push(Token::sigil(EntityKind::Code, run, true, true));
                                true
                            }
                            // Empty inline code is not an entity
                            2 => {
                                self.push_text(run);
                                true
                            }
                            3 => {
                                self.tokens.push(Token::sigil(EntityKind::Pre, run, true, true));
                                true
                            }
                            _ => false,
                        };
                        // The terminating character is not itself rescanned
                        if finished {
                            state = ScanState::Idle;
                            start = i;
                        }
                    }
                }
                ScanState::Emphasis(sigil) => {
                    let run = i - start;
                    if run == 1 && ch != Some(sigil.as_char()) {
                        self.push_text(chars.slice(start, i));
                        state = ScanState::after(ch);
                        before = Flank::of(prev);
                        start = i;
                    } else if run == 2 {
                        let after = Flank::of(ch);
                        let can_open = before.can_open(after);
                        let can_close = before.can_close(after);
                        let delimiter = chars.slice(start, i);
                        if can_open || can_close {
                            self.tokens.push(Token::sigil(
                                sigil.entity_kind(),
                                delimiter,
                                can_open,
                                can_close,
                            ));
                        } else {
                            self.push_text(delimiter);
                        }
                        state = ScanState::after(ch);
                        before = Flank::of(prev);
                        start = i;
                    }
                }
            }

            if self.with_markdown_links {
                let link = match (prev, ch) {
                    (_, Some('[')) => Some((Token::link_label(), i)),
                    (Some(']'), Some('(')) => Some((Token::link_target(), i - 1)),
                    (_, Some(')')) => Some((Token::link_end(), i)),
                    _ => None,
                };
                if let Some((token, flush_end)) = link {
                    self.push_text(chars.slice(start, flush_end));
                    self.tokens.push(token);
                    state = ScanState::Idle;
                    start = i + 1;
                }
            }

            prev = ch;
        }

        self.push_text(chars.slice(start, chars.len()));
    }
}
