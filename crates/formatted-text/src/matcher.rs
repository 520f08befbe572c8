//! Delimiter matching.
//!
//! Pairs openers with closers over the flat token sequence and resolves
//! Markdown links. Formatting tokens left without a partner are demoted to
//! literal text, so the emitter only ever sees properly nested pairs.

use formatted_text_core::{EntityData, EntityKind};
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::token::{Token, TokenKind};

static CUSTOM_EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^customEmoji:(\d+)$").expect("CUSTOM_EMOJI: hardcoded regex is valid")
});

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:ftp|https?)://)?",
        r"(?:(?:www\.)?(?:[-\p{L}\p{N}@:%._+~#=]+)\.(?:xn--[a-z0-9-]{2,}|\p{L}{2,})",
        r"|(?:\d{1,3}\.){3}\d{1,3})",
        r"\b[-\p{L}\p{N}\p{M}()@:%_+.,~#?&/=]*$",
    ))
    .expect("LINK: hardcoded regex is valid")
});

/// Resolve a Markdown link target into an entity kind and payload
pub fn resolve_link(target: &str) -> Option<(EntityKind, EntityData)> {
    if let Some(caps) = CUSTOM_EMOJI.captures(target) {
        return Some((
            EntityKind::CustomEmoji,
            EntityData::DocumentId(caps[1].to_string()),
        ));
    }

    if !LINK.is_match(target) {
        return None;
    }

    let url = if target.contains("://") {
        target.to_string()
    } else if target.contains('@') {
        format!("mailto:{target}")
    } else {
        format!("https://{target}")
    };
    Some((EntityKind::TextUrl, EntityData::Url(url)))
}

/// Match delimiters in place
pub fn match_tokens(tokens: &mut [Token]) {
    let mut stack: SmallVec<[usize; 16]> = SmallVec::new();

    for i in 0..tokens.len() {
        let Some(kind) = tokens[i].entity_kind() else {
            continue;
        };

        let mut closed = false;
        if tokens[i].can_close {
            closed = if tokens[i].is_link_end() {
                close_link(tokens, &mut stack, i)
            } else {
                close_pair(tokens, &mut stack, i, kind)
            };
        }

        if !closed {
            // Link separators have no flags but must stay visible to later link ends
            if tokens[i].can_open || kind == EntityKind::Url {
                stack.push(i);
            } else {
                tokens[i].demote();
            }
        }
    }

    for &index in &stack {
        tokens[index].demote();
    }
}

/// Pop everything above `position`, demoting it, and return the token there
fn unwind(tokens: &mut [Token], stack: &mut SmallVec<[usize; 16]>, position: usize) -> usize {
    for &index in &stack[position + 1..] {
        tokens[index].demote();
    }
    let opener = stack[position];
    stack.truncate(position);
    opener
}

fn close_pair(
    tokens: &mut [Token],
    stack: &mut SmallVec<[usize; 16]>,
    i: usize,
    kind: EntityKind,
) -> bool {
    let origin = tokens[i].origin;
    let Some(position) = stack.iter().rposition(|&index| {
        let candidate = &tokens[index];
        candidate.kind == TokenKind::Format(kind) && candidate.origin == origin && candidate.can_open
    }) else {
        return false;
    };

    let opener = unwind(tokens, stack, position);
    tokens[opener].can_close = false;
    tokens[i].can_open = false;
    true
}

/// Resolve `[label](target)` ending at token `i`
fn close_link(tokens: &mut [Token], stack: &mut SmallVec<[usize; 16]>, i: usize) -> bool {
    let mut separator: Option<usize> = None;

    for position in (0..stack.len()).rev() {
        let candidate = &tokens[stack[position]];
        if candidate.is_link_target() {
            separator = Some(position);
            continue;
        }
        if !candidate.is_link_label() {
            continue;
        }
        let Some(marker) = separator else {
            continue;
        };

        let target: String = tokens[stack[marker] + 1..i]
            .iter()
            .map(|token| token.text.as_str())
            .collect();
        let Some((kind, data)) = resolve_link(&target) else {
            log::debug!("not a link target: {target:?}");
            continue;
        };

        for token in &mut tokens[stack[marker]..i] {
            token.suppressed = true;
        }
        let label = unwind(tokens, stack, position);

        let opener = &mut tokens[label];
        opener.kind = TokenKind::Format(kind);
        opener.can_close = false;
        opener.data = Some(data.clone());

        let closer = &mut tokens[i];
        closer.kind = TokenKind::Format(kind);
        closer.can_open = false;
        closer.data = Some(data);
        return true;
    }

    false
}
