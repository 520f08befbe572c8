//! Formatted text serialization
//!
//! Renders a [`FormattedText`] back into the HTML markup the parser reads, so
//! that parsing the output reproduces the same entities.

use crate::entity::{Entity, EntityKind, FormattedText};

/// Serialize formatted text to HTML markup
pub fn to_html(formatted: &FormattedText) -> String {
    let mut order: Vec<&Entity> = formatted.entities().iter().collect();
    // Outer entities first when two start together
    order.sort_by(|a, b| a.offset.cmp(&b.offset).then(b.length.cmp(&a.length)));

    let mut output = String::with_capacity(formatted.text.len() + order.len() * 16);
    let mut open: Vec<&Entity> = Vec::new();
    let mut pending = order.into_iter().peekable();
    let mut chars = formatted.text.chars();
    let mut pos = 0;

    loop {
        close_ended(&mut open, pos, &mut output);
        while let Some(entity) = pending.next_if(|e| e.offset <= pos) {
            open_tag(entity, &mut output);
            open.push(entity);
        }
        // Zero-length entities close right where they opened
        close_ended(&mut open, pos, &mut output);

        let Some(c) = chars.next() else {
            break;
        };
        push_escaped_char(c, &mut output);
        pos += c.len_utf16();
    }

    while let Some(entity) = open.pop() {
        close_tag(entity, &mut output);
    }

    output
}

/// Close every open entity ending at or before `pos`.
///
/// Entities opened later that are still running get closed and reopened so
/// the tags stay properly nested.
fn close_ended<'a>(open: &mut Vec<&'a Entity>, pos: usize, out: &mut String) {
    let Some(first) = open.iter().position(|e| e.end() <= pos) else {
        return;
    };

    let tail = open.split_off(first);
    for entity in tail.iter().rev() {
        close_tag(entity, out);
    }
    for entity in tail {
        if entity.end() > pos {
            open_tag(entity, out);
            open.push(entity);
        }
    }
}

fn open_tag(entity: &Entity, out: &mut String) {
    match entity.kind {
        EntityKind::Bold => out.push_str("<b>"),
        EntityKind::Italic => out.push_str("<i>"),
        EntityKind::Underline => out.push_str("<u>"),
        EntityKind::Strike => out.push_str("<s>"),
        EntityKind::Code => out.push_str("<code>"),
        EntityKind::Blockquote => out.push_str("<blockquote>"),
        EntityKind::Pre => match entity.language() {
            Some(language) => {
                out.push_str("<pre data-language=\"");
                push_escaped_attr(language, out);
                out.push_str("\">");
            }
            None => out.push_str("<pre>"),
        },
        EntityKind::Spoiler => {
            push_typed_open("span", entity.kind, out);
            out.push('>');
        }
        EntityKind::CustomEmoji => {
            push_typed_open("span", entity.kind, out);
            push_attr("data-document-id", entity.document_id().unwrap_or_default(), out);
            out.push('>');
        }
        EntityKind::Url | EntityKind::Email | EntityKind::Phone => {
            push_typed_open("a", entity.kind, out);
            out.push('>');
        }
        EntityKind::TextUrl => {
            push_typed_open("a", entity.kind, out);
            push_attr("href", entity.url().unwrap_or_default(), out);
            out.push('>');
        }
        EntityKind::MentionName => {
            push_typed_open("a", entity.kind, out);
            push_attr("data-user-id", entity.user_id().unwrap_or_default(), out);
            out.push('>');
        }
    }
}

fn close_tag(entity: &Entity, out: &mut String) {
    let tag = match entity.kind {
        EntityKind::Bold => "b",
        EntityKind::Italic => "i",
        EntityKind::Underline => "u",
        EntityKind::Strike => "s",
        EntityKind::Code => "code",
        EntityKind::Blockquote => "blockquote",
        EntityKind::Pre => "pre",
        EntityKind::Spoiler | EntityKind::CustomEmoji => "span",
        EntityKind::Url
        | EntityKind::Email
        | EntityKind::Phone
        | EntityKind::TextUrl
        | EntityKind::MentionName => "a",
    };
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_typed_open(tag: &str, kind: EntityKind, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    push_attr("data-entity-type", kind.as_str(), out);
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    push_escaped_attr(value, out);
    out.push('"');
}

fn push_escaped_char(c: char, out: &mut String) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}

fn push_escaped_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            _ => push_escaped_char(c, out),
        }
    }
}
