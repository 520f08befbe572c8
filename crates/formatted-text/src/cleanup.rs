//! Editor HTML cleanup and image fix-up.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Fragment, NodeId};

static NBSP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&nbsp;").expect("NBSP: hardcoded regex is valid"));

// A blank visual line in Safari
static EMPTY_DIV_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<div><br([^>]*)?></div>").expect("EMPTY_DIV_LINE: hardcoded regex is valid")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<br([^>]*)?>").expect("LINE_BREAK: hardcoded regex is valid"));

static DIV_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</div>(\s*)<div>").expect("DIV_BOUNDARY: hardcoded regex is valid")
});

static DIV_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<div>").expect("DIV_OPEN: hardcoded regex is valid"));

static DIV_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</div>").expect("DIV_CLOSE: hardcoded regex is valid"));

/// Turn editor line markup into plain newlines.
///
/// `&nbsp;` becomes a space, `<br>` and `div` boundaries become `\n`.
pub fn cleanup_html(html: &str) -> String {
    let html = NBSP.replace_all(html, " ");
    let html = EMPTY_DIV_LINE.replace_all(&html, "\n");
    let html = LINE_BREAK.replace_all(&html, "\n");
    let html = DIV_BOUNDARY.replace_all(&html, "\n");
    let html = DIV_OPEN.replace_all(&html, "\n");
    DIV_CLOSE.replace_all(&html, "").into_owned()
}

/// Trim surrounding whitespace and drop zero-width spaces
pub fn normalize_input(html: &str) -> String {
    html.trim().replace('\u{200B}', "")
}

/// Replace images by their alt text.
///
/// Custom emoji images (`data-document-id`) keep their element so they still
/// produce an entity, with the alt text as their only child. Any other image
/// becomes a plain text node.
pub fn fix_image_content(fragment: &mut Fragment) {
    let images: Vec<NodeId> = fragment
        .descendants(fragment.root())
        .filter(|&id| {
            let node = fragment.get(id);
            node.is_element() && node.node_name == "IMG"
        })
        .collect();

    for id in images {
        let node = fragment.get(id);
        let alt = node.attr("alt").unwrap_or_default().to_string();
        if node.attr("data-document-id").is_some_and(|doc| !doc.is_empty()) {
            fragment.set_text_content(id, &alt);
        } else {
            fragment.replace_with_text(id, &alt);
        }
    }
}
