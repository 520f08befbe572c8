//! HTML parsing support.
//!
//! Parses an HTML string with scraper (html5ever) and copies the result into
//! the arena [`Fragment`] the tokenizer walks.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Fragment;

/// Parse an HTML string into a [`Fragment`].
///
/// Elements, text and comments are kept; doctypes and processing
/// instructions are dropped.
///
/// # Example
///
/// ```rust
/// use formatted_text::{parse_html, FormattedTextParser};
///
/// let fragment = parse_html("Hello <b>World</b>");
///
/// let parser = FormattedTextParser::new();
/// let formatted = parser.parse_fragment(&fragment);
/// assert_eq!(formatted.text, "Hello World");
/// ```
pub fn parse_html(html: &str) -> Fragment {
    let document = Html::parse_fragment(html);
    let mut fragment = Fragment::new();

    // Iterative copy so deeply nested markup cannot overflow the stack
    let mut pending = vec![(document.root_element(), fragment.root())];
    while let Some((element, parent)) = pending.pop() {
        for child in element.children() {
            match child.value() {
                ScraperNode::Text(text) => {
                    fragment.append_text(parent, &text.text);
                }
                ScraperNode::Comment(comment) => {
                    fragment.append_comment(parent, &comment.comment);
                }
                ScraperNode::Element(value) => {
                    let id = fragment.append_element(parent, value.name(), value.attrs());
                    if let Some(child_element) = ElementRef::wrap(child) {
                        pending.push((child_element, id));
                    }
                }
                _ => {}
            }
        }
    }

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let fragment = parse_html("<b>Hello</b> World");
        let children: Vec<_> = fragment.children(fragment.root()).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(fragment.get(children[0]).node_name, "B");
        assert_eq!(fragment.text_content(fragment.root()), "Hello World");
    }

    #[test]
    fn test_parse_attributes_and_entities() {
        let fragment = parse_html(r#"<a href="https://example.com/?a=1&amp;b=2">x &amp; y</a>"#);
        let a = fragment.first_child(fragment.root()).unwrap();
        assert_eq!(fragment.get(a).attr("href"), Some("https://example.com/?a=1&b=2"));
        assert_eq!(fragment.text_content(a), "x & y");
    }

    #[test]
    fn test_parse_nested_order() {
        let fragment = parse_html("<b>1<i>2</i>3</b><u>4</u>");
        assert_eq!(fragment.text_content(fragment.root()), "1234");
        let b = fragment.first_child(fragment.root()).unwrap();
        assert_eq!(fragment.children(b).count(), 3);
    }

    #[test]
    fn test_parse_keeps_comments() {
        let fragment = parse_html("a<!-- note -->b");
        let kinds: Vec<_> = fragment
            .children(fragment.root())
            .map(|id| fragment.get(id).node_name.clone())
            .collect();
        assert_eq!(kinds, vec!["#text", "#comment", "#text"]);
        assert_eq!(fragment.text_content(fragment.root()), "ab");
    }
}
