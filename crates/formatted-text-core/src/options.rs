//! Configuration options for parsing

/// Options for parsing editor HTML into formatted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Recognise `[label](url)` links and `[label](customEmoji:id)` emoji
    pub with_markdown_links: bool,

    /// Use the HTML as given, skipping the `div`/`br`/`&nbsp;` cleanup
    pub skip_markdown: bool,
}

impl ParseOptions {
    pub fn new(with_markdown_links: bool, skip_markdown: bool) -> Self {
        Self {
            with_markdown_links,
            skip_markdown,
        }
    }
}
