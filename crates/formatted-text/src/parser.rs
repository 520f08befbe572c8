//! FormattedTextParser - the main entry point for HTML to formatted text parsing.

use formatted_text_core::{FormattedText, ParseOptions};

use crate::cleanup::fix_image_content;
use crate::emitter::emit;
use crate::matcher::match_tokens;
use crate::node::Fragment;
use crate::tokenizer::Tokenizer;

/// Parses editor HTML with inline Markdown into text plus entities
#[derive(Debug, Clone, Default)]
pub struct FormattedTextParser {
    options: ParseOptions,
}

impl FormattedTextParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse an HTML string.
    ///
    /// Never fails: malformed markup and unbalanced sigils degrade to text.
    #[cfg(feature = "html")]
    pub fn parse(&self, html: &str) -> FormattedText {
        let html = if self.options.skip_markdown {
            html.to_string()
        } else {
            crate::cleanup::cleanup_html(html)
        };
        let html = crate::cleanup::normalize_input(&html);
        let fragment = crate::html::parse_html(&html);
        log::trace!("parsed {} bytes into {} nodes", html.len(), fragment.len());
        self.parse_fragment(&fragment)
    }

    /// Parse an already built node tree
    pub fn parse_fragment(&self, fragment: &Fragment) -> FormattedText {
        let mut fragment = fragment.clone();
        fix_image_content(&mut fragment);

        let mut tokens = Tokenizer::new(self.options.with_markdown_links).tokenize(&fragment);
        log::trace!("tokenized into {} tokens", tokens.len());

        match_tokens(&mut tokens);
        let formatted = emit(&tokens);
        log::trace!(
            "emitted {} UTF-16 units with {} entities",
            formatted.utf16_len(),
            formatted.entities().len()
        );
        formatted
    }

    /// Get the current options
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ParseOptions {
        &mut self.options
    }
}

/// Parse HTML with a one-off parser
#[cfg(feature = "html")]
pub fn parse_html_as_formatted_text(
    html: &str,
    with_markdown_links: bool,
    skip_markdown: bool,
) -> FormattedText {
    FormattedTextParser::with_options(ParseOptions::new(with_markdown_links, skip_markdown))
        .parse(html)
}
