use formatted_text::{
    parse_html_as_formatted_text, to_html, Entity, EntityData, EntityKind, FormattedText,
    FormattedTextParser, ParseOptions,
};
use pretty_assertions::assert_eq;

fn parse(html: &str) -> FormattedText {
    parse_html_as_formatted_text(html, false, false)
}

fn parse_with_links(html: &str) -> FormattedText {
    parse_html_as_formatted_text(html, true, false)
}

fn url(kind: EntityKind, offset: usize, length: usize, url: &str) -> Entity {
    Entity::new(kind, offset, length).with_data(EntityData::Url(url.to_string()))
}

#[test]
fn plain_text_has_no_entities() {
    assert_eq!(parse("plain text"), FormattedText::plain("plain text"));
}

#[test]
fn markup_bold() {
    assert_eq!(
        parse("<b>hi</b> there"),
        FormattedText::new("hi there", vec![Entity::new(EntityKind::Bold, 0, 2)])
    );
}

#[test]
fn markdown_bold() {
    assert_eq!(
        parse_with_links("**hi** there"),
        FormattedText::new("hi there", vec![Entity::new(EntityKind::Bold, 0, 2)])
    );
}

#[test]
fn unclosed_sigil_stays_text() {
    assert_eq!(parse("*unclosed"), FormattedText::plain("*unclosed"));
    assert_eq!(parse("**unclosed"), FormattedText::plain("**unclosed"));
}

#[test]
fn markdown_text_url() {
    assert_eq!(
        parse_html_as_formatted_text("[label](https://example.com)", true, true),
        FormattedText::new(
            "label",
            vec![url(EntityKind::TextUrl, 0, 5, "https://example.com")]
        )
    );
}

#[test]
fn markdown_link_targets_are_normalized() {
    assert_eq!(
        parse_with_links("see [docs](docs.rs) or [me](me@example.com)"),
        FormattedText::new(
            "see docs or me",
            vec![
                url(EntityKind::TextUrl, 4, 4, "https://docs.rs"),
                url(EntityKind::TextUrl, 12, 2, "mailto:me@example.com"),
            ]
        )
    );
}

#[test]
fn markdown_custom_emoji() {
    assert_eq!(
        parse_html_as_formatted_text("[label](customEmoji:123)", true, true),
        FormattedText::new(
            "label",
            vec![Entity::new(EntityKind::CustomEmoji, 0, 5)
                .with_data(EntityData::DocumentId("123".to_string()))]
        )
    );
}

#[test]
fn invalid_link_target_stays_text() {
    assert_eq!(
        parse_with_links("[label](not a link)"),
        FormattedText::plain("[label](not a link)")
    );
}

#[test]
fn editor_divs_become_lines() {
    assert_eq!(
        parse("<div>line1</div><div>line2</div>"),
        FormattedText::plain("line1\nline2")
    );
    assert_eq!(
        parse("line1<div><br></div><div>line3</div>"),
        FormattedText::plain("line1\n\nline3")
    );
}

#[test]
fn nbsp_and_zero_width_spaces() {
    assert_eq!(parse("a&nbsp;b\u{200B}c"), FormattedText::plain("a bc"));
}

#[test]
fn pre_block_language() {
    assert_eq!(
        parse("```rust\nfn main() {}```"),
        FormattedText::new(
            "fn main() {}",
            vec![Entity::new(EntityKind::Pre, 0, 12)
                .with_data(EntityData::Language("rust".to_string()))]
        )
    );
}

#[test]
fn inline_code() {
    assert_eq!(
        parse("a `x` b"),
        FormattedText::new("a x b", vec![Entity::new(EntityKind::Code, 2, 1)])
    );
}

#[test]
fn run_terminators_are_not_rescanned() {
    assert_eq!(parse("`**x**`"), FormattedText::plain("`**x**`"));
    assert_eq!(parse("**`code`**"), FormattedText::plain("**`code`**"));
}

#[test]
fn pre_language_line_overrides_attribute() {
    assert_eq!(
        parse("<pre data-language=\"rust\">python\nx = 1</pre>"),
        FormattedText::new(
            "x = 1",
            vec![Entity::new(EntityKind::Pre, 0, 5)
                .with_data(EntityData::Language("python".to_string()))]
        )
    );
}

#[test]
fn markup_and_markdown_of_same_kind_do_not_nest() {
    assert_eq!(
        parse("<b>**x**</b>"),
        FormattedText::new("x", vec![Entity::new(EntityKind::Bold, 0, 1)])
    );
}

#[test]
fn crossing_sigils_keep_the_first_pair() {
    assert_eq!(
        parse("__a **b__ c**"),
        FormattedText::new("a **b c**", vec![Entity::new(EntityKind::Italic, 0, 5)])
    );
}

#[test]
fn all_sigil_kinds() {
    assert_eq!(
        parse("**b** __i__ ~~s~~ ||p||"),
        FormattedText::new(
            "b i s p",
            vec![
                Entity::new(EntityKind::Bold, 0, 1),
                Entity::new(EntityKind::Italic, 2, 1),
                Entity::new(EntityKind::Strike, 4, 1),
                Entity::new(EntityKind::Spoiler, 6, 1),
            ]
        )
    );
}

#[test]
fn anchors() {
    assert_eq!(
        parse(concat!(
            r#"<a href="https://example.com">https://example.com</a> "#,
            r#"<a href="https://example.com">site</a> "#,
            r#"<a href="mailto:a@b.co">a@b.co</a> "#,
            r#"<a href="tel:+123">call</a> "#,
            r#"<a>plain</a>"#,
        )),
        FormattedText::new(
            "https://example.com site a@b.co call plain",
            vec![
                Entity::new(EntityKind::Url, 0, 19),
                url(EntityKind::TextUrl, 20, 4, "https://example.com"),
                Entity::new(EntityKind::Email, 25, 6),
                Entity::new(EntityKind::Phone, 32, 4),
            ]
        )
    );
}

#[test]
fn typed_elements() {
    assert_eq!(
        parse(concat!(
            r#"<span data-entity-type="MessageEntitySpoiler">secret</span> "#,
            r#"<a data-entity-type="MessageEntityMentionName" data-user-id="42">Bob</a>"#,
        )),
        FormattedText::new(
            "secret Bob",
            vec![
                Entity::new(EntityKind::Spoiler, 0, 6),
                Entity::new(EntityKind::MentionName, 7, 3)
                    .with_data(EntityData::UserId("42".to_string())),
            ]
        )
    );
}

#[test]
fn images() {
    assert_eq!(
        parse(r#"hot <img alt="🔥" data-document-id="5"> <img alt="🙂" src="smile.png">"#),
        FormattedText::new(
            "hot 🔥 🙂",
            vec![Entity::new(EntityKind::CustomEmoji, 4, 2)
                .with_data(EntityData::DocumentId("5".to_string()))]
        )
    );
}

#[test]
fn blockquote_newlines_are_trimmed() {
    assert_eq!(
        parse("<blockquote>\nquoted\n</blockquote>\ntail"),
        FormattedText::new("quoted\ntail", vec![Entity::new(EntityKind::Blockquote, 0, 6)])
    );
}

#[test]
fn newline_after_closed_entity_is_kept() {
    let bold = || vec![Entity::new(EntityKind::Bold, 0, 2)];
    assert_eq!(parse("<b>hi</b><br>there"), FormattedText::new("hi\nthere", bold()));
    assert_eq!(parse_with_links("**hi**\nthere"), FormattedText::new("hi\nthere", bold()));
    assert_eq!(
        parse("<div><b>line1</b></div><div>line2</div>"),
        FormattedText::new("line1\nline2", vec![Entity::new(EntityKind::Bold, 0, 5)])
    );
}

#[test]
fn offsets_count_utf16_units() {
    assert_eq!(
        parse("😀 **x**"),
        FormattedText::new("😀 x", vec![Entity::new(EntityKind::Bold, 3, 1)])
    );
}

#[test]
fn parser_reuses_options() {
    let parser = FormattedTextParser::with_options(ParseOptions::new(true, false));
    assert!(parser.options().with_markdown_links);
    for _ in 0..2 {
        assert_eq!(parser.parse("[a](b.io)").entities().len(), 1);
    }
}

#[test]
fn html_round_trip() {
    let inputs = [
        "<b>bold <i>both</i></b> plain",
        "<u>under</u> <s>strike</s> <code>code</code>",
        "```rust\nfn main() {}```",
        r#"<span data-entity-type="MessageEntitySpoiler">secret</span> after"#,
        r#"<a href="https://example.com">site</a> &amp; <a href="mailto:a@b.co">a@b.co</a>"#,
        r#"<a data-entity-type="MessageEntityMentionName" data-user-id="42">Bob</a>"#,
        r#"a<img alt="🔥" data-document-id="5">b"#,
        "<blockquote>quoted</blockquote>tail",
        "1 &lt; 2 &amp;&amp; 3 &gt; 2",
    ];

    for input in inputs {
        let first = parse(input);
        let html = to_html(&first);
        assert_eq!(parse(&html), first, "round trip of {input:?} via {html:?}");
    }
}
