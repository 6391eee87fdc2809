//! Markdown → HTML using pulldown-cmark.
//!
//! Enabled on top of CommonMark: tables, footnotes, strikethrough, soft line
//! breaks rendered as `<br />`, and `[[wiki links]]`.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

/// URL suffix appended to wiki link targets.
const WIKILINK_SUFFIX: &str = ".html";

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH
}

/// Render a Markdown body to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut in_code_block = false;
    let events = TextMergeStream::new(Parser::new_ext(markdown, options())).flat_map(
        move |event| match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                vec![event]
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                vec![event]
            }
            Event::SoftBreak => vec![Event::HardBreak],
            Event::Text(text) if !in_code_block && text.contains("[[") => expand_wikilinks(&text),
            other => vec![other],
        },
    );

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Split a text run into plain text and wiki link events.
///
/// `[[Page Name]]` links to `Page Name.html`; `[[target|label]]` shows
/// `label`. Unclosed or empty brackets stay as text.
fn expand_wikilinks(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("[[") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("]]") else {
            break;
        };
        let inner = &after_open[..close];
        let (target, label) = match inner.split_once('|') {
            Some((target, label)) => (target.trim(), label.trim()),
            None => (inner.trim(), inner.trim()),
        };
        if target.is_empty() {
            push_text(&mut events, &rest[..open + 2]);
            rest = after_open;
            continue;
        }

        push_text(&mut events, &rest[..open]);
        let href = escape_attr(&format!("{target}{WIKILINK_SUFFIX}"));
        events.push(Event::InlineHtml(CowStr::from(format!(
            r#"<a class="wikilink" href="{href}">"#
        ))));
        push_text(&mut events, if label.is_empty() { target } else { label });
        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
        rest = &after_open[close + 2..];
    }

    push_text(&mut events, rest);
    events
}

fn push_text(events: &mut Vec<Event<'static>>, text: &str) {
    if !text.is_empty() {
        events.push(Event::Text(CowStr::from(text.to_owned())));
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
