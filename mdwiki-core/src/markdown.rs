//! Markdown to HTML rendering
//!
//! Wraps pulldown-cmark with the extensions the wiki enables. Unless raw
//! HTML is explicitly allowed, HTML in page sources is escaped and links or
//! images pointing at script-capable schemes are replaced with `#`.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::{Deserialize, Serialize};

/// Rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Pass inline and block HTML, and every link scheme, through untouched
    #[serde(default)]
    pub allow_raw_html: bool,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Render markdown source to an HTML fragment.
///
/// ```
/// use mdwiki_core::markdown::{render, RenderOptions};
///
/// let html = render("*hi*", RenderOptions::default());
/// assert_eq!(html, "<p><em>hi</em></p>\n");
/// ```
pub fn render(markdown: &str, options: RenderOptions) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);

    if options.allow_raw_html {
        html::push_html(&mut out, parser);
    } else {
        html::push_html(&mut out, parser.map(sanitize));
    }

    out
}

/// Turn raw HTML into text and defuse script-capable destinations.
fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url, false) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url, true) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

/// Browsers drop whitespace and control characters inside a scheme, so
/// those are ignored before matching.
fn is_unsafe_url(url: &str, image: bool) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .flat_map(char::to_lowercase)
        .collect();

    if image && normalized.starts_with("data:image/") {
        return false;
    }

    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}
