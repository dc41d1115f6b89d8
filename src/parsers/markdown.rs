// Markdown to HTML for finder answers

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `url` uses a scheme safe to put behind a link: http, https or mailto.
///
/// Relative and scheme-less targets are rejected along with everything else.
pub fn is_safe_url(url: &str) -> bool {
    let Some((scheme, _)) = url.trim_start().split_once(':') else {
        return false;
    };
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}

/// Render markdown to HTML. Links open in a new tab.
///
/// Model output is untrusted: embedded HTML is escaped as text, and a link
/// with any other scheme than http, https or mailto keeps only its label.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    // One entry per open link: whether its anchor was written
    let mut open_links: Vec<bool> = Vec::new();

    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) => {
            if !is_safe_url(&dest_url) {
                log::debug!("Dropping link target {:?}", &*dest_url);
                open_links.push(false);
                return Event::Text(CowStr::Borrowed(""));
            }
            open_links.push(true);

            let mut open = format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
                escape_attr(&dest_url)
            );
            if !title.is_empty() {
                open.push_str(&format!(" title=\"{}\"", escape_attr(&title)));
            }
            open.push('>');
            Event::InlineHtml(CowStr::from(open))
        }
        Event::End(TagEnd::Link) => {
            if open_links.pop().unwrap_or(false) {
                Event::InlineHtml(CowStr::Borrowed("</a>"))
            } else {
                Event::Text(CowStr::Borrowed(""))
            }
        }
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
