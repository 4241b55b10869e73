//! Markdown Rendering
//!
//! pulldown-cmark with tables, strikethrough and task lists. Raw HTML in
//! the notes is shown as text, never injected.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

/// Render notes markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, parser);
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
}
