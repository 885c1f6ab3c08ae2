//! Markdown rendering of a quote.

use anyhow::{Context, Result};
use reqwest::Url;

use crate::jinrishici::Quote;

/// Page that displays the full poem from its query parameters.
pub const POEM_PAGE_URL: &str = "https://jinrishici.waynegong.cn";

/// Render the chat message for `quote`.
///
/// ```text
/// > {excerpt}
///
///
/// 「[{title}]({link})」 {dynasty}·{author}
/// ```
///
/// The title is linked to the full poem only when the full text is known.
pub fn render(quote: &Quote) -> Result<String> {
    let origin = &quote.origin;
    let heading = if origin.content.is_empty() {
        origin.title.clone()
    } else {
        format!("[{}]({})", origin.title, poem_link(quote)?)
    };

    Ok(format!(
        "> {}\n\n\n「{}」 {}·{}\n\n",
        quote.content, heading, origin.dynasty, origin.author
    ))
}

/// Link to the full poem page.
pub fn poem_link(quote: &Quote) -> Result<Url> {
    let origin = &quote.origin;
    let full_text = origin.content.join("\n");
    Url::parse_with_params(
        POEM_PAGE_URL,
        &[
            ("content", full_text.as_str()),
            ("title", origin.title.as_str()),
            ("author", origin.author.as_str()),
        ],
    )
    .context("Failed to build poem link")
}
