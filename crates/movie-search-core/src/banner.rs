use movie_search_models::{is_blank, BannerPayload, MovieRecord};

/// Renders a resolved movie into the message shown to the user
///
/// The text uses Telegram-style Markdown (`*bold*`, `_italic_`). Watch links
/// are labelled with the site they were looked up on.
#[derive(Debug, Clone)]
pub struct BannerFormatter {
    sites: Vec<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    if is_blank(value) {
        None
    } else {
        value.as_deref().map(str::trim)
    }
}

/// Backslash-escape the characters that open Markdown entities
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl BannerFormatter {
    pub fn new(sites: Vec<String>) -> Self {
        Self { sites }
    }

    pub fn render(&self, movie: &MovieRecord) -> BannerPayload {
        let mut lines = Vec::new();

        let title = movie.display_title();
        lines.push(format!("*{}*", escape_markdown(title)));
        if let Some(original) = present(&movie.original_title).filter(|o| *o != title) {
            lines.push(format!("_{}_", escape_markdown(original)));
        }

        if let Some(description) = present(&movie.description) {
            lines.push(String::new());
            lines.push(escape_markdown(description));
        }

        let mut details = Vec::new();
        if let Some(rating) = movie.rating_kp {
            details.push(format!("Kinopoisk: {:.1}", rating));
        }
        if let Some(rating) = movie.rating_imdb {
            details.push(format!("IMDb: {:.1}", rating));
        }
        if let Some(link) = present(&movie.link_kp) {
            details.push(format!("Kinopoisk page: {}", link));
        }
        if !details.is_empty() {
            lines.push(String::new());
            lines.extend(details);
        }

        let links: Vec<String> = self
            .sites
            .iter()
            .zip(&movie.links_to_watch)
            .filter_map(|(site, link)| present(link).map(|link| format!("- {}: {}", site, link)))
            .collect();
        if !links.is_empty() {
            lines.push(String::new());
            lines.push("Watch online:".to_string());
            lines.extend(links);
        }

        BannerPayload {
            text: lines.join("\n"),
            picture: present(&movie.poster).map(str::to_string),
        }
    }
}
