//! Built-in layouts and the sections they share.
//!
//! Every layout exposes the same three items: `default_theme()`, `STYLES`
//! and `render(&Page) -> Markup`. Dispatch from [`LayoutId`] happens here and
//! nowhere else.

pub mod classic;
pub mod garden;
pub mod minimal;

use maud::{html, Markup, DOCTYPE};
use sha2::{Digest, Sha256};
use vows_core::site_path::fingerprinted_name;

use crate::content::SiteContent;
use crate::labels::Labels;
use crate::registry::LayoutId;
use crate::theme::Theme;

/// Directory holding generated assets inside a bundle.
pub const ASSETS_DIR: &str = "assets";

/// Bundle path of a generated stylesheet, fingerprinted by its content so
/// the public URL changes whenever the bytes do.
pub fn stylesheet_path(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("{ASSETS_DIR}/{}", fingerprinted_name("site", &digest, "css"))
}

/// Rules common to every layout; layout `STYLES` follow and may override.
const BASE_STYLES: &str = "\
*, *::before, *::after { box-sizing: border-box; }
body {
  margin: 0; background: var(--color-background); color: var(--color-text);
  font-family: var(--font-body); line-height: 1.6;
}
h1, h2, h3 { font-family: var(--font-heading); color: var(--color-primary); font-weight: normal; }
a { color: var(--color-primary); }
img { max-width: 100%; display: block; }
section { padding: 3rem 1.5rem; max-width: 56rem; margin: 0 auto; }
.events ul { list-style: none; padding: 0; }
.event { margin-bottom: 1.5rem; }
.gallery-grid {
  display: grid; grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr)); gap: 0.75rem;
}
footer { text-align: center; padding: 2rem 1rem; color: var(--color-primary); }
";

/// Inputs shared by every layout's page function.
pub struct Page<'a> {
    pub content: &'a SiteContent,
    pub labels: &'a Labels<'a>,
    /// Root-relative URL of this render's stylesheet.
    pub stylesheet_href: &'a str,
}

impl Page<'_> {
    pub fn title(&self) -> String {
        self.content.title(self.labels.get("and"))
    }
}

/// Default theme for a layout.
pub fn default_theme(id: LayoutId) -> Theme {
    match id {
        LayoutId::Classic => classic::default_theme(),
        LayoutId::Garden => garden::default_theme(),
        LayoutId::Minimal => minimal::default_theme(),
    }
}

/// Render the `index.html` document for a layout.
pub fn render_page(id: LayoutId, page: &Page<'_>) -> Markup {
    match id {
        LayoutId::Classic => classic::render(page),
        LayoutId::Garden => garden::render(page),
        LayoutId::Minimal => minimal::render(page),
    }
}

/// Render the site stylesheet: theme variables, base rules, layout rules.
pub fn render_stylesheet(id: LayoutId, theme: &Theme) -> String {
    let layout_styles = match id {
        LayoutId::Classic => classic::STYLES,
        LayoutId::Garden => garden::STYLES,
        LayoutId::Minimal => minimal::STYLES,
    };

    let mut css = theme.css_variables();
    css.push_str(BASE_STYLES);
    css.push_str(layout_styles);
    css
}

// ---------------------------------------------------------------------------
// Shared sections
// ---------------------------------------------------------------------------

/// Full HTML document around a layout body.
pub(crate) fn document(page: &Page<'_>, body_class: &str, body: Markup) -> Markup {
    let title = page.title();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta property="og:title" content=(title);
                meta property="og:type" content="website";
                @if let Some(cover) = &page.content.cover_image {
                    meta property="og:image" content=(cover);
                }
                link rel="stylesheet" href=(page.stylesheet_href);
            }
            body class=(body_class) {
                (body)
            }
        }
    }
}

pub(crate) fn date_line(page: &Page<'_>) -> Markup {
    html! {
        @if let Some(date) = &page.content.wedding_date {
            p.date { (page.labels.get("saveTheDate")) " \u{b7} " (date) }
        }
    }
}

pub(crate) fn story(page: &Page<'_>) -> Markup {
    html! {
        @if let Some(story) = &page.content.story {
            section.story {
                h2 { (page.labels.get("ourStory")) }
                @for paragraph in story.split("\n\n").filter(|p| !p.trim().is_empty()) {
                    p { (paragraph.trim()) }
                }
            }
        }
    }
}

pub(crate) fn events(page: &Page<'_>) -> Markup {
    html! {
        @if !page.content.events.is_empty() {
            section.events {
                h2 { (page.labels.get("events")) }
                ul {
                    @for event in &page.content.events {
                        li.event {
                            @if let Some(name) = &event.name { h3 { (name) } }
                            @if event.date.is_some() || event.time.is_some() {
                                p.when {
                                    @if let Some(date) = &event.date { span.event-date { (date) } }
                                    @if event.date.is_some() && event.time.is_some() { " " }
                                    @if let Some(time) = &event.time { span.event-time { (time) } }
                                }
                            }
                            @if let Some(venue) = &event.venue { p.event-venue { (venue) } }
                            @if let Some(address) = &event.address { p.event-address { (address) } }
                            @if let Some(map) = &event.map_url {
                                a href=(map) rel="noopener" target="_blank" {
                                    (page.labels.get("viewMap"))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(crate) fn venue(page: &Page<'_>) -> Markup {
    html! {
        @if let Some(venue) = &page.content.venue {
            section.venue {
                h2 { (page.labels.get("venue")) }
                @if let Some(name) = &venue.name { p.venue-name { (name) } }
                @if let Some(address) = &venue.address { p.venue-address { (address) } }
                @if let Some(map) = &venue.map_url {
                    a href=(map) rel="noopener" target="_blank" { (page.labels.get("viewMap")) }
                }
            }
        }
    }
}

pub(crate) fn gallery(page: &Page<'_>) -> Markup {
    html! {
        @if !page.content.gallery.is_empty() {
            section.gallery {
                h2 { (page.labels.get("gallery")) }
                div.gallery-grid {
                    @for url in &page.content.gallery {
                        img src=(url) alt="" loading="lazy";
                    }
                }
            }
        }
    }
}

pub(crate) fn footer(page: &Page<'_>) -> Markup {
    html! {
        footer {
            p { (page.labels.get("withLove")) }
            p.names { (page.title()) }
        }
    }
}
