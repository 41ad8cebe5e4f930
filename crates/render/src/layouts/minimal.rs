//! Minimal: typography only, no cover photo in the header.

use maud::{html, Markup};

use super::{date_line, document, events, footer, gallery, story, venue, Page};
use crate::theme::Theme;

pub fn default_theme() -> Theme {
    Theme::new("#111111", "#f2f2f2", "#ffffff", "#222222", "Inter", "Inter")
}

pub const STYLES: &str = "\
.layout-minimal header { padding: 6rem 1.5rem 2rem; max-width: 56rem; margin: 0 auto; }
.layout-minimal h1 { font-size: 2.25rem; letter-spacing: -0.02em; margin: 0; }
.layout-minimal section { border-top: 1px solid var(--color-secondary); }
";

pub fn render(page: &Page<'_>) -> Markup {
    document(
        page,
        "layout-minimal",
        html! {
            header {
                h1 { (page.title()) }
                (date_line(page))
            }
            main {
                (events(page))
                (venue(page))
                (story(page))
                (gallery(page))
            }
            (footer(page))
        },
    )
}
