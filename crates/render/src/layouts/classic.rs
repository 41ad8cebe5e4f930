//! Classic: centered serif hero over a full-width cover photo.

use maud::{html, Markup};

use super::{date_line, document, events, footer, gallery, story, venue, Page};
use crate::theme::Theme;

pub fn default_theme() -> Theme {
    Theme::new(
        "#8c6d46",
        "#efe6d8",
        "#fffdf8",
        "#2f2a24",
        "Playfair Display",
        "Lato",
    )
}

pub const STYLES: &str = "\
.layout-classic .hero {
  text-align: center; padding: 4rem 1.5rem; background: var(--color-secondary);
}
.layout-classic .hero .cover { margin: 0 auto 2rem; max-height: 28rem; object-fit: cover; }
.layout-classic .hero h1 { font-size: 3rem; margin: 0.5rem 0; }
.layout-classic .kicker { letter-spacing: 0.2em; text-transform: uppercase; font-size: 0.85rem; }
";

pub fn render(page: &Page<'_>) -> Markup {
    let title = page.title();
    document(
        page,
        "layout-classic",
        html! {
            header.hero {
                @if let Some(cover) = &page.content.cover_image {
                    img.cover src=(cover) alt=(title);
                }
                p.kicker { (page.labels.get("weAreGettingMarried")) }
                h1 { (title) }
                (date_line(page))
            }
            main {
                (story(page))
                (events(page))
                (venue(page))
                (gallery(page))
            }
            (footer(page))
        },
    )
}
