//! Garden: split hero with the cover photo beside the names, soft greens.

use maud::{html, Markup};

use super::{date_line, document, events, footer, gallery, story, venue, Page};
use crate::theme::Theme;

pub fn default_theme() -> Theme {
    Theme::new(
        "#4f6f52",
        "#e8efe4",
        "#fbfcf8",
        "#263026",
        "Cormorant Garamond",
        "Nunito",
    )
}

pub const STYLES: &str = "\
.layout-garden .hero {
  display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr));
  align-items: center; gap: 2rem; padding: 3rem 1.5rem; background: var(--color-secondary);
}
.layout-garden .hero h1 { font-size: 2.75rem; margin: 0; }
.layout-garden .hero .cover { border-radius: 50% 50% 0 0; }
.layout-garden section h2::before { content: \"\\2740  \"; }
";

pub fn render(page: &Page<'_>) -> Markup {
    let title = page.title();
    document(
        page,
        "layout-garden",
        html! {
            header.hero {
                @if let Some(cover) = &page.content.cover_image {
                    img.cover src=(cover) alt=(title);
                }
                div.names {
                    h1 { (title) }
                    (date_line(page))
                }
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
