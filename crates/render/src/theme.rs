//! Theme resolution from `layoutConfig.theme` with per-layout defaults.
//!
//! Expected shape (every field optional):
//!
//! ```json
//! { "theme": {
//!     "colors": { "primary": "#b76e79", "secondary": "#f4e1d2",
//!                 "background": "#fffaf5", "text": "#3a2e2a" },
//!     "fonts":  { "heading": "Playfair Display", "body": "Lato" } } }
//! ```
//!
//! Missing, mistyped or unsafe values fall back to the layout default.

use std::fmt::Write as _;

use serde_json::Value;

use crate::sanitize::{safe_color, safe_font};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub heading_font: String,
    pub body_font: String,
}

impl Theme {
    /// Build a theme from static defaults.
    pub fn new(
        primary: &str,
        secondary: &str,
        background: &str,
        text: &str,
        heading_font: &str,
        body_font: &str,
    ) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            background: background.to_string(),
            text: text.to_string(),
            heading_font: heading_font.to_string(),
            body_font: body_font.to_string(),
        }
    }

    /// Overlay the theme found in `layout_config` onto `defaults`.
    ///
    /// Never fails: any field that is absent or rejected keeps its default.
    pub fn resolve(layout_config: &Value, defaults: &Theme) -> Theme {
        let theme = layout_config.get("theme");
        let color = |key: &str, fallback: &str| {
            theme
                .and_then(|t| t.pointer(&format!("/colors/{key}")))
                .and_then(Value::as_str)
                .and_then(safe_color)
                .unwrap_or(fallback)
                .to_string()
        };
        let font = |key: &str, fallback: &str| {
            theme
                .and_then(|t| t.pointer(&format!("/fonts/{key}")))
                .and_then(Value::as_str)
                .and_then(safe_font)
                .unwrap_or(fallback)
                .to_string()
        };

        Theme {
            primary: color("primary", &defaults.primary),
            secondary: color("secondary", &defaults.secondary),
            background: color("background", &defaults.background),
            text: color("text", &defaults.text),
            heading_font: font("heading", &defaults.heading_font),
            body_font: font("body", &defaults.body_font),
        }
    }

    /// CSS custom properties for `:root`.
    pub fn css_variables(&self) -> String {
        let mut css = String::from(":root {\n");
        let _ = writeln!(css, "  --color-primary: {};", self.primary);
        let _ = writeln!(css, "  --color-secondary: {};", self.secondary);
        let _ = writeln!(css, "  --color-background: {};", self.background);
        let _ = writeln!(css, "  --color-text: {};", self.text);
        let _ = writeln!(css, "  --font-heading: \"{}\", serif;", self.heading_font);
        let _ = writeln!(css, "  --font-body: \"{}\", sans-serif;", self.body_font);
        css.push_str("}\n");
        css
    }
}
