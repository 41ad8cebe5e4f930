//! URL and CSS value validation for user-supplied fields.

use std::sync::LazyLock;

use regex::Regex;

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("valid color pattern")
});

/// Font family names: letters, digits, spaces and hyphens only.
static FONT_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{0,63}$").expect("valid font pattern")
});

/// Accept a URL for `src`/`href` only if it uses http(s) or is root-relative.
///
/// Everything else (`javascript:`, `data:`, `vbscript:`, protocol-relative
/// `//host`, bare words) is rejected.
pub fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() || url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return None;
    }

    let lower = url.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || (url.starts_with('/') && !url.starts_with("//"));

    allowed.then_some(url)
}

/// Accept a CSS color only in hex notation.
pub fn safe_color(value: &str) -> Option<&str> {
    let value = value.trim();
    HEX_COLOR.is_match(value).then_some(value)
}

/// Accept a font family name that cannot break out of a CSS declaration.
pub fn safe_font(value: &str) -> Option<&str> {
    let value = value.trim();
    FONT_FAMILY.is_match(value).then_some(value)
}
