//! Extension-based content-type inference for stored site files.

/// Content type used for HTML documents.
pub const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Content type used for stylesheets.
pub const TEXT_CSS: &str = "text/css; charset=utf-8";

/// Fallback when the extension is unknown.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Infer a content type from a file path's extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html" | "htm") => TEXT_HTML,
        Some("css") => TEXT_CSS,
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("woff") => "font/woff",
        _ => OCTET_STREAM,
    }
}

/// Whether a content type denotes an HTML document.
pub fn is_html(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_core_web_types() {
        assert_eq!(content_type_for("index.html"), TEXT_HTML);
        assert_eq!(content_type_for("assets/site.css"), TEXT_CSS);
        assert_eq!(
            content_type_for("assets/app.js"),
            "text/javascript; charset=utf-8"
        );
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(content_type_for("PHOTO.JPG"), "image/jpeg");
    }

    #[test]
    fn unknown_or_missing_extension_falls_back() {
        assert_eq!(content_type_for("LICENSE"), OCTET_STREAM);
        assert_eq!(content_type_for("archive.xyz"), OCTET_STREAM);
        // A dot in a directory name is not an extension.
        assert_eq!(content_type_for("v1.2/readme"), OCTET_STREAM);
    }

    #[test]
    fn html_detection_ignores_parameters() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("TEXT/HTML"));
        assert!(!is_html("text/css"));
    }
}
