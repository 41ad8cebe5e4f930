//! Storage key layout for published site bundles.
//!
//! ```text
//! sites/{subdomain}/v{version}/{path}
//! sites/{subdomain}/v{version}/.manifest.json
//! ```
//!
//! `{path}` always names a concrete file: `/` maps to `index.html` and any
//! `dir/` maps to `dir/index.html`, mirroring static-site hosting.

use crate::types::Version;

/// Top-level prefix for every site object.
pub const SITES_PREFIX: &str = "sites";

/// Directory index document name.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Per-version manifest. Written first; its presence claims the version.
pub const MANIFEST_FILE: &str = ".manifest.json";

/// Normalize a request or bundle path into a relative file path.
///
/// Returns `None` for paths that must never reach storage: parent
/// references, backslashes, NUL bytes, or any segment starting with `.`
/// (which also keeps the manifest private).
pub fn normalize_path(path: &str) -> Option<String> {
    if path.contains('\\') || path.contains('\0') {
        return None;
    }

    let wants_index = path.is_empty() || path.ends_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }
        if segment.starts_with('.') {
            return None;
        }
        segments.push(segment);
    }

    if wants_index || segments.is_empty() {
        segments.push(INDEX_DOCUMENT);
    }

    Some(segments.join("/"))
}

/// Prefix shared by every object of one version.
pub fn version_prefix(subdomain: &str, version: Version) -> String {
    format!("{SITES_PREFIX}/{subdomain}/v{version}/")
}

/// Full storage key for an already normalized relative path.
pub fn object_key(subdomain: &str, version: Version, normalized_path: &str) -> String {
    format!("{}{normalized_path}", version_prefix(subdomain, version))
}

/// Storage key of a version's manifest.
pub fn manifest_key(subdomain: &str, version: Version) -> String {
    object_key(subdomain, version, MANIFEST_FILE)
}

/// Hex digits of content hash embedded in fingerprinted asset names.
pub const FINGERPRINT_LEN: usize = 12;

/// File name with a content fingerprint before the extension:
/// `site.css` + `3f9a…` → `site.3f9a….css`.
pub fn fingerprinted_name(stem: &str, fingerprint: &str, extension: &str) -> String {
    let digest = &fingerprint[..fingerprint.len().min(FINGERPRINT_LEN)];
    format!("{stem}.{digest}.{extension}")
}

/// Whether the final segment of `path` carries a content fingerprint
/// (`name.<hex>.ext`). Only such files are safe to cache as immutable.
pub fn is_fingerprinted(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 3 {
        return false;
    }
    let digest = parts[parts.len() - 2];
    digest.len() == FINGERPRINT_LEN && digest.bytes().all(|b| b.is_ascii_hexdigit())
}
