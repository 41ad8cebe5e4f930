//! Subdomain normalization, format rules and host-header extraction.
//!
//! A subdomain is the single DNS label a couple picks for their site
//! (`john-wedding` in `john-wedding.example.com`). Candidates typed by users
//! are normalized first; only the normalized form is ever stored or served.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shortest accepted subdomain after normalization.
pub const MIN_SUBDOMAIN_LEN: usize = 3;

/// Longest accepted subdomain (DNS label limit).
pub const MAX_SUBDOMAIN_LEN: usize = 63;

/// Labels that can never be claimed by a site.
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "admin", "api", "app", "assets", "blog", "builder", "cdn", "dashboard", "dev", "docs",
    "edge", "ftp", "help", "mail", "ns1", "ns2", "root", "smtp", "staging", "static", "status",
    "support", "test", "www",
];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a user-supplied candidate.
///
/// Lowercases and trims, keeps ASCII alphanumerics, and collapses every run
/// of other characters (spaces, underscores, punctuation, repeated hyphens)
/// into a single hyphen. Leading and trailing hyphens are dropped.
pub fn normalize(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    let mut pending_hyphen = false;

    for ch in candidate.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Availability reasons
// ---------------------------------------------------------------------------

/// Why a subdomain cannot be used by the requesting invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    Empty,
    TooShort,
    TooLong,
    Reserved,
    ClaimedByOther,
}

impl UnavailableReason {
    /// Human-readable reason, shown verbatim in the builder.
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Subdomain must contain at least one letter or digit".to_string(),
            Self::TooShort => {
                format!("Subdomain must be at least {MIN_SUBDOMAIN_LEN} characters")
            }
            Self::TooLong => format!("Subdomain must be at most {MAX_SUBDOMAIN_LEN} characters"),
            Self::Reserved => "Subdomain is reserved".to_string(),
            Self::ClaimedByOther => "Subdomain is already taken".to_string(),
        }
    }

    /// Convert into the matching error class for a publish attempt.
    pub fn into_error(self, subdomain: &str) -> CoreError {
        let message = format!("{} ({subdomain})", self.message());
        match self {
            Self::ClaimedByOther => CoreError::SubdomainUnavailable(message),
            _ => CoreError::InvalidSubdomain(message),
        }
    }
}

/// Check length and reserved-word rules on an already normalized subdomain.
pub fn check_format(normalized: &str) -> Result<(), UnavailableReason> {
    if normalized.is_empty() {
        return Err(UnavailableReason::Empty);
    }
    if normalized.len() < MIN_SUBDOMAIN_LEN {
        return Err(UnavailableReason::TooShort);
    }
    if normalized.len() > MAX_SUBDOMAIN_LEN {
        return Err(UnavailableReason::TooLong);
    }
    if RESERVED_SUBDOMAINS.contains(&normalized) {
        return Err(UnavailableReason::Reserved);
    }
    Ok(())
}

/// Whether `label` is already in normalized form and passes the format rules.
pub fn is_valid(label: &str) -> bool {
    normalize(label) == label && check_format(label).is_ok()
}

/// Result of validating a candidate for a given invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdomainCheck {
    pub normalized_subdomain: String,
    pub available: bool,
    pub reason: Option<String>,
}

impl SubdomainCheck {
    pub fn available(normalized: String) -> Self {
        Self {
            normalized_subdomain: normalized,
            available: true,
            reason: None,
        }
    }

    pub fn unavailable(normalized: String, reason: &UnavailableReason) -> Self {
        Self {
            normalized_subdomain: normalized,
            available: false,
            reason: Some(reason.message()),
        }
    }
}

// ---------------------------------------------------------------------------
// Host extraction
// ---------------------------------------------------------------------------

/// Extract the site label from an inbound `Host` header.
///
/// The host is lowercased, its port and any trailing dot stripped, and the
/// `.{base_domain}` suffix removed. Returns `None` when the host is outside
/// the base domain, is the bare base domain, or the label is not a valid
/// subdomain (including nested labels such as `a.b.{base}`).
pub fn extract_from_host(host: &str, base_domain: &str) -> Option<String> {
    let host = host.trim().to_ascii_lowercase();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        _ => host,
    };
    let host = host.trim_end_matches('.');

    let base = base_domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if base.is_empty() {
        return None;
    }

    let label = host.strip_suffix(&base)?.strip_suffix('.')?;
    if label.contains('.') || !is_valid(label) {
        return None;
    }

    Some(label.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
