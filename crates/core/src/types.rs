/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Per-subdomain version number. `0` means "claimed but never published".
///
/// Stored as PostgreSQL `INTEGER`.
pub type Version = i32;
