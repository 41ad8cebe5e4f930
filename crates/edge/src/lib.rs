//! Edge server: maps `Host` to a published site version and serves its files.
//!
//! Resolution goes through a short-TTL cache in front of the resolve API;
//! file bytes come straight from the version store. Anything that does not
//! resolve to a published version is a plain 404.

pub mod config;
pub mod handler;
pub mod headers;
pub mod resolver;
pub mod router;
pub mod state;
