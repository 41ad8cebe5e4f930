//! Shared domain types for the invitation publish pipeline.
//!
//! Everything here is pure: no I/O, no async. The storage, publish, API and
//! edge crates all agree on subdomain rules, storage key layout and the
//! publish record shape through this crate.

pub mod error;
pub mod mime;
pub mod record;
pub mod site_path;
pub mod subdomain;
pub mod types;
