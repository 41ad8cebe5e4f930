//! Site renderer: turns an invitation content snapshot into a static bundle.
//!
//! Rendering is a pure function of its inputs. The same content, layout id,
//! layout config and translations always produce byte-identical files, which
//! is what makes versioned publishing and long-lived edge caching sound.

pub mod bundle;
pub mod content;
pub mod error;
pub mod labels;
pub mod layouts;
pub mod registry;
pub mod renderer;
pub mod sanitize;
pub mod theme;

pub use bundle::{Bundle, BundleFile};
pub use error::RenderError;
pub use registry::{LayoutEntry, LayoutId, LayoutRegistry};
pub use renderer::{RenderInput, SiteRenderer, DEFAULT_MAX_BUNDLE_BYTES};
