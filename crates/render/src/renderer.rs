use std::sync::Arc;

use serde_json::Value;
use vows_core::mime::{TEXT_CSS, TEXT_HTML};
use vows_core::site_path::INDEX_DOCUMENT;

use crate::bundle::Bundle;
use crate::content::SiteContent;
use crate::error::RenderError;
use crate::labels::Labels;
use crate::layouts::{self, Page};
use crate::registry::LayoutRegistry;
use crate::theme::Theme;

/// Default ceiling for a rendered bundle (5 MiB).
pub const DEFAULT_MAX_BUNDLE_BYTES: usize = 5 * 1024 * 1024;

/// Render inputs exactly as persisted by the invitation store.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub data: &'a Value,
    pub layout_id: &'a str,
    pub layout_config: &'a Value,
    pub translations: &'a Value,
}

/// Stateless renderer over an injected layout registry.
#[derive(Debug, Clone)]
pub struct SiteRenderer {
    registry: Arc<LayoutRegistry>,
    max_bundle_bytes: usize,
}

impl SiteRenderer {
    pub fn new(registry: Arc<LayoutRegistry>, max_bundle_bytes: usize) -> Self {
        Self {
            registry,
            max_bundle_bytes,
        }
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// Render a bundle containing `index.html` and a fingerprinted
    /// `assets/site.<hash>.css`.
    ///
    /// Fails only for an unregistered layout or an oversized result; any
    /// JSON shape in `data`, `layout_config` and `translations` is accepted.
    pub fn render(&self, input: RenderInput<'_>) -> Result<Bundle, RenderError> {
        let entry = self.registry.lookup(input.layout_id)?;
        let theme = Theme::resolve(input.layout_config, &entry.default_theme);
        let content = SiteContent::from_document(input.data);
        let labels = Labels::new(input.data, input.translations);

        let css = layouts::render_stylesheet(entry.id, &theme);
        let css_path = layouts::stylesheet_path(&css);
        let css_href = format!("/{css_path}");

        let page = Page {
            content: &content,
            labels: &labels,
            stylesheet_href: &css_href,
        };
        let html = layouts::render_page(entry.id, &page).into_string();

        let mut bundle = Bundle::new();
        bundle.insert(INDEX_DOCUMENT, TEXT_HTML, html.into_bytes());
        bundle.insert(css_path, TEXT_CSS, css.into_bytes());

        let size = bundle.total_bytes();
        if size > self.max_bundle_bytes {
            return Err(RenderError::BundleTooLarge {
                size,
                limit: self.max_bundle_bytes,
            });
        }

        tracing::debug!(layout = %entry.id, files = bundle.len(), size, "Rendered site bundle");
        Ok(bundle)
    }
}

impl Default for SiteRenderer {
    fn default() -> Self {
        Self::new(Arc::new(LayoutRegistry::builtin()), DEFAULT_MAX_BUNDLE_BYTES)
    }
}
