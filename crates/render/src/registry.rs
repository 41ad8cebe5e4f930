//! Layout registry.
//!
//! Constructed once at process start and handed to the renderer. Layout ids
//! form a closed enum; each variant dispatches to exactly one page function
//! in [`crate::layouts`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;
use crate::layouts;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutId {
    Classic,
    Garden,
    Minimal,
}

impl LayoutId {
    pub const ALL: [LayoutId; 3] = [LayoutId::Classic, LayoutId::Garden, LayoutId::Minimal];

    /// Identifier as persisted in `invitations.layout_id`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Garden => "garden",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutId {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "classic" => Ok(Self::Classic),
            "garden" => Ok(Self::Garden),
            "minimal" => Ok(Self::Minimal),
            other => Err(RenderError::UnknownLayout(other.to_string())),
        }
    }
}

/// A registered layout and its theme defaults.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    pub id: LayoutId,
    pub default_theme: Theme,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    entries: HashMap<LayoutId, LayoutEntry>,
}

impl LayoutRegistry {
    /// An empty registry. Every lookup fails until layouts are registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in layout and its own default theme.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for id in LayoutId::ALL {
            registry.register(LayoutEntry {
                id,
                default_theme: layouts::default_theme(id),
            });
        }
        registry
    }

    /// Register (or replace) a layout entry.
    pub fn register(&mut self, entry: LayoutEntry) {
        self.entries.insert(entry.id, entry);
    }

    /// Resolve a persisted layout id string.
    pub fn lookup(&self, layout_id: &str) -> Result<&LayoutEntry, RenderError> {
        let id: LayoutId = layout_id.parse()?;
        self.entries
            .get(&id)
            .ok_or_else(|| RenderError::UnknownLayout(layout_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
