use std::collections::BTreeMap;

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The set of files produced by one render, keyed by relative path.
///
/// Ordered so iteration (and anything derived from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    files: BTreeMap<String, BundleFile>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) {
        self.files
            .insert(path.into(), BundleFile { content_type, bytes });
    }

    pub fn get(&self, path: &str) -> Option<&BundleFile> {
        self.files.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Combined size of every file body.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(|f| f.bytes.len()).sum()
    }

    pub fn into_files(self) -> impl Iterator<Item = (String, BundleFile)> {
        self.files.into_iter()
    }
}
