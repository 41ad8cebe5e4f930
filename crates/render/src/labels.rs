//! UI labels for rendered pages.
//!
//! Lookup order: the invitation's `customTranslations`, then the supplied
//! translations object, then the built-in English default. Non-string
//! values are ignored.

use serde_json::Value;

/// Built-in English labels, keyed the same way as translation objects.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("and", "&"),
    ("saveTheDate", "Save the date"),
    ("weAreGettingMarried", "We are getting married"),
    ("events", "Events"),
    ("venue", "Venue"),
    ("viewMap", "View map"),
    ("ourStory", "Our story"),
    ("gallery", "Gallery"),
    ("withLove", "With love"),
];

pub struct Labels<'a> {
    custom: Option<&'a Value>,
    translations: &'a Value,
}

impl<'a> Labels<'a> {
    pub fn new(data: &'a Value, translations: &'a Value) -> Self {
        Self {
            custom: data.get("customTranslations").filter(|v| v.is_object()),
            translations,
        }
    }

    /// Resolve a label. Unknown keys resolve to the key itself.
    pub fn get(&self, key: &'a str) -> &'a str {
        self.custom
            .and_then(|c| c.get(key))
            .and_then(Value::as_str)
            .or_else(|| self.translations.get(key).and_then(Value::as_str))
            .or_else(|| {
                DEFAULT_LABELS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| *v)
            })
            .unwrap_or(key)
    }
}
