//! Tolerant extraction of the fields layouts render from a content document.
//!
//! The content document has no enforced schema. Anything missing or of the
//! wrong type is simply absent from the view; nothing here fails.

use serde_json::Value;

use crate::sanitize::safe_url;

/// One scheduled event (ceremony, reception, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventItem {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Venue {
    pub name: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
}

/// Everything a layout needs, already validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteContent {
    pub partner_one: Option<String>,
    pub partner_two: Option<String>,
    pub wedding_date: Option<String>,
    pub cover_image: Option<String>,
    pub story: Option<String>,
    pub events: Vec<EventItem>,
    pub venue: Option<Venue>,
    pub gallery: Vec<String>,
}

impl SiteContent {
    pub fn from_document(data: &Value) -> Self {
        let events = data
            .get("events")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(event_item).collect())
            .unwrap_or_default();

        let gallery = data
            .get("gallery")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(|v| url_at(Some(v))).collect())
            .unwrap_or_default();

        let venue = data.get("venue").filter(|v| v.is_object()).map(|v| Venue {
            name: text_at(v.get("name")),
            address: text_at(v.get("address")),
            map_url: url_at(v.get("mapUrl")),
        });

        Self {
            partner_one: text_at(data.pointer("/couple/partnerOne")),
            partner_two: text_at(data.pointer("/couple/partnerTwo")),
            wedding_date: text_at(data.get("weddingDate")),
            cover_image: url_at(data.get("coverImage")),
            story: text_at(data.get("story")),
            events,
            venue,
            gallery,
        }
    }

    /// Page title: "A & B", one name, or a generic fallback.
    pub fn title(&self, and: &str) -> String {
        match (&self.partner_one, &self.partner_two) {
            (Some(a), Some(b)) => format!("{a} {and} {b}"),
            (Some(a), None) | (None, Some(a)) => a.clone(),
            (None, None) => "Wedding Invitation".to_string(),
        }
    }
}

fn event_item(value: &Value) -> Option<EventItem> {
    value.as_object()?;
    Some(EventItem {
        name: text_at(value.get("name")),
        date: text_at(value.get("date")),
        time: text_at(value.get("time")),
        venue: text_at(value.get("venue")),
        address: text_at(value.get("address")),
        map_url: url_at(value.get("mapUrl")),
    })
}

/// Strings are trimmed; numbers and booleans are displayed as written.
fn text_at(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn url_at(value: Option<&Value>) -> Option<String> {
    let raw = value?.as_str()?;
    match safe_url(raw) {
        Some(url) => Some(url.to_string()),
        None => {
            tracing::debug!(url = %raw, "Dropping URL with disallowed scheme");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_full_document() {
        let data = json!({
            "couple": { "partnerOne": "John", "partnerTwo": "Jane" },
            "weddingDate": "2026-06-12",
            "coverImage": "https://cdn.example.com/cover.jpg",
            "events": [
                { "name": "Ceremony", "date": "2026-06-12", "time": "15:00",
                  "venue": "St. Mary", "mapUrl": "https://maps.example.com/1" }
            ],
            "venue": { "name": "Rose Hall", "address": "1 Garden Rd" },
            "gallery": ["https://cdn.example.com/1.jpg", "javascript:alert(1)"]
        });

        let content = SiteContent::from_document(&data);
        assert_eq!(content.title("&"), "John & Jane");
        assert_eq!(content.events.len(), 1);
        assert_eq!(content.events[0].time.as_deref(), Some("15:00"));
        assert_eq!(content.venue.as_ref().and_then(|v| v.name.as_deref()), Some("Rose Hall"));
        assert_eq!(content.gallery, vec!["https://cdn.example.com/1.jpg".to_string()]);
    }

    #[test]
    fn tolerates_arbitrary_shapes() {
        for data in [json!(null), json!(42), json!("text"), json!([1, 2, 3])] {
            let content = SiteContent::from_document(&data);
            assert_eq!(content, SiteContent::default());
        }

        let data = json!({ "couple": "nope", "events": { "x": 1 }, "gallery": [1, null] });
        let content = SiteContent::from_document(&data);
        assert!(content.events.is_empty());
        assert!(content.gallery.is_empty());
        assert_eq!(content.title("&"), "Wedding Invitation");
    }

    #[test]
    fn numbers_render_as_text() {
        let data = json!({ "events": [{ "name": "Reception", "time": 1900 }] });
        let content = SiteContent::from_document(&data);
        assert_eq!(content.events[0].time.as_deref(), Some("1900"));
    }

    #[test]
    fn unsafe_cover_image_dropped() {
        let data = json!({ "coverImage": "data:image/svg+xml;base64,PHN2Zz4=" });
        assert_eq!(SiteContent::from_document(&data).cover_image, None);
    }
}
