//! Archive item model.
//!
//! Items arrive as Omeka-S JSON-LD: most descriptive fields are lists of
//! `{"@value": ...}` objects, and the same piece of information can live
//! under several property names depending on how the item was catalogued.
//! The accessors here resolve each field across its fixed priority list so
//! the rest of the crate never touches the wire shape.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Entries that start with this text are uncatalogued placeholders and are
/// filtered out of every fetch. Prefix match only; the phrase appearing
/// mid-description does not exclude an item.
pub const DESCRIPTION_PLACEHOLDER: &str = "More information to be added at a later date.";

/// Character cap applied to descriptions before they go into an embed.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Shown when an item has no usable description in any known field.
pub const NO_DESCRIPTION: &str = "No description available";

/// One value of a JSON-LD property list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyValue {
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

/// Thumbnail URLs by size, preferred medium, then large, then small.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThumbnailUrls {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
}

/// A single archive item as returned by `GET /items`.
///
/// Read-only to this crate; items are fetched fresh each run and dropped
/// once the notification is out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(rename = "o:id", default)]
    pub id: Option<u64>,

    #[serde(rename = "o:title", default)]
    pub title: Option<String>,

    /// Creation timestamp. Omeka emits either a bare string or a
    /// `{"@value": ...}` object depending on the endpoint, so this accepts
    /// both.
    #[serde(rename = "o:created", default, deserialize_with = "created_field")]
    pub created: Option<String>,

    #[serde(rename = "dcterms:description", default)]
    pub description: Vec<PropertyValue>,

    #[serde(rename = "bibo:content", default)]
    pub bibo_content: Vec<PropertyValue>,

    #[serde(rename = "o:description", default)]
    pub o_description: Vec<PropertyValue>,

    #[serde(rename = "dcterms:format", default)]
    pub format: Vec<PropertyValue>,

    #[serde(rename = "dcterms:type", default)]
    pub dc_type: Vec<PropertyValue>,

    #[serde(rename = "o:media_type", default)]
    pub media_type: Vec<PropertyValue>,

    #[serde(rename = "thumbnail_display_urls", default)]
    pub thumbnails: ThumbnailUrls,
}

impl Item {
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled")
    }

    /// Creation timestamp formatted for the log, falling back to the raw
    /// string when it does not parse and to `"Unknown date"` when absent.
    #[must_use]
    pub fn created_display(&self) -> String {
        let Some(raw) = self.created.as_deref() else {
            return "Unknown date".to_string();
        };
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        raw.to_string()
    }

    /// The canonical description: first value of `dcterms:description`, then
    /// `bibo:content`, then `o:description`, in that order.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        first_value(&[&self.description, &self.bibo_content, &self.o_description])
    }

    /// Description capped at [`DESCRIPTION_MAX_CHARS`] characters with a
    /// `...` suffix when cut, or [`NO_DESCRIPTION`] when missing.
    #[must_use]
    pub fn truncated_description(&self) -> String {
        match self.description() {
            Some(text) => truncate_chars(text, DESCRIPTION_MAX_CHARS),
            None => NO_DESCRIPTION.to_string(),
        }
    }

    /// Whether this item carries the uncatalogued-placeholder description.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.description()
            .is_some_and(|d| d.starts_with(DESCRIPTION_PLACEHOLDER))
    }

    /// Media/type label: `dcterms:format`, then `dcterms:type`, then
    /// `o:media_type`.
    #[must_use]
    pub fn format_label(&self) -> Option<&str> {
        first_value(&[&self.format, &self.dc_type, &self.media_type])
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        [&self.thumbnails.medium, &self.thumbnails.large, &self.thumbnails.small]
            .into_iter()
            .find_map(|url| url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Permanent ark URL for the item. Items without an id (not expected
    /// from the API, but tolerated) link to the archive root.
    #[must_use]
    pub fn permalink(&self, base_url: &str) -> String {
        match self.id {
            Some(id) => format!("{base_url}/ark:/78322/{id}"),
            None => base_url.to_string(),
        }
    }

    #[must_use]
    pub fn id_display(&self) -> String {
        self.id
            .map_or_else(|| "unknown".to_string(), |id| id.to_string())
    }
}

/// First non-empty `@value` across the given property lists, in order. Only
/// the first entry of each list is consulted.
fn first_value<'a>(lists: &[&'a [PropertyValue]]) -> Option<&'a str> {
    for list in lists {
        if let Some(first) = list.first()
            && let Some(value) = first.value.as_deref()
            && !value.is_empty()
        {
            return Some(value);
        }
    }
    None
}

/// Cut at a character boundary so multi-byte text can never split a code
/// point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedField {
    Text(String),
    Value {
        #[serde(rename = "@value", default)]
        value: Option<String>,
    },
}

fn created_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CreatedField>::deserialize(deserializer)? {
        Some(CreatedField::Text(text)) => Some(text),
        Some(CreatedField::Value { value }) => value,
        None => None,
    })
}
