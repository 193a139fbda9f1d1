use arknotify::archive::Item;
use arknotify::archive::item::{DESCRIPTION_PLACEHOLDER, NO_DESCRIPTION};
use serde_json::json;

/// Tests for the archive item model: field resolution across the Omeka-S
/// JSON-LD shapes, truncation, placeholder detection, and permalinks.

fn item_from(value: serde_json::Value) -> Item {
    serde_json::from_value(value).expect("item JSON should deserialize")
}

#[test]
fn test_title_defaults_to_untitled() {
    let item = item_from(json!({ "o:id": 12 }));
    assert_eq!(
        item.display_title(),
        "Untitled",
        "missing title should fall back to the literal default"
    );

    let item = item_from(json!({ "o:id": 12, "o:title": "A Letter Home" }));
    assert_eq!(item.display_title(), "A Letter Home");
}

#[test]
fn test_description_unchanged_when_short() {
    let item = item_from(json!({
        "dcterms:description": [{ "@value": "Short enough." }]
    }));
    assert_eq!(
        item.truncated_description(),
        "Short enough.",
        "descriptions at or under the cap should pass through unchanged"
    );
}

#[test]
fn test_description_truncated_at_200_chars() {
    let long = "a".repeat(250);
    let item = item_from(json!({
        "dcterms:description": [{ "@value": long }]
    }));

    let truncated = item.truncated_description();
    assert_eq!(
        truncated,
        format!("{}...", "a".repeat(200)),
        "long descriptions should be cut to 200 characters plus an ellipsis"
    );
}

#[test]
fn test_description_truncation_counts_characters_not_bytes() {
    // Three bytes per character in UTF-8; byte-based slicing would panic or
    // split a code point.
    let long = "あ".repeat(210);
    let item = item_from(json!({
        "dcterms:description": [{ "@value": long }]
    }));

    let truncated = item.truncated_description();
    assert_eq!(
        truncated.chars().count(),
        203,
        "expected 200 characters plus the three-dot suffix"
    );
    assert!(truncated.ends_with("..."));
}

#[test]
fn test_missing_description_uses_literal() {
    let item = item_from(json!({ "o:id": 1 }));
    assert_eq!(item.truncated_description(), NO_DESCRIPTION);

    // An empty @value is treated the same as no value at all.
    let item = item_from(json!({
        "dcterms:description": [{ "@value": "" }]
    }));
    assert_eq!(item.truncated_description(), NO_DESCRIPTION);
}

#[test]
fn test_description_fallback_order() {
    let item = item_from(json!({
        "bibo:content": [{ "@value": "from bibo" }],
        "o:description": [{ "@value": "from omeka" }]
    }));
    assert_eq!(
        item.description(),
        Some("from bibo"),
        "bibo:content should win over o:description when dcterms is absent"
    );

    let item = item_from(json!({
        "dcterms:description": [{ "@value": "primary" }],
        "bibo:content": [{ "@value": "from bibo" }]
    }));
    assert_eq!(
        item.description(),
        Some("primary"),
        "dcterms:description is always preferred when present"
    );

    let item = item_from(json!({
        "o:description": [{ "@value": "from omeka" }]
    }));
    assert_eq!(item.description(), Some("from omeka"));
}

#[test]
fn test_placeholder_is_prefix_match_only() {
    let placeholder = item_from(json!({
        "dcterms:description": [{ "@value": format!("{DESCRIPTION_PLACEHOLDER} Check back soon.") }]
    }));
    assert!(
        placeholder.is_placeholder(),
        "a description starting with the placeholder text should be flagged"
    );

    let mid_string = item_from(json!({
        "dcterms:description": [{ "@value": format!("Note: {DESCRIPTION_PLACEHOLDER}") }]
    }));
    assert!(
        !mid_string.is_placeholder(),
        "the phrase mid-description must not exclude an item"
    );

    let unrelated = item_from(json!({
        "dcterms:description": [{ "@value": "A catalogued photograph." }]
    }));
    assert!(!unrelated.is_placeholder());
}

#[test]
fn test_placeholder_detected_through_fallback_field() {
    let item = item_from(json!({
        "bibo:content": [{ "@value": DESCRIPTION_PLACEHOLDER }]
    }));
    assert!(
        item.is_placeholder(),
        "placeholder detection should use the same field resolution as display"
    );
}

#[test]
fn test_thumbnail_size_preference() {
    let item = item_from(json!({
        "thumbnail_display_urls": { "small": "s", "large": "l" }
    }));
    assert_eq!(
        item.thumbnail_url(),
        Some("l"),
        "large should be preferred when medium is absent"
    );

    let item = item_from(json!({
        "thumbnail_display_urls": { "small": "s", "medium": "m", "large": "l" }
    }));
    assert_eq!(item.thumbnail_url(), Some("m"));

    let item = item_from(json!({
        "thumbnail_display_urls": { "small": "s" }
    }));
    assert_eq!(item.thumbnail_url(), Some("s"));

    let item = item_from(json!({}));
    assert_eq!(item.thumbnail_url(), None);

    // Empty URLs are skipped just like missing ones.
    let item = item_from(json!({
        "thumbnail_display_urls": { "medium": "", "large": "l" }
    }));
    assert_eq!(item.thumbnail_url(), Some("l"));
}

#[test]
fn test_format_fallback_order() {
    let item = item_from(json!({
        "dcterms:format": [{ "@value": "image/jpeg" }],
        "dcterms:type": [{ "@value": "Still Image" }]
    }));
    assert_eq!(item.format_label(), Some("image/jpeg"));

    let item = item_from(json!({
        "dcterms:type": [{ "@value": "Still Image" }],
        "o:media_type": [{ "@value": "image/png" }]
    }));
    assert_eq!(item.format_label(), Some("Still Image"));

    let item = item_from(json!({
        "o:media_type": [{ "@value": "image/png" }]
    }));
    assert_eq!(item.format_label(), Some("image/png"));

    let item = item_from(json!({}));
    assert_eq!(item.format_label(), None);
}

#[test]
fn test_permalink_shape() {
    let item = item_from(json!({ "o:id": 4242 }));
    assert_eq!(
        item.permalink("https://archive.example.org"),
        "https://archive.example.org/ark:/78322/4242"
    );
}

#[test]
fn test_created_display_parses_and_falls_back() {
    let item = item_from(json!({ "o:created": "2026-08-29T09:15:30+00:00" }));
    assert_eq!(item.created_display(), "2026-08-29 09:15:30");

    // Omeka sometimes wraps the timestamp in a JSON-LD value object.
    let item = item_from(json!({ "o:created": { "@value": "2026-08-29T09:15:30+00:00" } }));
    assert_eq!(item.created_display(), "2026-08-29 09:15:30");

    let item = item_from(json!({ "o:created": "last Tuesday" }));
    assert_eq!(
        item.created_display(),
        "last Tuesday",
        "unparseable timestamps should be shown raw, not dropped"
    );

    let item = item_from(json!({}));
    assert_eq!(item.created_display(), "Unknown date");
}

#[test]
fn test_api_payload_with_unknown_fields_deserializes() {
    let items: Vec<Item> = serde_json::from_value(json!([
        {
            "@context": "https://archive.example.org/api-context",
            "o:id": 77,
            "o:title": "Festival programme",
            "o:created": { "@value": "2026-08-28T18:00:00+00:00" },
            "dcterms:description": [
                { "type": "literal", "@value": "Programme for the 2026 festival." }
            ],
            "dcterms:format": [{ "type": "literal", "@value": "application/pdf" }],
            "thumbnail_display_urls": {
                "large": "https://archive.example.org/files/large/77.jpg",
                "medium": "https://archive.example.org/files/medium/77.jpg",
                "small": "https://archive.example.org/files/small/77.jpg"
            },
            "o:media": [{ "@id": "https://archive.example.org/api/media/910" }]
        }
    ]))
    .expect("a realistic API payload should deserialize");

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, Some(77));
    assert_eq!(item.display_title(), "Festival programme");
    assert_eq!(
        item.thumbnail_url(),
        Some("https://archive.example.org/files/medium/77.jpg")
    );
    assert_eq!(item.format_label(), Some("application/pdf"));
}
