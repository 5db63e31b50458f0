// SPDX-License-Identifier: MPL-2.0
//! Typed views of the content store's event documents.
//!
//! Field names follow the store's JSON wire format (`_id`, `_key`,
//! `eventLineup`, ...). Optional metadata stays optional all the way through;
//! display code asks for fallbacks instead of unwrapping.

use chrono::NaiveDate;
use serde::Deserialize;

/// Width assumed for an image whose asset carries no dimension metadata.
pub const FALLBACK_WIDTH: u32 = 1200;
/// Height assumed for an image whose asset carries no dimension metadata.
pub const FALLBACK_HEIGHT: u32 = 800;

/// Stored-image reference resolved by the archive queries.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImageAsset {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssetMetadata {
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Editor-supplied focal point hint, normalized to [0, 1].
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Hotspot {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
}

/// Editor-supplied crop insets, normalized to [0, 1].
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Crop {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
}

/// One gallery or flyer entry: an asset plus optional crop/focal hints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImageRecord {
    #[serde(rename = "_key")]
    pub key: String,
    pub asset: ImageAsset,
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
    #[serde(default)]
    pub crop: Option<Crop>,
}

impl ImageRecord {
    /// Pixel dimensions of the underlying asset, if the store recorded them.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.asset.metadata.as_ref().and_then(|m| m.dimensions)
    }

    /// Pixel dimensions with the documented fallback applied.
    pub fn dimensions_or_fallback(&self) -> Dimensions {
        self.dimensions().unwrap_or(Dimensions {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
        })
    }

    /// URL of the original, untransformed asset.
    pub fn original_url(&self) -> &str {
        &self.asset.url
    }

    /// A filename for saving the original asset locally, derived from the
    /// asset id so repeated downloads of the same image collide on purpose.
    pub fn download_file_name(&self) -> String {
        parse_asset_id(&self.asset.id)
            .map(|(hash, dims, ext)| format!("{hash}-{dims}.{ext}"))
            .unwrap_or_else(|| "image".to_string())
    }
}

/// Splits an asset id of the form `image-<hash>-<WxH>-<ext>` into its parts.
pub(crate) fn parse_asset_id(id: &str) -> Option<(&str, &str, &str)> {
    let rest = id.strip_prefix("image-")?;
    let (rest, ext) = rest.rsplit_once('-')?;
    let (hash, dims) = rest.rsplit_once('-')?;
    if hash.is_empty() || ext.is_empty() {
        return None;
    }
    // Dimension segment must look like <W>x<H>.
    let (w, h) = dims.split_once('x')?;
    if w.chars().all(|c| c.is_ascii_digit())
        && h.chars().all(|c| c.is_ascii_digit())
        && !w.is_empty()
        && !h.is_empty()
    {
        Some((hash, dims, ext))
    } else {
        None
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Slug {
    pub current: String,
}

/// Archive-card projection of an event document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub slug: Slug,
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    #[serde(rename = "eventLineup", default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "eventDate", default)]
    pub event_date: Option<String>,
    #[serde(rename = "flyer", default)]
    pub flyers: Vec<ImageRecord>,
}

impl EventSummary {
    pub fn slug(&self) -> &str {
        &self.slug.current
    }

    /// Lineup joined for display, e.g. `"DJ A, DJ B"`.
    pub fn lineup_heading(&self) -> String {
        self.lineup.join(", ")
    }

    /// Event date in long form (`May 11, 2024`), or the raw value when the
    /// store's date string does not parse.
    pub fn formatted_date(&self) -> Option<String> {
        self.event_date.as_deref().map(format_event_date)
    }
}

/// Full event document backing the gallery screen.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub slug: Slug,
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    #[serde(rename = "eventLineup", default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "eventDate", default)]
    pub event_date: Option<String>,
    #[serde(rename = "eventImages", default)]
    pub images: Vec<ImageRecord>,
    #[serde(rename = "flyer", default)]
    pub flyers: Vec<ImageRecord>,
}

impl EventDetail {
    pub fn slug(&self) -> &str {
        &self.slug.current
    }

    pub fn lineup_heading(&self) -> String {
        self.lineup.join(", ")
    }

    /// Title used as accessible alt-text fallback for gallery images.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Event Image")
    }
}

/// Formats a store date (`2024-05-11` or a full RFC 3339 timestamp) in long
/// en-US form. Unparseable values pass through untouched.
fn format_event_date(raw: &str) -> String {
    let date = raw
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(id: &str, with_dimensions: bool) -> ImageRecord {
        ImageRecord {
            key: "k0".to_string(),
            asset: ImageAsset {
                id: id.to_string(),
                url: format!("https://cdn.example/{id}.jpg"),
                metadata: with_dimensions.then_some(AssetMetadata {
                    dimensions: Some(Dimensions {
                        width: 3000,
                        height: 2000,
                    }),
                }),
            },
            hotspot: None,
            crop: None,
        }
    }

    #[test]
    fn event_detail_deserializes_from_store_json() {
        let json = r#"{
            "_id": "ev1",
            "title": "Spring opening",
            "slug": { "current": "spring-opening" },
            "eventName": "Spring Opening",
            "eventLineup": ["DJ A", "DJ B"],
            "location": "Warehouse 12",
            "eventDate": "2024-05-11",
            "eventImages": [{
                "_key": "img0",
                "asset": {
                    "_id": "image-abc123-4032x3024-jpg",
                    "url": "https://cdn.example/abc123.jpg",
                    "metadata": { "dimensions": { "width": 4032, "height": 3024 } }
                },
                "hotspot": { "x": 0.5, "y": 0.4, "height": 0.8, "width": 0.9 },
                "crop": { "top": 0.0, "bottom": 0.1, "left": 0.0, "right": 0.05 }
            }],
            "flyer": []
        }"#;

        let event: EventDetail = serde_json::from_str(json).expect("event should deserialize");
        assert_eq!(event.slug(), "spring-opening");
        assert_eq!(event.lineup_heading(), "DJ A, DJ B");
        assert_eq!(event.images.len(), 1);

        let image = &event.images[0];
        assert_eq!(image.dimensions().map(|d| d.width), Some(4032));
        assert!(image.hotspot.is_some());
        assert!(image.crop.is_some());
    }

    #[test]
    fn summary_tolerates_missing_optional_fields() {
        let json = r#"{ "_id": "ev2", "slug": { "current": "mystery" } }"#;
        let event: EventSummary = serde_json::from_str(json).expect("summary should deserialize");
        assert_eq!(event.slug(), "mystery");
        assert!(event.lineup.is_empty());
        assert!(event.flyers.is_empty());
        assert!(event.formatted_date().is_none());
    }

    #[test]
    fn dimensions_fall_back_when_metadata_is_absent() {
        let record = sample_record("image-abc-100x50-jpg", false);
        let dims = record.dimensions_or_fallback();
        assert_eq!(dims.width, FALLBACK_WIDTH);
        assert_eq!(dims.height, FALLBACK_HEIGHT);
    }

    #[test]
    fn parse_asset_id_splits_well_formed_ids() {
        let parts = parse_asset_id("image-ab12cd-4032x3024-jpg");
        assert_eq!(parts, Some(("ab12cd", "4032x3024", "jpg")));
    }

    #[test]
    fn parse_asset_id_rejects_malformed_ids() {
        assert!(parse_asset_id("file-ab12cd-pdf").is_none());
        assert!(parse_asset_id("image-missing-dims").is_none());
        assert!(parse_asset_id("image-ab-12x-jpg").is_none());
    }

    #[test]
    fn download_file_name_uses_asset_parts() {
        let record = sample_record("image-ab12cd-4032x3024-jpg", true);
        assert_eq!(record.download_file_name(), "ab12cd-4032x3024.jpg");
    }

    #[test]
    fn download_file_name_survives_opaque_ids() {
        let record = sample_record("not-an-image-id", true);
        assert_eq!(record.download_file_name(), "image");
    }

    #[test]
    fn formatted_date_handles_date_and_timestamp_forms() {
        let mut summary: EventSummary =
            serde_json::from_str(r#"{ "_id": "e", "slug": { "current": "s" } }"#).unwrap();

        summary.event_date = Some("2024-05-11".to_string());
        assert_eq!(summary.formatted_date().as_deref(), Some("May 11, 2024"));

        summary.event_date = Some("2023-12-01T21:00:00Z".to_string());
        assert_eq!(
            summary.formatted_date().as_deref(),
            Some("December 1, 2023")
        );

        summary.event_date = Some("someday".to_string());
        assert_eq!(summary.formatted_date().as_deref(), Some("someday"));
    }
}
