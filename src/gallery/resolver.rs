// SPDX-License-Identifier: MPL-2.0
//! Image URL resolution against the hosted transform service.
//!
//! The gallery never loads original assets for display; it asks the service
//! for width-capped, recompressed variants. Resolution is an injected
//! capability so tests and alternative deployments can swap the
//! implementation without touching the viewer.

use crate::content::document::parse_asset_id;
use crate::content::{Dimensions, ImageRecord};

/// Display parameters for one variant request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveParams {
    /// Maximum width of the variant in pixels.
    pub width: u32,
    /// Compression quality, 1-100.
    pub quality: u8,
    /// Ask the service to negotiate the format with the viewing client
    /// (modern compressed formats where supported).
    pub auto_format: bool,
}

impl ResolveParams {
    pub fn new(width: u32, quality: u8) -> Self {
        Self {
            width,
            quality,
            auto_format: true,
        }
    }
}

/// Capability translating an image record plus display parameters into a
/// fetchable URL for a transformed variant. Deterministic for identical
/// inputs.
pub trait ImageUrlResolver {
    fn resolve(&self, record: &ImageRecord, params: &ResolveParams) -> String;
}

/// Production resolver for the hosted image CDN.
///
/// Asset ids of the form `image-<hash>-<WxH>-<ext>` map onto
/// `<cdn>/images/<project>/<dataset>/<hash>-<WxH>.<ext>`; ids that do not
/// parse fall back to the asset's raw URL with the same query parameters.
#[derive(Debug, Clone)]
pub struct CdnResolver {
    base_url: String,
    project_id: String,
    dataset: String,
}

impl CdnResolver {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    fn query_string(record: &ImageRecord, params: &ResolveParams) -> String {
        let mut query = format!("w={}&q={}", params.width, params.quality);
        if params.auto_format {
            query.push_str("&auto=format");
        }
        if let Some(rect) = crop_rect(record) {
            let (x, y, w, h) = rect;
            query.push_str(&format!("&rect={x},{y},{w},{h}"));
        }
        query
    }
}

impl ImageUrlResolver for CdnResolver {
    fn resolve(&self, record: &ImageRecord, params: &ResolveParams) -> String {
        let query = Self::query_string(record, params);
        match parse_asset_id(&record.asset.id) {
            Some((hash, dims, ext)) => format!(
                "{base}/images/{project}/{dataset}/{hash}-{dims}.{ext}?{query}",
                base = self.base_url.trim_end_matches('/'),
                project = self.project_id,
                dataset = self.dataset,
            ),
            None => {
                let url = &record.asset.url;
                let separator = if url.contains('?') { '&' } else { '?' };
                format!("{url}{separator}{query}")
            }
        }
    }
}

/// Pixel crop rectangle derived from the record's normalized crop insets.
/// Requires known asset dimensions; without them the service's defaults
/// apply and no rect parameter is emitted.
fn crop_rect(record: &ImageRecord) -> Option<(u32, u32, u32, u32)> {
    let crop = record.crop?;
    let Dimensions { width, height } = record.dimensions()?;

    let left = (crop.left * f64::from(width)).round() as u32;
    let top = (crop.top * f64::from(height)).round() as u32;
    let right = (crop.right * f64::from(width)).round() as u32;
    let bottom = (crop.bottom * f64::from(height)).round() as u32;

    let rect_width = width.checked_sub(left)?.checked_sub(right)?;
    let rect_height = height.checked_sub(top)?.checked_sub(bottom)?;
    if rect_width == 0 || rect_height == 0 {
        return None;
    }
    Some((left, top, rect_width, rect_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::AssetMetadata;
    use crate::content::{Crop, ImageAsset, ImageRecord};

    fn resolver() -> CdnResolver {
        CdnResolver::new("https://cdn.example", "proj1", "production")
    }

    fn record_with(id: &str, url: &str) -> ImageRecord {
        ImageRecord {
            key: "k".to_string(),
            asset: ImageAsset {
                id: id.to_string(),
                url: url.to_string(),
                metadata: None,
            },
            hotspot: None,
            crop: None,
        }
    }

    #[test]
    fn resolves_parseable_asset_id_to_cdn_path() {
        let record = record_with("image-ab12-4032x3024-jpg", "https://raw.example/x.jpg");
        let url = resolver().resolve(&record, &ResolveParams::new(600, 60));
        assert_eq!(
            url,
            "https://cdn.example/images/proj1/production/ab12-4032x3024.jpg?w=600&q=60&auto=format"
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let record = record_with("image-ab12-4032x3024-jpg", "https://raw.example/x.jpg");
        let params = ResolveParams::new(1200, 60);
        let first = resolver().resolve(&record, &params);
        let second = resolver().resolve(&record, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn thumbnail_and_full_widths_differ_in_url() {
        let record = record_with("image-ab12-4032x3024-jpg", "https://raw.example/x.jpg");
        let thumb = resolver().resolve(&record, &ResolveParams::new(600, 60));
        let full = resolver().resolve(&record, &ResolveParams::new(1200, 60));
        assert!(thumb.contains("w=600"));
        assert!(full.contains("w=1200"));
        assert_ne!(thumb, full);
    }

    #[test]
    fn falls_back_to_raw_url_for_opaque_ids() {
        let record = record_with("not-parseable", "https://raw.example/x.jpg");
        let url = resolver().resolve(&record, &ResolveParams::new(600, 60));
        assert_eq!(url, "https://raw.example/x.jpg?w=600&q=60&auto=format");
    }

    #[test]
    fn fallback_appends_to_existing_query() {
        let record = record_with("not-parseable", "https://raw.example/x.jpg?dl=1");
        let url = resolver().resolve(&record, &ResolveParams::new(600, 60));
        assert!(url.starts_with("https://raw.example/x.jpg?dl=1&w=600"));
    }

    #[test]
    fn disabling_auto_format_drops_parameter() {
        let record = record_with("image-ab12-100x100-png", "https://raw.example/x.png");
        let params = ResolveParams {
            auto_format: false,
            ..ResolveParams::new(600, 60)
        };
        let url = resolver().resolve(&record, &params);
        assert!(!url.contains("auto=format"));
    }

    #[test]
    fn crop_emits_pixel_rect_when_dimensions_known() {
        let mut record = record_with("image-ab12-1000x500-jpg", "https://raw.example/x.jpg");
        record.asset.metadata = Some(AssetMetadata {
            dimensions: Some(crate::content::Dimensions {
                width: 1000,
                height: 500,
            }),
        });
        record.crop = Some(Crop {
            top: 0.1,
            bottom: 0.1,
            left: 0.2,
            right: 0.0,
        });
        let url = resolver().resolve(&record, &ResolveParams::new(600, 60));
        assert!(url.contains("rect=200,50,800,400"), "url was {url}");
    }

    #[test]
    fn crop_without_dimensions_emits_no_rect() {
        let mut record = record_with("image-ab12-1000x500-jpg", "https://raw.example/x.jpg");
        record.crop = Some(Crop {
            top: 0.1,
            bottom: 0.1,
            left: 0.2,
            right: 0.0,
        });
        let url = resolver().resolve(&record, &ResolveParams::new(600, 60));
        assert!(!url.contains("rect="));
    }
}
