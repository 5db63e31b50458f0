// SPDX-License-Identifier: MPL-2.0
//! The ordered image list backing one gallery screen.

use crate::content::ImageRecord;

/// An ordered sequence of image records paired with a display title.
///
/// The order is the display and navigation order and is preserved as
/// delivered by the content store. A set is built once per event view and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySet {
    images: Vec<ImageRecord>,
    title: String,
}

impl GallerySet {
    pub fn new(images: Vec<ImageRecord>, title: impl Into<String>) -> Self {
        Self {
            images,
            title: title.into(),
        }
    }

    /// Display title, used as accessible alt-text fallback for every image.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImageAsset, ImageRecord};

    fn record(key: &str) -> ImageRecord {
        ImageRecord {
            key: key.to_string(),
            asset: ImageAsset {
                id: format!("image-{key}-100x100-jpg"),
                url: format!("https://cdn.example/{key}.jpg"),
                metadata: None,
            },
            hotspot: None,
            crop: None,
        }
    }

    #[test]
    fn preserves_record_order() {
        let set = GallerySet::new(vec![record("a"), record("b"), record("c")], "Night One");
        let keys: Vec<&str> = set.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.title(), "Night One");
    }

    #[test]
    fn empty_set_reports_empty() {
        let set = GallerySet::new(Vec::new(), "Empty");
        assert!(set.is_empty());
        assert!(set.get(0).is_none());
    }
}
