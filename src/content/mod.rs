// SPDX-License-Identifier: MPL-2.0
//! Content-store integration: document types and the HTTP query client.
//!
//! Events, images, lineups, and locations are authored externally in a hosted
//! content store and fetched at render time. Everything in this module treats
//! fetched documents as read-only snapshots for the duration of a screen.

pub mod client;
pub mod document;

pub use client::ContentClient;
pub use document::{
    Crop, Dimensions, EventDetail, EventSummary, Hotspot, ImageAsset, ImageRecord,
    FALLBACK_HEIGHT, FALLBACK_WIDTH,
};
