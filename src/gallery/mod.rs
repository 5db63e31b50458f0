// SPDX-License-Identifier: MPL-2.0
//! Gallery domain: the overlay viewer state machine and its collaborators.
//!
//! The pieces here are deliberately UI-framework-free so the navigation,
//! pre-loading, and scroll-suspension behavior can be tested without a
//! window: `ViewerState` owns the open/closed/index state, `GallerySet` is
//! the immutable image list backing one screen, `ImageUrlResolver` turns
//! records into CDN variant URLs, and `ImagePrefetchCache` keeps recently
//! fetched variants warm.

pub mod prefetch;
pub mod resolver;
pub mod scroll_lock;
pub mod set;
pub mod viewer;

pub use prefetch::{FetchedImage, ImagePrefetchCache, PrefetchConfig};
pub use resolver::{CdnResolver, ImageUrlResolver, ResolveParams};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use set::GallerySet;
pub use viewer::ViewerState;
