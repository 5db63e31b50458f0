// SPDX-License-Identifier: MPL-2.0
//! Image prefetch cache for faster overlay navigation.
//!
//! When the overlay opens or the user navigates, the large variants of the
//! adjacent images are fetched in the background so the next navigation step
//! renders without a visible load.
//!
//! # Design
//!
//! - **LRU eviction**: least recently used variants are evicted first
//! - **Memory-bounded**: total cache size limited by a configurable byte limit
//! - **URL-keyed**: variants indexed by their resolved URL
//! - **Fire-and-forget**: prefetching never blocks navigation; a failed or
//!   stale prefetch is dropped, not surfaced

use crate::error::Result;
use iced::widget::image::Handle;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default prefetch cache size in bytes (24 MB).
/// Comfortably holds a dozen recompressed 1200px variants.
pub const DEFAULT_PREFETCH_CACHE_BYTES: usize = 24 * 1024 * 1024;

/// Minimum prefetch cache size in bytes (4 MB).
pub const MIN_PREFETCH_CACHE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum prefetch cache size in bytes (128 MB).
pub const MAX_PREFETCH_CACHE_BYTES: usize = 128 * 1024 * 1024;

/// Default maximum number of variants to cache.
pub const DEFAULT_MAX_IMAGES: usize = 24;

/// Minimum variants to cache.
pub const MIN_MAX_IMAGES: usize = 4;

/// Maximum variants to cache.
pub const MAX_MAX_IMAGES: usize = 64;

/// Configuration for the prefetch cache.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of variants to cache.
    pub max_images: usize,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PREFETCH_CACHE_BYTES,
            max_images: DEFAULT_MAX_IMAGES,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new prefetch configuration with specified limits.
    #[must_use]
    pub fn new(max_bytes: usize, max_images: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PREFETCH_CACHE_BYTES, MAX_PREFETCH_CACHE_BYTES),
            max_images: max_images.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES),
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Builds the configuration from the optional settings-file section.
    #[must_use]
    pub fn from_settings(section: &crate::config::PrefetchSection) -> Self {
        if !section.enabled.unwrap_or(true) {
            return Self::disabled();
        }
        Self::new(
            section.max_bytes.unwrap_or(DEFAULT_PREFETCH_CACHE_BYTES),
            section.max_images.unwrap_or(DEFAULT_MAX_IMAGES),
        )
    }
}

/// A fetched, display-ready image variant.
///
/// Carries the widget handle alongside the decoded pixel dimensions and the
/// encoded byte size used for cache accounting. Cloning is cheap: the pixel
/// data sits behind the handle's internal reference count.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

impl FetchedImage {
    /// Builds a variant from encoded bytes, validating that they decode and
    /// recording the decoded dimensions.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let decoded = image_rs::load_from_memory(&bytes)?;
        let (width, height) = (decoded.width(), decoded.height());
        let size_bytes = bytes.len();
        Ok(Self {
            handle: Handle::from_bytes(bytes),
            width,
            height,
            size_bytes,
        })
    }

    /// Builds a variant directly from RGBA pixels (used by tests).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let size_bytes = pixels.len();
        Self {
            handle: Handle::from_rgba(width, height, pixels),
            width,
            height,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    image: Arc<FetchedImage>,
    size_bytes: usize,
}

impl CacheEntry {
    fn new(image: FetchedImage) -> Self {
        let size_bytes = image.size_bytes;
        Self {
            image: Arc::new(image),
            size_bytes,
        }
    }
}

/// Statistics about prefetch cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    /// Number of variants currently in cache.
    pub image_count: usize,

    /// Total bytes currently used by cached variants.
    pub total_bytes: usize,

    /// Number of cache hits.
    pub hits: u64,

    /// Number of cache misses.
    pub misses: u64,

    /// Number of variants evicted due to limits.
    pub evictions: u64,

    /// Number of variants inserted.
    pub insertions: u64,
}

impl PrefetchStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache for prefetched image variants, keyed by resolved URL.
pub struct ImagePrefetchCache {
    cache: LruCache<String, CacheEntry>,
    config: PrefetchConfig,
    current_bytes: usize,
    stats: PrefetchStats,
}

impl ImagePrefetchCache {
    /// Creates a new prefetch cache with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_MAX_IMAGES` is zero, which would indicate a build
    /// configuration error.
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(
            NonZeroUsize::new(DEFAULT_MAX_IMAGES).expect("DEFAULT_MAX_IMAGES must be non-zero"),
        );

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a new prefetch cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    /// Returns whether prefetching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Inserts a variant into the cache.
    ///
    /// Returns `true` if it was inserted, `false` if caching is disabled or
    /// the variant is too large.
    pub fn insert(&mut self, url: String, image: FetchedImage) -> bool {
        if !self.config.enabled {
            return false;
        }

        let entry = CacheEntry::new(image);
        let image_size = entry.size_bytes;

        // Don't cache variants larger than half the cache size
        if image_size > self.config.max_bytes / 2 {
            return false;
        }

        // Evict variants until we have room
        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((evicted_url, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes);
                self.stats.evictions += 1;
                tracing::debug!(url = %evicted_url, "evicted prefetched variant");
            }
        }

        // Check if we already have this URL (update if so)
        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes);
        }

        self.current_bytes += entry.size_bytes;
        self.cache.put(url, entry);
        self.stats.insertions += 1;
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets a variant from the cache by URL, updating LRU order on access.
    pub fn get(&mut self, url: &str) -> Option<FetchedImage> {
        if !self.config.enabled {
            return None;
        }

        if let Some(entry) = self.cache.get(url) {
            self.stats.hits += 1;
            Some((*entry.image).clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Gets a variant without updating LRU order or statistics.
    ///
    /// Views use this: rendering a frame must not reorder the cache.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<FetchedImage> {
        if !self.config.enabled {
            return None;
        }
        self.cache.peek(url).map(|entry| (*entry.image).clone())
    }

    /// Checks whether a URL is cached without updating LRU order.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.cache.contains(url)
    }

    /// Returns the URLs from the given list that still need fetching.
    #[must_use]
    pub fn urls_to_prefetch(&self, urls: &[String]) -> Vec<String> {
        if !self.config.enabled {
            return Vec::new();
        }

        urls.iter()
            .filter(|u| !self.cache.contains(u.as_str()))
            .cloned()
            .collect()
    }

    /// Clears all cached variants.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.image_count = 0;
        self.stats.total_bytes = 0;
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    /// Returns the current number of cached variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for ImagePrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePrefetchCache")
            .field("enabled", &self.config.enabled)
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_images", &self.config.max_images)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Fetches and decodes one image variant.
///
/// Shared by thumbnail loading, overlay loading, and archive flyer loading so
/// every image request in the application goes through the same pool and the
/// same validation.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<FetchedImage> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    FetchedImage::from_bytes(bytes.to_vec())
}

/// Loads a variant for prefetching.
///
/// This is the async function behind the fire-and-forget prefetch task.
/// Returns the URL together with the result so the completion message can be
/// matched back to its cache slot.
pub async fn load_image_for_prefetch(
    client: reqwest::Client,
    url: String,
) -> (String, Result<FetchedImage>) {
    let result = fetch_image(&client, &url).await;
    if let Err(e) = &result {
        tracing::debug!(url = %url, error = %e, "prefetch failed");
    }
    (url.clone(), result)
}
