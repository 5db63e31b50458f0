// SPDX-License-Identifier: MPL-2.0
//! Scoped suspension of background page scrolling.
//!
//! Opening the overlay must stop the thumbnail page from scrolling, and the
//! suspension must be released on every path that closes the overlay,
//! including screen teardown while it happens to be open. Modeling the flag
//! as a counted acquisition with an RAII guard makes an unbalanced release
//! unrepresentable: dropping the guard is the release.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared scroll-suspension flag for one page.
///
/// The page is scrollable exactly while no guard is alive. Cloning shares
/// the underlying counter, so views can check scrollability while the
/// overlay state holds the guard.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    suspensions: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspends scrolling until the returned guard is dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.suspensions.fetch_add(1, Ordering::Relaxed);
        ScrollLockGuard {
            suspensions: Arc::clone(&self.suspensions),
        }
    }

    pub fn is_scrollable(&self) -> bool {
        self.suspensions.load(Ordering::Relaxed) == 0
    }
}

/// Active scroll suspension. Dropping it restores scrollability.
#[derive(Debug)]
pub struct ScrollLockGuard {
    suspensions: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.suspensions.fetch_sub(1, Ordering::Relaxed);
    }
}
