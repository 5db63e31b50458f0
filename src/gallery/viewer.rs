// SPDX-License-Identifier: MPL-2.0
//! Overlay viewer state machine.
//!
//! `ViewerState` is the single owner of the open/closed flag and the current
//! index. Navigation wraps around modulo the set length instead of clamping,
//! and the index deliberately survives a close: reopening without an explicit
//! index resumes where the user left off.

/// Transient state of the full-screen overlay viewer.
///
/// Invariant: whenever the overlay is open and the backing set is non-empty,
/// `current_index` is a valid index into that set. All mutation goes through
/// the operations below; the set length is passed in because the set itself
/// lives with the screen, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    is_open: bool,
    current_index: usize,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            is_open: false,
            current_index: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Opens the overlay at `index`. Rejected (returns `false`) when the set
    /// is empty or the index is out of range.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if len == 0 || index >= len {
            return false;
        }
        self.is_open = true;
        self.current_index = index;
        true
    }

    /// Closes the overlay, keeping the index. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open;
        self.is_open = false;
        was_open
    }

    /// Advances to the next image with wraparound and returns the new index.
    ///
    /// No-op when closed or when the set has fewer than two images.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if !self.is_open || len < 2 {
            return None;
        }
        self.current_index = (self.current_index + 1) % len;
        Some(self.current_index)
    }

    /// Retreats to the previous image with wraparound and returns the new
    /// index. No-op when closed or when the set has fewer than two images.
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if !self.is_open || len < 2 {
            return None;
        }
        self.current_index = (self.current_index + len - 1) % len;
        Some(self.current_index)
    }

    /// Defensive resync after the backing set changed size. Closes the
    /// overlay when the set became empty, clamps the index otherwise.
    /// Returns `true` when the overlay was closed by this call.
    pub fn sync_len(&mut self, len: usize) -> bool {
        if len == 0 {
            self.current_index = 0;
            return self.close();
        }
        if self.current_index >= len {
            self.current_index = len - 1;
        }
        false
    }

    /// Indices whose large variants should be pre-loaded: the wraparound
    /// neighbors of the current index, deduplicated, never the current index
    /// itself. Empty for sets of length 0 or 1.
    pub fn adjacent_indices(&self, len: usize) -> Vec<usize> {
        if len < 2 {
            return Vec::new();
        }
        let next = (self.current_index + 1) % len;
        let previous = (self.current_index + len - 1) % len;
        if next == previous {
            vec![next]
        } else {
            vec![previous, next]
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}
