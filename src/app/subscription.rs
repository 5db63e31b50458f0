// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! The only native events the application cares about are the overlay
//! viewer's keyboard shortcuts. The subscription exists exactly while the
//! overlay is open: when it is closed (or another screen is showing) the
//! subscription is `none`, so no key handler can leak.

use super::Message;
use crate::ui::gallery_screen;
use iced::{event, Subscription};

/// Keyboard routing for the overlay viewer.
pub fn create_overlay_subscription(overlay_open: bool) -> Subscription<Message> {
    if !overlay_open {
        return Subscription::none();
    }

    event::listen_with(|event, status, _window_id| {
        if !matches!(event, event::Event::Keyboard(_)) {
            return None;
        }
        match status {
            // Keys already captured by a focused widget stay there.
            event::Status::Captured => None,
            event::Status::Ignored => {
                Some(Message::Gallery(gallery_screen::Message::RawEvent(event)))
            }
        }
    })
}
