// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is an event-archive browser and photo gallery viewer
//! built with the Iced GUI framework.
//!
//! Content (events, images, lineups, locations) is authored externally in a
//! hosted content store and fetched at render time. The application renders
//! an archive listing, per-event photo galleries with a full-screen overlay
//! viewer, and the usual home/not-found scaffolding around them.

#![doc(html_root_url = "https://docs.rs/iced_gallery/0.2.0")]

pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod ui;
