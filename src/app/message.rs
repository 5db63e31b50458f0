// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::content::EventDetail;
use crate::error::Error;
use crate::ui::archive;
use crate::ui::gallery_screen;
use crate::ui::home;
use crate::ui::not_found;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Archive(archive::Message),
    Gallery(gallery_screen::Message),
    NotFound(not_found::Message),
    /// Result of an event-by-slug fetch initiated from the archive or CLI.
    EventFetched {
        slug: String,
        result: Result<Option<EventDetail>, Error>,
    },
    /// The user picked (or dismissed) a save location for a download.
    DownloadTargetChosen {
        url: String,
        path: Option<PathBuf>,
    },
    /// Result of fetching and writing the original asset.
    DownloadCompleted(Result<PathBuf, Error>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
    /// Optional event slug to open directly on startup.
    pub slug: Option<String>,
}
