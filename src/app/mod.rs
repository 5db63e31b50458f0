// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together the domains (archive, gallery,
//! localization) and translates messages into side effects like content
//! fetches or downloads. Policy decisions (which resolver, which variant
//! widths, where downloads go) stay close to the main update loop so it is
//! easy to audit user-facing behavior.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config::{self, Config};
use crate::content::ContentClient;
use crate::gallery::{CdnResolver, PrefetchConfig, ResolveParams};
use crate::i18n::fluent::I18n;
use crate::ui::archive;
use crate::ui::gallery_screen;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 750;
pub const MIN_WINDOW_WIDTH: u32 = 700;
pub const MIN_WINDOW_HEIGHT: u32 = 500;

/// Root Iced application state that bridges screens, localization, and
/// the content-store client.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    archive: archive::State,
    gallery: Option<gallery_screen::State>,
    client: ContentClient,
    config: Config,
    theme_mode: ThemeMode,
    /// Slug currently being fetched after an archive card press.
    pending_slug: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("events", &self.archive.events().len())
            .field("gallery_open", &self.gallery.is_some())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state, starts the archive listing fetch, and
    /// optionally fetches an event named on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.as_ref().map(PathBuf::from);
        let (config, config_warning) = config::load(config_dir.as_deref());
        if let Some(key) = config_warning {
            tracing::warn!(key, "configuration warning");
        }

        let i18n = I18n::new(flags.lang.clone(), &config);
        let client = ContentClient::new(&config);
        let theme_mode = config.theme_mode();

        let mut app = App {
            i18n,
            screen: Screen::Home,
            archive: archive::State::new(),
            gallery: None,
            client,
            config,
            theme_mode,
            pending_slug: None,
        };

        let mut tasks = vec![app.archive.refresh(&app.client).map(Message::Archive)];

        if let Some(slug) = flags.slug {
            app.screen = Screen::Archive;
            tasks.push(app.fetch_event_task(slug));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match (&self.screen, &self.gallery) {
            (Screen::Event, Some(gallery)) => {
                let heading = gallery.lineup_heading();
                if heading.is_empty() {
                    app_name
                } else {
                    format!("{heading} - {app_name}")
                }
            }
            _ => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let overlay_open = self.screen == Screen::Event
            && self.gallery.as_ref().is_some_and(|g| g.overlay_open());
        subscription::create_overlay_subscription(overlay_open)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// The resolver used for every variant URL on the current deployment.
    fn resolver(&self) -> CdnResolver {
        CdnResolver::new(
            self.config.image_cdn(),
            self.config.project_id(),
            self.config.dataset(),
        )
    }

    fn thumb_params(&self) -> ResolveParams {
        ResolveParams::new(self.config.thumb_width(), self.config.quality())
    }

    fn full_params(&self) -> ResolveParams {
        ResolveParams::new(self.config.full_width(), self.config.quality())
    }

    fn prefetch_config(&self) -> PrefetchConfig {
        PrefetchConfig::from_settings(&self.config.prefetch)
    }

    /// Starts the event-by-slug fetch and records the pending navigation.
    fn fetch_event_task(&mut self, slug: String) -> Task<Message> {
        self.pending_slug = Some(slug.clone());
        let client = self.client.clone();
        let task_slug = slug.clone();
        Task::perform(
            async move { client.fetch_event(&task_slug).await },
            move |result| Message::EventFetched {
                slug: slug.clone(),
                result,
            },
        )
    }
}
