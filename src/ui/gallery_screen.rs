// SPDX-License-Identifier: MPL-2.0
//! Event screen: thumbnail grid plus the full-screen overlay viewer.
//!
//! The component owns the `ViewerState`, the prefetch cache for large
//! variants, and the scroll-suspension guard. All mutation flows through
//! `handle_message`, which returns the side effects the application shell
//! must perform, in addition to any fetch tasks the component starts itself.

use crate::content::{EventDetail, ImageRecord};
use crate::error::Error;
use crate::gallery::prefetch::{fetch_image, load_image_for_prefetch};
use crate::gallery::{
    FetchedImage, GallerySet, ImagePrefetchCache, ImageUrlResolver, PrefetchConfig, ResolveParams,
    ScrollLock, ScrollLockGuard, ViewerState,
};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, keyboard, ContentFit, Element, Length, Task};

/// Thumbnails per grid row.
const GRID_COLUMNS: usize = 3;

/// Messages emitted by gallery widgets and fetch tasks.
#[derive(Debug, Clone)]
pub enum Message {
    ThumbnailPressed(usize),
    ThumbnailLoaded {
        index: usize,
        result: Result<FetchedImage, Error>,
    },
    /// A large variant finished fetching (overlay display or prefetch).
    VariantFetched {
        url: String,
        result: Result<FetchedImage, Error>,
    },
    ClosePressed,
    NextPressed,
    PreviousPressed,
    DownloadPressed,
    BackPressed,
    RawEvent(iced::Event),
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Return to the archive listing.
    Back,
    /// Save the original asset at `url` to a user-chosen location.
    Download { url: String, file_name: String },
}

/// Loading state of one grid thumbnail.
#[derive(Debug, Clone)]
enum ThumbSlot {
    Loading,
    Ready(FetchedImage),
    Failed,
}

/// Complete event screen state.
pub struct State {
    event: EventDetail,
    set: GallerySet,
    viewer: ViewerState,
    thumbs: Vec<ThumbSlot>,
    cache: ImagePrefetchCache,
    scroll: ScrollLock,
    scroll_guard: Option<ScrollLockGuard>,
    resolver: Box<dyn ImageUrlResolver>,
    thumb_params: ResolveParams,
    full_params: ResolveParams,
    http: reqwest::Client,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("slug", &self.event.slug())
            .field("images", &self.set.len())
            .field("overlay_open", &self.viewer.is_open())
            .finish()
    }
}

impl State {
    /// Builds the screen state from a fetched event and kicks off the
    /// thumbnail fetches.
    pub fn new(
        event: EventDetail,
        resolver: Box<dyn ImageUrlResolver>,
        thumb_params: ResolveParams,
        full_params: ResolveParams,
        prefetch_config: PrefetchConfig,
        http: reqwest::Client,
    ) -> (Self, Task<Message>) {
        let set = GallerySet::new(event.images.clone(), event.display_title());
        let thumbs = vec![ThumbSlot::Loading; set.len()];

        let state = Self {
            event,
            set,
            viewer: ViewerState::new(),
            thumbs,
            cache: ImagePrefetchCache::new(prefetch_config),
            scroll: ScrollLock::new(),
            scroll_guard: None,
            resolver,
            thumb_params,
            full_params,
            http,
        };

        let task = state.thumbnail_tasks();
        (state, task)
    }

    pub fn slug(&self) -> &str {
        self.event.slug()
    }

    pub fn lineup_heading(&self) -> String {
        self.event.lineup_heading()
    }

    pub fn overlay_open(&self) -> bool {
        self.viewer.is_open()
    }

    pub fn current_index(&self) -> usize {
        self.viewer.current_index()
    }

    /// Whether the thumbnail page may scroll (false while the overlay holds
    /// the suspension guard).
    pub fn page_scrollable(&self) -> bool {
        self.scroll.is_scrollable()
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::ThumbnailPressed(index) => {
                if self.viewer.open(index, self.set.len()) {
                    if self.scroll_guard.is_none() {
                        self.scroll_guard = Some(self.scroll.acquire());
                    }
                    (Effect::None, self.variant_tasks())
                } else {
                    (Effect::None, Task::none())
                }
            }
            Message::ThumbnailLoaded { index, result } => {
                if let Some(slot) = self.thumbs.get_mut(index) {
                    *slot = match result {
                        Ok(image) => ThumbSlot::Ready(image),
                        Err(error) => {
                            tracing::debug!(index, %error, "thumbnail fetch failed");
                            ThumbSlot::Failed
                        }
                    };
                }
                (Effect::None, Task::none())
            }
            Message::VariantFetched { url, result } => {
                // Prefetch is fire-and-forget: a failure only costs latency
                // on the next navigation, so errors are dropped here.
                if let Ok(image) = result {
                    self.cache.insert(url, image);
                }
                (Effect::None, Task::none())
            }
            Message::NextPressed => self.navigate_next(),
            Message::PreviousPressed => self.navigate_previous(),
            Message::ClosePressed => {
                self.close_overlay();
                (Effect::None, Task::none())
            }
            Message::DownloadPressed => (self.download_effect(), Task::none()),
            Message::BackPressed => (Effect::Back, Task::none()),
            Message::RawEvent(event) => self.handle_raw_event(&event),
        }
    }

    fn navigate_next(&mut self) -> (Effect, Task<Message>) {
        match self.viewer.next(self.set.len()) {
            Some(_) => (Effect::None, self.variant_tasks()),
            None => (Effect::None, Task::none()),
        }
    }

    fn navigate_previous(&mut self) -> (Effect, Task<Message>) {
        match self.viewer.previous(self.set.len()) {
            Some(_) => (Effect::None, self.variant_tasks()),
            None => (Effect::None, Task::none()),
        }
    }

    fn close_overlay(&mut self) {
        if self.viewer.close() {
            // Dropping the guard restores background scrolling.
            self.scroll_guard = None;
        }
    }

    fn download_effect(&self) -> Effect {
        match self.set.get(self.viewer.current_index()) {
            Some(record) if self.viewer.is_open() => Effect::Download {
                url: record.original_url().to_string(),
                file_name: record.download_file_name(),
            },
            _ => Effect::None,
        }
    }

    /// Keyboard contract, active only while the overlay is open. The
    /// subscription already gates on the overlay, but the component ignores
    /// keys when closed as a second line of defense.
    fn handle_raw_event(&mut self, event: &iced::Event) -> (Effect, Task<Message>) {
        if !self.viewer.is_open() {
            return (Effect::None, Task::none());
        }

        if let iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event {
            match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    self.close_overlay();
                    (Effect::None, Task::none())
                }
                keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => self.navigate_previous(),
                keyboard::Key::Named(keyboard::key::Named::ArrowRight) => self.navigate_next(),
                _ => (Effect::None, Task::none()),
            }
        } else {
            (Effect::None, Task::none())
        }
    }

    /// One fetch task per grid thumbnail.
    fn thumbnail_tasks(&self) -> Task<Message> {
        let tasks: Vec<Task<Message>> = self
            .set
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let url = self.resolver.resolve(record, &self.thumb_params);
                let http = self.http.clone();
                Task::perform(
                    async move { fetch_image(&http, &url).await },
                    move |result| Message::ThumbnailLoaded { index, result },
                )
            })
            .collect();
        Task::batch(tasks)
    }

    /// Fetch tasks for the current image's large variant plus the wraparound
    /// neighbors' variants, skipping anything already cached. Fire-and-forget:
    /// overlapping fetches for the same URL are harmless.
    fn variant_tasks(&self) -> Task<Message> {
        let mut indices = vec![self.viewer.current_index()];
        indices.extend(self.viewer.adjacent_indices(self.set.len()));

        let urls: Vec<String> = indices
            .into_iter()
            .filter_map(|i| self.set.get(i))
            .map(|record| self.resolver.resolve(record, &self.full_params))
            .collect();

        let tasks: Vec<Task<Message>> = self
            .cache
            .urls_to_prefetch(&urls)
            .into_iter()
            .map(|url| {
                let http = self.http.clone();
                Task::perform(load_image_for_prefetch(http, url), |(url, result)| {
                    Message::VariantFetched { url, result }
                })
            })
            .collect();
        Task::batch(tasks)
    }

    fn current_variant_url(&self) -> Option<String> {
        self.set
            .get(self.viewer.current_index())
            .map(|record| self.resolver.resolve(record, &self.full_params))
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let page = self.page_view(i18n);

        if self.viewer.is_open() {
            Stack::new()
                .push(page)
                .push(self.overlay_view(i18n))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        } else {
            page
        }
    }

    fn page_view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let back_button = button(
            Text::new(format!("⟵ {}", i18n.tr("back-to-archive"))).size(typography::TITLE_SM),
        )
        .style(styles::button::link)
        .on_press(Message::BackPressed);

        let heading = Text::new(self.lineup_heading()).size(typography::TITLE_LG);

        let mut content = Column::new()
            .spacing(spacing::LG)
            .padding(spacing::MD)
            .push(back_button)
            .push(heading);

        if self.set.is_empty() {
            content = content.push(
                Text::new(i18n.tr("gallery-no-images"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            );
        } else {
            content = content.push(self.grid_view());
        }

        // Scroll suspension: while the overlay holds the guard the page is
        // rendered without its scrollable, so the background cannot move.
        if self.scroll.is_scrollable() {
            scrollable(Container::new(content).width(Length::Fill))
                .height(Length::Fill)
                .into()
        } else {
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .clip(true)
                .into()
        }
    }

    fn grid_view(&self) -> Element<'_, Message> {
        let mut grid = Column::new().spacing(spacing::XS);
        for (row_index, row_records) in self.thumbs.chunks(GRID_COLUMNS).enumerate() {
            let mut row = Row::new().spacing(spacing::XS);
            for (col_index, slot) in row_records.iter().enumerate() {
                let index = row_index * GRID_COLUMNS + col_index;
                row = row.push(self.thumbnail_cell(index, slot));
            }
            grid = grid.push(row);
        }
        grid.into()
    }

    fn thumbnail_cell<'a>(&'a self, index: usize, slot: &'a ThumbSlot) -> Element<'a, Message> {
        let cell: Element<'a, Message> = match slot {
            ThumbSlot::Ready(image) => iced::widget::image(image.handle.clone())
                .width(Length::Fixed(sizing::THUMB_CELL))
                .height(Length::Fixed(sizing::THUMB_CELL))
                .content_fit(ContentFit::Cover)
                .into(),
            ThumbSlot::Loading | ThumbSlot::Failed => Container::new(icons::sized(
                icons::picture(),
                sizing::ICON_LG,
            ))
            .width(Length::Fixed(sizing::THUMB_CELL))
            .height(Length::Fixed(sizing::THUMB_CELL))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::image_placeholder)
            .into(),
        };

        button(cell)
            .style(styles::button::bare)
            .padding(0)
            .on_press(Message::ThumbnailPressed(index))
            .into()
    }

    fn overlay_view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let close_button = button(
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(icons::sized(icons::cross(), sizing::ICON_MD))
                .push(Text::new(i18n.tr("gallery-close")).size(typography::BODY_LG)),
        )
        .style(styles::button_overlay(
            palette::WHITE,
            opacity::TRANSPARENT,
            opacity::OVERLAY_SUBTLE,
        ))
        .on_press(Message::ClosePressed);

        let download_button = button(
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(icons::sized(icons::download(), sizing::ICON_MD))
                .push(Text::new(i18n.tr("gallery-download")).size(typography::BODY_LG)),
        )
        .style(styles::button_overlay(
            palette::WHITE,
            opacity::TRANSPARENT,
            opacity::OVERLAY_SUBTLE,
        ))
        .on_press(Message::DownloadPressed);

        let header = Row::new()
            .padding(spacing::MD)
            .push(close_button)
            .push(Space::new().width(Length::Fill))
            .push(download_button);

        let previous_zone: Element<'a, Message> =
            button(icons::sized(icons::arrow_left(), sizing::ICON_XL))
                .style(styles::button::bare)
                .padding(spacing::MD)
                .on_press(Message::PreviousPressed)
                .into();

        let next_zone: Element<'a, Message> =
            button(icons::sized(icons::arrow_right(), sizing::ICON_XL))
                .style(styles::button::bare)
                .padding(spacing::MD)
                .on_press(Message::NextPressed)
                .into();

        let body = Row::new()
            .align_y(alignment::Vertical::Center)
            .push(previous_zone)
            .push(
                Container::new(self.overlay_image(i18n))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            )
            .push(next_zone);

        let position = Container::new(
            Text::new(format!(
                "{} / {}",
                self.viewer.current_index() + 1,
                self.set.len()
            ))
            .size(typography::CAPTION),
        )
        .padding([spacing::XXS, spacing::SM])
        .style(styles::overlay::indicator(radius::SM));

        let layout = Column::new()
            .push(header)
            .push(Container::new(body).height(Length::Fill))
            .push(
                Container::new(position)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .padding(spacing::MD),
            );

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop)
            .into()
    }

    fn overlay_image<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let Some(record) = self.set.get(self.viewer.current_index()) else {
            return Text::new(i18n.tr("gallery-no-images")).into();
        };

        if let Some(url) = self.current_variant_url() {
            if let Some(image) = self.cache.peek(&url) {
                return iced::widget::image(image.handle.clone())
                    .width(Length::Fixed(sizing::OVERLAY_IMAGE_MAX_WIDTH))
                    .content_fit(ContentFit::Contain)
                    .into();
            }
        }

        // Variant still in flight: reserve the final footprint using the
        // asset dimensions (or the documented fallback) so the layout does
        // not jump when the image arrives.
        let (width, height) = overlay_placeholder_size(record);
        Container::new(
            Text::new(i18n.tr("gallery-loading"))
                .size(typography::BODY)
                .color(palette::WHITE),
        )
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    }
}

/// Footprint of the overlay image placeholder, capped at the overlay width
/// and preserving the asset's aspect ratio (fallback 1200x800 when the
/// asset has no dimension metadata).
#[allow(clippy::cast_precision_loss)] // u32 to f32 for dimensions: f32 is exact up to 16M
fn overlay_placeholder_size(record: &ImageRecord) -> (f32, f32) {
    let dims = record.dimensions_or_fallback();
    let width = (dims.width as f32).min(sizing::OVERLAY_IMAGE_MAX_WIDTH);
    let height = width * dims.height as f32 / dims.width.max(1) as f32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EventDetail;
    use crate::gallery::ResolveParams;

    /// Resolver double that never touches the network configuration.
    struct MockResolver;

    impl ImageUrlResolver for MockResolver {
        fn resolve(&self, record: &ImageRecord, params: &ResolveParams) -> String {
            format!("mock://{}?w={}", record.key, params.width)
        }
    }

    fn event_with_images(count: usize) -> EventDetail {
        let images: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"_key": "img{i}", "asset": {{"_id": "image-h{i}-100x80-jpg", "url": "https://raw.example/{i}.jpg"}}}}"#
                )
            })
            .collect();
        serde_json::from_str(&format!(
            r#"{{
                "_id": "ev1",
                "title": "Night One",
                "slug": {{ "current": "night-one" }},
                "eventLineup": ["DJ A", "DJ B"],
                "eventImages": [{images}]
            }}"#,
            images = images.join(",")
        ))
        .expect("event fixture should parse")
    }

    fn new_state(count: usize) -> State {
        let (state, _task) = State::new(
            event_with_images(count),
            Box::new(MockResolver),
            ResolveParams::new(600, 60),
            ResolveParams::new(1200, 60),
            PrefetchConfig::default(),
            reqwest::Client::new(),
        );
        state
    }

    fn press(state: &mut State, message: Message) -> Effect {
        state.handle_message(message).0
    }

    fn key_event(named: keyboard::key::Named) -> iced::Event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(named),
            modified_key: keyboard::Key::Named(named),
            physical_key: keyboard::key::Physical::Unidentified(
                keyboard::key::NativeCode::Unidentified,
            ),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::empty(),
            text: None,
            repeat: false,
        })
    }

    #[test]
    fn thumbnail_press_opens_overlay_and_suspends_scrolling() {
        let mut state = new_state(3);
        assert!(state.page_scrollable());

        press(&mut state, Message::ThumbnailPressed(1));
        assert!(state.overlay_open());
        assert_eq!(state.current_index(), 1);
        assert!(!state.page_scrollable());
    }

    #[test]
    fn close_restores_scrolling_regardless_of_navigation() {
        let mut state = new_state(3);
        press(&mut state, Message::ThumbnailPressed(0));
        press(&mut state, Message::NextPressed);
        press(&mut state, Message::NextPressed);
        press(&mut state, Message::PreviousPressed);

        press(&mut state, Message::ClosePressed);
        assert!(!state.overlay_open());
        assert!(state.page_scrollable());
    }

    #[test]
    fn index_persists_after_close() {
        let mut state = new_state(3);
        press(&mut state, Message::ThumbnailPressed(0));
        press(&mut state, Message::NextPressed);
        press(&mut state, Message::NextPressed);
        press(&mut state, Message::ClosePressed);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut state = new_state(3);
        press(&mut state, Message::ThumbnailPressed(2));
        press(&mut state, Message::NextPressed);
        assert_eq!(state.current_index(), 0);
        press(&mut state, Message::PreviousPressed);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn open_rejected_on_empty_set() {
        let mut state = new_state(0);
        press(&mut state, Message::ThumbnailPressed(0));
        assert!(!state.overlay_open());
        assert!(state.page_scrollable());
    }

    #[test]
    fn keyboard_ignored_while_closed() {
        let mut state = new_state(3);
        for named in [
            keyboard::key::Named::Escape,
            keyboard::key::Named::ArrowLeft,
            keyboard::key::Named::ArrowRight,
        ] {
            press(&mut state, Message::RawEvent(key_event(named)));
        }
        assert!(!state.overlay_open());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn keyboard_navigates_and_dismisses_while_open() {
        let mut state = new_state(3);
        press(&mut state, Message::ThumbnailPressed(0));

        press(
            &mut state,
            Message::RawEvent(key_event(keyboard::key::Named::ArrowRight)),
        );
        assert_eq!(state.current_index(), 1);

        press(
            &mut state,
            Message::RawEvent(key_event(keyboard::key::Named::ArrowLeft)),
        );
        assert_eq!(state.current_index(), 0);

        press(
            &mut state,
            Message::RawEvent(key_event(keyboard::key::Named::Escape)),
        );
        assert!(!state.overlay_open());
        assert!(state.page_scrollable());
    }

    #[test]
    fn download_exposes_original_asset_url() {
        let mut state = new_state(2);
        press(&mut state, Message::ThumbnailPressed(1));

        let effect = press(&mut state, Message::DownloadPressed);
        assert_eq!(
            effect,
            Effect::Download {
                url: "https://raw.example/1.jpg".to_string(),
                file_name: "h1-100x80.jpg".to_string(),
            }
        );
    }

    #[test]
    fn download_is_rejected_while_closed() {
        let mut state = new_state(2);
        let effect = press(&mut state, Message::DownloadPressed);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn back_effect_is_forwarded() {
        let mut state = new_state(1);
        let effect = press(&mut state, Message::BackPressed);
        assert_eq!(effect, Effect::Back);
    }

    #[test]
    fn fetched_variant_lands_in_cache() {
        let mut state = new_state(2);
        let image = FetchedImage::from_rgba(4, 4, vec![0u8; 64]);
        press(
            &mut state,
            Message::VariantFetched {
                url: "mock://img0?w=1200".to_string(),
                result: Ok(image),
            },
        );
        assert!(state.cache.contains("mock://img0?w=1200"));
    }

    #[test]
    fn failed_variant_is_dropped_silently() {
        let mut state = new_state(2);
        press(
            &mut state,
            Message::VariantFetched {
                url: "mock://img0?w=1200".to_string(),
                result: Err(Error::Content("bad".into())),
            },
        );
        assert!(!state.cache.contains("mock://img0?w=1200"));
    }

    #[test]
    fn thumbnail_results_update_slots() {
        let mut state = new_state(2);
        press(
            &mut state,
            Message::ThumbnailLoaded {
                index: 0,
                result: Ok(FetchedImage::from_rgba(2, 2, vec![0u8; 16])),
            },
        );
        press(
            &mut state,
            Message::ThumbnailLoaded {
                index: 1,
                result: Err(Error::Content("bad".into())),
            },
        );
        assert!(matches!(state.thumbs[0], ThumbSlot::Ready(_)));
        assert!(matches!(state.thumbs[1], ThumbSlot::Failed));
    }

    #[test]
    fn placeholder_uses_fallback_dimensions_without_metadata() {
        let state = new_state(1);
        let record = state.set.get(0).expect("record");
        let (width, height) = overlay_placeholder_size(record);
        // 1200x800 fallback capped at the overlay width, ratio preserved.
        assert_eq!(width, sizing::OVERLAY_IMAGE_MAX_WIDTH);
        let expected_height = width * 800.0 / 1200.0;
        assert!((height - expected_height).abs() < 0.5);
    }

    #[test]
    fn teardown_while_open_releases_scroll_lock() {
        let mut state = new_state(2);
        press(&mut state, Message::ThumbnailPressed(0));
        let observer = state.scroll.clone();
        assert!(!observer.is_scrollable());
        drop(state);
        assert!(observer.is_scrollable());
    }
}
