// SPDX-License-Identifier: MPL-2.0
//! Archive screen: the event listing, one card per event.
//!
//! Cards show the event flyer (fetched once the listing arrives) plus the
//! event details. Selecting a card asks the application shell to load the
//! event and switch to the gallery screen.

use crate::content::{ContentClient, EventSummary};
use crate::error::Error;
use crate::gallery::prefetch::{fetch_image, FetchedImage};
use crate::gallery::{ImageUrlResolver, ResolveParams};
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length, Task};
use std::collections::HashMap;

/// Messages emitted by archive widgets and fetch tasks.
#[derive(Debug, Clone)]
pub enum Message {
    RefreshPressed,
    EventPressed(String),
    EventsFetched(Result<Vec<EventSummary>, Error>),
    FlyerFetched {
        event_id: String,
        result: Result<FetchedImage, Error>,
    },
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Load the event with this slug and switch to the gallery screen.
    OpenEvent(String),
}

/// Archive screen state.
#[derive(Debug, Default)]
pub struct State {
    events: Vec<EventSummary>,
    flyers: HashMap<String, FetchedImage>,
    is_loading: bool,
    error: Option<Error>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn events(&self) -> &[EventSummary] {
        &self.events
    }

    /// Records a failure from an event-detail fetch initiated off this
    /// screen, so the user sees it where they clicked.
    pub fn set_error(&mut self, error: Error) {
        self.error = Some(error);
    }

    /// Starts (or restarts) the listing fetch.
    pub fn refresh(&mut self, client: &ContentClient) -> Task<Message> {
        self.is_loading = true;
        self.error = None;
        let client = client.clone();
        Task::perform(
            async move { client.fetch_events().await },
            Message::EventsFetched,
        )
    }

    pub fn handle_message(
        &mut self,
        message: Message,
        client: &ContentClient,
        resolver: &dyn ImageUrlResolver,
        flyer_params: ResolveParams,
    ) -> (Effect, Task<Message>) {
        match message {
            Message::RefreshPressed => (Effect::None, self.refresh(client)),
            Message::EventPressed(slug) => (Effect::OpenEvent(slug), Task::none()),
            Message::EventsFetched(Ok(events)) => {
                self.is_loading = false;
                self.error = None;
                let tasks = self.flyer_tasks(&events, client, resolver, flyer_params);
                self.events = events;
                (Effect::None, Task::batch(tasks))
            }
            Message::EventsFetched(Err(error)) => {
                self.is_loading = false;
                tracing::warn!(%error, "archive listing fetch failed");
                self.error = Some(error);
                (Effect::None, Task::none())
            }
            Message::FlyerFetched { event_id, result } => {
                match result {
                    Ok(image) => {
                        self.flyers.insert(event_id, image);
                    }
                    Err(error) => {
                        tracing::debug!(%event_id, %error, "flyer fetch failed");
                    }
                }
                (Effect::None, Task::none())
            }
        }
    }

    /// One fetch task per event that has a flyer we have not loaded yet.
    fn flyer_tasks(
        &self,
        events: &[EventSummary],
        client: &ContentClient,
        resolver: &dyn ImageUrlResolver,
        flyer_params: ResolveParams,
    ) -> Vec<Task<Message>> {
        events
            .iter()
            .filter(|event| !self.flyers.contains_key(&event.id))
            .filter_map(|event| event.flyers.first().map(|flyer| (event, flyer)))
            .map(|(event, flyer)| {
                let url = resolver.resolve(flyer, &flyer_params);
                let event_id = event.id.clone();
                let http = client.http().clone();
                Task::perform(
                    async move { fetch_image(&http, &url).await },
                    move |result| Message::FlyerFetched {
                        event_id: event_id.clone(),
                        result,
                    },
                )
            })
            .collect()
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let header = Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(i18n.tr("archive-title"))
                    .size(typography::TITLE_LG)
                    .color(palette::PRIMARY_500),
            )
            .push(
                button(icons::sized(icons::refresh(), sizing::ICON_SM))
                    .style(styles::button::link)
                    .on_press(Message::RefreshPressed),
            );

        let mut content = Column::new()
            .spacing(spacing::LG)
            .padding(spacing::XL)
            .push(header);

        if let Some(error) = &self.error {
            content = content.push(error_display::banner(i18n, error));
        }

        if self.is_loading {
            content = content.push(
                Text::new(i18n.tr("archive-loading"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            );
        } else if self.events.is_empty() {
            content = content.push(
                Text::new(i18n.tr("archive-empty"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            );
        } else {
            // Two cards per row, matching the site's archive grid.
            for pair in self.events.chunks(2) {
                let mut row = Row::new().spacing(spacing::LG);
                for event in pair {
                    row = row.push(self.event_card(event, i18n));
                }
                content = content.push(row);
            }
        }

        scrollable(Container::new(content).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn event_card<'a>(&'a self, event: &'a EventSummary, i18n: &'a I18n) -> Element<'a, Message> {
        let flyer: Element<'a, Message> = if let Some(image) = self.flyers.get(&event.id) {
            iced::widget::image(image.handle.clone())
                .width(Length::Fixed(sizing::FLYER_WIDTH))
                .height(Length::Fixed(sizing::FLYER_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into()
        } else {
            let label = if event.flyers.is_empty() {
                i18n.tr("archive-missing-flyer")
            } else {
                i18n.tr("archive-loading")
            };
            Container::new(Text::new(label).size(typography::BODY))
                .width(Length::Fixed(sizing::FLYER_WIDTH))
                .height(Length::Fixed(sizing::FLYER_HEIGHT))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::container::image_placeholder)
                .into()
        };

        let mut details = Row::new().spacing(spacing::MD);
        if let Some(name) = &event.event_name {
            details = details.push(Text::new(name.as_str()).size(typography::BODY));
        }
        if !event.lineup.is_empty() {
            details = details.push(
                Text::new(event.lineup_heading())
                    .size(typography::BODY)
                    .color(palette::GRAY_700),
            );
        }
        if let Some(location) = &event.location {
            details = details.push(
                Text::new(location.as_str())
                    .size(typography::BODY)
                    .color(palette::GRAY_700),
            );
        }
        if let Some(date) = event.formatted_date() {
            details = details.push(
                Text::new(date)
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            );
        }

        let card = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(flyer)
            .push(details);

        button(Container::new(card).padding(spacing::MD))
            .style(styles::button::event_card)
            .on_press(Message::EventPressed(event.slug().to_string()))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gallery::CdnResolver;

    fn resolver() -> CdnResolver {
        CdnResolver::new("https://cdn.example", "p", "d")
    }

    fn summary(id: &str, slug: &str, flyer: bool) -> EventSummary {
        let flyers = if flyer {
            r#"[{"_key": "f0", "asset": {"_id": "image-aa-10x10-jpg", "url": "https://x/a.jpg"}}]"#
        } else {
            "[]"
        };
        serde_json::from_str(&format!(
            r#"{{ "_id": "{id}", "slug": {{ "current": "{slug}" }}, "flyer": {flyers} }}"#
        ))
        .expect("summary fixture should parse")
    }

    #[test]
    fn refresh_sets_loading_and_clears_error() {
        let client = ContentClient::new(&Config::default());
        let mut state = State::new();
        state.set_error(Error::Content("old".into()));

        let _task = state.refresh(&client);
        assert!(state.is_loading());
        assert!(state.error.is_none());
    }

    #[test]
    fn events_fetched_ok_stores_listing() {
        let client = ContentClient::new(&Config::default());
        let mut state = State::new();
        state.is_loading = true;

        let events = vec![summary("e1", "one", true), summary("e2", "two", false)];
        let (effect, _task) = state.handle_message(
            Message::EventsFetched(Ok(events)),
            &client,
            &resolver(),
            ResolveParams::new(600, 60),
        );

        assert_eq!(effect, Effect::None);
        assert!(!state.is_loading());
        assert_eq!(state.events().len(), 2);
    }

    #[test]
    fn events_fetched_err_keeps_previous_listing() {
        let client = ContentClient::new(&Config::default());
        let mut state = State::new();
        state.events = vec![summary("e1", "one", false)];

        let (_, _) = state.handle_message(
            Message::EventsFetched(Err(Error::Content("boom".into()))),
            &client,
            &resolver(),
            ResolveParams::new(600, 60),
        );

        assert_eq!(state.events().len(), 1);
        assert!(state.error.is_some());
    }

    #[test]
    fn event_pressed_requests_navigation() {
        let client = ContentClient::new(&Config::default());
        let mut state = State::new();

        let (effect, _) = state.handle_message(
            Message::EventPressed("spring-opening".to_string()),
            &client,
            &resolver(),
            ResolveParams::new(600, 60),
        );

        assert_eq!(effect, Effect::OpenEvent("spring-opening".to_string()));
    }

    #[test]
    fn flyer_fetched_ok_is_kept_and_err_is_dropped() {
        let client = ContentClient::new(&Config::default());
        let mut state = State::new();

        let image = FetchedImage::from_rgba(2, 2, vec![0u8; 16]);
        let (_, _) = state.handle_message(
            Message::FlyerFetched {
                event_id: "e1".to_string(),
                result: Ok(image),
            },
            &client,
            &resolver(),
            ResolveParams::new(600, 60),
        );
        assert!(state.flyers.contains_key("e1"));

        let (_, _) = state.handle_message(
            Message::FlyerFetched {
                event_id: "e2".to_string(),
                result: Err(Error::Content("bad bytes".into())),
            },
            &client,
            &resolver(),
            ResolveParams::new(600, 60),
        );
        assert!(!state.flyers.contains_key("e2"));
    }
}
