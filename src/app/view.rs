// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state.

use super::{App, Message, Screen};
use crate::ui::home;
use crate::ui::not_found;
use iced::{
    widget::{Container, Text},
    Element, Length,
};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match app.screen {
        Screen::Home => home::view(&app.i18n).map(Message::Home),
        Screen::Archive => app.archive.view(&app.i18n).map(Message::Archive),
        Screen::Event => view_gallery(app),
        Screen::NotFound => not_found::view(&app.i18n).map(Message::NotFound),
    };

    Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_gallery(app: &App) -> Element<'_, Message> {
    if let Some(gallery) = &app.gallery {
        gallery.view(&app.i18n).map(Message::Gallery)
    } else {
        // Fallback if the event screen is showing without state.
        Container::new(Text::new(app.i18n.tr("error-event-data")))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
