// SPDX-License-Identifier: MPL-2.0
//! "Page not found" view, shown when an event slug resolves to nothing.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy)]
pub enum Message {
    HomeRequested,
}

pub fn view(i18n: &I18n) -> Element<'_, Message> {
    let wordmark = Text::new(i18n.tr("home-title"))
        .size(typography::TITLE_LG)
        .color(palette::PRIMARY_500);

    let title = Text::new(i18n.tr("not-found-title")).size(typography::TITLE_LG);

    let home_link = button(
        Text::new(i18n.tr("not-found-home"))
            .size(typography::BODY_LG)
            .color(palette::PRIMARY_500),
    )
    .style(styles::button::link)
    .on_press(Message::HomeRequested);

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(wordmark)
        .push(title)
        .push(home_link);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
