// SPDX-License-Identifier: MPL-2.0
//! Home screen: wordmark and entry point into the archive.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy)]
pub enum Message {
    ArchiveRequested,
}

/// Renders the home screen.
pub fn view(i18n: &I18n) -> Element<'_, Message> {
    let wordmark = Text::new(i18n.tr("home-title"))
        .size(typography::TITLE_LG * 2.0)
        .color(palette::PRIMARY_500);

    let tagline = Text::new(i18n.tr("home-tagline"))
        .size(typography::BODY_LG)
        .color(palette::GRAY_400);

    let button_content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(icons::sized(icons::picture(), sizing::ICON_SM))
        .push(Text::new(i18n.tr("home-archive-button")));

    let archive_button = button(button_content)
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(Message::ArchiveRequested);

    let content = Column::new()
        .spacing(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .push(wordmark)
        .push(tagline)
        .push(archive_button);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
