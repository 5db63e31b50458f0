// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for the full-screen modal viewer.

use crate::ui::design_tokens::{
    opacity,
    palette::{PRIMARY_500, WHITE},
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// The modal backdrop wash behind the current image. The page is dimmed
/// with the brand pink rather than black.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..PRIMARY_500
        })),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Generic style for overlay indicators like the position counter.
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..Color::BLACK
        })),
        text_color: Some(WHITE),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: rad.into(),
        },
        ..Default::default()
    }
}
