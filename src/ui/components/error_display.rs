// SPDX-License-Identifier: MPL-2.0
//! Inline error banner for failed content fetches.
//!
//! Upstream fetch failures are surfaced as a simple message on the calling
//! screen; they are not retried automatically.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{Column, Container, Text};
use iced::{Element, Length};

/// Friendly, localized description of an error.
pub fn friendly_text(i18n: &I18n, error: &Error) -> String {
    match error {
        Error::Http(fetch) => i18n.tr(fetch.i18n_key()),
        _ => i18n.tr("error-fetch-general"),
    }
}

/// Renders the banner. The technical detail line keeps the raw error for
/// bug reports; the headline stays friendly.
pub fn banner<'a, M: 'a>(i18n: &I18n, error: &Error) -> Element<'a, M> {
    let headline = Text::new(friendly_text(i18n, error)).size(typography::BODY_LG);
    let details = Text::new(error.to_string()).size(typography::CAPTION);

    Container::new(
        Column::new()
            .spacing(spacing::XXS)
            .push(headline)
            .push(details),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::error_banner)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn http_errors_use_the_categorized_key() {
        let i18n = I18n::default();
        let text = friendly_text(&i18n, &Error::Http(FetchError::Timeout));
        assert_eq!(text, i18n.tr("error-fetch-timeout"));
    }

    #[test]
    fn other_errors_fall_back_to_the_generic_key() {
        let i18n = I18n::default();
        let text = friendly_text(&i18n, &Error::Content("bad".into()));
        assert_eq!(text, i18n.tr("error-fetch-general"));
    }
}
