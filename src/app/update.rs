// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the main `update` function and the handlers that
//! turn component effects into application-level side effects (screen
//! switches, event fetches, downloads).

use super::{App, Message, Screen};
use crate::error::Result;
use crate::ui::archive;
use crate::ui::gallery_screen;
use crate::ui::home;
use crate::ui::not_found;
use iced::Task;
use std::path::PathBuf;

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Home(home::Message::ArchiveRequested) => {
            app.screen = Screen::Archive;
            Task::none()
        }
        Message::NotFound(not_found::Message::HomeRequested) => {
            app.screen = Screen::Home;
            Task::none()
        }
        Message::Archive(message) => handle_archive_message(app, message),
        Message::Gallery(message) => handle_gallery_message(app, message),
        Message::EventFetched { slug, result } => handle_event_fetched(app, slug, result),
        Message::DownloadTargetChosen { url, path } => match path {
            Some(path) => {
                let http = app.client.http().clone();
                Task::perform(
                    download_original(http, url, path),
                    Message::DownloadCompleted,
                )
            }
            None => Task::none(),
        },
        Message::DownloadCompleted(Ok(path)) => {
            tracing::info!(path = %path.display(), "saved original image");
            Task::none()
        }
        Message::DownloadCompleted(Err(error)) => {
            tracing::warn!(%error, "download failed");
            Task::none()
        }
    }
}

fn handle_archive_message(app: &mut App, message: archive::Message) -> Task<Message> {
    let resolver = app.resolver();
    let flyer_params = app.thumb_params();
    let (effect, task) =
        app.archive
            .handle_message(message, &app.client, &resolver, flyer_params);
    let task = task.map(Message::Archive);

    match effect {
        archive::Effect::None => task,
        archive::Effect::OpenEvent(slug) => {
            let fetch = app.fetch_event_task(slug);
            Task::batch([task, fetch])
        }
    }
}

fn handle_gallery_message(app: &mut App, message: gallery_screen::Message) -> Task<Message> {
    let Some(gallery) = app.gallery.as_mut() else {
        return Task::none();
    };

    let (effect, task) = gallery.handle_message(message);
    let task = task.map(Message::Gallery);

    match effect {
        gallery_screen::Effect::None => task,
        gallery_screen::Effect::Back => {
            // Dropping the screen state tears down its scroll guard.
            app.gallery = None;
            app.screen = Screen::Archive;
            task
        }
        gallery_screen::Effect::Download { url, file_name } => {
            let dialog = rfd::AsyncFileDialog::new().set_file_name(&file_name);
            let choose = Task::perform(
                async move { dialog.save_file().await.map(|h| h.path().to_path_buf()) },
                move |path| Message::DownloadTargetChosen {
                    url: url.clone(),
                    path,
                },
            );
            Task::batch([task, choose])
        }
    }
}

fn handle_event_fetched(
    app: &mut App,
    slug: String,
    result: Result<Option<crate::content::EventDetail>>,
) -> Task<Message> {
    // A stale response (the user already clicked elsewhere) is dropped.
    if app.pending_slug.as_deref() != Some(slug.as_str()) {
        return Task::none();
    }
    app.pending_slug = None;

    match result {
        Ok(Some(event)) => {
            let (gallery, task) = gallery_screen::State::new(
                event,
                Box::new(app.resolver()),
                app.thumb_params(),
                app.full_params(),
                app.prefetch_config(),
                app.client.http().clone(),
            );
            app.gallery = Some(gallery);
            app.screen = Screen::Event;
            task.map(Message::Gallery)
        }
        Ok(None) => {
            tracing::info!(%slug, "event not found");
            app.screen = Screen::NotFound;
            Task::none()
        }
        Err(error) => {
            tracing::warn!(%slug, %error, "event fetch failed");
            app.archive.set_error(error);
            app.screen = Screen::Archive;
            Task::none()
        }
    }
}

/// Fetches the original asset and writes it to the chosen path.
async fn download_original(
    client: reqwest::Client,
    url: String,
    path: PathBuf,
) -> Result<PathBuf> {
    let response = client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Flags;

    fn test_app() -> App {
        let temp = tempfile::tempdir().expect("temp dir");
        let (app, _task) = App::new(Flags {
            lang: Some("en-US".to_string()),
            config_dir: Some(temp.path().to_string_lossy().into_owned()),
            slug: None,
        });
        app
    }

    fn fetched_event(slug: &str) -> crate::content::EventDetail {
        serde_json::from_str(&format!(
            r#"{{
                "_id": "ev1",
                "title": "Night One",
                "slug": {{ "current": "{slug}" }},
                "eventLineup": ["DJ A"],
                "eventImages": [{{
                    "_key": "img0",
                    "asset": {{ "_id": "image-aa-10x10-jpg", "url": "https://x/a.jpg" }}
                }}]
            }}"#
        ))
        .expect("event fixture should parse")
    }

    #[test]
    fn home_navigation_switches_screens() {
        let mut app = test_app();
        let _ = update(&mut app, Message::Home(home::Message::ArchiveRequested));
        assert_eq!(app.screen, Screen::Archive);

        app.screen = Screen::NotFound;
        let _ = update(&mut app, Message::NotFound(not_found::Message::HomeRequested));
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn fetched_event_opens_gallery_screen() {
        let mut app = test_app();
        app.pending_slug = Some("night-one".to_string());

        let _ = update(
            &mut app,
            Message::EventFetched {
                slug: "night-one".to_string(),
                result: Ok(Some(fetched_event("night-one"))),
            },
        );

        assert_eq!(app.screen, Screen::Event);
        let gallery = app.gallery.as_ref().expect("gallery state");
        assert_eq!(gallery.slug(), "night-one");
    }

    #[test]
    fn unknown_slug_shows_not_found() {
        let mut app = test_app();
        app.pending_slug = Some("ghost".to_string());

        let _ = update(
            &mut app,
            Message::EventFetched {
                slug: "ghost".to_string(),
                result: Ok(None),
            },
        );

        assert_eq!(app.screen, Screen::NotFound);
        assert!(app.gallery.is_none());
    }

    #[test]
    fn stale_event_response_is_ignored() {
        let mut app = test_app();
        app.pending_slug = Some("newer-click".to_string());

        let _ = update(
            &mut app,
            Message::EventFetched {
                slug: "older-click".to_string(),
                result: Ok(Some(fetched_event("older-click"))),
            },
        );

        assert_eq!(app.screen, Screen::Home);
        assert!(app.gallery.is_none());
        assert_eq!(app.pending_slug.as_deref(), Some("newer-click"));
    }

    #[test]
    fn event_fetch_failure_returns_to_archive_with_error() {
        let mut app = test_app();
        app.pending_slug = Some("night-one".to_string());

        let _ = update(
            &mut app,
            Message::EventFetched {
                slug: "night-one".to_string(),
                result: Err(crate::error::Error::Content("boom".into())),
            },
        );

        assert_eq!(app.screen, Screen::Archive);
        assert!(app.gallery.is_none());
    }

    #[test]
    fn gallery_back_effect_returns_to_archive() {
        let mut app = test_app();
        app.pending_slug = Some("night-one".to_string());
        let _ = update(
            &mut app,
            Message::EventFetched {
                slug: "night-one".to_string(),
                result: Ok(Some(fetched_event("night-one"))),
            },
        );

        let _ = update(
            &mut app,
            Message::Gallery(gallery_screen::Message::BackPressed),
        );
        assert_eq!(app.screen, Screen::Archive);
        assert!(app.gallery.is_none());
    }
}
