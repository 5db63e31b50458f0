// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the hosted content store's query API.
//!
//! Queries are GROQ strings sent as URL parameters against
//! `https://<project>.<host>/v<version>/data/query/<dataset>`; responses come
//! back wrapped in a `{"result": ...}` envelope.

use crate::config::{Config, DEFAULT_ARCHIVE_LIMIT};
use crate::content::document::{EventDetail, EventSummary};
use crate::error::Result;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Archive listing: newest first, only events with a routable slug.
const EVENTS_QUERY: &str = r#"*[
  _type == "event"
  && defined(slug.current)
]|order(eventDate desc)[0...$limit]{
  _id,
  title,
  slug,
  eventName,
  eventLineup,
  location,
  eventDate,
  flyer[]{
    _key,
    asset->{
      _id,
      url,
      metadata { dimensions { width, height } }
    },
    hotspot,
    crop
  }
}"#;

/// Single event by slug, including the full gallery image list.
const EVENT_BY_SLUG_QUERY: &str = r#"*[_type == "event" && slug.current == $slug][0]{
  _id,
  title,
  slug,
  eventName,
  eventLineup,
  location,
  eventDate,
  eventImages[]{
    _key,
    asset->{
      _id,
      url,
      metadata { dimensions { width, height } }
    },
    hotspot,
    crop
  },
  flyer[]{
    _key,
    asset->{
      _id,
      url,
      metadata { dimensions { width, height } }
    },
    hotspot,
    crop
  }
}"#;

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Shared, cloneable client for the content store's query endpoint.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    query_base: String,
}

impl ContentClient {
    pub fn new(config: &Config) -> Self {
        let host = if config.use_cdn() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        let query_base = format!(
            "https://{project}.{host}/v{version}/data/query/{dataset}",
            project = config.project_id(),
            version = config.api_version(),
            dataset = config.dataset(),
        );

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http, query_base }
    }

    /// The underlying HTTP client, reused for image fetches so the whole
    /// application shares one connection pool.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches the archive listing.
    pub async fn fetch_events(&self) -> Result<Vec<EventSummary>> {
        let params = [("$limit", DEFAULT_ARCHIVE_LIMIT.to_string())];
        let events: Vec<EventSummary> = self.query(EVENTS_QUERY, &params).await?;
        tracing::info!(count = events.len(), "fetched archive listing");
        Ok(events)
    }

    /// Fetches one event by slug. `None` means the slug is unknown, which the
    /// caller surfaces as a not-found view rather than an error.
    pub async fn fetch_event(&self, slug: &str) -> Result<Option<EventDetail>> {
        let params = [("$slug", format!("\"{slug}\""))];
        let event: Option<EventDetail> = self.query(EVENT_BY_SLUG_QUERY, &params).await?;
        tracing::info!(slug, found = event.is_some(), "fetched event document");
        Ok(event)
    }

    async fn query<T: DeserializeOwned>(&self, groq: &str, params: &[(&str, String)]) -> Result<T> {
        let mut url = format!(
            "{}?query={}",
            self.query_base,
            utf8_percent_encode(groq, NON_ALPHANUMERIC)
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(&utf8_percent_encode(name, NON_ALPHANUMERIC).to_string());
            url.push('=');
            url.push_str(&utf8_percent_encode(value, NON_ALPHANUMERIC).to_string());
        }

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::EventSummary;

    #[test]
    fn client_builds_cdn_query_base_from_defaults() {
        let config = Config::default();
        let client = ContentClient::new(&config);
        assert_eq!(
            client.query_base,
            "https://mb06vmiz.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn client_honors_non_cdn_and_overrides() {
        let config: Config = toml::from_str(
            "[content]\nproject_id = \"zzz\"\ndataset = \"staging\"\nuse_cdn = false\n",
        )
        .expect("config should parse");
        let client = ContentClient::new(&config);
        assert_eq!(
            client.query_base,
            "https://zzz.api.sanity.io/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn envelope_unwraps_result_field() {
        let json = r#"{"result": [{"_id": "e1", "slug": {"current": "a"}}]}"#;
        let envelope: QueryResponse<Vec<EventSummary>> =
            serde_json::from_str(json).expect("envelope should deserialize");
        assert_eq!(envelope.result.len(), 1);
        assert_eq!(envelope.result[0].slug(), "a");
    }

    #[test]
    fn missing_event_decodes_as_none() {
        let json = r#"{"result": null}"#;
        let envelope: QueryResponse<Option<EventDetail>> =
            serde_json::from_str(json).expect("envelope should deserialize");
        assert!(envelope.result.is_none());
    }

    #[test]
    fn queries_project_the_image_asset_shape() {
        for query in [EVENTS_QUERY, EVENT_BY_SLUG_QUERY] {
            assert!(query.contains("asset->"));
            assert!(query.contains("metadata { dimensions { width, height } }"));
        }
        assert!(EVENT_BY_SLUG_QUERY.contains("eventImages"));
        assert!(EVENTS_QUERY.contains("order(eventDate desc)"));
    }
}
