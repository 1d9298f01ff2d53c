use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{Client, Proxy, RequestBuilder};
use std::time::Duration;

use super::{
    extract_captions_json, select_track, CaptionTrack, ExtractionFailure, FetchOptions,
    TranscriptPayload, TranscriptSource, VideoId,
};
use crate::config::HttpConfig;
use crate::utils::redact_url_credentials;
use crate::TranscriptError;

/// Browser user agent sent with every request so the full watch page is served
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36,gzip(gfe)";

pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// Appended to a track's base URL to get the JSON rendering of the captions
const TIMED_TEXT_PARAMS: &str = "&fmt=json3&xorb=2&xobt=3&xovt=3";

/// YouTube transcript fetcher scraping the watch page for caption tracks
pub struct YoutubeTranscriptFetcher {
    client: Client,
    base_url: String,
}

impl YoutubeTranscriptFetcher {
    /// Build a fetcher whose requests all go through the configured proxy, if any
    pub fn new(config: &HttpConfig) -> crate::Result<Self> {
        let builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs));

        // Without a configured proxy, connect directly even if proxy variables are set
        let builder = match &config.proxy_url {
            Some(proxy_url) => {
                let proxy = Proxy::all(proxy_url).with_context(|| {
                    format!("Invalid proxy URL: {}", redact_url_credentials(proxy_url))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
        })
    }

    /// Point the fetcher at another host serving watch pages
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch the timed-text transcript for a video id or URL
    pub async fn fetch(
        &self,
        input: &str,
        options: &FetchOptions,
    ) -> Result<TranscriptPayload, TranscriptError> {
        let video_id = VideoId::resolve(input)?;
        let lang = options.requested_language();

        let page = self.fetch_video_page(&video_id, lang).await?;

        let tracks = extract_captions_json(&page).map_err(|failure| {
            if let ExtractionFailure::Malformed(reason) = &failure {
                tracing::debug!("Caption data for {} is not valid JSON: {}", video_id, reason);
            }
            failure.into_error(&video_id)
        })?;

        let track = select_track(&tracks, lang, &video_id)?;
        tracing::debug!(
            "Selected {} caption track ({}) for {}",
            track.language_code,
            track.kind.as_deref().unwrap_or("manual"),
            video_id
        );

        self.fetch_timed_text(track, &video_id, lang).await
    }

    fn get(&self, url: &str, lang: Option<&str>) -> RequestBuilder {
        let request = self.client.get(url);
        match lang {
            Some(lang) => request.header(ACCEPT_LANGUAGE, lang),
            None => request,
        }
    }

    /// Download the watch page HTML
    async fn fetch_video_page(
        &self,
        video_id: &VideoId,
        lang: Option<&str>,
    ) -> Result<String, TranscriptError> {
        let url = format!(
            "{}/watch?v={}",
            self.base_url,
            urlencoding::encode(video_id.as_str())
        );
        tracing::debug!("Fetching video page: {}", url);

        let body = self.get(&url, lang).send().await?.text().await?;
        Ok(body)
    }

    /// Download and parse the JSON transcript of the selected track
    async fn fetch_timed_text(
        &self,
        track: &CaptionTrack,
        video_id: &VideoId,
        lang: Option<&str>,
    ) -> Result<TranscriptPayload, TranscriptError> {
        let url = format!("{}{}", track.base_url, TIMED_TEXT_PARAMS);

        let response = self.get(&url, lang).send().await?;
        if !response.status().is_success() {
            tracing::warn!(
                "Timed-text request for {} returned HTTP {}",
                video_id,
                response.status()
            );
            return Err(TranscriptError::TranscriptsNotAvailable {
                video_id: video_id.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptFetcher {
    async fn fetch_transcript(
        &self,
        input: &str,
        options: &FetchOptions,
    ) -> Result<TranscriptPayload, TranscriptError> {
        self.fetch(input, options).await
    }

    fn platform_name(&self) -> &'static str {
        "YouTube"
    }
}
