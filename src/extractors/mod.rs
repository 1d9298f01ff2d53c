use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod captions;
pub mod video_id;
pub mod youtube;

pub use captions::{extract_captions_json, select_track, ExtractionFailure};
pub use video_id::VideoId;
pub use youtube::YoutubeTranscriptFetcher;

use crate::TranscriptError;

/// Language value that asks for the platform's first-listed caption track
pub const DEFAULT_LANGUAGE: &str = "default";

/// Timed-text document exactly as delivered by the platform
pub type TranscriptPayload = serde_json::Value;

/// Options for a single transcript fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Language code of the caption track to fetch
    pub lang: Option<String>,
}

impl FetchOptions {
    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
        }
    }

    /// The explicitly requested language, or `None` when the default track should be used.
    ///
    /// An empty value and the `"default"` sentinel both count as no request.
    pub fn requested_language(&self) -> Option<&str> {
        self.lang
            .as_deref()
            .filter(|lang| !lang.is_empty() && *lang != DEFAULT_LANGUAGE)
    }

    /// Language label echoed back to callers
    pub fn display_language(&self) -> &str {
        self.lang
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// One caption stream listed on a video page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    #[serde(default)]
    pub language_code: String,

    #[serde(default)]
    pub base_url: String,

    /// Track kind, `"asr"` for auto-generated captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Something that can produce transcripts for a caller-supplied video reference
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video id or URL
    async fn fetch_transcript(
        &self,
        input: &str,
        options: &FetchOptions,
    ) -> Result<TranscriptPayload, TranscriptError>;

    /// Get the name of the platform served by this source
    fn platform_name(&self) -> &'static str;
}
