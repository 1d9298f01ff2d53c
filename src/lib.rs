//! YouTube Transcript API - fetch caption transcripts for YouTube videos
//!
//! This library resolves video identifiers, scrapes the caption track list embedded in
//! the watch page and relays the timed-text JSON document for the selected track. The
//! `server` module exposes the pipeline over HTTP.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod server;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{
    CaptionTrack, FetchOptions, TranscriptPayload, TranscriptSource, VideoId,
    YoutubeTranscriptFetcher,
};

/// Result type used by application plumbing (config, CLI, server startup)
pub type Result<T> = anyhow::Result<T>;

/// Failures of a transcript fetch.
///
/// The first six variants are conditions reported by the platform itself. `Http` and
/// `InvalidPayload` are unclassified failures that callers should treat as internal errors.
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Impossible to retrieve Youtube video ID.")]
    InvalidIdentifier { input: String },

    #[error("YouTube is receiving too many requests from this IP and now requires solving a captcha to continue")]
    TooManyRequests,

    #[error("The video is no longer available ({video_id})")]
    VideoUnavailable { video_id: String },

    #[error("Transcript is disabled on this video ({video_id})")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcripts are available for this video ({video_id})")]
    TranscriptsNotAvailable { video_id: String },

    #[error(
        "No transcripts are available in {lang} this video ({video_id}). Available languages: {}",
        available_langs.join(", ")
    )]
    LanguageNotAvailable {
        lang: String,
        available_langs: Vec<String>,
        video_id: String,
    },

    #[error("Request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcript payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl TranscriptError {
    /// Whether this error is one of the platform-reported conditions rather than an
    /// unexpected transport or decoding failure
    pub fn is_classified(&self) -> bool {
        !matches!(
            self,
            TranscriptError::Http(_) | TranscriptError::InvalidPayload(_)
        )
    }
}
