use serde::Deserialize;

use super::{CaptionTrack, VideoId};
use crate::TranscriptError;

/// Start of the caption data island in a watch page
const CAPTIONS_MARKER: &str = "\"captions\":";

/// First key after the caption data in a watch page
const VIDEO_DETAILS_MARKER: &str = ",\"videoDetails";

/// Present when the platform serves a captcha instead of the watch page
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

/// Present on every page for a video that exists
const PLAYABILITY_MARKER: &str = "\"playabilityStatus\":";

/// Why caption tracks could not be read from a watch page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// Captcha page served instead of the video
    Captcha,
    /// No playability status, the video does not exist or was removed
    VideoUnavailable,
    /// Page is a regular video page without caption data
    CaptionsMissing,
    /// Caption data found but it is not valid JSON
    Malformed(String),
    /// Caption data parsed but has no track list renderer
    NoTracklist,
}

impl ExtractionFailure {
    /// Map the failure onto the caller-facing error for `video_id`.
    ///
    /// `Malformed` and `NoTracklist` both surface as disabled transcripts.
    pub fn into_error(self, video_id: &VideoId) -> TranscriptError {
        let video_id = video_id.to_string();
        match self {
            ExtractionFailure::Captcha => TranscriptError::TooManyRequests,
            ExtractionFailure::VideoUnavailable => TranscriptError::VideoUnavailable { video_id },
            ExtractionFailure::CaptionsMissing
            | ExtractionFailure::Malformed(_)
            | ExtractionFailure::NoTracklist => TranscriptError::TranscriptsDisabled { video_id },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CaptionsIsland {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<Tracklist>,
}

#[derive(Debug, Deserialize)]
struct Tracklist {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

/// Read the ordered caption track list embedded in a watch page.
///
/// The island is cut out by text markers since the page gives it no boundaries of its
/// own. An empty list is a successful extraction.
pub fn extract_captions_json(page_body: &str) -> Result<Vec<CaptionTrack>, ExtractionFailure> {
    let Some((_, after_marker)) = page_body.split_once(CAPTIONS_MARKER) else {
        if page_body.contains(RECAPTCHA_MARKER) {
            return Err(ExtractionFailure::Captcha);
        }
        if !page_body.contains(PLAYABILITY_MARKER) {
            return Err(ExtractionFailure::VideoUnavailable);
        }
        return Err(ExtractionFailure::CaptionsMissing);
    };

    let island = after_marker
        .split(VIDEO_DETAILS_MARKER)
        .next()
        .unwrap_or_default()
        .replace('\n', "");

    let captions: Option<CaptionsIsland> = serde_json::from_str(&island)
        .map_err(|e| ExtractionFailure::Malformed(e.to_string()))?;

    let tracklist = captions
        .and_then(|captions| captions.tracklist)
        .ok_or(ExtractionFailure::NoTracklist)?;

    Ok(tracklist.caption_tracks.unwrap_or_default())
}

/// Pick the caption track for `lang`.
///
/// Without a language the first listed track is used. A language must match a track's
/// code exactly, case included.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    lang: Option<&str>,
    video_id: &VideoId,
) -> Result<&'a CaptionTrack, TranscriptError> {
    let Some(first) = tracks.first() else {
        return Err(TranscriptError::TranscriptsNotAvailable {
            video_id: video_id.to_string(),
        });
    };

    let Some(lang) = lang else {
        return Ok(first);
    };

    tracks
        .iter()
        .find(|track| track.language_code == lang)
        .ok_or_else(|| TranscriptError::LanguageNotAvailable {
            lang: lang.to_string(),
            available_langs: tracks.iter().map(|t| t.language_code.clone()).collect(),
            video_id: video_id.to_string(),
        })
}
