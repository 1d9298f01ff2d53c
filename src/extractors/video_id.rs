use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::TranscriptError;

/// Length of a canonical YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

/// URL prefixes that are directly followed by a video id.
///
/// Adding a shape here is enough for `VideoId::resolve` to accept it.
const URL_SHAPES: &[&str] = &[
    // youtube.com/<section>/<anything>/ID, e.g. legacy user and playlist paths
    r"youtube\.com/[^/]+/.+/",
    // youtube.com/v/ID, youtube.com/e/ID and youtube.com/embed/ID
    r"youtube\.com/(?:v|e(?:mbed)?)/",
    // youtube.com/watch?v=ID and any query carrying v=ID
    r"youtube\.com/.*[?&]v=",
    // youtu.be/ID
    r"youtu\.be/",
];

/// Compile the URL shapes once into a single alternation
static VIDEO_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)(?:{})([A-Za-z0-9_-]{{{}}})",
        URL_SHAPES.join("|"),
        VIDEO_ID_LEN
    );
    Regex::new(&pattern).expect("Failed to compile YouTube URL regex")
});

/// Canonical YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a raw id or a YouTube URL into a video id.
    ///
    /// Any input of exactly eleven characters is taken as an id without looking at its
    /// content.
    pub fn resolve(input: &str) -> Result<Self, TranscriptError> {
        if input.chars().count() == VIDEO_ID_LEN {
            return Ok(Self(input.to_string()));
        }

        VIDEO_URL_REGEX
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|id| Self(id.as_str().to_string()))
            .ok_or_else(|| TranscriptError::InvalidIdentifier {
                input: input.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
