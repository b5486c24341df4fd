//! Video identifier extraction.
//!
//! Accepts the three URL shapes users paste in practice:
//!
//! | Form | Example |
//! |------|---------|
//! | query parameter | `https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42` |
//! | short link | `https://youtu.be/dQw4w9WgXcQ` |
//! | embed path | `https://www.youtube.com/embed/dQw4w9WgXcQ` |
//!
//! The identifier is the first run of exactly 11 characters from
//! `[A-Za-z0-9_-]` that directly follows `v=`, `.be/`, or `embed/`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PipelineError;
use crate::models::VideoReference;

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|\.be/|embed/)([A-Za-z0-9_-]{11})").unwrap());

/// Extract the video identifier from `url`.
///
/// Pure; never touches the network.
///
/// # Errors
///
/// [`PipelineError::InvalidReference`] when no marker followed by an
/// 11-character identifier occurs anywhere in the input.
pub fn extract_id(url: &str) -> Result<VideoReference, PipelineError> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoReference(m.as_str().to_string()))
        .ok_or_else(|| PipelineError::InvalidReference {
            url: url.to_string(),
        })
}

impl FromStr for VideoReference {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        extract_id(s)
    }
}
