use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of contribution being uploaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Text,
    Audio,
    Video,
}

impl MediaType {
    /// Derive the media type from a MIME type: `audio/*`, `video/*`, otherwise text.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("audio/") {
            MediaType::Audio
        } else if mime.starts_with("video/") {
            MediaType::Video
        } else {
            MediaType::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Text => "text",
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MediaType::Text),
            "audio" => Ok(MediaType::Audio),
            "video" => Ok(MediaType::Video),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid media type '{}'. Must be: text, audio, or video",
                s
            ))),
        }
    }
}

/// Who holds the rights to the contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseRights {
    /// The uploader created the content.
    #[default]
    Creator,
    /// The uploader is passing on content from family or a friend.
    FamilyOrFriend,
}

impl ReleaseRights {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseRights::Creator => "creator",
            ReleaseRights::FamilyOrFriend => "family_or_friend",
        }
    }
}

impl fmt::Display for ReleaseRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseRights {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(ReleaseRights::Creator),
            "family_or_friend" => Ok(ReleaseRights::FamilyOrFriend),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid release rights '{}'. Must be: creator or family_or_friend",
                s
            ))),
        }
    }
}

/// Best-effort MIME type from a file extension.
///
/// Unknown or missing extensions map to `application/octet-stream`, which
/// [`MediaType::from_mime`] treats as text.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Text
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "opus" => "audio/opus",
        "amr" => "audio/amr",
        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        "3gp" => "video/3gpp",
        _ => "application/octet-stream",
    }
}
