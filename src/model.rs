use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Closed set of template categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateCategory {
    Gameplay,
    /// No catalog entry uses this yet; kept so hashtags cover the full set.
    #[cfg_attr(not(test), allow(dead_code))]
    Satisfying,
    /// No catalog entry uses this yet; kept so hashtags cover the full set.
    #[cfg_attr(not(test), allow(dead_code))]
    AiGenerated,
}

impl TemplateCategory {
    /// Slug used in hashtags and labels
    pub fn slug(self) -> &'static str {
        match self {
            TemplateCategory::Gameplay => "gameplay",
            TemplateCategory::Satisfying => "satisfying",
            TemplateCategory::AiGenerated => "ai-generated",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One "bottom" video in the static catalog
#[derive(Debug, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Unique identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Direct MP4 URL
    pub video_url: &'static str,
    /// Preview image for the picker card, fetched in the background
    pub thumbnail_url: &'static str,
    /// Last hashtag on every result made with this template
    pub category: TemplateCategory,
    /// One-line blurb under the card title
    pub description: &'static str,
}

/// A local file the user chose, either picked or dropped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    /// File name shown in the UI
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
    /// Media type, e.g. `video/mp4`; empty when unknown
    pub mime: String,
}

impl MediaFile {
    /// Builds a handle for `path`, guessing the media type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_from_path(&path).unwrap_or_default().to_string();
        Self { name, path, mime }
    }
}

/// Maps a file extension onto a media type.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "ogv" => "video/ogg",
        "mpeg" | "mpg" => "video/mpeg",
        "3gp" => "video/3gpp",
        "flv" => "video/x-flv",
        "wmv" => "video/x-ms-wmv",
        "ts" | "m2ts" => "video/mp2t",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

/// The "top" video: a pasted URL or a local file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserSource {
    Url(String),
    File(MediaFile),
}

impl UserSource {
    /// Short label for the input summary
    pub fn describe(&self) -> String {
        match self {
            UserSource::Url(url) => url.clone(),
            UserSource::File(file) => file.name.clone(),
        }
    }
}

/// Status of one simulated processing phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhaseStatus {
    Waiting,
    Active,
    Completed,
}

/// One labeled step of the fake processing run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressPhase {
    pub id: &'static str,
    pub label: &'static str,
    pub status: PhaseStatus,
}

/// Display data produced after the simulation completes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRecord {
    pub source: UserSource,
    pub template_video_url: String,
    pub caption: String,
    pub hashtags: Vec<String>,
}

/// Which screen is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Input,
    Downloading,
    /// Declared but never entered by the generate flow.
    #[allow(dead_code)]
    Processing,
    Result,
}

/// Caption and hashtags returned by the AI caption call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionMetadata {
    pub caption: String,
    pub hashtags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_slugs_match_catalog_values() {
        assert_eq!(TemplateCategory::Gameplay.to_string(), "gameplay");
        assert_eq!(TemplateCategory::Satisfying.to_string(), "satisfying");
        assert_eq!(TemplateCategory::AiGenerated.to_string(), "ai-generated");
    }

    #[test]
    fn media_file_guesses_type_from_extension() {
        let f = MediaFile::from_path("/tmp/clips/Jump.MP4");
        assert_eq!(f.name, "Jump.MP4");
        assert_eq!(f.mime, "video/mp4");

        let unknown = MediaFile::from_path("/tmp/notes.xyz");
        assert_eq!(unknown.mime, "");
    }

    #[test]
    fn older_video_containers_are_recognised() {
        for (name, mime) in [
            ("a.mpeg", "video/mpeg"),
            ("a.MPG", "video/mpeg"),
            ("a.3gp", "video/3gpp"),
            ("a.flv", "video/x-flv"),
            ("a.wmv", "video/x-ms-wmv"),
            ("a.ts", "video/mp2t"),
            ("a.m2ts", "video/mp2t"),
        ] {
            assert_eq!(mime_from_path(Path::new(name)), Some(mime), "{name}");
        }
    }

    #[test]
    fn phase_status_orders_forward() {
        assert!(PhaseStatus::Waiting < PhaseStatus::Active);
        assert!(PhaseStatus::Active < PhaseStatus::Completed);
    }
}
