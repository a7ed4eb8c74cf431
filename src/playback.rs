//! Result playback: which media each half of the split screen shows, and the
//! shared play/pause and mute controls.
//!
//! egui has no video element, so a slot is a URI plus its control state;
//! "Open" hands the URI to the platform player.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;
use url::Url;

use crate::catalog::SIMULATED_CLOUD_DOWNLOAD_URL;
use crate::error::PlaybackError;
use crate::model::{MediaFile, ResultRecord, UserSource};

/// A `file://` reference to a local upload, released on drop
#[derive(Debug, PartialEq, Eq)]
pub struct LocalMediaRef {
    path: PathBuf,
    uri: String,
}

impl LocalMediaRef {
    pub fn new(file: &MediaFile) -> Self {
        let uri = Url::from_file_path(&file.path)
            .map(String::from)
            .unwrap_or_else(|_| file.path.display().to_string());
        debug!(%uri, "created local media reference");
        Self {
            path: file.path.clone(),
            uri,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for LocalMediaRef {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "released local media reference");
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MediaSrc {
    Remote(String),
    Local(LocalMediaRef),
}

impl MediaSrc {
    pub fn uri(&self) -> &str {
        match self {
            MediaSrc::Remote(url) => url,
            MediaSrc::Local(local) => local.uri(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, MediaSrc::Local(_))
    }
}

/// One half of the split screen
#[derive(Debug)]
pub struct VideoSlot {
    pub src: MediaSrc,
    pub playing: bool,
    pub muted: bool,
}

/// Badge over the top half; reflects only how the source was provided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceBadge {
    LocalUpload,
    CloudDownload,
}

impl SourceBadge {
    pub fn label(self) -> &'static str {
        match self {
            SourceBadge::LocalUpload => "LOCAL UPLOAD",
            SourceBadge::CloudDownload => "CLOUD DOWNLOAD",
        }
    }
}

#[derive(Debug)]
pub struct PlaybackView {
    pub top: VideoSlot,
    pub bottom: VideoSlot,
    pub badge: SourceBadge,
}

impl PlaybackView {
    /// Resolves both halves for `result`. Both start playing; the bottom is always muted.
    pub fn new(result: &ResultRecord) -> Self {
        let (top_src, badge) = match &result.source {
            UserSource::File(file) => (MediaSrc::Local(LocalMediaRef::new(file)), SourceBadge::LocalUpload),
            // a pasted link is never fetched; show the stand-in download
            UserSource::Url(_) => (
                MediaSrc::Remote(SIMULATED_CLOUD_DOWNLOAD_URL.to_string()),
                SourceBadge::CloudDownload,
            ),
        };
        Self {
            top: VideoSlot {
                src: top_src,
                playing: true,
                muted: false,
            },
            bottom: VideoSlot {
                src: MediaSrc::Remote(result.template_video_url.clone()),
                playing: true,
                muted: true,
            },
            badge,
        }
    }

    /// Plays or pauses both halves together, keyed off the top half.
    pub fn toggle_play(&mut self) {
        let play = !self.top.playing;
        self.top.playing = play;
        self.bottom.playing = play;
    }

    /// Mutes or unmutes the top half only.
    pub fn toggle_mute(&mut self) {
        self.top.muted = !self.top.muted;
    }

    /// Replaces the template placeholder with a local file.
    pub fn override_template(&mut self, file: &MediaFile) {
        self.bottom.src = MediaSrc::Local(LocalMediaRef::new(file));
    }

    /// Replaces the template with a remote URI, e.g. a generated background.
    pub fn set_template_uri(&mut self, uri: String) {
        self.bottom.src = MediaSrc::Remote(uri);
    }
}

/// Last path segment of the template URL, shown in the demo note.
pub fn template_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Text on the template override button.
pub fn override_button_label(caption: &str) -> &'static str {
    if caption.contains("Minecraft") {
        "Upload Real Minecraft File"
    } else {
        "Upload Real Template File"
    }
}

/// Hands `uri` to the platform's default opener.
pub fn open_in_system_player(uri: &str) -> Result<(), PlaybackError> {
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(target_os = "macos")]
    let mut cmd = Command::new("open");
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut cmd = Command::new("xdg-open");

    cmd.arg(uri).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TEMPLATES;

    fn record(source: UserSource) -> ResultRecord {
        ResultRecord {
            source,
            template_video_url: TEMPLATES[0].video_url.to_string(),
            caption: "WAIT FOR IT... 😱".into(),
            hashtags: vec!["#shorts".into()],
        }
    }

    #[test]
    fn pasted_link_shows_cloud_placeholder() {
        let view = PlaybackView::new(&record(UserSource::Url("https://youtu.be/zzz".into())));
        assert_eq!(view.badge.label(), "CLOUD DOWNLOAD");
        assert_eq!(view.top.src.uri(), SIMULATED_CLOUD_DOWNLOAD_URL);
        assert_eq!(view.bottom.src.uri(), TEMPLATES[0].video_url);
    }

    #[test]
    fn uploaded_file_gets_local_reference() {
        let file = MediaFile::from_path("/home/me/Videos/my clip.mp4");
        let view = PlaybackView::new(&record(UserSource::File(file)));
        assert_eq!(view.badge, SourceBadge::LocalUpload);
        assert!(view.top.src.is_local());
        assert_eq!(view.top.src.uri(), "file:///home/me/Videos/my%20clip.mp4");
    }

    #[test]
    fn play_pause_keeps_halves_in_sync() {
        let mut view = PlaybackView::new(&record(UserSource::Url("x".into())));
        assert!(view.top.playing && view.bottom.playing);
        view.toggle_play();
        assert!(!view.top.playing && !view.bottom.playing);
        view.toggle_play();
        assert!(view.top.playing && view.bottom.playing);
    }

    #[test]
    fn mute_only_touches_top() {
        let mut view = PlaybackView::new(&record(UserSource::Url("x".into())));
        assert!(!view.top.muted);
        assert!(view.bottom.muted);
        view.toggle_mute();
        assert!(view.top.muted);
        view.toggle_mute();
        assert!(!view.top.muted);
        assert!(view.bottom.muted);
    }

    #[test]
    fn template_override_swaps_bottom_only() {
        let mut view = PlaybackView::new(&record(UserSource::Url("x".into())));
        view.override_template(&MediaFile::from_path("/tmp/parkour.mp4"));
        assert_eq!(view.bottom.src.uri(), "file:///tmp/parkour.mp4");
        assert_eq!(view.top.src.uri(), SIMULATED_CLOUD_DOWNLOAD_URL);

        view.set_template_uri("https://cdn.example/bg.mp4?alt=media&key=k".into());
        assert!(!view.bottom.src.is_local());
    }

    #[test]
    fn labels() {
        assert_eq!(template_file_name(TEMPLATES[1].video_url), "ForBiggerBlazes.mp4");
        assert_eq!(override_button_label("Minecraft madness"), "Upload Real Minecraft File");
        assert_eq!(override_button_label("WAIT FOR IT... 😱"), "Upload Real Template File");
    }
}
