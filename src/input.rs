//! Input collector: pasted link or local video file.

use tracing::{debug, warn};

use crate::error::InputRejection;
use crate::model::{MediaFile, UserSource};

/// Extensions offered by the file picker
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "webm", "mkv", "avi", "ogv", "mpeg", "mpg", "3gp", "flv", "wmv", "ts", "m2ts",
];

const VIDEO_MIME_PREFIX: &str = "video/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputTab {
    #[default]
    Link,
    Upload,
}

/// State behind the input card
#[derive(Debug, Default)]
pub struct InputCollector {
    pub tab: InputTab,
    /// Text field contents in link mode
    pub url: String,
    /// A file is hovering over the window
    pub drag_active: bool,
}

impl InputCollector {
    /// The trimmed link, or `None` when the field is blank.
    pub fn submit_url(&self) -> Option<UserSource> {
        let trimmed = self.url.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(UserSource::Url(trimmed.to_string()))
    }

    /// File chosen through the picker dialog.
    ///
    /// Unlike [`drop_file`](Self::drop_file) this does not check the media
    /// type; the dialog's extension filter is the only guard.
    pub fn pick_file(&mut self, file: MediaFile) -> UserSource {
        debug!(name = %file.name, mime = %file.mime, "picked file accepted without type check");
        UserSource::File(file)
    }

    /// File dropped onto the window; only `video/*` is accepted.
    pub fn drop_file(&mut self, file: MediaFile) -> Result<UserSource, InputRejection> {
        self.drag_active = false;
        if file.mime.starts_with(VIDEO_MIME_PREFIX) {
            Ok(UserSource::File(file))
        } else {
            warn!(name = %file.name, mime = %file.mime, "rejected non-video drop");
            Err(InputRejection::NotAVideo {
                name: file.name,
                mime: file.mime,
            })
        }
    }
}

/// Converts an egui drop into a file handle, preferring the backend's media
/// type and falling back to the extension.
pub fn media_from_drop(dropped: &eframe::egui::DroppedFile) -> Option<MediaFile> {
    let path = dropped.path.clone()?;
    let mut file = MediaFile::from_path(path);
    if !dropped.mime.is_empty() {
        file.mime = dropped.mime.clone();
    }
    if !dropped.name.is_empty() {
        file.name = dropped.name.clone();
    }
    Some(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, mime: &str) -> MediaFile {
        MediaFile {
            name: name.into(),
            path: PathBuf::from("/tmp").join(name),
            mime: mime.into(),
        }
    }

    #[test]
    fn url_is_trimmed() {
        for raw in ["https://youtu.be/abc", "  https://youtu.be/abc\t", "\nnot even a url  "] {
            let input = InputCollector { url: raw.into(), ..Default::default() };
            assert_eq!(input.submit_url(), Some(UserSource::Url(raw.trim().to_string())));
        }
    }

    #[test]
    fn blank_url_is_ignored() {
        for raw in ["", "   ", "\t\n"] {
            let input = InputCollector { url: raw.into(), ..Default::default() };
            assert_eq!(input.submit_url(), None);
        }
    }

    #[test]
    fn video_drop_is_accepted() {
        let mut input = InputCollector { drag_active: true, ..Default::default() };
        let f = file("clip.mp4", "video/mp4");
        assert_eq!(input.drop_file(f.clone()), Ok(UserSource::File(f)));
        assert!(!input.drag_active);
    }

    #[test]
    fn non_video_drop_is_rejected_with_its_type() {
        for (name, mime) in [("photo.png", "image/png"), ("notes", ""), ("song.mp3", "audio/mpeg")] {
            let mut input = InputCollector { drag_active: true, ..Default::default() };
            assert_eq!(
                input.drop_file(file(name, mime)),
                Err(InputRejection::NotAVideo {
                    name: name.into(),
                    mime: mime.into(),
                })
            );
            assert!(!input.drag_active, "{name}");
        }
    }

    #[test]
    fn less_common_containers_pass_the_drop_check() {
        let mut input = InputCollector::default();
        for name in ["old.mpg", "phone.3gp", "stream.flv", "cam.wmv", "broadcast.ts"] {
            let f = MediaFile::from_path(PathBuf::from("/tmp").join(name));
            assert_eq!(input.drop_file(f.clone()), Ok(UserSource::File(f)), "{name}");
        }
    }

    #[test]
    fn picked_file_skips_type_check() {
        let mut input = InputCollector::default();
        let f = file("readme.txt", "text/plain");
        assert_eq!(input.pick_file(f.clone()), UserSource::File(f));
    }
}
