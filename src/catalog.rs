//! Static data: template catalog, placeholder media, captions and phases.
//!
//! The template URLs are placeholders for the real clips named in each
//! entry; a user can swap in the real file from the result screen.

use crate::model::{PhaseStatus, ProgressPhase, TemplateCategory, TemplateEntry};

pub static TEMPLATES: [TemplateEntry; 3] = [
    TemplateEntry {
        id: "minecraft-parkour",
        name: "Minecraft Parkour",
        video_url: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        thumbnail_url: "https://img.youtube.com/vi/QPW3XwBoQlw/maxresdefault.jpg",
        category: TemplateCategory::Gameplay,
        description: "High-speed parkour gameplay.",
    },
    TemplateEntry {
        id: "subway-surfers",
        name: "Subway Surfers",
        video_url: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        thumbnail_url: "https://img.youtube.com/vi/yuFwErfsnTM/maxresdefault.jpg",
        category: TemplateCategory::Gameplay,
        description: "Classic runner attention holder.",
    },
    TemplateEntry {
        id: "gta-ramps",
        name: "GTA V Ramps",
        video_url: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
        thumbnail_url: "https://img.youtube.com/vi/u7kdVe8q5zs/maxresdefault.jpg",
        category: TemplateCategory::Gameplay,
        description: "Satisfying car physics.",
    },
];

/// Stands in for the file a cloud backend would have downloaded from a pasted link.
pub const SIMULATED_CLOUD_DOWNLOAD_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4";

pub const VIRAL_CAPTIONS: [&str; 6] = [
    "WAIT FOR IT... 😱",
    "SATISFYING 🤤",
    "YOU WON'T BELIEVE THIS 🔥",
    "WATCH UNTIL THE END ⚡",
    "LEVEL 999 BOSS 🤯",
    "ODDLY SATISFYING ✨",
];

/// Leading hashtags on every result; the template category is appended after these.
pub const FIXED_HASHTAGS: [&str; 4] = ["#shorts", "#viral", "#fyp", "#satisfying"];

/// The four simulated phases, all waiting.
pub fn initial_phases() -> Vec<ProgressPhase> {
    [
        ("download_main", "Fetching Source Video..."),
        ("download_template", "Downloading Template (1080p)..."),
        ("stitching", "Stitching Split Screen..."),
        ("cleanup", "Deleting Source from Cloud..."),
    ]
    .into_iter()
    .map(|(id, label)| ProgressPhase {
        id,
        label,
        status: PhaseStatus::Waiting,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_three_unique_entries() {
        let ids: HashSet<_> = TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(TEMPLATES.iter().all(|t| t.video_url.ends_with(".mp4")));
    }

    #[test]
    fn initial_phases_are_waiting_and_ordered() {
        let phases = initial_phases();
        let ids: Vec<_> = phases.iter().map(|p| p.id).collect();
        assert_eq!(ids, ["download_main", "download_template", "stitching", "cleanup"]);
        assert!(phases.iter().all(|p| p.status == PhaseStatus::Waiting));
    }
}
