use rand::Rng;

use crate::catalog::{FIXED_HASHTAGS, VIRAL_CAPTIONS};
use crate::model::{ResultRecord, TemplateEntry, UserSource};

/// Chooses an index in `0..len`; `len` is never zero.
pub trait CaptionPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default)]
pub struct RandomPicker;

impl CaptionPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// The four fixed tags followed by `#<category>`.
pub fn hashtags_for(template: &TemplateEntry) -> Vec<String> {
    FIXED_HASHTAGS
        .iter()
        .map(|t| t.to_string())
        .chain(std::iter::once(format!("#{}", template.category)))
        .collect()
}

/// Packages the finished run for display.
pub fn compose<P: CaptionPicker + ?Sized>(
    source: &UserSource,
    template: &TemplateEntry,
    picker: &mut P,
) -> ResultRecord {
    let idx = picker.pick(VIRAL_CAPTIONS.len()).min(VIRAL_CAPTIONS.len() - 1);
    ResultRecord {
        source: source.clone(),
        template_video_url: template.video_url.to_string(),
        caption: VIRAL_CAPTIONS[idx].to_string(),
        hashtags: hashtags_for(template),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::TEMPLATES;
    use crate::model::TemplateCategory;

    /// Always returns the same index.
    pub(crate) struct FixedPicker(pub usize);

    impl CaptionPicker for FixedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn gameplay_template_tags() {
        let template = &TEMPLATES[0];
        assert_eq!(template.category, TemplateCategory::Gameplay);
        assert_eq!(
            hashtags_for(template),
            ["#shorts", "#viral", "#fyp", "#satisfying", "#gameplay"]
        );
    }

    #[test]
    fn category_tag_follows_template() {
        let template = TemplateEntry {
            id: "slime",
            name: "Slime",
            video_url: "https://example.com/slime.mp4",
            thumbnail_url: "https://example.com/slime.jpg",
            category: TemplateCategory::AiGenerated,
            description: "",
        };
        let tags = hashtags_for(&template);
        assert_eq!(tags.last().map(String::as_str), Some("#ai-generated"));
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn compose_uses_picked_caption() {
        let source = UserSource::Url("https://youtu.be/abc".into());
        let record = compose(&source, &TEMPLATES[1], &mut FixedPicker(3));
        assert_eq!(record.caption, "WATCH UNTIL THE END ⚡");
        assert_eq!(record.source, source);
        assert_eq!(record.template_video_url, TEMPLATES[1].video_url);
    }

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomPicker;
        for _ in 0..200 {
            assert!(picker.pick(VIRAL_CAPTIONS.len()) < VIRAL_CAPTIONS.len());
        }
    }
}
