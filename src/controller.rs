//! View-state controller.
//!
//! `Session` owns everything the screens render. Transitions are plain
//! methods so they can be driven directly in tests; the GUI splits
//! `generate` into `begin_generate` / `apply_phases` / `complete` because it
//! cannot hold the session across an await.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::catalog::initial_phases;
use crate::composer::{CaptionPicker, compose};
use crate::model::{CaptionMetadata, ProgressPhase, ResultRecord, TemplateEntry, UserSource, ViewState};
use crate::progress::{Clock, simulate};

/// Delay between a submitted source and the template catalog scrolling into view
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, PartialEq)]
pub struct Session {
    pub view: ViewState,
    pub source: Option<UserSource>,
    pub template: Option<&'static TemplateEntry>,
    pub result: Option<ResultRecord>,
    pub phases: Vec<ProgressPhase>,
    /// When the pending scroll to the catalog should fire
    scroll_due: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: ViewState::Input,
            source: None,
            template: None,
            result: None,
            phases: initial_phases(),
            scroll_due: None,
        }
    }
}

impl Session {
    /// Stores the source, replacing any earlier one, and schedules the catalog scroll.
    pub fn submit_input(&mut self, source: UserSource) {
        info!(source = %source.describe(), "source selected");
        self.source = Some(source);
        self.scroll_due = Some(Instant::now() + SCROLL_DELAY);
    }

    pub fn select_template(&mut self, template: &'static TemplateEntry) {
        info!(template = template.id, "template selected");
        self.template = Some(template);
    }

    pub fn can_generate(&self) -> bool {
        self.source.is_some() && self.template.is_some()
    }

    /// True once, when the scheduled scroll is due at `now`.
    pub fn take_due_scroll(&mut self, now: Instant) -> bool {
        match self.scroll_due {
            Some(due) if now >= due => {
                self.scroll_due = None;
                true
            }
            _ => false,
        }
    }

    /// Runs the whole generate flow; returns `false` without doing anything
    /// when the source or template is missing.
    ///
    /// The GUI drives the same steps through `begin_generate`, `apply_phases`
    /// and `complete` so it can keep painting between phases.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn generate<C, P>(&mut self, clock: &C, picker: &mut P) -> bool
    where
        C: Clock,
        P: CaptionPicker + ?Sized,
    {
        if !self.begin_generate() {
            return false;
        }
        simulate(clock, &mut self.phases, |_| {}).await;
        self.complete(picker)
    }

    /// Enters the downloading screen with fresh phases.
    pub fn begin_generate(&mut self) -> bool {
        if self.view != ViewState::Input || !self.can_generate() {
            return false;
        }
        info!("starting simulated processing");
        self.view = ViewState::Downloading;
        self.phases = initial_phases();
        true
    }

    /// Takes a phase snapshot streamed from a running simulation.
    pub fn apply_phases(&mut self, phases: Vec<ProgressPhase>) {
        if self.view == ViewState::Downloading {
            self.phases = phases;
        } else {
            debug!("dropping phase snapshot outside the downloading screen");
        }
    }

    /// Builds the result and switches to the result screen.
    pub fn complete<P: CaptionPicker + ?Sized>(&mut self, picker: &mut P) -> bool {
        if self.view != ViewState::Downloading {
            return false;
        }
        let (Some(source), Some(template)) = (&self.source, self.template) else {
            return false;
        };
        let record = compose(source, template, picker);
        info!(caption = %record.caption, "result ready");
        self.result = Some(record);
        self.view = ViewState::Result;
        true
    }

    /// Swaps AI-generated text into the current result.
    pub fn apply_caption_metadata(&mut self, meta: CaptionMetadata) {
        if let Some(result) = self.result.as_mut() {
            result.caption = meta.caption;
            result.hashtags = meta.hashtags;
        }
    }

    /// Clears everything and returns to the input screen.
    pub fn reset(&mut self) {
        info!("session reset");
        *self = Self::default();
    }
}
