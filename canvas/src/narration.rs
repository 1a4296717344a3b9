//! Timed lesson narration: one script read over the whole deck while slides
//! are revealed at their cue offsets.
//!
//! [`Narration`] is document data owned by the deck. [`NarrationRun`] is the
//! playback clock; it never reads the wall clock itself, so every operation
//! takes the host's `now` in seconds. The engine pairs the clock with the
//! speech player: starting a run speaks the script, and the run stops when the
//! script's utterance ends or the lesson's total duration elapses.

#[cfg(test)]
#[path = "narration_test.rs"]
mod narration_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CUE_SPACING_SECS, DEFAULT_LESSON_SECS};
use crate::doc::{Slide, SlideId};
use crate::speech::estimate_default_duration_secs;

/// Explicit reveal time for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    pub slide: SlideId,
    pub start_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Narration {
    /// Script spoken once from the start of the lesson.
    pub text: String,
    pub cues: Vec<Cue>,
    pub total_duration_secs: f64,
}

impl Default for Narration {
    fn default() -> Self {
        Self { text: String::new(), cues: Vec::new(), total_duration_secs: DEFAULT_LESSON_SECS }
    }
}

/// Edit to the deck's narration.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationEdit {
    Text(String),
    /// Lesson length in seconds; negative values clamp to zero.
    Duration(f64),
    /// Reveal `slide` at `start_secs`; negative values clamp to zero.
    Cue { slide: SlideId, start_secs: f64 },
    /// Drop the explicit cue for `slide`, falling back to its default slot.
    ClearCue(SlideId),
}

impl Narration {
    /// When the slide at `index` appears. Uncued slides are spaced
    /// [`DEFAULT_CUE_SPACING_SECS`] apart by position.
    #[must_use]
    pub fn start_secs(&self, index: usize, slide: &SlideId) -> f64 {
        self.cues.iter().find(|c| &c.slide == slide).map_or_else(
            || {
                #[allow(clippy::cast_precision_loss)]
                let slot = index as f64;
                slot * DEFAULT_CUE_SPACING_SECS
            },
            |c| c.start_secs,
        )
    }

    pub fn apply(&mut self, edit: NarrationEdit) {
        match edit {
            NarrationEdit::Text(text) => self.text = text,
            NarrationEdit::Duration(secs) => self.total_duration_secs = secs.max(0.0),
            NarrationEdit::Cue { slide, start_secs } => {
                let start_secs = start_secs.max(0.0);
                match self.cues.iter_mut().find(|c| c.slide == slide) {
                    Some(cue) => cue.start_secs = start_secs,
                    None => self.cues.push(Cue { slide, start_secs }),
                }
            }
            NarrationEdit::ClearCue(slide) => self.forget(&slide),
        }
    }

    /// Drop any cue for `slide`.
    pub fn forget(&mut self, slide: &SlideId) {
        self.cues.retain(|c| &c.slide != slide);
    }

    /// Replace the total duration with the reading-time estimate of the
    /// script, unless the script is blank. Returns the duration in effect.
    pub fn settle_duration(&mut self) -> f64 {
        let estimate = estimate_default_duration_secs(&self.text);
        if estimate > 0 {
            #[allow(clippy::cast_precision_loss)]
            let secs = estimate as f64;
            self.total_duration_secs = secs;
        }
        self.total_duration_secs
    }

    /// Indices of the slides revealed `elapsed` seconds into the lesson, in
    /// deck order.
    #[must_use]
    pub fn visible_slides(&self, slides: &[Slide], elapsed: f64) -> Vec<usize> {
        slides
            .iter()
            .enumerate()
            .filter(|(i, s)| elapsed >= self.start_secs(*i, &s.id()))
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.total_duration_secs
    }
}

/// Playback clock for a narration run.
///
/// Stopping keeps the elapsed time so the next start resumes from it;
/// [`reset`](Self::reset) rewinds to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NarrationRun {
    /// Host time at which elapsed was zero, while playing.
    origin: Option<f64>,
    /// Elapsed seconds when stopped, or at the last observation while playing.
    elapsed: f64,
}

impl NarrationRun {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.origin.is_some()
    }

    /// Seconds into the lesson at host time `now`.
    #[must_use]
    pub fn elapsed_at(&self, now: f64) -> f64 {
        self.origin.map_or(self.elapsed, |origin| (now - origin).max(0.0))
    }

    /// Elapsed seconds as of the last observation.
    #[must_use]
    pub fn last_elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Start or resume at host time `now`. Returns whether anything changed.
    pub fn play(&mut self, now: f64) -> bool {
        if self.is_playing() {
            return false;
        }
        self.origin = Some(now - self.elapsed);
        true
    }

    /// Record the elapsed time at `now` and return it.
    pub fn observe(&mut self, now: f64) -> f64 {
        self.elapsed = self.elapsed_at(now);
        self.elapsed
    }

    /// Stop at host time `now`, keeping the elapsed time.
    pub fn stop(&mut self, now: f64) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.observe(now);
        self.origin = None;
        true
    }

    /// Stop at the last observed time, for stops that carry no timestamp
    /// (the narration utterance ending).
    pub fn halt(&mut self) -> bool {
        self.origin.take().is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the lesson player shows at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationView {
    pub playing: bool,
    pub elapsed_secs: f64,
    pub total_secs: f64,
    pub visible: Vec<usize>,
}
