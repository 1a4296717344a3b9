//! Speech playback: the synthesis collaborator seam and the playback state machine.
//!
//! The browser's speech engine is an external, asynchronous collaborator. The
//! editor talks to it through [`SpeechSynth`] and learns about progress only
//! through [`SpeechEvent`]s the host feeds back in. [`SpeechPlayer`] turns those
//! notifications into an explicit state machine:
//!
//! ```text
//! Idle -> Pending       (speak)
//! Pending -> Speaking   (Started)
//! Speaking <-> Paused   (pause / resume)
//! Any -> Idle           (Ended, Failed, stop)
//! ```
//!
//! At most one utterance is ever active: `speak` cancels whatever is in flight
//! and issues a fresh utterance id, and events carrying any other id are stale
//! and ignored.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::consts::{DEFAULT_WORDS_PER_MINUTE, DURATION_BUFFER_PERCENT, SPEECH_RATE_RANGE};
use crate::doc::ElementId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech synthesis is not supported in this environment")]
    Unsupported,
    #[error("nothing to speak")]
    EmptyText,
    #[error("speech backend error: {0}")]
    Backend(String),
}

/// One request to the synthesis engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Player-assigned id echoed back in [`SpeechEvent`]s.
    pub id: u64,
    pub text: String,
    /// `None` selects the platform default voice.
    pub voice: Option<String>,
    pub rate: f64,
    pub volume: f64,
}

/// Completion notifications from the synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Started(u64),
    Ended(u64),
    Failed(u64),
}

impl SpeechEvent {
    #[must_use]
    pub fn utterance(self) -> u64 {
        match self {
            Self::Started(id) | Self::Ended(id) | Self::Failed(id) => id,
        }
    }

    /// Whether the engine is done with the utterance after this event.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended(_) | Self::Failed(_))
    }
}

/// Mailbox between an asynchronous synthesis engine and the editor.
///
/// Engine callbacks [`push`](Self::push) events; the host [`drain`](Self::drain)s
/// them on its own turn. Per-utterance resources (the callbacks themselves, in
/// a browser) are [`hold`](Self::hold)en until that utterance's `Ended` or
/// `Failed` has been drained, because a cancelled utterance still reports back
/// after its successor has been queued.
#[derive(Debug)]
pub struct SpeechInbox<T> {
    events: VecDeque<SpeechEvent>,
    held: Vec<(u64, T)>,
}

impl<T> Default for SpeechInbox<T> {
    fn default() -> Self {
        Self { events: VecDeque::new(), held: Vec::new() }
    }
}

impl<T> SpeechInbox<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SpeechEvent) {
        self.events.push_back(event);
    }

    /// Keep `resource` alive until `utterance` finishes.
    pub fn hold(&mut self, utterance: u64, resource: T) {
        self.held.push((utterance, resource));
    }

    /// Utterances whose resources are still held.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held.len()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Take every queued event in arrival order and release the resources of
    /// utterances that have finished.
    pub fn drain(&mut self) -> Vec<SpeechEvent> {
        let events: Vec<SpeechEvent> = self.events.drain(..).collect();
        for done in events.iter().filter(|e| e.is_terminal()) {
            self.held.retain(|(id, _)| *id != done.utterance());
        }
        events
    }
}

/// The external text-to-speech engine.
pub trait SpeechSynth {
    /// Whether the environment can synthesize speech at all.
    fn is_supported(&self) -> bool;

    /// Queue `utterance` for playback. Progress arrives later as [`SpeechEvent`]s.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError`] if the engine rejects the request outright.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Interrupt and drop any queued or playing utterance.
    fn cancel(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);
}

/// Synthesizer for environments without speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechSynth for NullSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn cancel(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}
}

/// What an utterance is reading aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechSource {
    /// A speech element on a basic slide.
    Element(ElementId),
    /// The deck-wide lesson narration.
    Narration,
}

/// The utterance currently owned by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub utterance: u64,
    pub source: SpeechSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Handed to the engine, not yet started.
    Pending(Playback),
    Speaking(Playback),
    Paused(Playback),
}

impl PlaybackState {
    #[must_use]
    pub fn playback(&self) -> Option<Playback> {
        match self {
            Self::Idle => None,
            Self::Pending(p) | Self::Speaking(p) | Self::Paused(p) => Some(*p),
        }
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        matches!(self, Self::Speaking(_))
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused(_))
    }
}

/// Owns the synthesizer and the playback state.
pub struct SpeechPlayer {
    synth: Box<dyn SpeechSynth>,
    state: PlaybackState,
    last_id: u64,
}

impl Default for SpeechPlayer {
    fn default() -> Self {
        Self::new(Box::new(NullSpeech))
    }
}

impl SpeechPlayer {
    #[must_use]
    pub fn new(synth: Box<dyn SpeechSynth>) -> Self {
        Self { synth, state: PlaybackState::Idle, last_id: 0 }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.synth.is_supported()
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Read `text` aloud on behalf of `source`, interrupting any utterance
    /// already in flight. Returns the new utterance id.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::Unsupported`] without a capable engine,
    /// [`SpeechError::EmptyText`] for blank text, or the engine's own error.
    /// An engine error leaves the player `Idle`.
    pub fn speak(
        &mut self,
        source: SpeechSource,
        text: &str,
        voice: Option<String>,
        rate: f64,
        volume: f64,
    ) -> Result<u64, SpeechError> {
        if !self.synth.is_supported() {
            return Err(SpeechError::Unsupported);
        }
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        self.synth.cancel();
        self.state = PlaybackState::Idle;

        self.last_id += 1;
        let utterance = Utterance {
            id: self.last_id,
            text: text.to_owned(),
            voice,
            rate: rate.clamp(SPEECH_RATE_RANGE.0, SPEECH_RATE_RANGE.1),
            volume: volume.clamp(0.0, 1.0),
        };
        self.synth.speak(&utterance)?;
        self.state = PlaybackState::Pending(Playback { utterance: utterance.id, source });
        debug!(utterance = utterance.id, ?source, "speech: queued");
        Ok(utterance.id)
    }

    /// Pause the active utterance. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        let PlaybackState::Speaking(p) = self.state else {
            return false;
        };
        self.synth.pause();
        self.state = PlaybackState::Paused(p);
        true
    }

    /// Resume a paused utterance. Returns whether anything changed.
    pub fn resume(&mut self) -> bool {
        let PlaybackState::Paused(p) = self.state else {
            return false;
        };
        self.synth.resume();
        self.state = PlaybackState::Speaking(p);
        true
    }

    /// Cancel whatever is in flight. Returns whether anything changed.
    pub fn stop(&mut self) -> bool {
        if self.state == PlaybackState::Idle {
            return false;
        }
        self.synth.cancel();
        self.state = PlaybackState::Idle;
        true
    }

    /// Apply an engine notification. Returns whether the state changed.
    pub fn handle(&mut self, event: SpeechEvent) -> bool {
        let Some(current) = self.state.playback() else {
            debug!(?event, "speech: event while idle; ignoring");
            return false;
        };
        let id = event.utterance();
        if id != current.utterance {
            debug!(?event, current = current.utterance, "speech: stale event; ignoring");
            return false;
        }

        let next = match (self.state, event) {
            (PlaybackState::Pending(p), SpeechEvent::Started(_)) => PlaybackState::Speaking(p),
            (_, SpeechEvent::Ended(_)) => PlaybackState::Idle,
            (_, SpeechEvent::Failed(_)) => {
                warn!(utterance = id, "speech: playback failed");
                PlaybackState::Idle
            }
            (state, SpeechEvent::Started(_)) => state,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

/// Estimated narration length in whole seconds at `words_per_minute`,
/// padded by 10%. Blank text takes no time.
#[must_use]
pub fn estimate_duration_secs(text: &str, words_per_minute: u64) -> u64 {
    let words = text.split_whitespace().count() as u64;
    if words == 0 || words_per_minute == 0 {
        return 0;
    }
    let raw = (words * 60).div_ceil(words_per_minute);
    (raw * DURATION_BUFFER_PERCENT).div_ceil(100)
}

/// [`estimate_duration_secs`] at the default reading speed.
#[must_use]
pub fn estimate_default_duration_secs(text: &str) -> u64 {
    estimate_duration_secs(text, DEFAULT_WORDS_PER_MINUTE)
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
