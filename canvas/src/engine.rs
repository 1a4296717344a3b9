//! The editor engine: every user-facing operation funnels through here.
//!
//! `EngineCore` owns the deck, the UI/selection state, the gesture state
//! machine, presentation state, the speech player, and the narration clock. Host code (DOM event
//! listeners, a test, or the replay driver) calls one handler per event and
//! receives a list of [`Action`]s describing what changed. Refused edits come
//! back as an empty list; the reason is logged at `debug`.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::consts::NARRATION_RATE;
use crate::doc::{
    ChoiceEdit, ChoiceId, Deck, DeckError, Element, ElementId, ElementKind, ElementPatch, QuizEdit, Slide, SlideId,
    SlideKind,
};
use crate::export::{ExportError, ExportFile, data_url, export_file};
use crate::geometry::{Bounds, Point, apply_drag, apply_resize};
use crate::hit::{hit_test_handle, resize_handles};
use crate::input::{InputState, Key, UiState};
use crate::narration::{NarrationEdit, NarrationRun, NarrationView};
use crate::presentation::{Presentation, SlideView, project};
use crate::speech::{PlaybackState, SpeechError, SpeechEvent, SpeechPlayer, SpeechSource, SpeechSynth};

/// What changed as a result of an event, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The canvas must be redrawn.
    RenderNeeded,
    SelectionChanged(Option<ElementId>),
    /// The current slide index changed.
    SlideChanged(usize),
    /// Presentation mode was entered (`true`) or left (`false`).
    PresentationChanged(bool),
    SpeechStateChanged(PlaybackState),
    /// Lesson narration started (`true`) or stopped (`false`).
    NarrationChanged(bool),
    /// A user-facing notice, e.g. speech being unavailable.
    Notice(String),
}

/// Core engine state. Holds no browser handles so it runs anywhere.
pub struct EngineCore {
    pub config: EditorConfig,
    deck: Deck,
    ui: UiState,
    input: InputState,
    presentation: Presentation,
    speech: SpeechPlayer,
    narration: NarrationRun,
    /// Slides revealed at the last narration tick.
    revealed: usize,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EngineCore {
    /// A fresh editor with one empty slide and no speech support.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let deck = Deck::new(config.deck_options());
        Self {
            config,
            deck,
            ui: UiState::default(),
            input: InputState::Idle,
            presentation: Presentation::default(),
            speech: SpeechPlayer::default(),
            narration: NarrationRun::default(),
            revealed: 0,
        }
    }

    /// Replace the speech collaborator.
    #[must_use]
    pub fn with_speech(mut self, synth: Box<dyn SpeechSynth>) -> Self {
        self.speech = SpeechPlayer::new(synth);
        self
    }

    /// Replace the deck, e.g. with a prepared sample.
    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.presentation.is_active()
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    #[must_use]
    pub fn speech_state(&self) -> PlaybackState {
        self.speech.state()
    }

    #[must_use]
    pub fn speech_supported(&self) -> bool {
        self.speech.is_supported()
    }

    /// Read-only view of the current slide.
    #[must_use]
    pub fn project(&self) -> SlideView<'_> {
        project(&self.deck, &self.presentation)
    }

    // --- Helpers ---

    /// Run an edit unless presenting. Refusals become "no actions".
    fn edit<T>(&mut self, op: &'static str, f: impl FnOnce(&mut Deck) -> Result<T, DeckError>) -> Option<T> {
        if self.presentation.is_active() {
            debug!(op, "edit ignored while presenting");
            return None;
        }
        match f(&mut self.deck) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(op, error = %e, "edit refused");
                None
            }
        }
    }

    fn set_selection(&mut self, id: Option<ElementId>, actions: &mut Vec<Action>) {
        if self.ui.selected_id != id {
            self.ui.selected_id = id;
            actions.push(Action::SelectionChanged(id));
        }
    }

    /// Drop selection and any gesture after the current slide changed.
    fn slide_changed(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.input = InputState::Idle;
        self.set_selection(None, &mut actions);
        actions.push(Action::SlideChanged(self.deck.current_index()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Slides ---

    /// Show the "choose a slide type" dialog.
    pub fn open_slide_dialog(&mut self) -> Vec<Action> {
        if self.presentation.is_active() || self.ui.slide_dialog_open {
            return Vec::new();
        }
        self.ui.slide_dialog_open = true;
        vec![Action::RenderNeeded]
    }

    /// Close the dialog without creating anything.
    pub fn dismiss_slide_dialog(&mut self) -> Vec<Action> {
        if !self.ui.slide_dialog_open {
            return Vec::new();
        }
        self.ui.slide_dialog_open = false;
        vec![Action::RenderNeeded]
    }

    /// Append a slide of `kind` and make it current.
    pub fn add_slide(&mut self, kind: SlideKind) -> Vec<Action> {
        self.ui.slide_dialog_open = false;
        match self.edit("add_slide", |deck| deck.add_slide(kind)) {
            Some(_) => self.slide_changed(),
            None => Vec::new(),
        }
    }

    /// Delete the current slide unless it is the last one.
    pub fn delete_current_slide(&mut self) -> Vec<Action> {
        match self.edit("delete_current_slide", Deck::delete_current_slide) {
            Some(_) => self.slide_changed(),
            None => Vec::new(),
        }
    }

    pub fn select_slide(&mut self, index: usize) -> Vec<Action> {
        if index == self.deck.current_index() {
            return Vec::new();
        }
        match self.deck.select(index) {
            Ok(()) => self.slide_changed(),
            Err(e) => {
                debug!(error = %e, "select_slide refused");
                Vec::new()
            }
        }
    }

    /// Advance one slide, wrapping from last to first.
    pub fn next_slide(&mut self) -> Vec<Action> {
        self.deck.next();
        self.slide_changed()
    }

    /// Go back one slide, wrapping from first to last.
    pub fn prev_slide(&mut self) -> Vec<Action> {
        self.deck.prev();
        self.slide_changed()
    }

    // --- Elements ---

    /// Add a default element of `kind` to the current basic slide and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> Vec<Action> {
        match self.edit("add_element", |deck| deck.add_element(kind)) {
            Some(id) => self.element_added(id),
            None => Vec::new(),
        }
    }

    /// Add an image element displaying the uploaded `bytes`.
    pub fn insert_image(&mut self, mime: &str, bytes: &[u8]) -> Vec<Action> {
        let src = data_url(mime, bytes);
        match self.edit("insert_image", |deck| deck.push_image(src)) {
            Some(id) => self.element_added(id),
            None => Vec::new(),
        }
    }

    fn element_added(&mut self, id: ElementId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.set_selection(Some(id), &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Merge `patch` into element `id` on the current slide.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> Vec<Action> {
        match self.edit("update_element", |deck| deck.update_element(id, patch)) {
            Some(()) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Remove element `id`, clearing selection and any gesture that targeted it.
    pub fn delete_element(&mut self, id: &ElementId) -> Vec<Action> {
        if self.edit("delete_element", |deck| deck.delete_element(id)).is_none() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.input.target() == Some(*id) {
            self.input = InputState::Idle;
        }
        if self.ui.selected_id == Some(*id) {
            self.set_selection(None, &mut actions);
        }
        if self.speaking(SpeechSource::Element(*id)) && self.speech.stop() {
            actions.push(Action::SpeechStateChanged(self.speech.state()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Quiz ---

    pub fn update_quiz(&mut self, edit: QuizEdit) -> Vec<Action> {
        match self.edit("update_quiz", |deck| deck.update_quiz(edit)) {
            Some(()) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn add_choice(&mut self) -> Vec<Action> {
        match self.edit("add_choice", Deck::add_choice) {
            Some(_) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn remove_choice(&mut self, id: &ChoiceId) -> Vec<Action> {
        match self.edit("remove_choice", |deck| deck.remove_choice(id)) {
            Some(()) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn update_choice(&mut self, id: &ChoiceId, edit: ChoiceEdit) -> Vec<Action> {
        match self.edit("update_choice", |deck| deck.update_choice(id, edit)) {
            Some(()) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Pointer input ---

    /// Pointer pressed on element `id`. Starts a resize if the point is on a
    /// corner handle, otherwise a drag; either way the element is selected.
    pub fn on_pointer_down(&mut self, pt: Point, id: ElementId) -> Vec<Action> {
        if self.presentation.is_active() {
            return Vec::new();
        }
        let Some(bounds) = self.deck.element(&id).map(Element::bounds) else {
            return Vec::new();
        };

        let handles = resize_handles(&bounds);
        self.input = match hit_test_handle(pt, &handles, self.config.handle_tolerance_px) {
            Some(handle) => InputState::Resizing { id, handle, last: pt },
            None => InputState::Dragging { id, offset: pt.delta_from(bounds.origin()) },
        };

        let mut actions = Vec::new();
        self.set_selection(Some(id), &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer moved anywhere over the canvas.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        if self.presentation.is_active() {
            return Vec::new();
        }
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, offset } => {
                let Some(bounds) = self.deck.element(&id).map(Element::bounds) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                let delta = pt.delta_from(offset).delta_from(bounds.origin());
                self.commit_bounds(&id, apply_drag(bounds, delta))
            }
            InputState::Resizing { id, handle, last } => {
                let Some(bounds) = self.deck.element(&id).map(Element::bounds) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                self.input = InputState::Resizing { id, handle, last: pt };
                self.commit_bounds(&id, apply_resize(bounds, handle, pt.delta_from(last)))
            }
        }
    }

    fn commit_bounds(&mut self, id: &ElementId, bounds: Bounds) -> Vec<Action> {
        if self.deck.element(id).map(Element::bounds) == Some(bounds) {
            return Vec::new();
        }
        match self.deck.set_bounds(id, bounds) {
            Ok(()) => vec![Action::RenderNeeded],
            Err(e) => {
                debug!(error = %e, "gesture target vanished");
                self.input = InputState::Idle;
                Vec::new()
            }
        }
    }

    /// Pointer released; always ends the gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        Vec::new()
    }

    /// Pointer left the canvas; always ends the gesture so nothing stays stuck.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        Vec::new()
    }

    /// Pointer pressed on the canvas background itself (not on a child element).
    pub fn on_canvas_pointer_down(&mut self) -> Vec<Action> {
        if self.presentation.is_active() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        self.set_selection(None, &mut actions);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if self.presentation.is_active() {
            return match key.as_str() {
                "ArrowRight" | " " => self.next_slide(),
                "ArrowLeft" => self.prev_slide(),
                "Escape" => self.exit_presentation(),
                _ => Vec::new(),
            };
        }
        match key.as_str() {
            "Delete" => match self.ui.selected_id {
                Some(id) if matches!(self.deck.current(), Slide::Basic(_)) => self.delete_element(&id),
                _ => Vec::new(),
            },
            "Escape" => {
                let mut actions = Vec::new();
                self.set_selection(None, &mut actions);
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
            _ => Vec::new(),
        }
    }

    // --- Presentation ---

    pub fn enter_presentation(&mut self) -> Vec<Action> {
        if self.presentation.is_active() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.input = InputState::Idle;
        self.ui.slide_dialog_open = false;
        self.set_selection(None, &mut actions);
        self.presentation.enter();
        info!(slides = self.deck.len(), "presentation started");
        actions.push(Action::PresentationChanged(true));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn exit_presentation(&mut self) -> Vec<Action> {
        if !self.presentation.is_active() {
            return Vec::new();
        }
        let (answered, correct) = self.presentation.score(&self.deck);
        self.presentation.exit();
        info!(answered, correct, "presentation ended");
        let mut actions = Vec::new();
        if self.speech.stop() {
            actions.push(Action::SpeechStateChanged(self.speech.state()));
        }
        if self.narration.halt() {
            actions.push(Action::NarrationChanged(false));
        }
        actions.push(Action::PresentationChanged(false));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record the audience's pick on a quiz slide. First answer is final.
    pub fn record_answer(&mut self, slide_id: SlideId, choice_id: ChoiceId) -> Vec<Action> {
        if self.presentation.record_answer(&self.deck, slide_id, choice_id) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn is_correct(&self, slide_id: &SlideId) -> bool {
        self.presentation.is_correct(&self.deck, slide_id)
    }

    // --- Speech ---

    /// Read speech element `id` on the current slide aloud.
    pub fn speak_element(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(Element::Speech(el)) = self.deck.element(id) else {
            return Vec::new();
        };
        let voice = Some(el.voice.clone()).filter(|v| !v.is_empty());
        match self.speech.speak(SpeechSource::Element(*id), &el.content, voice, el.rate, el.volume) {
            Ok(_) => vec![Action::SpeechStateChanged(self.speech.state())],
            Err(SpeechError::Unsupported) => {
                warn!("speech synthesis unavailable");
                vec![Action::Notice(SpeechError::Unsupported.to_string())]
            }
            Err(SpeechError::EmptyText) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "speech request failed");
                vec![Action::SpeechStateChanged(self.speech.state())]
            }
        }
    }

    pub fn pause_speech(&mut self) -> Vec<Action> {
        if self.speech.pause() { vec![Action::SpeechStateChanged(self.speech.state())] } else { Vec::new() }
    }

    pub fn resume_speech(&mut self) -> Vec<Action> {
        if self.speech.resume() { vec![Action::SpeechStateChanged(self.speech.state())] } else { Vec::new() }
    }

    pub fn stop_speech(&mut self) -> Vec<Action> {
        if self.speech.stop() { vec![Action::SpeechStateChanged(self.speech.state())] } else { Vec::new() }
    }

    /// Feed back a notification from the synthesis engine. Only playback
    /// state and the narration clock are touched; the deck and selection
    /// never change here. The narration run stops when its utterance ends.
    pub fn on_speech_event(&mut self, event: SpeechEvent) -> Vec<Action> {
        let narrating = self.speaking(SpeechSource::Narration);
        if !self.speech.handle(event) {
            return Vec::new();
        }
        let mut actions = vec![Action::SpeechStateChanged(self.speech.state())];
        if narrating && self.speech.state() == PlaybackState::Idle && self.narration.halt() {
            info!(elapsed = self.narration.last_elapsed(), "narration finished with its utterance");
            actions.push(Action::NarrationChanged(false));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn speaking(&self, source: SpeechSource) -> bool {
        self.speech.state().playback().is_some_and(|p| p.source == source)
    }

    // --- Narration ---

    pub fn update_narration(&mut self, edit: NarrationEdit) -> Vec<Action> {
        match self.edit("update_narration", |deck| deck.update_narration(edit)) {
            Some(()) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Time the lesson from its script's reading estimate.
    pub fn settle_narration_duration(&mut self) -> Vec<Action> {
        match self.edit("settle_narration_duration", Deck::settle_narration_duration) {
            Some(secs) => {
                debug!(secs, "narration duration settled");
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_narrating(&self) -> bool {
        self.narration.is_playing()
    }

    /// Start or stop the lesson narration at host time `now`, in seconds.
    ///
    /// Starting resumes from where the last run stopped and reads the script
    /// aloud from its beginning. A run that already reached the lesson's end
    /// rewinds first. Without speech support the slides are still revealed
    /// on schedule.
    pub fn toggle_narration(&mut self, now: f64) -> Vec<Action> {
        if self.narration.is_playing() {
            return self.stop_narration(now);
        }
        if !self.deck.options().narration {
            debug!("narration disabled");
            return Vec::new();
        }
        if self.deck.narration().is_finished(self.narration.elapsed_at(now)) {
            self.narration.reset();
            self.revealed = 0;
        }
        self.narration.play(now);
        info!(elapsed = self.narration.elapsed_at(now), "narration started");

        let mut actions = vec![Action::NarrationChanged(true)];
        let text = self.deck.narration().text.clone();
        let voice = self.config.speech.voice.clone();
        match self.speech.speak(SpeechSource::Narration, &text, voice, NARRATION_RATE, 1.0) {
            Ok(_) => actions.push(Action::SpeechStateChanged(self.speech.state())),
            Err(SpeechError::Unsupported | SpeechError::EmptyText) => debug!("narration runs without speech"),
            Err(e) => {
                warn!(error = %e, "narration speech request failed");
                actions.push(Action::SpeechStateChanged(self.speech.state()));
            }
        }
        actions.extend(self.tick_narration(now));
        if actions.last() != Some(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Advance the narration clock to host time `now`. Renders when another
    /// slide is revealed and stops the run once the lesson's duration is up.
    pub fn tick_narration(&mut self, now: f64) -> Vec<Action> {
        if !self.narration.is_playing() {
            return Vec::new();
        }
        let elapsed = self.narration.observe(now);
        if self.deck.narration().is_finished(elapsed) {
            info!(elapsed, "narration reached the end of the lesson");
            return self.stop_narration(now);
        }
        let revealed = self.deck.narration().visible_slides(self.deck.slides(), elapsed).len();
        if revealed == self.revealed {
            return Vec::new();
        }
        self.revealed = revealed;
        vec![Action::RenderNeeded]
    }

    fn stop_narration(&mut self, now: f64) -> Vec<Action> {
        if !self.narration.stop(now) {
            return Vec::new();
        }
        let mut actions = vec![Action::NarrationChanged(false)];
        if self.speaking(SpeechSource::Narration) && self.speech.stop() {
            actions.push(Action::SpeechStateChanged(self.speech.state()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Stop the narration and rewind it to the start of the lesson.
    pub fn reset_narration(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.narration.halt() {
            actions.push(Action::NarrationChanged(false));
        }
        if self.speaking(SpeechSource::Narration) && self.speech.stop() {
            actions.push(Action::SpeechStateChanged(self.speech.state()));
        }
        self.narration.reset();
        self.revealed = 0;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// What the lesson player shows at host time `now`.
    #[must_use]
    pub fn narration_view(&self, now: f64) -> NarrationView {
        let narration = self.deck.narration();
        let elapsed = self.narration.elapsed_at(now);
        NarrationView {
            playing: self.narration.is_playing(),
            elapsed_secs: elapsed,
            total_secs: narration.total_duration_secs,
            visible: narration.visible_slides(self.deck.slides(), elapsed),
        }
    }

    // --- Export ---

    /// Build the `presentation.json` download for the whole deck.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the slides cannot be serialized.
    pub fn export(&self) -> Result<ExportFile, ExportError> {
        let file = export_file(self.deck.slides())?;
        info!(slides = self.deck.len(), bytes = file.contents.len(), "deck exported");
        Ok(file)
    }
}
