//! Scripted editor sessions.
//!
//! A script is a JSON array of steps, each tagged by `op`. Steps name elements
//! and choices by their index on the current slide, since ids are minted at
//! run time. Edits the editor refuses (deleting the last slide, dropping below
//! two choices) are not script errors: the step simply has no effect, exactly
//! as in the interactive editor.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::Deserialize;
use tracing::{debug, info};

use slide_canvas::doc::{ChoiceEdit, ChoiceId, Element, ElementId, ElementKind, ElementPatch, QuizEdit, Slide, SlideKind};
use slide_canvas::engine::{Action, EngineCore};
use slide_canvas::geometry::Point;
use slide_canvas::input::Key;
use slide_canvas::narration::NarrationEdit;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step {step}: no element at index {index} on the current slide")]
    NoSuchElement { step: usize, index: usize },
    #[error("step {step}: no choice at index {index} on the current slide")]
    NoSuchChoice { step: usize, index: usize },
    #[error("step {step}: current slide is not a quiz")]
    NotAQuiz { step: usize },
    #[error("step {step}: no slide at index {index}")]
    NoSuchSlide { step: usize, index: usize },
}

/// One scripted user interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddSlide {
        kind: SlideKind,
    },
    DeleteSlide,
    SelectSlide {
        index: usize,
    },
    NextSlide,
    PrevSlide,
    AddElement {
        kind: ElementKind,
    },
    UpdateElement {
        element: usize,
        patch: ElementPatch,
    },
    PointerDown {
        x: f64,
        y: f64,
        element: usize,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerLeave,
    CanvasDown,
    Key {
        key: String,
    },
    UpdateQuiz {
        #[serde(default)]
        question: Option<String>,
        #[serde(default)]
        explanation: Option<String>,
    },
    AddChoice,
    RemoveChoice {
        index: usize,
    },
    SetCorrect {
        index: usize,
    },
    SetChoiceText {
        index: usize,
        text: String,
    },
    Present,
    Answer {
        choice: usize,
    },
    ExitPresent,
    NarrationText {
        text: String,
    },
    NarrationDuration {
        secs: f64,
    },
    NarrationCue {
        slide: usize,
        start: f64,
    },
    SettleNarration,
    /// `at` is the host clock in seconds.
    ToggleNarration {
        at: f64,
    },
    TickNarration {
        at: f64,
    },
    ResetNarration,
}

/// Parse a script document.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for malformed JSON or unknown steps.
pub fn parse(raw: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(raw)?)
}

/// What a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Steps that changed something.
    pub effective: usize,
    pub renders: usize,
}

/// Run `steps` against `core` in order.
///
/// # Errors
///
/// Returns the first step whose element or choice index cannot be resolved.
pub fn replay(core: &mut EngineCore, steps: &[Step]) -> Result<ReplaySummary, ScriptError> {
    let mut summary = ReplaySummary { steps: steps.len(), ..ReplaySummary::default() };
    for (i, step) in steps.iter().enumerate() {
        let actions = apply(core, i, step)?;
        debug!(step = i, ?step, actions = actions.len(), "replayed");
        if !actions.is_empty() {
            summary.effective += 1;
        }
        summary.renders += actions.iter().filter(|a| **a == Action::RenderNeeded).count();
    }
    info!(steps = summary.steps, effective = summary.effective, "script finished");
    Ok(summary)
}

fn apply(core: &mut EngineCore, step_no: usize, step: &Step) -> Result<Vec<Action>, ScriptError> {
    let actions = match step {
        Step::AddSlide { kind } => core.add_slide(*kind),
        Step::DeleteSlide => core.delete_current_slide(),
        Step::SelectSlide { index } => core.select_slide(*index),
        Step::NextSlide => core.next_slide(),
        Step::PrevSlide => core.prev_slide(),
        Step::AddElement { kind } => core.add_element(*kind),
        Step::UpdateElement { element, patch } => {
            let id = element_at(core, step_no, *element)?;
            core.update_element(&id, patch)
        }
        Step::PointerDown { x, y, element } => {
            let id = element_at(core, step_no, *element)?;
            core.on_pointer_down(Point::new(*x, *y), id)
        }
        Step::PointerMove { x, y } => core.on_pointer_move(Point::new(*x, *y)),
        Step::PointerUp => core.on_pointer_up(),
        Step::PointerLeave => core.on_pointer_leave(),
        Step::CanvasDown => core.on_canvas_pointer_down(),
        Step::Key { key } => core.on_key_down(&Key::new(key.as_str())),
        Step::UpdateQuiz { question, explanation } => {
            let mut actions = Vec::new();
            if let Some(q) = question {
                actions.extend(core.update_quiz(QuizEdit::Question(q.clone())));
            }
            if let Some(e) = explanation {
                actions.extend(core.update_quiz(QuizEdit::Explanation(e.clone())));
            }
            actions
        }
        Step::AddChoice => core.add_choice(),
        Step::RemoveChoice { index } => {
            let id = choice_at(core, step_no, *index)?;
            core.remove_choice(&id)
        }
        Step::SetCorrect { index } => {
            let id = choice_at(core, step_no, *index)?;
            core.update_choice(&id, ChoiceEdit::Correct(true))
        }
        Step::SetChoiceText { index, text } => {
            let id = choice_at(core, step_no, *index)?;
            core.update_choice(&id, ChoiceEdit::Text(text.clone()))
        }
        Step::Present => core.enter_presentation(),
        Step::Answer { choice } => {
            let id = choice_at(core, step_no, *choice)?;
            let slide = core.deck().current().id();
            core.record_answer(slide, id)
        }
        Step::ExitPresent => core.exit_presentation(),
        Step::NarrationText { text } => core.update_narration(NarrationEdit::Text(text.clone())),
        Step::NarrationDuration { secs } => core.update_narration(NarrationEdit::Duration(*secs)),
        Step::NarrationCue { slide, start } => {
            let id = core
                .deck()
                .slides()
                .get(*slide)
                .map(Slide::id)
                .ok_or(ScriptError::NoSuchSlide { step: step_no, index: *slide })?;
            core.update_narration(NarrationEdit::Cue { slide: id, start_secs: *start })
        }
        Step::SettleNarration => core.settle_narration_duration(),
        Step::ToggleNarration { at } => core.toggle_narration(*at),
        Step::TickNarration { at } => core.tick_narration(*at),
        Step::ResetNarration => core.reset_narration(),
    };
    Ok(actions)
}

fn element_at(core: &EngineCore, step: usize, index: usize) -> Result<ElementId, ScriptError> {
    core.deck()
        .elements()
        .get(index)
        .map(Element::id)
        .ok_or(ScriptError::NoSuchElement { step, index })
}

fn choice_at(core: &EngineCore, step: usize, index: usize) -> Result<ChoiceId, ScriptError> {
    let Slide::Quiz(quiz) = core.deck().current() else {
        return Err(ScriptError::NotAQuiz { step });
    };
    quiz.choices.get(index).map(|c| c.id).ok_or(ScriptError::NoSuchChoice { step, index })
}
