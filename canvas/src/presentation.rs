//! Presentation mode: quiz answer tracking and the read-only slide projection.
//!
//! DESIGN
//! ======
//! Presenting never mutates the deck. The only state owned here is whether
//! presentation mode is active and which choice the audience picked on each
//! quiz slide. Answers are final (the first pick sticks) and survive slide
//! navigation, so revisiting an answered quiz shows its locked-in result. They
//! are wiped whenever presentation mode is entered or exited.

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use std::collections::HashMap;

use tracing::debug;

use crate::doc::{Choice, ChoiceId, Deck, Element, Slide, SlideId};
use crate::geometry::Bounds;
use crate::speech::{estimate_default_duration_secs, format_time};

/// Presentation-mode flag and the audience's quiz answers.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    active: bool,
    answers: HashMap<SlideId, ChoiceId>,
}

impl Presentation {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn enter(&mut self) {
        self.active = true;
        self.answers.clear();
    }

    pub fn exit(&mut self) {
        self.active = false;
        self.answers.clear();
    }

    /// Record `choice_id` as the answer for quiz `slide_id`.
    ///
    /// Accepted only while presenting, for a quiz slide in `deck` that owns the
    /// choice, and only if that slide has no answer yet. Returns whether the
    /// answer was recorded.
    pub fn record_answer(&mut self, deck: &Deck, slide_id: SlideId, choice_id: ChoiceId) -> bool {
        if !self.active {
            return false;
        }
        if self.answers.contains_key(&slide_id) {
            debug!(%slide_id, "quiz already answered; keeping first answer");
            return false;
        }
        let Some(Slide::Quiz(quiz)) = deck.slide(&slide_id) else {
            return false;
        };
        if quiz.choice(&choice_id).is_none() {
            return false;
        }
        self.answers.insert(slide_id, choice_id);
        true
    }

    #[must_use]
    pub fn answer(&self, slide_id: &SlideId) -> Option<ChoiceId> {
        self.answers.get(slide_id).copied()
    }

    /// Whether the recorded answer for `slide_id` is the choice marked correct.
    /// Unanswered slides are not correct.
    #[must_use]
    pub fn is_correct(&self, deck: &Deck, slide_id: &SlideId) -> bool {
        let Some(answer) = self.answer(slide_id) else {
            return false;
        };
        match deck.slide(slide_id) {
            Some(Slide::Quiz(quiz)) => quiz.correct_choice().is_some_and(|c| c.id == answer),
            _ => false,
        }
    }

    /// Number of answered quiz slides and how many of those were correct.
    #[must_use]
    pub fn score(&self, deck: &Deck) -> (usize, usize) {
        let correct = self.answers.keys().filter(|id| self.is_correct(deck, id)).count();
        (self.answers.len(), correct)
    }
}

/// An element as drawn in presentation mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView<'a> {
    pub element: &'a Element,
    pub bounds: Bounds,
    /// Estimated reading time (`m:ss`) for speech elements.
    pub narration: Option<String>,
}

/// A quiz choice as drawn in presentation mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceView<'a> {
    pub choice: &'a Choice,
    /// This is the audience's pick.
    pub chosen: bool,
    /// Correctness, revealed once the slide is answered.
    pub revealed: Option<bool>,
}

/// Read-only projection of the current slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideView<'a> {
    Basic {
        index: usize,
        total: usize,
        elements: Vec<ElementView<'a>>,
    },
    Quiz {
        index: usize,
        total: usize,
        question: &'a str,
        choices: Vec<ChoiceView<'a>>,
        answered: Option<ChoiceId>,
        correct: Option<bool>,
        /// Shown once answered and non-empty.
        explanation: Option<&'a str>,
    },
}

/// Build the view of the deck's current slide.
#[must_use]
pub fn project<'a>(deck: &'a Deck, presentation: &Presentation) -> SlideView<'a> {
    let index = deck.current_index();
    let total = deck.len();
    match deck.current() {
        Slide::Basic(slide) => SlideView::Basic {
            index,
            total,
            elements: slide
                .elements
                .iter()
                .map(|element| ElementView {
                    element,
                    bounds: element.bounds(),
                    narration: match element {
                        Element::Speech(s) => Some(format_time(estimate_default_duration_secs(&s.content))),
                        Element::Text(_) | Element::Image(_) => None,
                    },
                })
                .collect(),
        },
        Slide::Quiz(quiz) => {
            let answered = presentation.answer(&quiz.id);
            SlideView::Quiz {
                index,
                total,
                question: &quiz.question,
                choices: quiz
                    .choices
                    .iter()
                    .map(|choice| ChoiceView {
                        choice,
                        chosen: answered == Some(choice.id),
                        revealed: answered.map(|_| choice.is_correct),
                    })
                    .collect(),
                answered,
                correct: answered.map(|_| presentation.is_correct(deck, &quiz.id)),
                explanation: answered
                    .filter(|_| !quiz.explanation.trim().is_empty())
                    .map(|_| quiz.explanation.as_str()),
            }
        }
    }
}
