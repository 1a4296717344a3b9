//! Document model: slides, elements, quiz choices, and the in-memory deck.
//!
//! This module defines what a presentation is made of (`Slide`, `Element`,
//! `Choice`), a sparse-update type for element edits (`ElementPatch`), and the
//! runtime store that owns the ordered slide sequence (`Deck`).
//!
//! All mutation goes through `Deck` methods, which enforce the document
//! invariants and report refused edits as [`DeckError`]:
//!
//! - the deck always holds at least one slide;
//! - a quiz slide always holds at least [`MIN_QUIZ_CHOICES`] choices, exactly
//!   one of which is marked correct.
//!
//! The engine turns a refused edit into "nothing happened"; the error exists so
//! callers and tests can see *why*.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DeckOptions, SpeechDefaults};
use crate::consts::{
    DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, DEFAULT_FONT_SIZE, DEFAULT_IMAGE_SIZE, DEFAULT_SPEECH_BACKGROUND,
    DEFAULT_SPEECH_SIZE, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE, IMAGE_PLACEHOLDER_SRC, MIN_QUIZ_CHOICES,
    SPEECH_RATE_RANGE,
};
use crate::geometry::Bounds;
use crate::narration::{Narration, NarrationEdit};

/// Unique identifier for a slide.
pub type SlideId = Uuid;
/// Unique identifier for an element on a basic slide.
pub type ElementId = Uuid;
/// Unique identifier for a quiz choice.
pub type ChoiceId = Uuid;

/// Fresh time-ordered id. UUID v7 embeds the creation timestamp and is
/// monotonic within the process.
#[must_use]
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

// =============================================================================
// ERRORS
// =============================================================================

/// Why a deck mutation was refused. The deck is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("cannot delete the only remaining slide")]
    LastSlide,
    #[error("a quiz needs at least two choices")]
    ChoiceFloor,
    #[error("the only correct choice cannot be unmarked")]
    LastCorrectChoice,
    #[error("slide index {0} out of range")]
    SlideIndexOutOfRange(usize),
    #[error("slide not found: {0}")]
    SlideNotFound(SlideId),
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("choice not found: {0}")]
    ChoiceNotFound(ChoiceId),
    #[error("current slide is not a basic slide")]
    NotBasicSlide,
    #[error("current slide is not a quiz slide")]
    NotQuizSlide,
    #[error("feature disabled: {0}")]
    FeatureDisabled(&'static str),
    #[error("a deck needs at least one slide")]
    EmptyDeck,
    #[error("quiz {0} needs at least two choices with exactly one marked correct")]
    InvalidQuiz(SlideId),
}

// =============================================================================
// TYPES
// =============================================================================

/// Which slide variant to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Basic,
    Quiz,
}

/// Which element variant to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Speech,
}

/// One unit of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slide {
    /// Free-form canvas of positioned elements.
    Basic(BasicSlide),
    /// Multiple-choice question.
    Quiz(QuizSlide),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicSlide {
    pub id: SlideId,
    /// Elements in paint order (later elements draw on top).
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSlide {
    pub id: SlideId,
    pub question: String,
    pub choices: Vec<Choice>,
    /// Shown after the audience has answered.
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    pub is_correct: bool,
}

impl Slide {
    #[must_use]
    pub fn id(&self) -> SlideId {
        match self {
            Self::Basic(s) => s.id,
            Self::Quiz(q) => q.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Basic(_) => SlideKind::Basic,
            Self::Quiz(_) => SlideKind::Quiz,
        }
    }

    /// A new slide of `kind` with its default content.
    #[must_use]
    pub fn with_defaults(kind: SlideKind) -> Self {
        match kind {
            SlideKind::Basic => Self::Basic(BasicSlide { id: new_id(), elements: Vec::new() }),
            SlideKind::Quiz => Self::Quiz(QuizSlide {
                id: new_id(),
                question: "New question".to_owned(),
                choices: vec![
                    Choice { id: new_id(), text: "Option 1".to_owned(), is_correct: true },
                    Choice { id: new_id(), text: "Option 2".to_owned(), is_correct: false },
                ],
                explanation: String::new(),
            }),
        }
    }
}

impl QuizSlide {
    /// Whether the choice list meets the floor and has exactly one correct
    /// choice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.choices.len() >= MIN_QUIZ_CHOICES && self.choices.iter().filter(|c| c.is_correct).count() == 1
    }

    /// The choice currently marked correct.
    #[must_use]
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.is_correct)
    }

    #[must_use]
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| &c.id == id)
    }
}

/// Font weight for text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A positioned, resizable item on a basic slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    /// Text that can be read aloud through the speech collaborator.
    Speech(SpeechElement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: ElementId,
    /// Displayable reference: a URL or a `data:` URL built from uploaded bytes.
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechElement {
    pub id: ElementId,
    pub content: String,
    /// Voice name; empty selects the platform default.
    pub voice: String,
    pub volume: f64,
    pub rate: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: String,
    pub background_color: String,
}

impl Element {
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Text(e) => e.id,
            Self::Image(e) => e.id,
            Self::Speech(e) => e.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Speech(_) => ElementKind::Speech,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Text(e) => Bounds::new(e.x, e.y, e.width, e.height),
            Self::Image(e) => Bounds::new(e.x, e.y, e.width, e.height),
            Self::Speech(e) => Bounds::new(e.x, e.y, e.width, e.height),
        }
    }

    pub fn set_bounds(&mut self, b: Bounds) {
        let (x, y, width, height) = match self {
            Self::Text(e) => (&mut e.x, &mut e.y, &mut e.width, &mut e.height),
            Self::Image(e) => (&mut e.x, &mut e.y, &mut e.width, &mut e.height),
            Self::Speech(e) => (&mut e.x, &mut e.y, &mut e.width, &mut e.height),
        };
        *x = b.x;
        *y = b.y;
        *width = b.width;
        *height = b.height;
    }

    /// A new element of `kind` at the default position with default styling.
    #[must_use]
    pub fn with_defaults(kind: ElementKind, speech: &SpeechDefaults) -> Self {
        let (x, y) = (DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y);
        match kind {
            ElementKind::Text => Self::Text(TextElement {
                id: new_id(),
                content: "New text".to_owned(),
                x,
                y,
                width: DEFAULT_TEXT_SIZE.0,
                height: DEFAULT_TEXT_SIZE.1,
                font_size: DEFAULT_FONT_SIZE,
                font_weight: FontWeight::Normal,
                color: DEFAULT_TEXT_COLOR.to_owned(),
            }),
            ElementKind::Image => Self::image(IMAGE_PLACEHOLDER_SRC.to_owned()),
            ElementKind::Speech => Self::Speech(SpeechElement {
                id: new_id(),
                content: "Text to speak".to_owned(),
                voice: speech.voice.clone().unwrap_or_default(),
                volume: speech.volume,
                rate: speech.rate,
                x,
                y,
                width: DEFAULT_SPEECH_SIZE.0,
                height: DEFAULT_SPEECH_SIZE.1,
                font_size: DEFAULT_FONT_SIZE,
                color: DEFAULT_TEXT_COLOR.to_owned(),
                background_color: DEFAULT_SPEECH_BACKGROUND.to_owned(),
            }),
        }
    }

    /// A new image element showing `src`.
    #[must_use]
    pub fn image(src: String) -> Self {
        Self::Image(ImageElement {
            id: new_id(),
            src,
            x: DEFAULT_ELEMENT_X,
            y: DEFAULT_ELEMENT_Y,
            width: DEFAULT_IMAGE_SIZE.0,
            height: DEFAULT_IMAGE_SIZE.1,
        })
    }

    /// Merge the present fields of `patch`. Fields the variant does not carry
    /// are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        let mut b = self.bounds();
        b.x = patch.x.unwrap_or(b.x);
        b.y = patch.y.unwrap_or(b.y);
        b.width = patch.width.unwrap_or(b.width);
        b.height = patch.height.unwrap_or(b.height);
        self.set_bounds(b);

        match self {
            Self::Text(e) => {
                merge(&mut e.content, patch.content.as_ref());
                merge(&mut e.color, patch.color.as_ref());
                if let Some(size) = patch.font_size {
                    e.font_size = size;
                }
                if let Some(weight) = patch.font_weight {
                    e.font_weight = weight;
                }
            }
            Self::Image(e) => {
                merge(&mut e.src, patch.src.as_ref());
            }
            Self::Speech(e) => {
                merge(&mut e.content, patch.content.as_ref());
                merge(&mut e.color, patch.color.as_ref());
                merge(&mut e.voice, patch.voice.as_ref());
                merge(&mut e.background_color, patch.background_color.as_ref());
                if let Some(size) = patch.font_size {
                    e.font_size = size;
                }
                if let Some(volume) = patch.volume {
                    e.volume = volume.clamp(0.0, 1.0);
                }
                if let Some(rate) = patch.rate {
                    e.rate = rate.clamp(SPEECH_RATE_RANGE.0, SPEECH_RATE_RANGE.1);
                }
            }
        }
    }
}

fn merge(field: &mut String, value: Option<&String>) {
    if let Some(v) = value {
        field.clone_from(v);
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Edit to a quiz slide's own text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEdit {
    Question(String),
    Explanation(String),
}

/// Edit to a single quiz choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceEdit {
    Text(String),
    /// `true` makes this the only correct choice.
    Correct(bool),
}

// =============================================================================
// DECK
// =============================================================================

/// Ordered slide sequence plus the index of the slide being edited or shown.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
    options: DeckOptions,
    narration: Narration,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DeckOptions::default())
    }
}

impl Deck {
    /// A deck holding a single empty basic slide.
    #[must_use]
    pub fn new(options: DeckOptions) -> Self {
        Self {
            slides: vec![Slide::with_defaults(SlideKind::Basic)],
            current: 0,
            options,
            narration: Narration::default(),
        }
    }

    /// Build a deck from existing slides, starting at the first one.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::EmptyDeck`] when `slides` is empty and
    /// [`DeckError::InvalidQuiz`] for the first quiz whose choices break the
    /// floor or the single-correct rule.
    pub fn from_slides(slides: Vec<Slide>, options: DeckOptions) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        if let Some(bad) = slides.iter().find_map(|s| match s {
            Slide::Quiz(q) if !q.is_well_formed() => Some(q.id),
            _ => None,
        }) {
            return Err(DeckError::InvalidQuiz(bad));
        }
        Ok(Self { slides, current: 0, options, narration: Narration::default() })
    }

    #[must_use]
    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Slide {
        &self.slides[self.current]
    }

    #[must_use]
    pub fn slide(&self, id: &SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| &s.id() == id)
    }

    // --- Slides ---

    /// Append a slide of `kind` with default content and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::FeatureDisabled`] for quiz slides when quizzes are off.
    pub fn add_slide(&mut self, kind: SlideKind) -> Result<SlideId, DeckError> {
        if kind == SlideKind::Quiz && !self.options.quiz_slides {
            return Err(DeckError::FeatureDisabled("quiz slides"));
        }
        let slide = Slide::with_defaults(kind);
        let id = slide.id();
        self.slides.push(slide);
        self.current = self.slides.len() - 1;
        Ok(id)
    }

    /// Remove the current slide; the previous slide becomes current.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::LastSlide`] when it is the only slide.
    pub fn delete_current_slide(&mut self) -> Result<Slide, DeckError> {
        if self.slides.len() <= 1 {
            return Err(DeckError::LastSlide);
        }
        let removed = self.slides.remove(self.current);
        self.narration.forget(&removed.id());
        self.current = self.current.saturating_sub(1);
        Ok(removed)
    }

    /// Jump to the slide at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::SlideIndexOutOfRange`] for an index past the end.
    pub fn select(&mut self, index: usize) -> Result<(), DeckError> {
        if index >= self.slides.len() {
            return Err(DeckError::SlideIndexOutOfRange(index));
        }
        self.current = index;
        Ok(())
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.slides.len();
        self.current
    }

    /// Go back one slide, wrapping to the last.
    pub fn prev(&mut self) -> usize {
        let n = self.slides.len();
        self.current = (self.current + n - 1) % n;
        self.current
    }

    // --- Elements ---

    fn basic_mut(&mut self) -> Result<&mut BasicSlide, DeckError> {
        match &mut self.slides[self.current] {
            Slide::Basic(s) => Ok(s),
            Slide::Quiz(_) => Err(DeckError::NotBasicSlide),
        }
    }

    fn quiz_mut(&mut self) -> Result<&mut QuizSlide, DeckError> {
        match &mut self.slides[self.current] {
            Slide::Quiz(q) => Ok(q),
            Slide::Basic(_) => Err(DeckError::NotQuizSlide),
        }
    }

    /// Elements of the current slide; empty for quiz slides.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        match self.current() {
            Slide::Basic(s) => &s.elements,
            Slide::Quiz(_) => &[],
        }
    }

    /// Look up an element on the current slide.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements().iter().find(|e| &e.id() == id)
    }

    fn element_mut(&mut self, id: &ElementId) -> Result<&mut Element, DeckError> {
        self.basic_mut()?
            .elements
            .iter_mut()
            .find(|e| &e.id() == id)
            .ok_or(DeckError::ElementNotFound(*id))
    }

    /// Append a default element of `kind` to the current basic slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotBasicSlide`] on a quiz slide and
    /// [`DeckError::FeatureDisabled`] for speech elements when they are off.
    pub fn add_element(&mut self, kind: ElementKind) -> Result<ElementId, DeckError> {
        if kind == ElementKind::Speech && !self.options.speech_elements {
            return Err(DeckError::FeatureDisabled("speech elements"));
        }
        let element = Element::with_defaults(kind, &self.options.speech);
        self.push_element(element)
    }

    /// Append an image element showing `src` to the current basic slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotBasicSlide`] on a quiz slide.
    pub fn push_image(&mut self, src: String) -> Result<ElementId, DeckError> {
        self.push_element(Element::image(src))
    }

    fn push_element(&mut self, element: Element) -> Result<ElementId, DeckError> {
        let id = element.id();
        self.basic_mut()?.elements.push(element);
        Ok(id)
    }

    /// Merge `patch` into the element `id` on the current slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ElementNotFound`] if no element matches.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> Result<(), DeckError> {
        self.element_mut(id)?.apply_patch(patch);
        Ok(())
    }

    /// Replace the bounds of element `id` on the current slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ElementNotFound`] if no element matches.
    pub fn set_bounds(&mut self, id: &ElementId, bounds: Bounds) -> Result<(), DeckError> {
        self.element_mut(id)?.set_bounds(bounds);
        Ok(())
    }

    /// Remove element `id` from the current basic slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotBasicSlide`] or [`DeckError::ElementNotFound`].
    pub fn delete_element(&mut self, id: &ElementId) -> Result<Element, DeckError> {
        let slide = self.basic_mut()?;
        let pos = slide
            .elements
            .iter()
            .position(|e| &e.id() == id)
            .ok_or(DeckError::ElementNotFound(*id))?;
        Ok(slide.elements.remove(pos))
    }

    // --- Quiz ---

    /// Update the question or explanation of the current quiz slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotQuizSlide`] on a basic slide.
    pub fn update_quiz(&mut self, edit: QuizEdit) -> Result<(), DeckError> {
        let quiz = self.quiz_mut()?;
        match edit {
            QuizEdit::Question(q) => quiz.question = q,
            QuizEdit::Explanation(e) => quiz.explanation = e,
        }
        Ok(())
    }

    /// Append an unmarked choice to the current quiz slide.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::NotQuizSlide`] on a basic slide.
    pub fn add_choice(&mut self) -> Result<ChoiceId, DeckError> {
        let quiz = self.quiz_mut()?;
        let choice = Choice {
            id: new_id(),
            text: format!("Option {}", quiz.choices.len() + 1),
            is_correct: false,
        };
        let id = choice.id;
        quiz.choices.push(choice);
        Ok(id)
    }

    /// Remove choice `id` from the current quiz slide.
    ///
    /// If the removed choice was the correct one, the first remaining choice
    /// becomes correct.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ChoiceFloor`] when only the minimum number of
    /// choices remain, [`DeckError::ChoiceNotFound`], or [`DeckError::NotQuizSlide`].
    pub fn remove_choice(&mut self, id: &ChoiceId) -> Result<(), DeckError> {
        let quiz = self.quiz_mut()?;
        let pos = quiz
            .choices
            .iter()
            .position(|c| &c.id == id)
            .ok_or(DeckError::ChoiceNotFound(*id))?;
        if quiz.choices.len() <= MIN_QUIZ_CHOICES {
            return Err(DeckError::ChoiceFloor);
        }
        let removed = quiz.choices.remove(pos);
        if removed.is_correct {
            if let Some(first) = quiz.choices.first_mut() {
                first.is_correct = true;
            }
        }
        Ok(())
    }

    /// Edit choice `id` on the current quiz slide.
    ///
    /// Marking a choice correct unmarks every sibling first, so exactly one
    /// choice is correct afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::LastCorrectChoice`] when unmarking the correct
    /// choice, [`DeckError::ChoiceNotFound`], or [`DeckError::NotQuizSlide`].
    pub fn update_choice(&mut self, id: &ChoiceId, edit: ChoiceEdit) -> Result<(), DeckError> {
        let quiz = self.quiz_mut()?;
        let pos = quiz
            .choices
            .iter()
            .position(|c| &c.id == id)
            .ok_or(DeckError::ChoiceNotFound(*id))?;
        match edit {
            ChoiceEdit::Text(text) => quiz.choices[pos].text = text,
            ChoiceEdit::Correct(true) => {
                for c in &mut quiz.choices {
                    c.is_correct = false;
                }
                quiz.choices[pos].is_correct = true;
            }
            ChoiceEdit::Correct(false) => {
                if quiz.choices[pos].is_correct {
                    return Err(DeckError::LastCorrectChoice);
                }
            }
        }
        Ok(())
    }

    // --- Narration ---

    #[must_use]
    pub fn narration(&self) -> &Narration {
        &self.narration
    }

    fn narration_mut(&mut self) -> Result<&mut Narration, DeckError> {
        if !self.options.narration {
            return Err(DeckError::FeatureDisabled("narration"));
        }
        Ok(&mut self.narration)
    }

    /// Edit the deck-wide narration.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::FeatureDisabled`] when narration is off and
    /// [`DeckError::SlideNotFound`] for a cue naming a slide not in the deck.
    pub fn update_narration(&mut self, edit: NarrationEdit) -> Result<(), DeckError> {
        if let NarrationEdit::Cue { slide, .. } = &edit {
            if self.slide(slide).is_none() {
                return Err(DeckError::SlideNotFound(*slide));
            }
        }
        self.narration_mut()?.apply(edit);
        Ok(())
    }

    /// Time the lesson from its script; see [`Narration::settle_duration`].
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::FeatureDisabled`] when narration is off.
    pub fn settle_narration_duration(&mut self) -> Result<f64, DeckError> {
        Ok(self.narration_mut()?.settle_duration())
    }
}
