//! Built-in demo deck: a title slide with narration and a short quiz.

#[cfg(test)]
#[path = "sample_test.rs"]
mod sample_test;

use slide_canvas::config::EditorConfig;
use slide_canvas::doc::{ChoiceEdit, Deck, DeckError, ElementKind, ElementPatch, FontWeight, QuizEdit, Slide, SlideKind};
use slide_canvas::narration::NarrationEdit;

/// Build the demo deck under `config`'s feature flags. The spoken element is
/// skipped when speech elements are off, the lesson script when narration is,
/// and the quiz when quizzes are.
///
/// # Errors
///
/// Returns [`DeckError`] if a deck edit is refused.
pub fn sample_deck(config: &EditorConfig) -> Result<Deck, DeckError> {
    let mut deck = Deck::new(config.deck_options());

    let title = deck.add_element(ElementKind::Text)?;
    deck.update_element(
        &title,
        &ElementPatch {
            content: Some("The Water Cycle".into()),
            font_size: Some(36.0),
            font_weight: Some(FontWeight::Bold),
            width: Some(420.0),
            height: Some(60.0),
            ..ElementPatch::default()
        },
    )?;

    if config.speech_elements {
        let narration = deck.add_element(ElementKind::Speech)?;
        deck.update_element(
            &narration,
            &ElementPatch {
                content: Some(
                    "Water evaporates from oceans, condenses into clouds, and falls back as rain.".into(),
                ),
                y: Some(140.0),
                width: Some(420.0),
                ..ElementPatch::default()
            },
        )?;
    }

    if config.narration {
        deck.update_narration(NarrationEdit::Text(
            "Let's follow a drop of water. It rises from the sea, gathers in a cloud, and returns as rain.".into(),
        ))?;
        deck.settle_narration_duration()?;
    }

    if config.quiz_slides {
        deck.add_slide(SlideKind::Quiz)?;
        deck.update_quiz(QuizEdit::Question("What forms when water vapor cools?".into()))?;
        deck.update_quiz(QuizEdit::Explanation("Cooling vapor condenses into droplets that form clouds.".into()))?;
        deck.add_choice()?;
        let ids: Vec<_> = match deck.current() {
            Slide::Quiz(q) => q.choices.iter().map(|c| c.id).collect(),
            Slide::Basic(_) => return Err(DeckError::NotQuizSlide),
        };
        for (id, text) in ids.iter().zip(["Rivers", "Clouds", "Glaciers"]) {
            deck.update_choice(id, ChoiceEdit::Text(text.to_owned()))?;
        }
        if let Some(clouds) = ids.get(1) {
            deck.update_choice(clouds, ChoiceEdit::Correct(true))?;
        }
        deck.select(0)?;
    }

    Ok(deck)
}
