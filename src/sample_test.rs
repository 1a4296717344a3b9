#![allow(clippy::float_cmp)]

use super::*;

fn quiz(deck: &Deck) -> &slide_canvas::doc::QuizSlide {
    match &deck.slides()[1] {
        Slide::Quiz(q) => q,
        Slide::Basic(_) => panic!("second slide is not a quiz"),
    }
}

#[test]
fn full_sample_has_title_narration_and_quiz() {
    let deck = sample_deck(&EditorConfig::default()).unwrap();
    assert_eq!(deck.len(), 2);
    assert_eq!(deck.current_index(), 0);
    let kinds: Vec<ElementKind> = deck.elements().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, [ElementKind::Text, ElementKind::Speech]);
    // 19 words at 150 wpm: 8s, padded to 9s.
    assert_eq!(deck.narration().total_duration_secs, 9.0);
    let correct = quiz(&deck).correct_choice().map(|c| c.text.as_str());
    assert_eq!(correct, Some("Clouds"));
}

#[test]
fn sample_honors_disabled_features() {
    let config = EditorConfig { speech_elements: false, quiz_slides: false, narration: false, ..EditorConfig::default() };
    let deck = sample_deck(&config).unwrap();
    assert_eq!(deck.len(), 1);
    assert_eq!(deck.elements().len(), 1);
    assert!(deck.narration().text.is_empty());
    assert_eq!(deck.narration().total_duration_secs, 30.0);
}
