#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::SlideKind;

// =============================================================
// Helpers
// =============================================================

fn slides(n: usize) -> Vec<Slide> {
    (0..n).map(|_| Slide::with_defaults(SlideKind::Basic)).collect()
}

// =============================================================
// Narration
// =============================================================

#[test]
fn default_lesson_runs_thirty_seconds() {
    let n = Narration::default();
    assert_eq!(n.total_duration_secs, 30.0);
    assert!(n.text.is_empty());
    assert!(n.cues.is_empty());
}

#[test]
fn uncued_slides_are_spaced_by_position() {
    let s = slides(3);
    let n = Narration::default();
    assert_eq!(n.start_secs(0, &s[0].id()), 0.0);
    assert_eq!(n.start_secs(2, &s[2].id()), 10.0);
}

#[test]
fn cue_overrides_position_and_clamps() {
    let s = slides(2);
    let mut n = Narration::default();
    n.apply(NarrationEdit::Cue { slide: s[1].id(), start_secs: 2.5 });
    assert_eq!(n.start_secs(1, &s[1].id()), 2.5);
    n.apply(NarrationEdit::Cue { slide: s[1].id(), start_secs: -4.0 });
    assert_eq!(n.cues, [Cue { slide: s[1].id(), start_secs: 0.0 }]);
    n.apply(NarrationEdit::ClearCue(s[1].id()));
    assert_eq!(n.start_secs(1, &s[1].id()), 5.0);
}

#[test]
fn visible_slides_follow_elapsed_time() {
    let s = slides(3);
    let n = Narration::default();
    assert_eq!(n.visible_slides(&s, 0.0), [0]);
    assert_eq!(n.visible_slides(&s, 4.9), [0]);
    assert_eq!(n.visible_slides(&s, 5.0), [0, 1]);
    assert_eq!(n.visible_slides(&s, 60.0), [0, 1, 2]);
}

#[test]
fn visible_slides_keep_deck_order_with_reordered_cues() {
    let s = slides(3);
    let mut n = Narration::default();
    n.apply(NarrationEdit::Cue { slide: s[0].id(), start_secs: 8.0 });
    n.apply(NarrationEdit::Cue { slide: s[2].id(), start_secs: 1.0 });
    assert_eq!(n.visible_slides(&s, 1.0), [2]);
    assert_eq!(n.visible_slides(&s, 8.0), [0, 1, 2]);
}

#[test]
fn finished_at_total_duration() {
    let mut n = Narration::default();
    n.apply(NarrationEdit::Duration(12.0));
    assert!(!n.is_finished(11.9));
    assert!(n.is_finished(12.0));
    n.apply(NarrationEdit::Duration(-1.0));
    assert_eq!(n.total_duration_secs, 0.0);
}

#[test]
fn settle_uses_estimate_when_script_present() {
    let mut n = Narration::default();
    n.apply(NarrationEdit::Text("w ".repeat(150)));
    assert_eq!(n.settle_duration(), 66.0);
    assert_eq!(n.total_duration_secs, 66.0);
}

#[test]
fn settle_keeps_duration_for_blank_script() {
    let mut n = Narration::default();
    n.apply(NarrationEdit::Duration(45.0));
    assert_eq!(n.settle_duration(), 45.0);
}

#[test]
fn narration_serializes_camel_case() {
    let s = slides(1);
    let mut n = Narration::default();
    n.apply(NarrationEdit::Cue { slide: s[0].id(), start_secs: 3.0 });
    let v = serde_json::to_value(&n).unwrap();
    assert_eq!(v["totalDurationSecs"], 30.0);
    assert_eq!(v["cues"][0]["startSecs"], 3.0);
}

// =============================================================
// NarrationRun
// =============================================================

#[test]
fn run_measures_from_play() {
    let mut run = NarrationRun::default();
    assert!(!run.is_playing());
    assert_eq!(run.elapsed_at(100.0), 0.0);
    assert!(run.play(100.0));
    assert!(!run.play(101.0));
    assert_eq!(run.elapsed_at(103.5), 3.5);
}

#[test]
fn stop_then_play_resumes() {
    let mut run = NarrationRun::default();
    run.play(10.0);
    assert!(run.stop(14.0));
    assert!(!run.stop(15.0));
    assert_eq!(run.elapsed_at(50.0), 4.0);
    run.play(50.0);
    assert_eq!(run.elapsed_at(51.0), 5.0);
}

#[test]
fn halt_freezes_at_last_observation() {
    let mut run = NarrationRun::default();
    run.play(0.0);
    assert_eq!(run.observe(7.0), 7.0);
    assert!(run.halt());
    assert!(!run.halt());
    assert_eq!(run.elapsed_at(99.0), 7.0);
}

#[test]
fn clock_going_backwards_reads_zero() {
    let mut run = NarrationRun::default();
    run.play(10.0);
    assert_eq!(run.elapsed_at(9.0), 0.0);
}

#[test]
fn reset_rewinds() {
    let mut run = NarrationRun::default();
    run.play(0.0);
    run.stop(20.0);
    run.reset();
    assert_eq!(run, NarrationRun::default());
}
