//! Shared numeric constants for the canvas crate.

// ── Geometry floors ─────────────────────────────────────────────

/// Smallest width an element may have after a resize.
pub const MIN_ELEMENT_WIDTH: f64 = 50.0;

/// Smallest height an element may have after a resize.
pub const MIN_ELEMENT_HEIGHT: f64 = 30.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Default slop in canvas pixels around each resize handle.
pub const HANDLE_TOLERANCE_PX: f64 = 5.0;

// ── Element defaults ────────────────────────────────────────────

/// Where freshly added elements are placed on the canvas.
pub const DEFAULT_ELEMENT_X: f64 = 50.0;
pub const DEFAULT_ELEMENT_Y: f64 = 50.0;

pub const DEFAULT_TEXT_SIZE: (f64, f64) = (200.0, 50.0);
pub const DEFAULT_IMAGE_SIZE: (f64, f64) = (200.0, 150.0);
pub const DEFAULT_SPEECH_SIZE: (f64, f64) = (250.0, 80.0);

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_SPEECH_BACKGROUND: &str = "#F0F9FF";

/// Image source used when an image element is added without an upload.
pub const IMAGE_PLACEHOLDER_SRC: &str = "https://via.placeholder.com/600x400/4ade80/ffffff?text=Image+Placeholder";

// ── Quiz ────────────────────────────────────────────────────────

/// A quiz slide never drops below this many choices.
pub const MIN_QUIZ_CHOICES: usize = 2;

// ── Speech ──────────────────────────────────────────────────────

/// Accepted range for utterance rate.
pub const SPEECH_RATE_RANGE: (f64, f64) = (0.1, 10.0);

/// Reading speed used for narration length estimates.
pub const DEFAULT_WORDS_PER_MINUTE: u64 = 150;

/// Narration estimates are padded to this percentage of the raw figure.
pub const DURATION_BUFFER_PERCENT: u64 = 110;

// ── Narration ───────────────────────────────────────────────────

/// Lesson length before any narration text has been timed.
pub const DEFAULT_LESSON_SECS: f64 = 30.0;

/// Slides without an explicit cue appear this many seconds apart.
pub const DEFAULT_CUE_SPACING_SECS: f64 = 5.0;

/// Utterance rate for the deck-wide narration.
pub const NARRATION_RATE: f64 = 0.9;

// ── Export ──────────────────────────────────────────────────────

pub const EXPORT_FILE_NAME: &str = "presentation.json";
pub const EXPORT_MIME: &str = "application/json";
