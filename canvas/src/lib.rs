//! Editor core for a slide-based presentation builder.
//!
//! The crate holds everything the editor needs that is not DOM plumbing: the
//! deck model, element geometry and handle hit-testing, the pointer gesture
//! state machine, presentation mode with quiz scoring, speech playback state,
//! timed lesson narration, and JSON export. It compiles natively (tests, the
//! `slidecanvas` replay binary) and to WebAssembly with the `web` feature,
//! where [`web`] binds the browser's speech synthesis and download APIs. Host
//! code forwards events to [`engine::EngineCore`] and reacts to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event handlers and the testable [`engine::EngineCore`] |
//! | [`doc`] | Slides, elements, choices, and the [`doc::Deck`] store |
//! | [`geometry`] | Points, bounds, drag and resize transforms |
//! | [`hit`] | Corner handles and handle hit-testing |
//! | [`input`] | Keys, UI state, and the gesture state machine |
//! | [`presentation`] | Presentation mode, quiz answers, slide projection |
//! | [`speech`] | Speech synthesis seam and playback state machine |
//! | [`narration`] | Deck-wide timed narration and its playback clock |
//! | [`export`] | `presentation.json` export and image data URLs |
//! | [`config`] | Feature flags, tolerance, and speech defaults |
//! | [`consts`] | Shared constants (size floors, defaults, file names) |
//! | `web` | Browser bindings (feature `web`) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod narration;
pub mod presentation;
pub mod speech;
#[cfg(feature = "web")]
pub mod web;
