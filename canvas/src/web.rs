//! Browser bindings: speech through `window.speechSynthesis` and export
//! downloads through a Blob URL.
//!
//! Utterance callbacks fire asynchronously on the browser event loop. They only
//! push [`SpeechEvent`]s into a shared [`SpeechInbox`]; the host drains it with
//! [`Engine::pump_speech`] from its own event handler, so the engine is never
//! touched from inside a callback. The inbox also owns each utterance's
//! callbacks until that utterance ends or fails, so a cancelled utterance can
//! still report back after its successor was queued.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, Url};

use crate::config::EditorConfig;
use crate::engine::{Action, EngineCore};
use crate::export::{ExportError, ExportFile};
use crate::speech::{SpeechError, SpeechEvent, SpeechInbox, SpeechSynth, Utterance};

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("no window or document available")]
    NoDocument,
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// `onstart`, `onend` and `onerror` of one utterance.
type Callbacks = [Closure<dyn FnMut()>; 3];

type Inbox = Rc<RefCell<SpeechInbox<Callbacks>>>;

/// [`SpeechSynth`] backed by the page's `speechSynthesis` object.
pub struct WebSpeech {
    synth: Option<SpeechSynthesis>,
    inbox: Inbox,
}

impl WebSpeech {
    /// Bind to `window.speechSynthesis`, if the browser has it.
    #[must_use]
    pub fn new() -> Self {
        let synth = match web_sys::window().map(|w| w.speech_synthesis()) {
            Some(Ok(s)) => Some(s),
            Some(Err(e)) => {
                warn!(error = ?e, "speechSynthesis unavailable");
                None
            }
            None => None,
        };
        Self { synth, inbox: Rc::new(RefCell::new(SpeechInbox::new())) }
    }

    /// Shared inbox the utterance callbacks write into.
    #[must_use]
    pub fn inbox(&self) -> Inbox {
        Rc::clone(&self.inbox)
    }

    fn find_voice(synth: &SpeechSynthesis, name: &str) -> Option<SpeechSynthesisVoice> {
        synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().into_iter().next())
            .find(|v| v.name() == name)
    }

    fn callback(&self, make: fn(u64) -> SpeechEvent, id: u64) -> Closure<dyn FnMut()> {
        let inbox = Rc::downgrade(&self.inbox);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(inbox) = inbox.upgrade() {
                inbox.borrow_mut().push(make(id));
            }
        })
    }
}

impl Default for WebSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynth for WebSpeech {
    fn is_supported(&self) -> bool {
        self.synth.is_some()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let Some(synth) = self.synth.as_ref() else {
            return Err(SpeechError::Unsupported);
        };
        let u = SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|e| SpeechError::Backend(format!("{e:?}")))?;
        u.set_rate(utterance.rate as f32);
        u.set_volume(utterance.volume as f32);
        if let Some(name) = utterance.voice.as_deref() {
            let voice = Self::find_voice(synth, name);
            u.set_voice(voice.as_ref());
        }

        let on_start = self.callback(SpeechEvent::Started, utterance.id);
        let on_end = self.callback(SpeechEvent::Ended, utterance.id);
        let on_error = self.callback(SpeechEvent::Failed, utterance.id);
        u.set_onstart(Some(on_start.as_ref().unchecked_ref()));
        u.set_onend(Some(on_end.as_ref().unchecked_ref()));
        u.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        self.inbox.borrow_mut().hold(utterance.id, [on_start, on_end, on_error]);

        synth.speak(&u);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }

    fn pause(&mut self) {
        if let Some(synth) = &self.synth {
            synth.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(synth) = &self.synth {
            synth.resume();
        }
    }
}

/// The browser-hosted editor: [`EngineCore`] wired to real speech.
pub struct Engine {
    pub core: EngineCore,
    inbox: Inbox,
}

impl Engine {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let speech = WebSpeech::new();
        let inbox = speech.inbox();
        let core = EngineCore::new(config).with_speech(Box::new(speech));
        Self { core, inbox }
    }

    /// Apply speech notifications that arrived since the last call and free
    /// the callbacks of utterances that have finished.
    pub fn pump_speech(&mut self) -> Vec<Action> {
        let pending = self.inbox.borrow_mut().drain();
        pending.into_iter().flat_map(|ev| self.core.on_speech_event(ev)).collect()
    }

    /// Offer the deck as a `presentation.json` download.
    ///
    /// # Errors
    ///
    /// Returns [`WebError`] if serialization or any browser call fails.
    pub fn download_export(&self) -> Result<(), WebError> {
        let file = self.core.export()?;
        download(&file)
    }
}

/// Trigger a browser download of `file`.
///
/// # Errors
///
/// Returns [`WebError`] if the document is missing or a browser call fails.
pub fn download(file: &ExportFile) -> Result<(), WebError> {
    let document = web_sys::window().and_then(|w| w.document()).ok_or(WebError::NoDocument)?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|el| WebError::Js(format!("not an anchor: {el:?}")))?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
