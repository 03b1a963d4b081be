use tab_core::{TabEntry, TabNotifier};
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::error::WebError;

/// Plays a short sound when a `notify` tab is selected.
pub struct AudioNotifier {
    audio: HtmlAudioElement,
}

impl AudioNotifier {
    pub fn new(src: &str) -> Result<Self, WebError> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(WebError::js)?;
        Ok(Self { audio })
    }
}

impl TabNotifier for AudioNotifier {
    fn tab_activated(
        &self,
        entry: &TabEntry,
    ) {
        debug!(button = %entry.button_id, src = %self.audio.src(), "playing tab sound");
        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(e) => {
                warn!(button = %entry.button_id, reason = %js_failure(&e), "tab sound failed");
                return;
            }
        };

        // Autoplay blocks arrive as a rejected promise, not as an error from play().
        let button = entry.button_id.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!(button = %button, reason = %js_failure(&e), "tab sound failed");
            }
        });
    }
}

fn js_failure(value: &JsValue) -> String {
    let field = |name: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    failure_reason(field("name").as_deref(), field("message").as_deref())
}

/// Describes a rejected `play()` from the DOMException's name and message.
pub(crate) fn failure_reason(
    name: Option<&str>,
    message: Option<&str>,
) -> String {
    match (name, message) {
        (Some("NotAllowedError"), _) => "blocked by the browser's autoplay policy".to_string(),
        (Some("NotSupportedError"), _) => "sound format or source not supported".to_string(),
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (Some(name), None) => name.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => "unknown playback error".to_string(),
    }
}
