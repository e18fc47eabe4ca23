//! Web Speech API synthesis.

use aula_core::SpeechSynth;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

use crate::dom;

/// Platform speech, or nothing when the browser lacks `speechSynthesis`.
pub struct BrowserSpeech {
    synth: Option<SpeechSynthesis>,
}

impl BrowserSpeech {
    #[must_use]
    pub fn detect() -> Self {
        let synth = dom::window().and_then(|win| win.speech_synthesis().ok());
        if synth.is_none() {
            log::info!("speech synthesis unavailable; reader mode will stay silent");
        }
        Self { synth }
    }
}

impl SpeechSynth for BrowserSpeech {
    fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    fn is_busy(&self) -> bool {
        self.synth
            .as_ref()
            .is_some_and(|synth| synth.speaking() || synth.pending())
    }

    fn cancel(&self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }

    fn speak(&self, text: &str, lang: &str) {
        let Some(synth) = &self.synth else {
            return;
        };
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_lang(lang);
                synth.speak(&utterance);
            }
            Err(err) => log::warn!("utterance rejected: {}", dom::js_error_message(&err)),
        }
    }
}
