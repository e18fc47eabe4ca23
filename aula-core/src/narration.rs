//! Text-to-speech gating.

use std::cell::Cell;

/// Platform speech synthesis.
pub trait SpeechSynth {
    /// Whether the platform can speak at all.
    fn is_available(&self) -> bool;

    /// Whether an utterance is speaking or queued.
    fn is_busy(&self) -> bool;

    fn cancel(&self);

    /// Queue one utterance in `lang`.
    fn speak(&self, text: &str, lang: &str);
}

/// Speaks only while reader mode is active and keeps at most one utterance in flight.
///
/// The active flag lives in a `Cell` so the engine can be shared by `Rc`
/// between the widget and every narration listener on the page.
#[derive(Debug)]
pub struct NarrationEngine<N> {
    synth: N,
    locale: String,
    active: Cell<bool>,
}

impl<N: SpeechSynth> NarrationEngine<N> {
    pub fn new(synth: N, locale: impl Into<String>) -> Self {
        Self {
            synth,
            locale: locale.into(),
            active: Cell::new(false),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Arm or disarm speech. Disarming interrupts anything in flight.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
        if !active {
            self.cancel();
        }
    }

    /// Speak `text`, cutting off whatever was speaking before.
    pub fn speak(&self, text: &str) {
        let text = text.trim();
        if !self.active.get() || text.is_empty() || !self.synth.is_available() {
            return;
        }
        if self.synth.is_busy() {
            self.synth.cancel();
        }
        log::debug!("narrating {} chars", text.chars().count());
        self.synth.speak(text, &self.locale);
    }

    pub fn cancel(&self) {
        if self.synth.is_available() && self.synth.is_busy() {
            self.synth.cancel();
        }
    }

    #[must_use]
    pub const fn synth(&self) -> &N {
        &self.synth
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}
