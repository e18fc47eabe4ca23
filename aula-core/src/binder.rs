//! Which elements narrate, on which events, and what they say.

use serde::{Deserialize, Serialize};

use crate::narration::{NarrationEngine, SpeechSynth};

/// Alternative narration configurations. A deployment picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationTargets {
    /// Interactive controls, announced on keyboard focus.
    Interaction,
    /// Content blocks and controls, announced on focus and on hover.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrationEvent {
    Focus,
    Blur,
    PointerEnter,
    PointerLeave,
}

impl NarrationEvent {
    /// DOM event type.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }

    /// Entering events start narration; leaving events interrupt it.
    #[must_use]
    pub const fn is_enter(self) -> bool {
        matches!(self, Self::Focus | Self::PointerEnter)
    }
}

impl NarrationTargets {
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Interaction => {
                r#"a:not(.disabled), button:not(.disabled), [role="button"], input[type="submit"]"#
            }
            Self::Content => "h1, h2, h3, h4, h5, h6, p, a, button, li",
        }
    }

    #[must_use]
    pub const fn events(self) -> &'static [NarrationEvent] {
        match self {
            Self::Interaction => &[NarrationEvent::Focus, NarrationEvent::Blur],
            Self::Content => &[
                NarrationEvent::Focus,
                NarrationEvent::Blur,
                NarrationEvent::PointerEnter,
                NarrationEvent::PointerLeave,
            ],
        }
    }
}

/// What a listener asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationCue {
    Enter(String),
    Exit,
}

/// Build the utterance for an element.
///
/// The accessible label wins over visible text; a described-by target is
/// appended after `detail_prefix`. Returns `None` when nothing is speakable.
#[must_use]
pub fn utterance_text(
    label: Option<&str>,
    text: &str,
    described_by: Option<&str>,
    detail_prefix: &str,
) -> Option<String> {
    let primary = label
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| collapse_whitespace(text));
    let detail = described_by
        .map(collapse_whitespace)
        .filter(|d| !d.is_empty());

    let utterance = match detail {
        Some(detail) => format!("{primary}{detail_prefix}{detail}"),
        None => primary,
    };
    let utterance = utterance.trim();
    (!utterance.is_empty()).then(|| utterance.to_owned())
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Attaches narration listeners at most once per page lifetime.
#[derive(Debug, Clone)]
pub struct FocusNarrationBinder {
    targets: NarrationTargets,
    attached: bool,
}

impl FocusNarrationBinder {
    #[must_use]
    pub const fn new(targets: NarrationTargets) -> Self {
        Self {
            targets,
            attached: false,
        }
    }

    #[must_use]
    pub const fn targets(&self) -> NarrationTargets {
        self.targets
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Run `attach` the first time only. Returns whether it ran.
    pub fn ensure_attached(&mut self, attach: impl FnOnce(NarrationTargets)) -> bool {
        if self.attached {
            return false;
        }
        attach(self.targets);
        self.attached = true;
        log::debug!("narration listeners attached for {:?}", self.targets);
        true
    }

    /// Route a listener cue to the engine.
    pub fn dispatch<N: SpeechSynth>(engine: &NarrationEngine<N>, cue: NarrationCue) {
        match cue {
            NarrationCue::Enter(text) => engine.speak(&text),
            NarrationCue::Exit => engine.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = ". Información adicional: ";

    #[test]
    fn label_wins_over_text() {
        assert_eq!(
            utterance_text(Some("Cerrar sesión"), "X", None, PREFIX).as_deref(),
            Some("Cerrar sesión")
        );
    }

    #[test]
    fn blank_label_falls_back_to_collapsed_text() {
        assert_eq!(
            utterance_text(Some("  "), "\n  Ir a\n   clases ", None, PREFIX).as_deref(),
            Some("Ir a clases")
        );
    }

    #[test]
    fn described_by_is_appended() {
        assert_eq!(
            utterance_text(None, "Enviar", Some("Guarda tu respuesta"), PREFIX).as_deref(),
            Some("Enviar. Información adicional: Guarda tu respuesta")
        );
    }

    #[test]
    fn nothing_speakable_yields_none() {
        assert_eq!(utterance_text(None, "   ", Some(" "), PREFIX), None);
    }

    #[test]
    fn binder_attaches_once() {
        let mut binder = FocusNarrationBinder::new(NarrationTargets::Interaction);
        let mut calls = 0;
        assert!(binder.ensure_attached(|_| calls += 1));
        assert!(!binder.ensure_attached(|_| calls += 1));
        assert_eq!(calls, 1);
        assert!(binder.is_attached());
    }

    #[derive(Default)]
    struct Speaker {
        in_flight: std::cell::RefCell<Vec<String>>,
    }

    impl SpeechSynth for Speaker {
        fn is_available(&self) -> bool {
            true
        }
        fn is_busy(&self) -> bool {
            !self.in_flight.borrow().is_empty()
        }
        fn cancel(&self) {
            self.in_flight.borrow_mut().clear();
        }
        fn speak(&self, text: &str, _lang: &str) {
            self.in_flight.borrow_mut().push(text.to_owned());
        }
    }

    #[test]
    fn leaving_an_element_silences_it() {
        let engine = NarrationEngine::new(Speaker::default(), "es-ES");
        engine.set_active(true);
        FocusNarrationBinder::dispatch(&engine, NarrationCue::Enter("Mis clases".into()));
        assert_eq!(*engine.synth().in_flight.borrow(), vec!["Mis clases".to_owned()]);
        FocusNarrationBinder::dispatch(&engine, NarrationCue::Exit);
        assert!(engine.synth().in_flight.borrow().is_empty());
    }

    #[test]
    fn moving_focus_replaces_the_previous_utterance() {
        let engine = NarrationEngine::new(Speaker::default(), "es-ES");
        engine.set_active(true);
        FocusNarrationBinder::dispatch(&engine, NarrationCue::Enter("Inicio".into()));
        FocusNarrationBinder::dispatch(&engine, NarrationCue::Enter("Salir".into()));
        assert_eq!(*engine.synth().in_flight.borrow(), vec!["Salir".to_owned()]);
    }

    #[test]
    fn disarmed_engine_ignores_cues() {
        let engine = NarrationEngine::new(Speaker::default(), "es-ES");
        FocusNarrationBinder::dispatch(&engine, NarrationCue::Enter("Inicio".into()));
        assert!(engine.synth().in_flight.borrow().is_empty());
    }

    #[test]
    fn content_targets_listen_for_hover() {
        assert!(
            NarrationTargets::Content
                .events()
                .contains(&NarrationEvent::PointerEnter)
        );
        assert!(
            !NarrationTargets::Interaction
                .events()
                .contains(&NarrationEvent::PointerLeave)
        );
        assert!(NarrationTargets::Interaction.selector().contains("role=\"button\""));
        assert_eq!(NarrationEvent::PointerLeave.dom_name(), "mouseleave");
        assert!(!NarrationEvent::Blur.is_enter());
    }
}
