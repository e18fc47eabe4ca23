//! Focus and hover narration listeners.

use std::rc::Rc;

use aula_core::{
    FocusNarrationBinder, NarrationCue, NarrationEngine, NarrationTargets, SpeechSynth,
    utterance_text,
};
use web_sys::{Document, Element};

use crate::dom;

/// Text an element should announce: label or text, plus its `aria-describedby` targets.
#[must_use]
pub fn element_utterance(
    document: &Document,
    element: &Element,
    detail_prefix: &str,
) -> Option<String> {
    let label = element.get_attribute("aria-label");
    let text = element.text_content().unwrap_or_default();
    let described = element.get_attribute("aria-describedby").map(|ids| {
        ids.split_whitespace()
            .filter_map(|id| document.get_element_by_id(id))
            .filter_map(|node| node.text_content())
            .collect::<Vec<_>>()
            .join(" ")
    });
    utterance_text(label.as_deref(), &text, described.as_deref(), detail_prefix)
}

/// Wire every element matching the target selector. Returns how many were wired.
pub fn attach<N: SpeechSynth + 'static>(
    document: &Document,
    narrator: &Rc<NarrationEngine<N>>,
    targets: NarrationTargets,
    detail_prefix: &str,
) -> usize {
    let elements = dom::query_all(document, targets.selector());
    for element in &elements {
        for event in targets.events() {
            let narrator = Rc::clone(narrator);
            let result = if event.is_enter() {
                let document = document.clone();
                let source = element.clone();
                let prefix = detail_prefix.to_owned();
                dom::listen(element, event.dom_name(), move |_| {
                    if let Some(text) = element_utterance(&document, &source, &prefix) {
                        FocusNarrationBinder::dispatch(&narrator, NarrationCue::Enter(text));
                    }
                })
            } else {
                dom::listen(element, event.dom_name(), move |_| {
                    FocusNarrationBinder::dispatch(&narrator, NarrationCue::Exit);
                })
            };
            if let Err(err) = result {
                log::warn!(
                    "could not attach {} narration: {}",
                    event.dom_name(),
                    dom::js_error_message(&err)
                );
            }
        }
    }
    log::debug!("narration wired on {} elements", elements.len());
    elements.len()
}
