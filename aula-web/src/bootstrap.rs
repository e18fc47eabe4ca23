use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use aula_core::{AccessWidget, NarrationEngine, WidgetConfig};
use web_sys::Document;

use crate::a11y::{DomPage, selectors};
use crate::speech::BrowserSpeech;
use crate::storage::BrowserStore;
use crate::{controls, dom, paths};

pub type BrowserWidget = AccessWidget<BrowserStore, DomPage, BrowserSpeech>;

/// Page-supplied configuration, falling back to the embedded defaults.
#[must_use]
pub fn load_config(document: &Document) -> WidgetConfig {
    let Some(json) = document
        .get_element_by_id(selectors::CONFIG)
        .and_then(|el| el.text_content())
    else {
        return WidgetConfig::default();
    };
    config_from_override(&json)
}

fn config_from_override(json: &str) -> WidgetConfig {
    WidgetConfig::from_json(json)
        .with_context(|| format!("#{} block rejected", selectors::CONFIG))
        .unwrap_or_else(|err| {
            log::warn!("{err:#}; using defaults");
            WidgetConfig::default()
        })
}

/// Build the widget, apply saved preferences and wire the page controls.
///
/// # Errors
///
/// Returns an error when there is no document to attach to.
pub fn boot() -> anyhow::Result<Rc<RefCell<BrowserWidget>>> {
    let document = dom::document().ok_or_else(|| anyhow!("document unavailable"))?;
    let config = load_config(&document);
    let narrator = Rc::new(NarrationEngine::new(
        BrowserSpeech::detect(),
        config.locale.clone(),
    ));
    let store = BrowserStore::detect();
    if !store.is_durable() {
        log::info!("preferences are not durable in this browser session");
    }
    let page = DomPage::new(document.clone(), Rc::clone(&narrator));
    let depth = paths::current_depth();

    let mut widget = AccessWidget::new(config, store, page, narrator, depth);
    widget.hydrate();

    let widget = Rc::new(RefCell::new(widget));
    controls::wire(&document, &widget);
    log::debug!("accessibility widget ready at depth {depth}");
    Ok(widget)
}
