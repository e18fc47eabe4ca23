#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use aula_core::{
    AccessWidget, MemoryStore, NarrationEngine, NarrationTargets, NavView, PageFlag, PageSurface,
    SpeechSynth, WidgetConfig,
};

/// Page double that records what the widget rendered.
#[derive(Debug, Default)]
pub struct RecordingPage {
    pub flags: BTreeMap<PageFlag, bool>,
    pub font_size: Option<String>,
    pub reader_label: Option<String>,
    pub narration_attached: Vec<NarrationTargets>,
    pub has_welcome_region: bool,
    pub welcome: Option<(String, u32)>,
    pub feedback: Option<String>,
    pub nav: Option<NavView>,
}

impl RecordingPage {
    pub fn with_welcome_region() -> Self {
        Self {
            has_welcome_region: true,
            ..Self::default()
        }
    }

    pub fn flag(&self, flag: PageFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }
}

impl PageSurface for RecordingPage {
    fn set_flag(&mut self, flag: PageFlag, on: bool) {
        self.flags.insert(flag, on);
    }

    fn set_font_size(&mut self, css_value: &str) {
        self.font_size = Some(css_value.to_owned());
    }

    fn set_reader_label(&mut self, label: &str) {
        self.reader_label = Some(label.to_owned());
    }

    fn attach_narration(&mut self, targets: NarrationTargets, _detail_prefix: &str) {
        self.narration_attached.push(targets);
    }

    fn show_welcome(&mut self, message: &str, dismiss_after_ms: u32) -> bool {
        if self.has_welcome_region {
            self.welcome = Some((message.to_owned(), dismiss_after_ms));
        }
        self.has_welcome_region
    }

    fn show_feedback(&mut self, message: &str) {
        self.feedback = Some(message.to_owned());
    }

    fn apply_nav(&mut self, view: &NavView) {
        self.nav = Some(view.clone());
    }
}

/// Speech double; an utterance stays in flight until cancelled.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    pub in_flight: RefCell<Vec<String>>,
    pub spoken: RefCell<Vec<String>>,
    pub cancels: Cell<usize>,
}

impl SpeechSynth for RecordingSpeech {
    fn is_available(&self) -> bool {
        true
    }

    fn is_busy(&self) -> bool {
        !self.in_flight.borrow().is_empty()
    }

    fn cancel(&self) {
        self.in_flight.borrow_mut().clear();
        self.cancels.set(self.cancels.get() + 1);
    }

    fn speak(&self, text: &str, _lang: &str) {
        self.in_flight.borrow_mut().push(text.to_owned());
        self.spoken.borrow_mut().push(text.to_owned());
    }
}

pub type TestWidget = AccessWidget<MemoryStore, RecordingPage, RecordingSpeech>;

pub fn widget_with(store: MemoryStore, page: RecordingPage, depth: usize) -> TestWidget {
    let config = WidgetConfig::default();
    let narrator = Rc::new(NarrationEngine::new(
        RecordingSpeech::default(),
        config.locale.clone(),
    ));
    AccessWidget::new(config, store, page, narrator, depth)
}

pub fn hydrated(store: MemoryStore, page: RecordingPage, depth: usize) -> TestWidget {
    let mut widget = widget_with(store, page, depth);
    widget.hydrate();
    widget
}

/// Carry a widget's persisted entries into a fresh store, as a page reload would.
pub fn reload_store(widget: &TestWidget) -> MemoryStore {
    let snapshot = widget.store().snapshot();
    MemoryStore::with_entries(snapshot.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}
