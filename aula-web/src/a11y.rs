// Accessibility surface of the rendered page

use std::rc::Rc;

use aula_core::{NarrationEngine, NarrationTargets, NavView, PageFlag, PageSurface};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::speech::BrowserSpeech;

/// Element ids and selectors the site markup exposes to the widget.
pub mod selectors {
    pub const CONTRAST_TOGGLE: &str = "contrast-toggle";
    pub const FONT_TOGGLE: &str = "font-toggle";
    pub const READER_TOGGLE: &str = "reader-toggle";
    pub const RESET_BUTTON: &str = "a11y-reset";
    pub const WELCOME: &str = "welcome-message";
    pub const NAV_LOGIN: &str = "nav-login";
    pub const NAV_LOGOUT: &str = "nav-logout";
    pub const NAV_DASHBOARD: &str = "nav-dashboard";
    pub const CONFIG: &str = "a11y-config";
    pub const PROFILE_SELECTOR: &str = ".profile-selector";
    pub const PROFILE_BUTTONS: &str = ".profile-selector button";
    pub const FEEDBACK: &str = ".login-feedback-message";
    pub const TEACHER_FORM: &str = ".simple-login-form";
}

/// Class shown on the welcome banner while visible.
const ACTIVE_CLASS: &str = "active";
const FEEDBACK_CLASS: &str = "login-feedback-message";

/// The live document. Missing elements are skipped without complaint.
pub struct DomPage {
    document: Document,
    narrator: Rc<NarrationEngine<BrowserSpeech>>,
}

impl DomPage {
    #[must_use]
    pub fn new(document: Document, narrator: Rc<NarrationEngine<BrowserSpeech>>) -> Self {
        Self { document, narrator }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self
            .by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            el.set_hidden(hidden);
        }
    }

    fn feedback_region(&self) -> Option<Element> {
        if let Ok(Some(existing)) = self.document.query_selector(selectors::FEEDBACK) {
            return Some(existing);
        }
        let region = self.document.create_element("div").ok()?;
        region.set_class_name(FEEDBACK_CLASS);
        let _ = region.set_attribute("role", "status");
        let _ = region.set_attribute("aria-live", "polite");
        let parent: Element = match self.document.query_selector(selectors::PROFILE_SELECTOR) {
            Ok(Some(selector)) => selector,
            _ => self.document.body()?.into(),
        };
        parent.append_child(&region).ok()?;
        Some(region)
    }
}

impl PageSurface for DomPage {
    fn set_flag(&mut self, flag: PageFlag, on: bool) {
        if let Some(body) = self.document.body() {
            let _ = body
                .class_list()
                .toggle_with_force(flag.class_name(), on);
        }
    }

    fn set_font_size(&mut self, css_value: &str) {
        if let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = root.style().set_property("font-size", css_value);
        }
    }

    fn set_reader_label(&mut self, label: &str) {
        if let Some(toggle) = self.by_id(selectors::READER_TOGGLE) {
            toggle.set_text_content(Some(label));
        }
    }

    fn attach_narration(&mut self, targets: NarrationTargets, detail_prefix: &str) {
        crate::listeners::attach(&self.document, &self.narrator, targets, detail_prefix);
    }

    fn show_welcome(&mut self, message: &str, dismiss_after_ms: u32) -> bool {
        let Some(banner) = self.by_id(selectors::WELCOME) else {
            return false;
        };
        banner.set_text_content(Some(message));
        let _ = banner.class_list().add_1(ACTIVE_CLASS);
        let delay = i32::try_from(dismiss_after_ms).unwrap_or(i32::MAX);
        wasm_bindgen_futures::spawn_local(async move {
            match dom::sleep_ms(delay).await {
                Ok(()) => {
                    let _ = banner.class_list().remove_1(ACTIVE_CLASS);
                }
                Err(err) => {
                    log::warn!("welcome dismissal skipped: {}", dom::js_error_message(&err));
                }
            }
        });
        true
    }

    fn show_feedback(&mut self, message: &str) {
        match self.feedback_region() {
            Some(region) => region.set_text_content(Some(message)),
            None => log::warn!("no place to show login feedback"),
        }
    }

    fn apply_nav(&mut self, view: &NavView) {
        self.set_hidden(selectors::NAV_LOGIN, !view.show_login);
        self.set_hidden(selectors::NAV_LOGOUT, !view.show_logout);
        let Some(entry) = self.by_id(selectors::NAV_DASHBOARD) else {
            return;
        };
        let link = if entry.tag_name().eq_ignore_ascii_case("a") {
            Some(entry)
        } else {
            entry.query_selector("a").ok().flatten()
        };
        if let Some(link) = link {
            let _ = link.set_attribute("href", &view.dashboard_href);
            link.set_text_content(Some(&view.dashboard_label));
        }
    }
}
