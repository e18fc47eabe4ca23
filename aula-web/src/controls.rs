//! Click and submit handlers for the widget controls.

use std::cell::RefCell;
use std::rc::Rc;

use aula_core::PendingNavigation;
use web_sys::{Document, Element, Event};

use crate::a11y::selectors;
use crate::bootstrap::BrowserWidget;
use crate::dom;

/// Run `action` against the widget unless a handler is already holding it.
fn with_widget<R>(
    widget: &Rc<RefCell<BrowserWidget>>,
    action: impl FnOnce(&mut BrowserWidget) -> R,
) -> Option<R> {
    match widget.try_borrow_mut() {
        Ok(mut guard) => Some(action(&mut *guard)),
        Err(_) => {
            log::warn!("widget busy; event dropped");
            None
        }
    }
}

fn on(element: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    if let Err(err) = dom::listen(element, event, handler) {
        log::warn!("could not wire {event}: {}", dom::js_error_message(&err));
    }
}

/// Follow a navigation the widget asked for, after its delay.
pub fn schedule(pending: PendingNavigation) {
    let go = move |href: &str| {
        if let Err(err) = dom::navigate(href) {
            log::error!("navigation to {href} failed: {}", dom::js_error_message(&err));
        }
    };
    if pending.delay_ms == 0 {
        go(&pending.href);
        return;
    }
    let delay = i32::try_from(pending.delay_ms).unwrap_or(i32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = dom::sleep_ms(delay).await {
            log::warn!("navigation delay interrupted: {}", dom::js_error_message(&err));
        }
        go(&pending.href);
    });
}

/// Attach handlers to whichever controls this page carries.
pub fn wire(document: &Document, widget: &Rc<RefCell<BrowserWidget>>) {
    if let Some(toggle) = document.get_element_by_id(selectors::CONTRAST_TOGGLE) {
        let widget = Rc::clone(widget);
        on(&toggle, "click", move |_| {
            with_widget(&widget, BrowserWidget::toggle_contrast);
        });
    }

    if let Some(toggle) = document.get_element_by_id(selectors::FONT_TOGGLE) {
        let widget = Rc::clone(widget);
        on(&toggle, "click", move |_| {
            with_widget(&widget, BrowserWidget::cycle_font_scale);
        });
    }

    if let Some(toggle) = document.get_element_by_id(selectors::READER_TOGGLE) {
        let widget = Rc::clone(widget);
        on(&toggle, "click", move |_| {
            with_widget(&widget, BrowserWidget::toggle_reader);
        });
    }

    if let Some(reset) = document.get_element_by_id(selectors::RESET_BUTTON) {
        let widget = Rc::clone(widget);
        on(&reset, "click", move |_| {
            with_widget(&widget, BrowserWidget::reset);
        });
    }

    for button in dom::query_all(document, selectors::PROFILE_BUTTONS) {
        let widget = Rc::clone(widget);
        let source = button.clone();
        on(&button, "click", move |_| {
            let raw = source.get_attribute("data-profile").unwrap_or_default();
            let pending = with_widget(&widget, |w| w.select_profile_label(&raw)).flatten();
            if let Some(pending) = pending {
                schedule(pending);
            }
        });
    }

    if let Ok(Some(form)) = document.query_selector(selectors::TEACHER_FORM) {
        let widget = Rc::clone(widget);
        on(&form, "submit", move |event| {
            event.prevent_default();
            if let Some(pending) = with_widget(&widget, BrowserWidget::teacher_login) {
                schedule(pending);
            }
        });
    }

    if let Some(logout) = document.get_element_by_id(selectors::NAV_LOGOUT) {
        let widget = Rc::clone(widget);
        on(&logout, "click", move |event| {
            event.prevent_default();
            if let Some(pending) = with_widget(&widget, BrowserWidget::logout) {
                schedule(pending);
            }
        });
    }
}
