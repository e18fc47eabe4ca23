#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use aula_core::{
    NarrationEngine, NarrationTargets, NavView, PageFlag, PageSurface, PreferenceStore,
    SpeechSynth,
};
use aula_web::a11y::{DomPage, selectors};
use aula_web::dom;
use aula_web::listeners::{self, element_utterance};
use aula_web::speech::BrowserSpeech;
use aula_web::storage::BrowserStore;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> web_sys::Document {
    let doc = dom::document().expect("document");
    doc.body().expect("body").set_inner_html(html);
    doc
}

fn page(doc: &web_sys::Document) -> DomPage {
    let narrator = Rc::new(NarrationEngine::new(BrowserSpeech::detect(), "es-ES"));
    DomPage::new(doc.clone(), narrator)
}

#[derive(Default)]
struct Speaker {
    in_flight: RefCell<Vec<String>>,
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

fn armed_speaker() -> Rc<NarrationEngine<Speaker>> {
    let narrator = Rc::new(NarrationEngine::new(Speaker::default(), "es-ES"));
    narrator.set_active(true);
    narrator
}

fn fire(element: &Element, name: &str) {
    let event = Event::new(name).expect("event");
    element.dispatch_event(&event).expect("dispatch");
}

#[wasm_bindgen_test]
fn focus_speaks_and_blur_cancels() {
    let doc = fixture(r#"<button id="go">Mis clases</button><p id="intro">Bienvenida</p>"#);
    let narrator = armed_speaker();
    let wired = listeners::attach(&doc, &narrator, NarrationTargets::Interaction, " - ");
    assert_eq!(wired, 1);

    let button = doc.get_element_by_id("go").expect("button");
    fire(&button, "focus");
    assert_eq!(
        *narrator.synth().in_flight.borrow(),
        vec!["Mis clases".to_owned()]
    );
    fire(&button, "blur");
    assert!(narrator.synth().in_flight.borrow().is_empty());

    let intro = doc.get_element_by_id("intro").expect("paragraph");
    fire(&intro, "mouseenter");
    assert!(narrator.synth().in_flight.borrow().is_empty());
}

#[wasm_bindgen_test]
fn content_mode_narrates_on_hover() {
    let doc = fixture(r#"<p id="intro">Bienvenida al aula</p>"#);
    let narrator = armed_speaker();
    listeners::attach(&doc, &narrator, NarrationTargets::Content, " - ");

    let intro = doc.get_element_by_id("intro").expect("paragraph");
    fire(&intro, "mouseenter");
    assert_eq!(
        *narrator.synth().in_flight.borrow(),
        vec!["Bienvenida al aula".to_owned()]
    );
    fire(&intro, "mouseleave");
    assert!(narrator.synth().in_flight.borrow().is_empty());
}

#[wasm_bindgen_test]
fn flags_toggle_body_classes() {
    let doc = fixture("");
    let mut page = page(&doc);
    page.set_flag(PageFlag::HighContrast, true);
    page.set_flag(PageFlag::Subtitles, true);
    let body = doc.body().expect("body");
    assert!(body.class_list().contains("high-contrast"));
    assert!(body.class_list().contains("subtitles-on"));
    page.set_flag(PageFlag::HighContrast, false);
    assert!(!body.class_list().contains("high-contrast"));
}

#[wasm_bindgen_test]
fn font_size_lands_on_document_root() {
    let doc = fixture("");
    page(&doc).set_font_size("120%");
    let root: HtmlElement = doc
        .document_element()
        .expect("root")
        .dyn_into()
        .expect("html element");
    assert_eq!(
        root.style().get_property_value("font-size").unwrap_or_default(),
        "120%"
    );
    page(&doc).set_font_size("");
}

#[wasm_bindgen_test]
fn nav_view_rewrites_dashboard_link() {
    let doc = fixture(
        r##"<ul>
            <li id="nav-login"><a href="pages/login.html">Acceso</a></li>
            <li id="nav-logout" hidden><a href="#">Salir</a></li>
            <li id="nav-dashboard"><a href="pages/login.html">Acceso</a></li>
        </ul>"##,
    );
    page(&doc).apply_nav(&NavView {
        show_login: false,
        show_logout: true,
        dashboard_label: "Mi Panel".into(),
        dashboard_href: "../pages/dashboard.html".into(),
    });
    let hidden = |id: &str| {
        doc.get_element_by_id(id)
            .expect("nav entry")
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .hidden()
    };
    assert!(hidden(selectors::NAV_LOGIN));
    assert!(!hidden(selectors::NAV_LOGOUT));
    let link = doc
        .query_selector("#nav-dashboard a")
        .expect("query")
        .expect("link");
    assert_eq!(
        link.get_attribute("href").as_deref(),
        Some("../pages/dashboard.html")
    );
    assert_eq!(link.text_content().as_deref(), Some("Mi Panel"));
}

#[wasm_bindgen_test]
fn welcome_requires_a_banner() {
    let doc = fixture("");
    assert!(!page(&doc).show_welcome("Hola", 10));

    let doc = fixture(r#"<div id="welcome-message"></div>"#);
    assert!(page(&doc).show_welcome("¡Bienvenido!", 10_000));
    let banner = doc.get_element_by_id(selectors::WELCOME).expect("banner");
    assert_eq!(banner.text_content().as_deref(), Some("¡Bienvenido!"));
    assert!(banner.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn feedback_region_is_created_inside_selector() {
    let doc = fixture(r#"<div class="profile-selector"><button data-profile="visual">Visual</button></div>"#);
    let mut page = page(&doc);
    page.show_feedback("Acceso exitoso.");
    page.show_feedback("Acceso exitoso otra vez.");
    let regions = doc
        .query_selector_all(".profile-selector .login-feedback-message")
        .expect("query");
    assert_eq!(regions.length(), 1);
    assert_eq!(
        regions.get(0).and_then(|n| n.text_content()).as_deref(),
        Some("Acceso exitoso otra vez.")
    );
}

#[wasm_bindgen_test]
fn utterance_reads_label_and_description() {
    let doc = fixture(
        r#"<button id="go" aria-describedby="hint extra">Ir</button>
           <span id="hint">Abre el módulo</span><span id="extra">de clase</span>"#,
    );
    let button = doc.get_element_by_id("go").expect("button");
    assert_eq!(
        element_utterance(&doc, &button, ". Información adicional: ").as_deref(),
        Some("Ir. Información adicional: Abre el módulo de clase")
    );
    let _ = button.set_attribute("aria-label", "Ir al módulo");
    assert!(
        element_utterance(&doc, &button, " - ")
            .is_some_and(|text| text.starts_with("Ir al módulo - "))
    );
}

#[wasm_bindgen_test]
fn browser_store_round_trips() {
    let store = BrowserStore::detect();
    store.set("aula.test", "enabled").expect("set");
    assert_eq!(store.get("aula.test").expect("get").as_deref(), Some("enabled"));
    store.remove("aula.test").expect("remove");
    assert_eq!(store.get("aula.test").expect("get"), None);
}
