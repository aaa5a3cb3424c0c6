//! `web-sys` implementations of every capability, and the WASM entry point.
//!
//! ARCHITECTURE
//! ============
//! The components only see the traits in [`crate::dom`], [`crate::events`],
//! [`crate::observe`] and [`crate::platform`]. This module is the single place
//! that touches the real browser: it adapts `web_sys` handles to those traits,
//! owns the JS closures backing listeners and observers, and keeps the mounted
//! page alive in a thread-local for the lifetime of the document.
//!
//! DOM calls that throw are logged at `warn` and otherwise ignored; a broken
//! element never takes the rest of the page down with it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{
    HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, ScrollBehavior, ScrollToOptions,
};

use crate::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::dom::{Document, Element};
use crate::error::PageError;
use crate::events::{DomEvent, EventBus, EventKind, Handler, ListenTarget, Subscription};
use crate::observe::{IntersectionCallback, IntersectionEntry, IntersectionWatcher, Unobserve, WatchOptions};
use crate::page::{self, MountedPage, Services};
use crate::platform::{Clock, PreferenceStore, Scheduler, Viewport};

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn js_error(err: &JsValue) -> PageError {
    PageError::Js(describe(err))
}

// =============================================================================
// ELEMENTS
// =============================================================================

/// A live DOM element.
#[derive(Debug, Clone)]
pub struct WebElement(pub web_sys::Element);

fn collect_elements(list: &NodeList) -> Vec<WebElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<web_sys::Element>().cloned())
        .map(WebElement)
        .collect()
}

impl Element for WebElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            log::warn!("add class {class:?} failed: {}", describe(&err));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            log::warn!("remove class {class:?} failed: {}", describe(&err));
        }
    }

    fn toggle_class(&self, class: &str) -> bool {
        match self.0.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                log::warn!("toggle class {class:?} failed: {}", describe(&err));
                self.has_class(class)
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            log::warn!("set attribute {name:?} failed: {}", describe(&err));
        }
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.0.dyn_ref::<HtmlElement>() else {
            log::debug!("set style {property:?} skipped: not an HTML element");
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            log::warn!("set style {property:?} failed: {}", describe(&err));
        }
    }

    fn append_child(&self, child: &Self) {
        if let Err(err) = self.0.append_child(&child.0) {
            log::warn!("append child failed: {}", describe(&err));
        }
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(other.0.as_ref()))
    }

    fn query(&self, selector: &str) -> Option<Self> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(err) => {
                log::warn!("query {selector:?} failed: {}", describe(&err));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => collect_elements(&list),
            Err(err) => {
                log::warn!("query all {selector:?} failed: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        self.0.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn reset(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }
}

/// The live document.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn query(&self, selector: &str) -> Option<WebElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(err) => {
                log::warn!("query {selector:?} failed: {}", describe(&err));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<WebElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => collect_elements(&list),
            Err(err) => {
                log::warn!("query all {selector:?} failed: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn body(&self) -> Option<WebElement> {
        self.document.body().map(|body| WebElement(body.into()))
    }

    fn create_element(&self, tag: &str) -> Result<WebElement, PageError> {
        self.document.create_element(tag).map(WebElement).map_err(|err| js_error(&err))
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Listener registration on real event targets.
pub struct WebEventBus {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebEventBus {
    #[must_use]
    pub fn new(window: web_sys::Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }
}

impl EventBus<WebElement> for WebEventBus {
    fn listen(&self, target: ListenTarget<WebElement>, kind: EventKind, mut handler: Handler<WebElement>) -> Subscription {
        let event_target: web_sys::EventTarget = match target {
            ListenTarget::Element(el) => el.0.into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Window => self.window.clone().into(),
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let target =
                event.target().and_then(|t| t.dyn_ref::<web_sys::Element>().cloned()).map(WebElement);
            let dom_event = DomEvent::new(kind, target);
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });

        if let Err(err) = event_target.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
        {
            log::warn!("adding {kind} listener failed: {}", describe(&err));
            return Subscription::empty();
        }

        Subscription::new(move || {
            if let Err(err) =
                event_target.remove_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            {
                log::warn!("removing {kind} listener failed: {}", describe(&err));
            }
            drop(closure);
        })
    }
}

// =============================================================================
// OBSERVATION
// =============================================================================

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct ObserverHandle<'a>(&'a IntersectionObserver);

impl Unobserve<WebElement> for ObserverHandle<'_> {
    fn unobserve(&self, target: &WebElement) {
        self.0.unobserve(&target.0);
    }
}

/// `IntersectionObserver`-backed watcher. Owns its observers and their
/// callbacks; dropping it disconnects them.
pub struct WebWatcher {
    window: web_sys::Window,
    observers: RefCell<Vec<(IntersectionObserver, ObserverClosure)>>,
}

impl WebWatcher {
    #[must_use]
    pub fn new(window: web_sys::Window) -> Self {
        Self { window, observers: RefCell::new(Vec::new()) }
    }

    /// Stop every observer created by this watcher.
    pub fn disconnect(&self) {
        for (observer, _) in self.observers.borrow_mut().drain(..) {
            observer.disconnect();
        }
    }
}

impl Drop for WebWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl IntersectionWatcher<WebElement> for WebWatcher {
    fn supported(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }

    fn watch(&self, options: &WatchOptions, targets: &[WebElement], mut callback: IntersectionCallback<WebElement>) -> bool {
        let closure = ObserverClosure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let batch: Vec<IntersectionEntry<WebElement>> = entries
                .iter()
                .map(|value| {
                    let entry: IntersectionObserverEntry = value.unchecked_into();
                    IntersectionEntry {
                        target: WebElement(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    }
                })
                .collect();
            callback(&batch, &ObserverHandle(&observer));
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(err) => {
                log::warn!("creating IntersectionObserver failed: {}", describe(&err));
                return false;
            }
        };
        for target in targets {
            observer.observe(&target.0);
        }
        self.observers.borrow_mut().push((observer, closure));
        true
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// `localStorage` for the page's origin.
pub struct WebStorage {
    window: web_sys::Window,
}

impl WebStorage {
    #[must_use]
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<web_sys::Storage, PageError> {
        self.window
            .local_storage()
            .map_err(|err| PageError::Storage(describe(&err)))?
            .ok_or(PageError::StorageUnavailable)
    }
}

impl PreferenceStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PageError> {
        self.storage()?.get_item(key).map_err(|err| PageError::Storage(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.storage()?.set_item(key, value).map_err(|err| PageError::Storage(describe(&err)))
    }
}

pub struct WebViewport {
    window: web_sys::Window,
}

impl WebViewport {
    #[must_use]
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_top(0.0);
        options.set_left(0.0);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `setTimeout`-backed scheduler. Timers are detached and run to completion.
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

pub struct WebClock;

impl Clock for WebClock {
    fn current_year(&self) -> u32 {
        js_sys::Date::new_0().get_full_year()
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

struct LivePage {
    mounted: MountedPage,
    watcher: WebWatcher,
}

thread_local! {
    static PAGE: RefCell<Option<LivePage>> = const { RefCell::new(None) };
}

/// Read overrides from the embedded JSON config element, if any.
fn load_config(doc: &WebDocument) -> PageConfig {
    let Some(el) = doc.by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&el.text()) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            PageConfig::default()
        }
    }
}

fn boot() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::MissingWindow)?;
    let document = window.document().ok_or(PageError::MissingDocument)?;

    let doc = WebDocument::new(document.clone());
    let config = load_config(&doc);
    let events = WebEventBus::new(window.clone(), document);
    let watcher = WebWatcher::new(window.clone());

    let mounted = {
        let services = Services {
            document: &doc,
            events: &events,
            watcher: &watcher,
            clock: &WebClock,
            store: Rc::new(WebStorage::new(window.clone())),
            viewport: Rc::new(WebViewport::new(window)),
            scheduler: Rc::new(WebScheduler),
        };
        page::mount(&config, &services)
    };

    teardown();
    PAGE.with(|slot| *slot.borrow_mut() = Some(LivePage { mounted, watcher }));
    Ok(())
}

/// Remove every listener and observer registered by [`start`].
#[wasm_bindgen]
pub fn teardown() {
    let Some(live) = PAGE.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    log::info!("tearing down {} listeners", live.mounted.listener_count());
    live.watcher.disconnect();
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialised");
    }

    if let Err(err) = boot() {
        log::error!("page script failed to start: {err}");
    }
}
