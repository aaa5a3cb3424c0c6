//! In-memory capabilities for native tests.
//!
//! `StubElement` is a tiny element tree with enough of a selector matcher for
//! the markup contract (`#id`, `.class`, `tag`, `[attr]`, `[attr="value"]`).
//! `StubBus` records listeners and dispatches synthetic events with bubbling
//! from the target up through its ancestors and then to the document, which is
//! the path real click events take.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::dom::{Document, Element};
use crate::error::PageError;
use crate::events::{DomEvent, EventBus, EventKind, Handler, ListenTarget, Subscription};
use crate::observe::{IntersectionCallback, IntersectionEntry, IntersectionWatcher, Unobserve, WatchOptions};
use crate::platform::{Clock, PreferenceStore, Scheduler, Viewport};

// =============================================================================
// ELEMENTS
// =============================================================================

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    children: Vec<StubElement>,
    parent: Option<Weak<RefCell<Node>>>,
    value: Option<String>,
}

#[derive(Clone)]
pub struct StubElement(Rc<RefCell<Node>>);

impl std::fmt::Debug for StubElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("StubElement")
            .field("tag", &node.tag)
            .field("classes", &node.classes)
            .field("attributes", &node.attributes)
            .finish_non_exhaustive()
    }
}

impl PartialEq for StubElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl StubElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node { tag: tag.to_ascii_lowercase(), ..Node::default() })))
    }

    /// A form control (`input`/`textarea`) with a `name` and current value.
    pub fn field(tag: &str, name: &str, value: &str) -> Self {
        let el = Self::new(tag).with_attr("name", name);
        el.0.borrow_mut().value = Some(value.to_owned());
        el
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(self, child: &StubElement) -> Self {
        self.append_child(child);
        self
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_owned());
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn children(&self) -> Vec<StubElement> {
        self.0.borrow().children.clone()
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn parent(&self) -> Option<StubElement> {
        self.0.borrow().parent.as_ref().and_then(Weak::upgrade).map(StubElement)
    }

    fn descendants(&self, out: &mut Vec<StubElement>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        let node = self.0.borrow();
        if let Some(id) = selector.strip_prefix('#') {
            return node.attributes.get("id").is_some_and(|v| v == id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return node.classes.iter().any(|c| c == class);
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches('"').trim_matches('\'');
                    node.attributes.get(name.trim()).is_some_and(|v| v == value)
                }
                None => node.attributes.contains_key(inner.trim()),
            };
        }
        node.tag.eq_ignore_ascii_case(selector)
    }
}

impl Element for StubElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attributes.insert(name.to_owned(), value.to_owned());
    }

    fn text(&self) -> String {
        let node = self.0.borrow();
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&child.text());
        }
        out
    }

    fn set_text(&self, text: &str) {
        let mut node = self.0.borrow_mut();
        node.children.clear();
        node.text = text.to_owned();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.borrow_mut().styles.insert(property.to_owned(), value.to_owned());
    }

    fn append_child(&self, child: &Self) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(el) = cursor {
            if el == *self {
                return true;
            }
            cursor = el.parent();
        }
        false
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.into_iter().filter(|el| el.matches(selector)).collect()
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn reset(&self) {
        let mut all = Vec::new();
        self.descendants(&mut all);
        for el in all {
            let mut node = el.0.borrow_mut();
            if node.value.is_some() {
                node.value = Some(String::new());
            }
        }
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

pub struct StubDocument {
    root: StubElement,
    body: StubElement,
}

impl StubDocument {
    pub fn new() -> Self {
        let body = StubElement::new("body");
        let root = StubElement::new("html").with_child(&body);
        Self { root, body }
    }

    /// Append `el` to the body and return it.
    pub fn add(&self, el: StubElement) -> StubElement {
        self.body.append_child(&el);
        el
    }
}

impl Document for StubDocument {
    type Element = StubElement;

    fn by_id(&self, id: &str) -> Option<StubElement> {
        self.root.query(&format!("#{id}"))
    }

    fn query(&self, selector: &str) -> Option<StubElement> {
        self.root.query(selector)
    }

    fn query_all(&self, selector: &str) -> Vec<StubElement> {
        self.root.query_all(selector)
    }

    fn body(&self) -> Option<StubElement> {
        Some(self.body.clone())
    }

    fn create_element(&self, tag: &str) -> Result<StubElement, PageError> {
        if tag.is_empty() {
            return Err(PageError::Js("InvalidCharacterError".into()));
        }
        Ok(StubElement::new(tag))
    }
}

// =============================================================================
// EVENTS
// =============================================================================

struct Registration {
    target: ListenTarget<StubElement>,
    kind: EventKind,
    handler: Rc<RefCell<Handler<StubElement>>>,
    alive: Rc<Cell<bool>>,
}

#[derive(Default)]
pub struct StubBus {
    registrations: RefCell<Vec<Registration>>,
}

impl StubBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().iter().filter(|r| r.alive.get()).count()
    }

    /// Click `target`, bubbling through its ancestors to the document.
    pub fn click(&self, target: &StubElement) -> DomEvent<StubElement> {
        self.dispatch_bubbling(EventKind::Click, target)
    }

    pub fn submit(&self, form: &StubElement) -> DomEvent<StubElement> {
        self.dispatch_bubbling(EventKind::Submit, form)
    }

    pub fn scroll(&self) -> DomEvent<StubElement> {
        let event = DomEvent::new(EventKind::Scroll, None);
        for handler in self.handlers_for(EventKind::Scroll, |t| matches!(t, ListenTarget::Window)) {
            (handler.borrow_mut())(&event);
        }
        event
    }

    fn dispatch_bubbling(&self, kind: EventKind, target: &StubElement) -> DomEvent<StubElement> {
        let event = DomEvent::new(kind, Some(target.clone()));
        let mut cursor = Some(target.clone());
        while let Some(el) = cursor {
            for handler in self.handlers_for(kind, |t| matches!(t, ListenTarget::Element(e) if *e == el)) {
                (handler.borrow_mut())(&event);
            }
            cursor = el.parent();
        }
        for handler in self.handlers_for(kind, |t| matches!(t, ListenTarget::Document)) {
            (handler.borrow_mut())(&event);
        }
        event
    }

    fn handlers_for(
        &self,
        kind: EventKind,
        pick: impl Fn(&ListenTarget<StubElement>) -> bool,
    ) -> Vec<Rc<RefCell<Handler<StubElement>>>> {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.alive.get() && r.kind == kind && pick(&r.target))
            .map(|r| Rc::clone(&r.handler))
            .collect()
    }
}

impl EventBus<StubElement> for StubBus {
    fn listen(&self, target: ListenTarget<StubElement>, kind: EventKind, handler: Handler<StubElement>) -> Subscription {
        let alive = Rc::new(Cell::new(true));
        self.registrations.borrow_mut().push(Registration {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
            alive: Rc::clone(&alive),
        });
        Subscription::new(move || alive.set(false))
    }
}

// =============================================================================
// OBSERVATION
// =============================================================================

struct Watch {
    options: WatchOptions,
    targets: RefCell<Vec<StubElement>>,
    callback: RefCell<IntersectionCallback<StubElement>>,
}

impl Unobserve<StubElement> for Watch {
    fn unobserve(&self, target: &StubElement) {
        self.targets.borrow_mut().retain(|t| t != target);
    }
}

pub struct StubWatcher {
    supported: bool,
    watches: RefCell<Vec<Rc<Watch>>>,
}

impl StubWatcher {
    pub fn new() -> Self {
        Self { supported: true, watches: RefCell::new(Vec::new()) }
    }

    pub fn unsupported() -> Self {
        Self { supported: false, watches: RefCell::new(Vec::new()) }
    }

    pub fn is_watched(&self, el: &StubElement) -> bool {
        self.watches.borrow().iter().any(|w| w.targets.borrow().contains(el))
    }

    pub fn options(&self) -> Vec<WatchOptions> {
        self.watches.borrow().iter().map(|w| w.options.clone()).collect()
    }

    /// Report one batch of changes. Each watch is called with the entries for
    /// targets it still watches, in the order given.
    pub fn fire(&self, changes: &[(&StubElement, bool)]) {
        let watches: Vec<Rc<Watch>> = self.watches.borrow().iter().map(Rc::clone).collect();
        for watch in watches {
            let entries: Vec<IntersectionEntry<StubElement>> = changes
                .iter()
                .filter(|(el, _)| watch.targets.borrow().contains(el))
                .map(|(el, hit)| IntersectionEntry {
                    target: (*el).clone(),
                    is_intersecting: *hit,
                    ratio: if *hit { 1.0 } else { 0.0 },
                })
                .collect();
            if entries.is_empty() {
                continue;
            }
            (watch.callback.borrow_mut())(&entries, &*watch);
        }
    }
}

impl IntersectionWatcher<StubElement> for StubWatcher {
    fn supported(&self) -> bool {
        self.supported
    }

    fn watch(&self, options: &WatchOptions, targets: &[StubElement], callback: IntersectionCallback<StubElement>) -> bool {
        if !self.supported {
            return false;
        }
        self.watches.borrow_mut().push(Rc::new(Watch {
            options: options.clone(),
            targets: RefCell::new(targets.to_vec()),
            callback: RefCell::new(callback),
        }));
        true
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

#[derive(Default)]
pub struct StubStorage {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl StubStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for StubStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        if self.fail_writes.get() {
            return Err(PageError::Storage("QuotaExceededError".into()));
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Default)]
pub struct StubViewport {
    scroll_y: Cell<f64>,
    top_requests: Cell<u32>,
}

impl StubViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn top_requests(&self) -> u32 {
        self.top_requests.get()
    }
}

impl Viewport for StubViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to_top(&self) {
        self.top_requests.set(self.top_requests.get() + 1);
        self.scroll_y.set(0.0);
    }
}

/// Collects delayed tasks; tests run them explicitly.
#[derive(Default)]
pub struct StubScheduler {
    tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl StubScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays of the pending tasks, in scheduling order.
    pub fn pending(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every pending task in delay order (ties keep scheduling order).
    pub fn run_all(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        tasks.sort_by_key(|(delay, _)| *delay);
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for StubScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}

pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_year(&self) -> u32 {
        self.0
    }
}
