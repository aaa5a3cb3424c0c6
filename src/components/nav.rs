//! Mobile navigation toggle.
//!
//! The open state is the presence of the open class on the menu element; the
//! toggle's `aria-expanded` mirrors it after every transition.

use std::rc::Rc;

use crate::config::NavConfig;
use crate::dom::{Document, Element, select};
use crate::events::{DomEvent, EventBus, EventKind, ListenTarget, Subscription};

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

pub struct NavToggle<E> {
    toggle: E,
    menu: E,
    open_class: String,
    link_selector: String,
}

impl<E: Element> NavToggle<E> {
    /// Look up the toggle and menu. `None` if either is absent.
    pub fn from_document<D: Document<Element = E>>(doc: &D, config: &NavConfig) -> Option<Self> {
        let toggle = select(doc, &format!("#{}", config.toggle_id))?;
        let menu = select(doc, &format!("#{}", config.menu_id))?;
        Some(Self::new(toggle, menu, config))
    }

    pub fn new(toggle: E, menu: E, config: &NavConfig) -> Self {
        let nav = Self {
            toggle,
            menu,
            open_class: config.open_class.clone(),
            link_selector: config.link_selector.clone(),
        };
        nav.sync_expanded();
        nav
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu.has_class(&self.open_class)
    }

    /// Toggle control clicked: flip the menu.
    pub fn on_toggle_click(&self) {
        self.menu.toggle_class(&self.open_class);
        self.sync_expanded();
    }

    /// A link inside the menu was clicked: always close.
    pub fn on_link_click(&self) {
        self.close();
    }

    /// Any click in the document: close if it landed outside both the menu and
    /// the toggle while the menu is open.
    pub fn on_document_click(&self, target: Option<&E>) {
        if !self.is_open() {
            return;
        }
        let inside = target.is_some_and(|t| self.menu.contains(t) || self.toggle.contains(t));
        if !inside {
            self.close();
        }
    }

    pub fn close(&self) {
        self.menu.remove_class(&self.open_class);
        self.sync_expanded();
    }

    fn sync_expanded(&self) {
        let expanded = if self.is_open() { "true" } else { "false" };
        self.toggle.set_attribute("aria-expanded", expanded);
    }

    /// Register the toggle, link and outside-click listeners.
    pub fn mount(self: &Rc<Self>, events: &dyn EventBus<E>) -> Vec<Subscription> {
        let mut subs = Vec::new();

        let nav = Rc::clone(self);
        subs.push(events.listen(
            ListenTarget::Element(self.toggle.clone()),
            EventKind::Click,
            Box::new(move |_: &DomEvent<E>| nav.on_toggle_click()),
        ));

        for link in self.menu.query_all(&self.link_selector) {
            let nav = Rc::clone(self);
            subs.push(events.listen(
                ListenTarget::Element(link),
                EventKind::Click,
                Box::new(move |_: &DomEvent<E>| nav.on_link_click()),
            ));
        }

        let nav = Rc::clone(self);
        subs.push(events.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |event: &DomEvent<E>| nav.on_document_click(event.target())),
        ));

        log::debug!("nav toggle mounted with {} listeners", subs.len());
        subs
    }
}
