//! Page assembly: mount every component against one set of capabilities.

use std::rc::Rc;

use crate::components::{
    BackToTop, ContactForm, NavToggle, ScrollReveal, SkillBars, ThemeSwitch, split_words, stagger_cards, write_year,
};
use crate::config::PageConfig;
use crate::dom::Document;
use crate::events::{EventBus, Subscription};
use crate::observe::IntersectionWatcher;
use crate::platform::{Clock, PreferenceStore, Scheduler, Viewport};

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

/// Everything the components reach outside their own elements.
pub struct Services<'a, D: Document> {
    pub document: &'a D,
    pub events: &'a dyn EventBus<D::Element>,
    pub watcher: &'a dyn IntersectionWatcher<D::Element>,
    pub clock: &'a dyn Clock,
    pub store: Rc<dyn PreferenceStore>,
    pub viewport: Rc<dyn Viewport>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Which behaviors found their markup and were mounted.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountReport {
    pub nav: bool,
    pub theme: bool,
    pub year: bool,
    pub contact: bool,
    pub back_to_top: bool,
    pub cards: usize,
    pub words: usize,
}

/// A mounted page. Dropping it removes every listener it registered.
#[derive(Debug)]
pub struct MountedPage {
    subscriptions: Vec<Subscription>,
    report: MountReport,
}

impl MountedPage {
    #[must_use]
    pub fn report(&self) -> MountReport {
        self.report
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Mount every component. Components whose markup is missing are skipped.
pub fn mount<D: Document>(config: &PageConfig, services: &Services<'_, D>) -> MountedPage {
    let doc = services.document;
    let mut subscriptions = Vec::new();
    let mut report = MountReport::default();

    if let Some(nav) = NavToggle::from_document(doc, &config.nav) {
        subscriptions.extend(Rc::new(nav).mount(services.events));
        report.nav = true;
    }

    if let Some(theme) = ThemeSwitch::from_document(doc, Rc::clone(&services.store), &config.theme) {
        subscriptions.extend(Rc::new(theme).mount(services.events));
        report.theme = true;
    }

    report.year = write_year(doc, services.clock, &config.year_id);

    if let Some(form) = ContactForm::from_document(doc, &config.contact) {
        subscriptions.extend(Rc::new(form).mount(services.events));
        report.contact = true;
    }

    Rc::new(ScrollReveal::from_document(doc, &config.reveal)).mount(services.watcher);

    report.cards = stagger_cards(doc, &config.stagger);
    report.words = split_words(doc, &config.stagger);

    if let Some(button) = BackToTop::from_document(doc, Rc::clone(&services.viewport), &config.back_to_top) {
        subscriptions.extend(Rc::new(button).mount(services.events));
        report.back_to_top = true;
    }

    Rc::new(SkillBars::from_document(doc, Rc::clone(&services.scheduler), &config.skills)).mount(services.watcher);

    log::info!("page mounted: {report:?}, {} listeners", subscriptions.len());
    MountedPage { subscriptions, report }
}
