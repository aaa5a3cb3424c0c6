//! Scroll-triggered reveal.
//!
//! Each `.reveal` element gains the active class the first time enough of it
//! is visible, and is unobserved in the same notification so it can never fire
//! again. Without intersection support every element is activated at load.
//! Nothing ever removes the active class.

use std::rc::Rc;

use crate::config::RevealConfig;
use crate::dom::{Document, Element, select_all};
use crate::observe::{IntersectionEntry, IntersectionWatcher, Unobserve, WatchOptions};

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

pub struct ScrollReveal<E> {
    targets: Vec<E>,
    active_class: String,
    threshold: f64,
}

impl<E: Element> ScrollReveal<E> {
    pub fn from_document<D: Document<Element = E>>(doc: &D, config: &RevealConfig) -> Self {
        Self::new(select_all(doc, &config.selector), config)
    }

    pub fn new(targets: Vec<E>, config: &RevealConfig) -> Self {
        Self { targets, active_class: config.active_class.clone(), threshold: config.threshold }
    }

    /// Handle one batch of intersection changes.
    pub fn on_intersections(&self, entries: &[IntersectionEntry<E>], observer: &dyn Unobserve<E>) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            entry.target.add_class(&self.active_class);
            observer.unobserve(&entry.target);
        }
    }

    /// Activate every target immediately.
    pub fn activate_all(&self) {
        for target in &self.targets {
            target.add_class(&self.active_class);
        }
    }

    /// Start watching, or activate everything when watching is unavailable.
    pub fn mount(self: &Rc<Self>, watcher: &dyn IntersectionWatcher<E>) {
        if self.targets.is_empty() {
            return;
        }
        if !watcher.supported() {
            log::debug!("intersection observation unsupported; revealing {} elements", self.targets.len());
            self.activate_all();
            return;
        }
        let reveal = Rc::clone(self);
        let watching = watcher.watch(
            &WatchOptions::with_threshold(self.threshold),
            &self.targets,
            Box::new(move |entries: &[IntersectionEntry<E>], observer: &dyn Unobserve<E>| {
                reveal.on_intersections(entries, observer);
            }),
        );
        if watching {
            log::debug!("watching {} reveal elements", self.targets.len());
        } else {
            log::warn!("reveal watcher could not be created; revealing all elements");
            self.activate_all();
        }
    }
}
