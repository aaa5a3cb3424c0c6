//! Skill bar fill-in.
//!
//! A skill item is unobserved as soon as it is reported intersecting, then
//! activated after a delay proportional to its position in that notification
//! batch. Batch order is whatever the watcher reports, not document order.
//! Without intersection support every bar is filled at load.

use std::rc::Rc;

use crate::config::SkillConfig;
use crate::dom::{Document, Element, select_all, select_within};
use crate::observe::{IntersectionEntry, IntersectionWatcher, Unobserve, WatchOptions};
use crate::platform::Scheduler;

#[cfg(test)]
#[path = "skills_test.rs"]
mod skills_test;

/// Parse a bar's target percentage, clamped to `0..=100`.
#[must_use]
pub fn parse_percent(raw: &str) -> Option<f64> {
    let Ok(value) = raw.trim().trim_end_matches('%').trim().parse::<f64>() else {
        return None;
    };
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

pub struct SkillBars<E> {
    items: Vec<E>,
    scheduler: Rc<dyn Scheduler>,
    config: SkillConfig,
}

impl<E: Element> SkillBars<E> {
    pub fn from_document<D: Document<Element = E>>(doc: &D, scheduler: Rc<dyn Scheduler>, config: &SkillConfig) -> Self {
        Self::new(select_all(doc, &config.item_selector), scheduler, config)
    }

    pub fn new(items: Vec<E>, scheduler: Rc<dyn Scheduler>, config: &SkillConfig) -> Self {
        Self { items, scheduler, config: config.clone() }
    }

    /// Activate `item` and set its bar width from the bar's data attribute.
    pub fn activate(item: &E, config: &SkillConfig) {
        item.add_class(&config.active_class);
        let Some(bar) = select_within(item, &config.bar_selector) else {
            log::warn!("skill item has no {} bar", config.bar_selector);
            return;
        };
        let raw = bar.attribute(&config.percent_attribute).unwrap_or_default();
        match parse_percent(&raw) {
            Some(percent) => bar.set_style("width", &format!("{percent}%")),
            None => log::warn!("skill bar {}={raw:?} is not a percentage", config.percent_attribute),
        }
    }

    /// Fill every bar immediately, without staggering.
    pub fn activate_all(&self) {
        for item in &self.items {
            Self::activate(item, &self.config);
        }
    }

    /// Handle one batch of intersection changes.
    pub fn on_intersections(&self, entries: &[IntersectionEntry<E>], observer: &dyn Unobserve<E>) {
        for (index, entry) in entries.iter().enumerate() {
            if !entry.is_intersecting {
                continue;
            }
            observer.unobserve(&entry.target);

            let item = entry.target.clone();
            let config = self.config.clone();
            let delay = u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(self.config.step_ms);
            self.scheduler.after(delay, Box::new(move || Self::activate(&item, &config)));
        }
    }

    pub fn mount(self: &Rc<Self>, watcher: &dyn IntersectionWatcher<E>) {
        if self.items.is_empty() {
            return;
        }
        if !watcher.supported() {
            log::debug!("intersection observation unsupported; filling {} skill bars", self.items.len());
            self.activate_all();
            return;
        }
        let options =
            WatchOptions::with_threshold(self.config.threshold).root_margin(self.config.root_margin.clone());
        let bars = Rc::clone(self);
        let callback = Box::new(move |entries: &[IntersectionEntry<E>], observer: &dyn Unobserve<E>| {
            bars.on_intersections(entries, observer);
        });
        if !watcher.watch(&options, &self.items, callback) {
            log::warn!("skill bar watcher could not be created; filling all bars");
            self.activate_all();
        }
    }
}
