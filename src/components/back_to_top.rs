//! "Back to top" button.
//!
//! Visibility is recomputed from the current offset on every scroll event,
//! without debouncing.

use std::rc::Rc;

use crate::config::BackToTopConfig;
use crate::dom::{Document, Element, select};
use crate::events::{DomEvent, EventBus, EventKind, ListenTarget, Subscription};
use crate::platform::Viewport;

#[cfg(test)]
#[path = "back_to_top_test.rs"]
mod back_to_top_test;

/// Whether the button should show at vertical offset `scroll_y`.
#[must_use]
pub fn should_show(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

pub struct BackToTop<E> {
    button: E,
    viewport: Rc<dyn Viewport>,
    visible_class: String,
    offset_px: f64,
}

impl<E: Element> BackToTop<E> {
    pub fn from_document<D: Document<Element = E>>(
        doc: &D,
        viewport: Rc<dyn Viewport>,
        config: &BackToTopConfig,
    ) -> Option<Self> {
        let button = select(doc, &format!("#{}", config.button_id))?;
        Some(Self::new(button, viewport, config))
    }

    pub fn new(button: E, viewport: Rc<dyn Viewport>, config: &BackToTopConfig) -> Self {
        Self { button, viewport, visible_class: config.visible_class.clone(), offset_px: config.offset_px }
    }

    pub fn on_scroll(&self) {
        if should_show(self.viewport.scroll_y(), self.offset_px) {
            self.button.add_class(&self.visible_class);
        } else {
            self.button.remove_class(&self.visible_class);
        }
    }

    pub fn on_click(&self) {
        self.viewport.scroll_to_top();
    }

    pub fn mount(self: &Rc<Self>, events: &dyn EventBus<E>) -> Vec<Subscription> {
        let on_scroll = Rc::clone(self);
        let on_click = Rc::clone(self);
        vec![
            events.listen(ListenTarget::Window, EventKind::Scroll, Box::new(move |_: &DomEvent<E>| on_scroll.on_scroll())),
            events.listen(
                ListenTarget::Element(self.button.clone()),
                EventKind::Click,
                Box::new(move |_: &DomEvent<E>| on_click.on_click()),
            ),
        ]
    }
}
