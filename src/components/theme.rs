//! Dark/light theme switch.
//!
//! The dark class on `<body>` is the source of truth. The stored preference is
//! only read once at load; after that every click writes the resulting value
//! back unconditionally, so storage always mirrors the last visible state.

use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::dom::{Document, Element, select};
use crate::events::{DomEvent, EventBus, EventKind, ListenTarget, Subscription};
use crate::platform::PreferenceStore;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Only the literal `dark` selects dark mode;
    /// an absent key or anything else is light.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub struct ThemeSwitch<E> {
    toggle: E,
    body: E,
    store: Rc<dyn PreferenceStore>,
    config: ThemeConfig,
}

impl<E: Element> ThemeSwitch<E> {
    /// `None` if the toggle control or the body is absent.
    pub fn from_document<D: Document<Element = E>>(
        doc: &D,
        store: Rc<dyn PreferenceStore>,
        config: &ThemeConfig,
    ) -> Option<Self> {
        let toggle = select(doc, &format!("#{}", config.toggle_id))?;
        let body = doc.body()?;
        Some(Self::new(toggle, body, store, config))
    }

    pub fn new(toggle: E, body: E, store: Rc<dyn PreferenceStore>, config: &ThemeConfig) -> Self {
        Self { toggle, body, store, config: config.clone() }
    }

    /// Apply the stored preference. Runs once, before any interaction.
    pub fn restore(&self) -> Theme {
        let stored = match self.store.get(&self.config.storage_key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("theme: reading preference failed: {err}");
                None
            }
        };
        let theme = Theme::from_stored(stored.as_deref());
        if theme.is_dark() {
            self.body.add_class(&self.config.dark_class);
        }
        self.render(theme);
        theme
    }

    /// The theme currently shown on the page.
    #[must_use]
    pub fn current(&self) -> Theme {
        if self.body.has_class(&self.config.dark_class) { Theme::Dark } else { Theme::Light }
    }

    /// Toggle clicked: flip, re-render the control, persist.
    pub fn on_click(&self) -> Theme {
        let theme = if self.body.toggle_class(&self.config.dark_class) { Theme::Dark } else { Theme::Light };
        self.render(theme);
        if let Err(err) = self.store.set(&self.config.storage_key, theme.as_str()) {
            log::warn!("theme: persisting {} failed: {err}", theme.as_str());
        }
        theme
    }

    fn render(&self, theme: Theme) {
        let (icon, label) = if theme.is_dark() {
            (&self.config.light_icon, "Switch to light mode")
        } else {
            (&self.config.dark_icon, "Switch to dark mode")
        };
        self.toggle.set_text(icon);
        self.toggle.set_attribute("aria-label", label);
        self.toggle.set_attribute("aria-pressed", if theme.is_dark() { "true" } else { "false" });
    }

    pub fn mount(self: &Rc<Self>, events: &dyn EventBus<E>) -> Vec<Subscription> {
        let theme = self.restore();
        log::debug!("theme switch mounted ({})", theme.as_str());

        let switch = Rc::clone(self);
        vec![events.listen(
            ListenTarget::Element(self.toggle.clone()),
            EventKind::Click,
            Box::new(move |_: &DomEvent<E>| {
                switch.on_click();
            }),
        )]
    }
}
