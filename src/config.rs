//! Markup contract and tunables.
//!
//! Every id, class, selector and data attribute the components depend on lives
//! here, together with the timing and threshold tunables. Defaults match the
//! shipped page markup. A page may override any subset by embedding a JSON
//! document (see [`PageConfig::from_json`]); unknown keys are rejected so a
//! typo does not silently fall back to a default.

use serde::Deserialize;

use crate::consts::{
    BACK_TO_TOP_OFFSET_PX, CARD_DELAY_STEP_MS, REVEAL_THRESHOLD, SKILL_DELAY_STEP_MS, SKILL_ROOT_MARGIN,
    SKILL_THRESHOLD, WORD_DELAY_STEP_MS, WORD_MARGIN_RIGHT,
};
use crate::error::PageError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub toggle_id: String,
    pub menu_id: String,
    pub open_class: String,
    pub link_selector: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "nav-toggle".to_owned(),
            menu_id: "nav-menu".to_owned(),
            open_class: "show".to_owned(),
            link_selector: "a".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub toggle_id: String,
    pub dark_class: String,
    /// `localStorage` key holding `dark` or `light`.
    pub storage_key: String,
    /// Glyph shown while dark mode is active (offers the switch to light).
    pub light_icon: String,
    /// Glyph shown while light mode is active (offers the switch to dark).
    pub dark_icon: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_id: "theme-toggle".to_owned(),
            dark_class: "dark".to_owned(),
            storage_key: "theme".to_owned(),
            light_icon: "\u{2600}\u{FE0F}".to_owned(),
            dark_icon: "\u{1F319}".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub form_id: String,
    pub message_id: String,
    pub name_field: String,
    pub email_field: String,
    pub message_field: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contact-form".to_owned(),
            message_id: "form-message".to_owned(),
            name_field: "name".to_owned(),
            email_field: "email".to_owned(),
            message_field: "message".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub selector: String,
    pub active_class: String,
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { selector: ".reveal".to_owned(), active_class: "active".to_owned(), threshold: REVEAL_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaggerConfig {
    pub card_selector: String,
    pub card_step_ms: u32,
    pub word_selector: String,
    pub word_step_ms: u32,
    pub word_margin_right: String,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            card_selector: ".project-card".to_owned(),
            card_step_ms: CARD_DELAY_STEP_MS,
            word_selector: "[data-word-animate]".to_owned(),
            word_step_ms: WORD_DELAY_STEP_MS,
            word_margin_right: WORD_MARGIN_RIGHT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackToTopConfig {
    pub button_id: String,
    pub visible_class: String,
    pub offset_px: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self { button_id: "back-to-top".to_owned(), visible_class: "show".to_owned(), offset_px: BACK_TO_TOP_OFFSET_PX }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillConfig {
    pub item_selector: String,
    pub bar_selector: String,
    /// Data attribute on the bar holding the target percentage.
    pub percent_attribute: String,
    pub active_class: String,
    pub threshold: f64,
    pub root_margin: String,
    pub step_ms: u32,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            item_selector: ".skill-item".to_owned(),
            bar_selector: ".skill-progress".to_owned(),
            percent_attribute: "data-progress".to_owned(),
            active_class: "active".to_owned(),
            threshold: SKILL_THRESHOLD,
            root_margin: SKILL_ROOT_MARGIN.to_owned(),
            step_ms: SKILL_DELAY_STEP_MS,
        }
    }
}

/// Complete page configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub nav: NavConfig,
    pub theme: ThemeConfig,
    pub year_id: String,
    pub contact: ContactConfig,
    pub reveal: RevealConfig,
    pub stagger: StaggerConfig,
    pub back_to_top: BackToTopConfig,
    pub skills: SkillConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            theme: ThemeConfig::default(),
            year_id: "year".to_owned(),
            contact: ContactConfig::default(),
            reveal: RevealConfig::default(),
            stagger: StaggerConfig::default(),
            back_to_top: BackToTopConfig::default(),
            skills: SkillConfig::default(),
        }
    }
}

impl PageConfig {
    /// Build a config from a JSON override document.
    ///
    /// Absent keys keep their defaults, so `{}` yields the default config.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] on malformed JSON, unknown keys, or values
    /// rejected by [`PageConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system does not express.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PageError> {
        check_fraction("reveal.threshold", self.reveal.threshold)?;
        check_fraction("skills.threshold", self.skills.threshold)?;
        if !self.back_to_top.offset_px.is_finite() || self.back_to_top.offset_px < 0.0 {
            return Err(PageError::Config(format!(
                "back_to_top.offset_px must be a non-negative number, got {}",
                self.back_to_top.offset_px
            )));
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(PageError::Config("theme.storage_key must not be empty".into()));
        }
        Ok(())
    }
}

fn check_fraction(field: &str, value: f64) -> Result<(), PageError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PageError::Config(format!("{field} must be within 0.0..=1.0, got {value}")))
    }
}
