//! Staggered animation delays for project cards and word-by-word text reveal.

use crate::config::StaggerConfig;
use crate::dom::{Document, Element, select_all};

#[cfg(test)]
#[path = "stagger_test.rs"]
mod stagger_test;

/// CSS delay for the item at `index` with a per-item `step_ms`.
#[must_use]
pub fn delay_for(index: usize, step_ms: u32) -> String {
    let ms = u64::try_from(index).unwrap_or(u64::MAX).saturating_mul(u64::from(step_ms));
    format!("{ms}ms")
}

/// Give every project card an animation delay proportional to its position.
/// Returns the number of cards touched.
pub fn stagger_cards<D: Document>(doc: &D, config: &StaggerConfig) -> usize {
    let cards = select_all(doc, &config.card_selector);
    for (index, card) in cards.iter().enumerate() {
        card.set_style("animation-delay", &delay_for(index, config.card_step_ms));
    }
    cards.len()
}

/// Rebuild every word-reveal target as one inline span per word.
///
/// Text is split on any whitespace run, so tabs and repeated spaces collapse;
/// the spacing between words comes from each span's right margin instead.
/// Returns the total number of spans created.
pub fn split_words<D: Document>(doc: &D, config: &StaggerConfig) -> usize {
    select_all(doc, &config.word_selector)
        .iter()
        .map(|target| split_target(doc, target, config))
        .sum()
}

fn split_target<D: Document>(doc: &D, target: &D::Element, config: &StaggerConfig) -> usize {
    let text = target.text();
    target.set_text("");

    let mut created = 0;
    for (index, word) in text.split_whitespace().enumerate() {
        let span = match doc.create_element("span") {
            Ok(span) => span,
            Err(err) => {
                log::warn!("word reveal: creating span failed: {err}");
                return created;
            }
        };
        span.set_text(word);
        span.set_style("display", "inline-block");
        span.set_style("margin-right", &config.word_margin_right);
        span.set_style("animation-delay", &delay_for(index, config.word_step_ms));
        target.append_child(&span);
        created += 1;
    }
    created
}
