//! Footer copyright year.

use crate::dom::{Document, Element, select};
use crate::platform::Clock;

/// Write the current year into the placeholder, once. Returns whether the
/// placeholder existed.
pub fn write_year<D: Document>(doc: &D, clock: &dyn Clock, year_id: &str) -> bool {
    let Some(el) = select(doc, &format!("#{year_id}")) else {
        log::debug!("year placeholder #{year_id} absent");
        return false;
    };
    el.set_text(&clock.current_year().to_string());
    true
}
