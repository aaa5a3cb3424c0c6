//! Browser facilities outside the document tree.

use crate::error::PageError;

/// Durable per-origin key/value storage (the browser's `localStorage`).
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns a [`PageError`] if storage is unavailable or the read throws.
    fn get(&self, key: &str) -> Result<Option<String>, PageError>;

    /// # Errors
    ///
    /// Returns a [`PageError`] if storage is unavailable or the write throws
    /// (for example when the quota is exceeded).
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

/// Page scroll position and scrolling.
pub trait Viewport {
    /// Current vertical scroll offset in CSS pixels.
    fn scroll_y(&self) -> f64;

    /// Smoothly scroll the page back to the top.
    fn scroll_to_top(&self);
}

/// Fire-and-forget delayed tasks. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Wall-clock access.
pub trait Clock {
    /// The current four-digit calendar year, local time.
    fn current_year(&self) -> u32;
}
