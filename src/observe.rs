//! Viewport-intersection watching.
//!
//! Mirrors the browser's `IntersectionObserver`: a watcher is created with a
//! threshold and root margin, watches a set of elements, and calls back with a
//! batch of entries whenever any of them crosses the threshold. The callback
//! receives an [`Unobserve`] handle so it can stop watching an element from
//! inside the notification, which is how one-shot reveals are built.

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Visible fraction (0.0..=1.0) at which an element counts as intersecting.
    pub threshold: f64,
    /// CSS margin applied to the viewport before computing intersection.
    pub root_margin: String,
}

impl WatchOptions {
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold, root_margin: "0px".to_owned() }
    }

    #[must_use]
    pub fn root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = margin.into();
        self
    }
}

/// One element's intersection change, as reported in a batch.
#[derive(Debug, Clone)]
pub struct IntersectionEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Stops notifications for a watched element.
pub trait Unobserve<E> {
    fn unobserve(&self, target: &E);
}

/// Callback invoked with each batch of intersection changes.
pub type IntersectionCallback<E> = Box<dyn FnMut(&[IntersectionEntry<E>], &dyn Unobserve<E>)>;

/// Capability to watch elements for viewport intersection.
pub trait IntersectionWatcher<E> {
    /// Whether intersection observation is available at all.
    fn supported(&self) -> bool;

    /// Start watching `targets` with `options`.
    ///
    /// Returns `false` when watching could not be set up; callers then fall
    /// back to their unanimated behavior.
    fn watch(&self, options: &WatchOptions, targets: &[E], callback: IntersectionCallback<E>) -> bool;
}
