//! Crate error type.
//!
//! Errors only ever surface at capability boundaries (DOM calls, storage,
//! configuration). Components log them and carry on with the affected feature
//! disabled; nothing here is fatal to the page.

/// Errors produced by browser capabilities and configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// No global `window` object exists.
    #[error("no global window")]
    MissingWindow,

    /// The window has no document attached.
    #[error("window has no document")]
    MissingDocument,

    /// A DOM call threw; carries the stringified JS value.
    #[error("DOM call failed: {0}")]
    Js(String),

    /// The browser exposes no `localStorage` for this origin.
    #[error("local storage unavailable")]
    StorageUnavailable,

    /// Reading or writing a storage key failed.
    #[error("storage access failed: {0}")]
    Storage(String),

    /// A configuration override could not be parsed or is out of range.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
