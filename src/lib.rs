//! Client-side interactivity for a static portfolio page.
//!
//! This crate is compiled to WebAssembly and runs once at page load. Each
//! component registers its listeners and then reacts purely to browser events:
//! there is no inter-component communication and the DOM is the only state.
//!
//! Every browser facility a component touches (elements, listeners, storage,
//! timers, the viewport, intersection observation) is reached through a small
//! capability trait, so the component logic runs natively under test against
//! in-memory stubs. The `browser` feature supplies the `web-sys` implementations
//! and the `#[wasm_bindgen(start)]` entry point.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | Element/document capabilities and selector helpers |
//! | [`events`] | Event kinds, synthetic events, listener registration and cleanup |
//! | [`observe`] | Viewport-intersection watching |
//! | [`platform`] | Preference storage, viewport scrolling, timers, clock |
//! | [`components`] | One module per page behavior |
//! | [`page`] | Mounts every component against a set of capabilities |
//! | [`config`] | Markup contract and tunables, with JSON overrides |
//! | [`consts`] | Default numeric tunables |
//! | [`error`] | Crate error type |

pub mod components;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod events;
pub mod observe;
pub mod page;
pub mod platform;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
pub(crate) mod stub;
