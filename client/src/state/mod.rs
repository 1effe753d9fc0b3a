//! Client-side application state.
//!
//! ARCHITECTURE
//! ============
//! The app shell holds each state in an `RwSignal` and provides it by
//! context: `session` gates routes, `analyze` drives the upload lifecycle,
//! and `ui` carries panel chrome.

pub mod analyze;
pub mod session;
pub mod ui;
