//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the analyze view's panels while reading/writing shared
//! state from Leptos context providers.

pub mod analysis_history;
pub mod analysis_results;
pub mod derm_tips;
pub mod sidebar;
