//! Local UI chrome state (sidebar tabs, tip expansion).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the analyze controller so the
//! panels can evolve independently of the request lifecycle.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Tabs available in the analyze sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidebarTab {
    #[default]
    Analyze,
    History,
    Resources,
}

impl SidebarTab {
    pub const ALL: [Self; 3] = [Self::Analyze, Self::History, Self::Resources];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Analyze => "Analyze",
            Self::History => "History",
            Self::Resources => "Resources",
        }
    }
}

/// UI state for the analyze view's panels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_tab: SidebarTab,
    /// Index of the expanded tip; at most one is open.
    pub expanded_tip: Option<usize>,
}

impl UiState {
    /// Expand tip `index`, or collapse it if it is already open.
    pub fn toggle_tip(&mut self, index: usize) {
        self.expanded_tip = if self.expanded_tip == Some(index) { None } else { Some(index) };
    }

    #[must_use]
    pub fn is_tip_expanded(&self, index: usize) -> bool {
        self.expanded_tip == Some(index)
    }
}
