use super::*;

// =============================================================
// Sidebar tabs
// =============================================================

#[test]
fn sidebar_defaults_to_analyze_tab() {
    assert_eq!(UiState::default().sidebar_tab, SidebarTab::Analyze);
}

#[test]
fn sidebar_tabs_have_labels_in_display_order() {
    let labels: Vec<_> = SidebarTab::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, ["Analyze", "History", "Resources"]);
}

// =============================================================
// Tips
// =============================================================

#[test]
fn tips_start_collapsed() {
    let state = UiState::default();
    assert_eq!(state.expanded_tip, None);
    assert!(!state.is_tip_expanded(0));
}

#[test]
fn toggling_same_tip_collapses_it() {
    let mut state = UiState::default();
    state.toggle_tip(2);
    assert!(state.is_tip_expanded(2));
    state.toggle_tip(2);
    assert_eq!(state.expanded_tip, None);
}

#[test]
fn expanding_one_tip_collapses_the_other() {
    let mut state = UiState::default();
    state.toggle_tip(1);
    state.toggle_tip(4);
    assert!(!state.is_tip_expanded(1));
    assert!(state.is_tip_expanded(4));
}
