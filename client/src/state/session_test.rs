use super::*;

fn profile() -> UserProfile {
    UserProfile {
        display_name: "Dana".to_owned(),
        email: "dana@derm.example".to_owned(),
        avatar_url: None,
    }
}

#[test]
fn default_is_logged_out_and_loading() {
    let state = SessionState::default();
    assert!(!state.is_authenticated());
    assert!(state.loading);
}

#[test]
fn restored_without_profile_stops_loading() {
    let mut state = SessionState::default();
    state.restored(None);
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn sign_in_then_sign_out() {
    let mut state = SessionState::default();
    state.sign_in(profile());
    assert!(state.is_authenticated());
    assert_eq!(state.display_name(), Some("Dana"));

    state.sign_out();
    assert!(!state.is_authenticated());
    assert_eq!(state.display_name(), None);
    assert!(!state.loading);
}
