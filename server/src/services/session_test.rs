use super::*;

fn profile(name: &str) -> UserProfile {
    UserProfile {
        display_name: name.to_owned(),
        email: format!("{name}@derm.ai"),
        avatar_url: None,
    }
}

const TTL: Duration = Duration::from_secs(3600);

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn bytes_to_hex_formats_lowercase_pairs() {
    assert_eq!(bytes_to_hex(&[0x00, 0xab, 0x0f]), "00ab0f");
}

#[test]
fn generate_token_is_64_hex_chars_and_unique() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn created_session_resolves_to_profile() {
    let store = SessionStore::new(TTL);
    let token = store.create(profile("alice")).await;
    assert_eq!(store.get(&token).await, Some(profile("alice")));
}

#[tokio::test]
async fn unknown_token_resolves_to_none() {
    let store = SessionStore::new(TTL);
    assert_eq!(store.get("missing").await, None);
}

#[tokio::test]
async fn removed_session_no_longer_resolves() {
    let store = SessionStore::new(TTL);
    let token = store.create(profile("alice")).await;
    assert!(store.remove(&token).await);
    assert!(!store.remove(&token).await);
    assert_eq!(store.get(&token).await, None);
}

#[tokio::test]
async fn sessions_are_independent() {
    let store = SessionStore::new(TTL);
    let a = store.create(profile("alice")).await;
    let b = store.create(profile("bob")).await;
    store.remove(&a).await;
    assert_eq!(store.get(&b).await, Some(profile("bob")));
}

// =============================================================================
// Expiry
// =============================================================================

#[tokio::test]
async fn session_expires_after_ttl() {
    let store = SessionStore::new(TTL);
    let start = Instant::now();
    let token = store.create_at(profile("alice"), start).await;

    assert!(store.get_at(&token, start + TTL - Duration::from_secs(1)).await.is_some());
    assert_eq!(store.get_at(&token, start + TTL).await, None);
    assert_eq!(store.len().await, 0, "expired session should be dropped on lookup");
}

#[tokio::test]
async fn purge_removes_only_expired_sessions() {
    let store = SessionStore::new(TTL);
    let start = Instant::now();
    store.create_at(profile("old"), start).await;
    let fresh = store.create_at(profile("fresh"), start + TTL).await;

    assert_eq!(store.purge_expired_at(start + TTL + Duration::from_secs(1)).await, 1);
    assert_eq!(store.len().await, 1);
    assert!(store.get_at(&fresh, start + TTL + Duration::from_secs(1)).await.is_some());
}

#[tokio::test]
async fn oversized_ttl_is_capped_and_sessions_still_work() {
    let store = SessionStore::new(Duration::MAX);
    assert_eq!(store.ttl(), MAX_SESSION_TTL);

    let token = store.create(profile("alice")).await;
    assert_eq!(store.get(&token).await, Some(profile("alice")));
}

#[tokio::test]
async fn sweeper_purges_expired_sessions_in_background() {
    let store = SessionStore::new(Duration::ZERO);
    store.create(profile("alice")).await;
    assert_eq!(store.len().await, 1);

    let sweeper = spawn_sweeper(store.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;
    sweeper.abort();

    assert_eq!(store.len().await, 0);
}
