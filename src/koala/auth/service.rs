//! Auth store
//!
//! State machine `loading -> signed_out <-> signed_in`. The store starts in
//! `loading`; a restore task moves it to `signed_out` after a fixed delay.
//! Sign-in and sign-out may happen at any time and always win over a
//! restore that has not fired yet.

use crate::koala::auth::listener::{AuthListener, EmptyAuthListener};
use crate::koala::auth::models::AuthState;
use crate::koala::auth::provider::{AuthProvider, PlaceholderAuthProvider};
use crate::koala::error::KoalaError;
use crate::koala::types::User;
use anyhow::{Context, Result};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default simulated session-restore delay
pub const DEFAULT_RESTORE_DELAY: Duration = Duration::from_millis(1000);

pub struct AuthStore {
    state: watch::Sender<AuthState>,
    provider: Arc<dyn AuthProvider>,
    listener: RwLock<Arc<dyn AuthListener>>,
    restore_delay: Duration,
}

impl AuthStore {
    /// Store in `loading` with the placeholder provider and no listener
    pub fn new(restore_delay: Duration) -> Self {
        Self::with_provider(
            restore_delay,
            Arc::new(PlaceholderAuthProvider),
            Arc::new(EmptyAuthListener),
        )
    }

    pub fn with_provider(
        restore_delay: Duration,
        provider: Arc<dyn AuthProvider>,
        listener: Arc<dyn AuthListener>,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            state,
            provider,
            listener: RwLock::new(listener),
            restore_delay,
        }
    }

    /// Replace the listener; later transitions go to the new one
    pub fn set_listener(&self, listener: Arc<dyn AuthListener>) {
        match self.listener.write() {
            Ok(mut slot) => *slot = listener,
            Err(poisoned) => *poisoned.into_inner() = listener,
        }
    }

    fn listener(&self) -> Arc<dyn AuthListener> {
        match self.listener.read() {
            Ok(slot) => Arc::clone(&*slot),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Spawn the session-restore task on the current tokio runtime
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.restore_session().await })
    }

    /// Wait out the restore delay, then leave `loading` if nothing else did
    pub async fn restore_session(&self) {
        debug!("[Auth] restoring session in {:?}", self.restore_delay);
        tokio::time::sleep(self.restore_delay).await;

        let restored = self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = AuthState::SignedOut;
                true
            } else {
                false
            }
        });
        if restored {
            info!("[Auth] no stored session, signed out");
            self.listener().on_auth_state_changed(AuthState::SignedOut).await;
        } else {
            debug!("[Auth] session restore skipped, state already {}", self.state().name());
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every transition
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user().cloned()
    }

    /// Resolve once the store has left `loading`
    pub async fn wait_ready(&self) -> AuthState {
        let mut rx = self.state.subscribe();
        let ready = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // the sender lives in `self`, so the channel cannot close here
            Err(_) => self.state(),
        };
        ready
    }

    /// Sign in by phone number. Only an empty number is rejected.
    pub async fn sign_in(&self, phone: &str) -> Result<User> {
        if phone.is_empty() {
            warn!("[Auth] sign in refused: empty phone number");
            return Err(KoalaError::EmptyPhone.into());
        }
        info!("[Auth] signing in with phone {}", phone);

        let user = self
            .provider
            .sign_in_with_phone(phone)
            .await
            .context("sign in with phone failed")?;
        self.transition(AuthState::SignedIn { user: user.clone() })
            .await;
        info!("[Auth] signed in as {}", user.id);
        Ok(user)
    }

    /// Sign out from any state
    pub async fn sign_out(&self) -> Result<()> {
        info!("[Auth] signing out");
        self.provider.sign_out().await.context("sign out failed")?;
        self.transition(AuthState::SignedOut).await;
        Ok(())
    }

    async fn transition(&self, next: AuthState) {
        let previous = self.state.send_replace(next.clone());
        debug!("[Auth] {} -> {}", previous.name(), next.name());
        self.listener().on_auth_state_changed(next).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koala::test_support::init_test_logger;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl AuthListener for RecordingListener {
        async fn on_auth_state_changed(&self, state: AuthState) {
            self.seen.lock().unwrap().push(state.name());
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl AuthProvider for FailingProvider {
        async fn sign_in_with_phone(&self, _phone: &str) -> Result<User> {
            Err(anyhow::anyhow!("sms gateway unreachable"))
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn starts_loading_then_signs_out_after_delay() {
        init_test_logger();
        let store = Arc::new(AuthStore::new(DEFAULT_RESTORE_DELAY));
        let started = Instant::now();
        store.start();

        assert_eq!(store.state(), AuthState::Loading);
        assert!(store.is_loading());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(store.is_loading());

        assert_eq!(store.wait_ready().await, AuthState::SignedOut);
        assert!(started.elapsed() >= DEFAULT_RESTORE_DELAY);
        assert!(store.current_user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_sets_user_with_given_phone() {
        init_test_logger();
        let store = Arc::new(AuthStore::new(DEFAULT_RESTORE_DELAY));
        store.start();
        store.wait_ready().await;

        let user = store.sign_in("555-0100").await.unwrap();
        assert_eq!(user.phone, "555-0100");
        assert_eq!(store.state().name(), "signed_in");
        assert_eq!(store.current_user().map(|u| u.phone), Some("555-0100".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn sign_out_returns_to_signed_out() {
        let listener = Arc::new(RecordingListener::default());
        let store = Arc::new(AuthStore::with_provider(
            DEFAULT_RESTORE_DELAY,
            Arc::new(PlaceholderAuthProvider),
            listener.clone(),
        ));
        store.start();
        store.wait_ready().await;

        store.sign_in("555-0100").await.unwrap();
        store.sign_out().await.unwrap();
        assert_eq!(store.state(), AuthState::SignedOut);
        assert_eq!(
            *listener.seen.lock().unwrap(),
            vec!["signed_out", "signed_in", "signed_out"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_before_restore_is_not_overwritten() {
        let store = Arc::new(AuthStore::new(DEFAULT_RESTORE_DELAY));
        let restore = store.start();

        store.sign_in("555-0100").await.unwrap();
        restore.await.unwrap();
        assert_eq!(store.state().name(), "signed_in");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_ready_resolves_with_restored_state() {
        let store = Arc::new(AuthStore::new(Duration::from_millis(250)));
        store.start();
        let ready = store.wait_ready().await;
        assert_eq!(ready, AuthState::SignedOut);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn sign_out_while_loading_suppresses_restore() {
        let listener = Arc::new(RecordingListener::default());
        let store = Arc::new(AuthStore::with_provider(
            DEFAULT_RESTORE_DELAY,
            Arc::new(PlaceholderAuthProvider),
            listener.clone(),
        ));
        let restore = store.start();
        assert!(store.is_loading());

        store.sign_out().await.unwrap();
        assert_eq!(store.state(), AuthState::SignedOut);
        assert_eq!(store.wait_ready().await, AuthState::SignedOut);

        restore.await.unwrap();
        assert_eq!(store.state(), AuthState::SignedOut);
        assert_eq!(*listener.seen.lock().unwrap(), vec!["signed_out"]);
    }

    #[tokio::test(start_paused = true)]
    async fn sign_out_when_already_signed_out_stays_signed_out() {
        let listener = Arc::new(RecordingListener::default());
        let store = Arc::new(AuthStore::with_provider(
            DEFAULT_RESTORE_DELAY,
            Arc::new(PlaceholderAuthProvider),
            listener.clone(),
        ));
        store.start().await.unwrap();
        assert_eq!(store.state(), AuthState::SignedOut);

        store.sign_out().await.unwrap();
        assert_eq!(store.state(), AuthState::SignedOut);
        assert!(store.current_user().is_none());
        assert_eq!(
            *listener.seen.lock().unwrap(),
            vec!["signed_out", "signed_out"]
        );
    }

    #[tokio::test]
    async fn empty_phone_is_rejected() {
        let store = AuthStore::new(Duration::ZERO);
        store.restore_session().await;

        let err = store.sign_in("").await.unwrap_err();
        assert_eq!(err.downcast_ref::<KoalaError>(), Some(&KoalaError::EmptyPhone));
        assert_eq!(store.state(), AuthState::SignedOut);
    }

    #[tokio::test]
    async fn provider_failure_leaves_state_untouched() {
        let store = AuthStore::with_provider(
            Duration::ZERO,
            Arc::new(FailingProvider),
            Arc::new(EmptyAuthListener),
        );
        store.restore_session().await;

        let err = store.sign_in("555-0100").await.unwrap_err();
        assert!(format!("{err:#}").contains("sms gateway unreachable"));
        assert_eq!(store.state(), AuthState::SignedOut);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = AuthStore::new(Duration::ZERO);
        let mut rx = store.subscribe();
        store.restore_session().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::SignedOut);

        store.sign_in("555-0100").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().current_user().is_some());
    }
}
