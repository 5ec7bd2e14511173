//! Auth listener callback interface

use crate::koala::auth::models::AuthState;
use async_trait::async_trait;

/// Notified after every auth state transition
#[async_trait]
pub trait AuthListener: Send + Sync {
    async fn on_auth_state_changed(&self, state: AuthState);
}

/// Default listener (no-op)
pub struct EmptyAuthListener;

#[async_trait]
impl AuthListener for EmptyAuthListener {
    async fn on_auth_state_changed(&self, _state: AuthState) {}
}
