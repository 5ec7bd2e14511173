//! Identity provider seam
//!
//! The app has no real backend yet. `PlaceholderAuthProvider` accepts every
//! phone number; a real provider (OTP over SMS) plugs in behind the same trait.

use crate::koala::types::User;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticate by phone number and return the signed-in user
    async fn sign_in_with_phone(&self, phone: &str) -> Result<User>;

    async fn sign_out(&self) -> Result<()>;
}

/// Always-successful stand-in provider
pub struct PlaceholderAuthProvider;

#[async_trait]
impl AuthProvider for PlaceholderAuthProvider {
    async fn sign_in_with_phone(&self, phone: &str) -> Result<User> {
        info!("[Auth/Placeholder] sign in with phone: {}", phone);
        Ok(User {
            id: Uuid::new_v4().to_string(),
            name: None,
            phone: phone.to_string(),
            avatar: None,
        })
    }

    async fn sign_out(&self) -> Result<()> {
        info!("[Auth/Placeholder] sign out");
        Ok(())
    }
}
