//! Auth state definitions

use crate::koala::types::User;
use serde::{Deserialize, Serialize};

/// Session state shared with every screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    /// Session restore has not finished yet
    Loading,
    SignedOut,
    SignedIn { user: User },
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn current_user(&self) -> Option<&User> {
        match self {
            Self::SignedIn { user } => Some(user),
            Self::Loading | Self::SignedOut => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::SignedOut => "signed_out",
            Self::SignedIn { .. } => "signed_in",
        }
    }
}
