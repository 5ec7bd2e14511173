//! Authentication module
//!
//! Phone sign-in stub with an observable session state

pub mod listener;
pub mod models;
pub mod provider;
pub mod service;

pub use listener::{AuthListener, EmptyAuthListener};
pub use models::AuthState;
pub use provider::{AuthProvider, PlaceholderAuthProvider};
pub use service::{AuthStore, DEFAULT_RESTORE_DELAY};
