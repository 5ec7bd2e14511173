//! User intents from the header and action buttons
//!
//! Notifications, scan, add book and friends are dispatched as typed
//! commands to a `CommandHandler`. The default handler only logs and
//! acknowledges; real handlers (camera barcode scan, notification list)
//! plug in behind the same trait.

use crate::koala::error::{KoalaError, KoalaResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ViewNotifications,
    ScanBook,
    AddBook,
    FindFriends,
    EditProfile,
    ManageFriends,
    HelpSupport,
    SignOut,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Self::ViewNotifications,
        Self::ScanBook,
        Self::AddBook,
        Self::FindFriends,
        Self::EditProfile,
        Self::ManageFriends,
        Self::HelpSupport,
        Self::SignOut,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewNotifications => "view_notifications",
            Self::ScanBook => "scan_book",
            Self::AddBook => "add_book",
            Self::FindFriends => "find_friends",
            Self::EditProfile => "edit_profile",
            Self::ManageFriends => "manage_friends",
            Self::HelpSupport => "help_support",
            Self::SignOut => "sign_out",
        }
    }

    /// Help is reachable without an account; everything else is not
    pub fn requires_sign_in(self) -> bool {
        !matches!(self, Self::HelpSupport)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = KoalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| KoalaError::UnknownCommand(s.to_string()))
    }
}

/// What happened to a dispatched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Accepted with no effect yet
    Acknowledged {
        command: Command,
        #[serde(rename = "operationID")]
        operation_id: String,
    },
    SignedOut,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> KoalaResult<CommandOutcome>;
}

/// Default handler: log and acknowledge
pub struct NoopCommandHandler;

#[async_trait]
impl CommandHandler for NoopCommandHandler {
    async fn handle(&self, command: Command) -> KoalaResult<CommandOutcome> {
        let operation_id = Uuid::new_v4().to_string();
        info!("[Command] {} acknowledged, operationID: {}", command, operation_id);
        Ok(CommandOutcome::Acknowledged {
            command,
            operation_id,
        })
    }
}
