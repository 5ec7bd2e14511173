//! Domain error types
//!
//! Stores and the command layer return `KoalaError`; the client and CLI wrap
//! it with `anyhow` context.

use crate::koala::catalog::BookStatus;
use thiserror::Error;

/// Errors raised by the Koala stores and command dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KoalaError {
    /// A book's borrower/holder fields disagree with its status.
    #[error("book '{book_id}' has status {status} but {reason}")]
    InvalidLoanState {
        /// Offending book.
        book_id: String,
        /// Declared status.
        status: BookStatus,
        /// Which reference is wrongly present or missing.
        reason: &'static str,
    },

    /// A book with the same id is already in the library.
    #[error("book '{book_id}' is already in the library")]
    DuplicateBook {
        /// Duplicated book id.
        book_id: String,
    },

    /// The friend (or their library) is already in the directory.
    #[error("friend library '{library_id}' owned by '{owner_id}' is already listed")]
    DuplicateFriend {
        /// Duplicated library id.
        library_id: String,
        /// Owner of the duplicated library.
        owner_id: String,
    },

    /// Status selector text did not match `all` or a known status.
    #[error("unknown status filter '{0}', expected one of: all, available, borrowed, on_hold")]
    UnknownStatusFilter(String),

    /// Profile setting name did not match any known setting.
    #[error("unknown setting '{0}', expected one of: allow_friends_of_friends, notify_new_books, notify_returns")]
    UnknownSetting(String),

    /// Command name did not match any known command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Sign-in was attempted with an empty phone number.
    #[error("phone number must not be empty")]
    EmptyPhone,

    /// The operation needs a signed-in user.
    #[error("'{operation}' requires a signed-in user")]
    NotSignedIn {
        /// Operation that was refused.
        operation: String,
    },
}

pub type KoalaResult<T> = Result<T, KoalaError>;
