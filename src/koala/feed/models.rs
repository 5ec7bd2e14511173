//! Feed model definitions

use crate::koala::catalog::BookRef;
use crate::koala::types::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One social or lending event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    /// Actor
    pub user: User,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

/// Event type together with the references that type requires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    /// `user` borrowed `book` from `friend_from`
    #[serde(rename_all = "camelCase")]
    Borrow { book: BookRef, friend_from: User },
    /// `user` returned `book` to `friend_to`
    #[serde(rename_all = "camelCase")]
    Return { book: BookRef, friend_to: User },
    /// `user` added `book` to their own library
    AddBook { book: BookRef },
    /// `user` and `new_friend` became friends
    #[serde(rename_all = "camelCase")]
    NewFriend { new_friend: User },
}

impl ActivityKind {
    /// Wire name of the type tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Borrow { .. } => "borrow",
            Self::Return { .. } => "return",
            Self::AddBook { .. } => "add_book",
            Self::NewFriend { .. } => "new_friend",
        }
    }

    /// Icon shown next to the feed entry
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Borrow { .. } => "arrow-forward-circle-outline",
            Self::Return { .. } => "arrow-back-circle-outline",
            Self::AddBook { .. } => "add-circle-outline",
            Self::NewFriend { .. } => "people-outline",
        }
    }

    pub fn book(&self) -> Option<&BookRef> {
        match self {
            Self::Borrow { book, .. } | Self::Return { book, .. } | Self::AddBook { book } => Some(book),
            Self::NewFriend { .. } => None,
        }
    }
}

/// A rendered feed row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub icon: &'static str,
    pub message: String,
    pub relative_time: String,
}
