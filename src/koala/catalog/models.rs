//! Catalog model definitions

use crate::koala::error::{KoalaError, KoalaResult};
use crate::koala::types::{matches_query, GeoPoint, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lending status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Available,
    Borrowed,
    OnHold,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [Self::Available, Self::Borrowed, Self::OnHold];

    /// Wire name, e.g. `on_hold`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
            Self::OnHold => "on_hold",
        }
    }

    /// Tab label shown on the library screen
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed => "Borrowed",
            Self::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book in someone's library.
///
/// `borrower` is present iff the status is `borrowed`, `holder` iff it is
/// `on_hold`. Call [`Book::validate`] before trusting data from outside
/// the crate; the catalog store does so on every insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub owner: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<User>,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Check the status / borrower / holder invariant
    pub fn validate(&self) -> KoalaResult<()> {
        let reason = match (self.status, &self.borrower, &self.holder) {
            (BookStatus::Available, None, None) => return Ok(()),
            (BookStatus::Borrowed, Some(_), None) => return Ok(()),
            (BookStatus::OnHold, None, Some(_)) => return Ok(()),
            (BookStatus::Borrowed, None, _) => "no borrower is set",
            (BookStatus::OnHold, _, None) => "no holder is set",
            (_, Some(_), Some(_)) => "both a borrower and a holder are set",
            (_, Some(_), None) => "a borrower is set",
            (_, None, Some(_)) => "a holder is set",
        };
        Err(KoalaError::InvalidLoanState {
            book_id: self.id.clone(),
            status: self.status,
            reason,
        })
    }

    /// Status line under the title: `Available`, `Borrowed by ..`, `On Hold for ..`
    pub fn status_text(&self) -> String {
        match self.status {
            BookStatus::Available => "Available".to_string(),
            BookStatus::Borrowed => format!(
                "Borrowed by {}",
                self.borrower.as_ref().map(User::display_name).unwrap_or("unknown")
            ),
            BookStatus::OnHold => format!(
                "On Hold for {}",
                self.holder.as_ref().map(User::display_name).unwrap_or("unknown")
            ),
        }
    }

    /// Case-insensitive title/author match against an already lower-cased query
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        matches_query(&self.title, query_lower) || matches_query(&self.author, query_lower)
    }
}

/// Lightweight reference to a book, as carried by feed events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRef {
    pub id: String,
    pub title: String,
}

impl From<&Book> for BookRef {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
        }
    }
}

/// A user's personal collection plus sharing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub owner: User,
    /// Insertion order
    pub books: Vec<Book>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub allow_friends_of_friends: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status selector of the library screen: `all` or one concrete status.
///
/// Serialized as its selector name (`all`, `available`, `borrowed`, `on_hold`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookStatus),
}

impl StatusFilter {
    /// Tabs in display order
    pub fn tabs() -> [StatusFilter; 4] {
        [
            Self::All,
            Self::Only(BookStatus::Available),
            Self::Only(BookStatus::Borrowed),
            Self::Only(BookStatus::OnHold),
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.label(),
        }
    }

    pub fn accepts(self, status: BookStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = KoalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .map(Self::Only)
            .ok_or_else(|| KoalaError::UnknownStatusFilter(s.to_string()))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = KoalaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_serializes_as_selector_name() {
        let borrowed: StatusFilter = "borrowed".parse().unwrap();
        assert_eq!(serde_json::to_string(&borrowed).unwrap(), "\"borrowed\"");
        assert_eq!(serde_json::to_string(&StatusFilter::All).unwrap(), "\"all\"");

        let on_hold: StatusFilter = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(on_hold, StatusFilter::Only(BookStatus::OnHold));
        assert_eq!(
            serde_json::from_str::<StatusFilter>("\"all\"").unwrap(),
            StatusFilter::All
        );
    }

    #[test]
    fn status_filter_rejects_unknown_selector_name() {
        let err = serde_json::from_str::<StatusFilter>("\"lost\"").unwrap_err();
        assert!(err.to_string().contains("unknown status filter 'lost'"));
        assert!(serde_json::from_str::<StatusFilter>("{\"only\":\"borrowed\"}").is_err());
    }
}
