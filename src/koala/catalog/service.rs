//! Catalog store
//!
//! Holds the current user's library and answers the library screen's
//! search + status tab queries.

use crate::koala::catalog::models::{Book, BookStatus, Library, StatusFilter};
use crate::koala::error::{KoalaError, KoalaResult};
use crate::koala::types::User;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Text shown when a catalog query matches nothing
pub const EMPTY_CATALOG_TEXT: &str = "No books found";

/// Keep the books matching `query` (title or author, case-insensitive) and
/// `status`, in source order.
pub fn filter_books<'a>(books: &'a [Book], query: &str, status: StatusFilter) -> Vec<&'a Book> {
    let query_lower = query.to_lowercase();
    books
        .iter()
        .filter(|book| book.matches(&query_lower) && status.accepts(book.status))
        .collect()
}

/// Result of a catalog query, ready for the list screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    pub query: String,
    pub status: StatusFilter,
    pub books: Vec<&'a Book>,
}

impl CatalogView<'_> {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Empty-state text, or `None` when there is something to list
    pub fn empty_text(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CATALOG_TEXT)
    }
}

/// Catalog store backed by a single in-memory library
#[derive(Debug, Clone)]
pub struct CatalogStore {
    library: Library,
}

impl CatalogStore {
    /// Build a store, validating every book and rejecting duplicate ids
    pub fn new(library: Library) -> KoalaResult<Self> {
        {
            let mut seen = HashSet::new();
            for book in &library.books {
                book.validate()?;
                if !seen.insert(book.id.as_str()) {
                    warn!("[Catalog] duplicate book id in library {}: {}", library.id, book.id);
                    return Err(KoalaError::DuplicateBook {
                        book_id: book.id.clone(),
                    });
                }
            }
        }
        info!(
            "[Catalog] loaded library {} for {} with {} books",
            library.id,
            library.owner.id,
            library.books.len()
        );
        Ok(Self { library })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn books(&self) -> &[Book] {
        &self.library.books
    }

    pub fn get(&self, book_id: &str) -> Option<&Book> {
        self.library.books.iter().find(|b| b.id == book_id)
    }

    /// Run the library screen query
    pub fn query(&self, query: &str, status: StatusFilter) -> CatalogView<'_> {
        let books = filter_books(&self.library.books, query, status);
        debug!(
            "[Catalog] query {:?} status={} -> {} of {} books",
            query,
            status,
            books.len(),
            self.library.books.len()
        );
        CatalogView {
            query: query.to_string(),
            status,
            books,
        }
    }

    /// Append a book at the end of the library
    pub fn add_book(&mut self, book: Book) -> KoalaResult<()> {
        book.validate()?;
        if self.get(&book.id).is_some() {
            warn!("[Catalog] rejected duplicate book {}", book.id);
            return Err(KoalaError::DuplicateBook { book_id: book.id });
        }
        info!("[Catalog] added book {} ({})", book.id, book.title);
        self.library.books.push(book);
        self.library.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_allow_friends_of_friends(&mut self, allow: bool) {
        self.library.allow_friends_of_friends = allow;
        self.library.updated_at = Utc::now();
    }

    /// Number of the owner's books currently lent out
    pub fn books_lent(&self) -> usize {
        self.library
            .books
            .iter()
            .filter(|b| b.status == BookStatus::Borrowed && b.owner.same_identity(&self.library.owner))
            .count()
    }

    /// Number of books in this catalog borrowed by `user`
    pub fn books_borrowed_by(&self, user: &User) -> usize {
        self.library
            .books
            .iter()
            .filter(|b| b.borrower.as_ref().is_some_and(|u| u.same_identity(user)))
            .count()
    }
}
