//! Catalog module
//!
//! The current user's library and its search / status filtering

pub mod models;
pub mod service;

pub use models::{Book, BookRef, BookStatus, Library, StatusFilter};
pub use service::{filter_books, CatalogStore, CatalogView, EMPTY_CATALOG_TEXT};
