//! Directory module
//!
//! Friends' libraries nearby, searchable by name and placed on a map

pub mod models;
pub mod service;

pub use models::{FriendLibrary, MapMarker};
pub use service::{filter_libraries, DirectoryStore, EMPTY_DIRECTORY_TEXT};
