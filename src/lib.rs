pub mod koala;

// Re-export the types most callers need
pub use koala::{
    auth::{AuthState, AuthStore},
    catalog::{Book, BookStatus, CatalogStore, StatusFilter},
    client::{ClientConfig, KoalaClient, SeedData},
    command::{Command, CommandOutcome},
    directory::{DirectoryStore, FriendLibrary, MapMarker},
    error::KoalaError,
    feed::{Activity, ActivityKind, ActivityLog},
};
