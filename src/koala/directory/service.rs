//! Directory store
//!
//! Nearby friend-libraries for the map/list screen.

use crate::koala::directory::models::{FriendLibrary, MapMarker};
use crate::koala::error::{KoalaError, KoalaResult};
use crate::koala::types::matches_query;
use tracing::{debug, info, warn};

/// Text shown when no friend library matches
pub const EMPTY_DIRECTORY_TEXT: &str = "No libraries found";

/// Keep the libraries whose owner's display name contains `query`
/// (case-insensitive), in source order.
pub fn filter_libraries<'a>(libraries: &'a [FriendLibrary], query: &str) -> Vec<&'a FriendLibrary> {
    let query_lower = query.to_lowercase();
    libraries
        .iter()
        .filter(|library| matches_query(library.display_name(), &query_lower))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryStore {
    libraries: Vec<FriendLibrary>,
}

impl DirectoryStore {
    /// Build from a list, rejecting repeated library or owner ids
    pub fn new(libraries: Vec<FriendLibrary>) -> KoalaResult<Self> {
        let mut store = Self::default();
        for library in libraries {
            store.add_friend(library)?;
        }
        info!("[Directory] loaded {} friend libraries", store.libraries.len());
        Ok(store)
    }

    pub fn libraries(&self) -> &[FriendLibrary] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<&FriendLibrary> {
        let found = filter_libraries(&self.libraries, query);
        debug!(
            "[Directory] search {:?} -> {} of {} libraries",
            query,
            found.len(),
            self.libraries.len()
        );
        found
    }

    /// Map markers for the libraries matching `query`
    pub fn markers(&self, query: &str) -> Vec<MapMarker> {
        self.search(query).into_iter().map(FriendLibrary::marker).collect()
    }

    pub fn add_friend(&mut self, library: FriendLibrary) -> KoalaResult<()> {
        let duplicate = self
            .libraries
            .iter()
            .any(|l| l.id == library.id || l.owner.same_identity(&library.owner));
        if duplicate {
            warn!(
                "[Directory] rejected duplicate friend library {} (owner {})",
                library.id, library.owner.id
            );
            return Err(KoalaError::DuplicateFriend {
                library_id: library.id,
                owner_id: library.owner.id,
            });
        }
        self.libraries.push(library);
        Ok(())
    }
}
