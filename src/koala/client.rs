//! Koala client context
//!
//! One `KoalaClient` owns every store and is handed explicitly to whatever
//! renders the screens. There is no global state.

use crate::koala::auth::{AuthListener, AuthState, AuthStore};
use crate::koala::catalog::{Book, BookRef, CatalogStore, CatalogView, Library, StatusFilter};
use crate::koala::command::{Command, CommandHandler, CommandOutcome, NoopCommandHandler};
use crate::koala::directory::{DirectoryStore, FriendLibrary, MapMarker};
use crate::koala::error::KoalaError;
use crate::koala::feed::{Activity, ActivityKind, ActivityLog, FeedItem};
use crate::koala::fixtures;
use crate::koala::profile::{initials, LibraryStats, ProfileSettings, ProfileSummary, Setting};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Simulated session-restore delay before auth leaves `loading`
    pub auth_restore_delay: Duration,
    /// Initial profile toggles
    pub settings: ProfileSettings,
}

impl ClientConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self {
            auth_restore_delay: crate::koala::auth::DEFAULT_RESTORE_DELAY,
            settings: ProfileSettings::default(),
        }
    }

    pub fn with_auth_restore_delay(mut self, delay: Duration) -> Self {
        self.auth_restore_delay = delay;
        self
    }

    pub fn with_settings(mut self, settings: ProfileSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Datasets a client is seeded with
#[derive(Debug, Clone)]
pub struct SeedData {
    pub library: Library,
    pub friends: Vec<FriendLibrary>,
    pub activities: Vec<Activity>,
}

impl SeedData {
    /// Built-in sample data, timestamps relative to `now`
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            library: fixtures::sample_library(now),
            friends: fixtures::sample_friend_libraries(),
            activities: fixtures::sample_activities(now),
        }
    }
}

pub struct KoalaClient {
    config: ClientConfig,
    auth: Arc<AuthStore>,
    catalog: CatalogStore,
    directory: DirectoryStore,
    feed: ActivityLog,
    settings: ProfileSettings,
    command_handler: Arc<dyn CommandHandler>,
}

impl KoalaClient {
    /// Client over the built-in sample data
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_seed(config, SeedData::sample(Utc::now()))
    }

    pub fn with_seed(config: ClientConfig, seed: SeedData) -> Result<Self> {
        let mut catalog = CatalogStore::new(seed.library).context("invalid library seed")?;
        let directory = DirectoryStore::new(seed.friends).context("invalid friends seed")?;
        let feed = ActivityLog::new(seed.activities);

        let settings = config.settings;
        catalog.set_allow_friends_of_friends(settings.allow_friends_of_friends);

        info!(
            "[Client] ready: {} books, {} friend libraries, {} activities",
            catalog.books().len(),
            directory.len(),
            feed.len()
        );
        Ok(Self {
            auth: Arc::new(AuthStore::new(config.auth_restore_delay)),
            config,
            catalog,
            directory,
            feed,
            settings,
            command_handler: Arc::new(NoopCommandHandler),
        })
    }

    /// Kick off session restore; needs a tokio runtime
    pub fn start(&self) -> JoinHandle<()> {
        debug!(
            "[Client] starting session restore ({:?})",
            self.config.auth_restore_delay
        );
        self.auth.start()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register an auth listener
    pub fn set_auth_listener(&mut self, listener: Arc<dyn AuthListener>) {
        self.auth.set_listener(listener);
    }

    /// Register the handler for non-auth commands
    pub fn set_command_handler(&mut self, handler: Arc<dyn CommandHandler>) {
        self.command_handler = handler;
    }

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    pub async fn sign_in(&self, phone: &str) -> Result<()> {
        self.auth.sign_in(phone).await.map(|_| ())
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await
    }

    // ---------- library ----------

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn books(&self, query: &str, status: StatusFilter) -> CatalogView<'_> {
        self.catalog.query(query, status)
    }

    /// Add a book to the user's library and post it to the feed
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        let book_ref = BookRef::from(&book);
        let owner = self.catalog.library().owner.clone();
        self.catalog
            .add_book(book)
            .with_context(|| format!("adding book {}", book_ref.id))?;
        self.feed.append(Activity {
            id: Uuid::new_v4().to_string(),
            user: owner,
            timestamp: Utc::now(),
            kind: ActivityKind::AddBook { book: book_ref },
        });
        Ok(())
    }

    // ---------- friends ----------

    pub fn friend_libraries(&self, query: &str) -> Vec<&FriendLibrary> {
        self.directory.search(query)
    }

    pub fn map_markers(&self, query: &str) -> Vec<MapMarker> {
        self.directory.markers(query)
    }

    /// Add a friend's library and post the new friendship to the feed
    pub fn add_friend(&mut self, library: FriendLibrary) -> Result<()> {
        let new_friend = library.owner.clone();
        self.directory
            .add_friend(library)
            .with_context(|| format!("adding friend {}", new_friend.id))?;
        self.feed.append(Activity {
            id: Uuid::new_v4().to_string(),
            user: self.catalog.library().owner.clone(),
            timestamp: Utc::now(),
            kind: ActivityKind::NewFriend { new_friend },
        });
        Ok(())
    }

    // ---------- feed ----------

    pub fn activities(&self) -> &ActivityLog {
        &self.feed
    }

    pub fn feed(&self, now: DateTime<Utc>) -> Vec<FeedItem> {
        self.feed.render(now)
    }

    /// Post an event from outside the stores; it lands at its ordered position
    pub fn record_activity(&mut self, activity: Activity) {
        self.feed.append(activity);
    }

    // ---------- profile ----------

    pub fn settings(&self) -> ProfileSettings {
        self.settings
    }

    pub fn set_setting(&mut self, setting: Setting, value: bool) {
        info!("[Client] setting {} = {}", setting, value);
        self.settings.set(setting, value);
        if setting == Setting::AllowFriendsOfFriends {
            self.catalog.set_allow_friends_of_friends(value);
        }
    }

    pub fn profile(&self) -> ProfileSummary {
        let user = self.catalog.library().owner.clone();
        let stats = LibraryStats {
            total_books: self.catalog.books().len(),
            books_lent: self.catalog.books_lent(),
            books_borrowed: self.catalog.books_borrowed_by(&user),
            friends: self.directory.len(),
        };
        ProfileSummary {
            initials: initials(&user),
            user,
            stats,
            settings: self.settings,
        }
    }

    // ---------- commands ----------

    /// Route a user intent. Sign-out goes to the auth store, everything
    /// else to the registered handler.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutcome> {
        if command.requires_sign_in() && self.auth.current_user().is_none() {
            warn!("[Client] {} refused: not signed in", command);
            return Err(KoalaError::NotSignedIn {
                operation: command.to_string(),
            }
            .into());
        }
        debug!("[Client] dispatching {}", command);
        match command {
            Command::SignOut => {
                self.auth.sign_out().await?;
                Ok(CommandOutcome::SignedOut)
            }
            other => self
                .command_handler
                .handle(other)
                .await
                .with_context(|| format!("command {} failed", other)),
        }
    }
}
