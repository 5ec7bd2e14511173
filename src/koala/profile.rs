//! Profile screen data: privacy / notification settings and library stats

use crate::koala::error::KoalaError;
use crate::koala::types::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Toggles on the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    /// Let friends of your friends view your library
    pub allow_friends_of_friends: bool,
    /// Get notified when friends add new books
    pub notify_new_books: bool,
    /// Get notified when books are returned
    pub notify_returns: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            allow_friends_of_friends: true,
            notify_new_books: true,
            notify_returns: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    AllowFriendsOfFriends,
    NotifyNewBooks,
    NotifyReturns,
}

impl Setting {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllowFriendsOfFriends => "allow_friends_of_friends",
            Self::NotifyNewBooks => "notify_new_books",
            Self::NotifyReturns => "notify_returns",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Setting {
    type Err = KoalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow_friends_of_friends" => Ok(Self::AllowFriendsOfFriends),
            "notify_new_books" => Ok(Self::NotifyNewBooks),
            "notify_returns" => Ok(Self::NotifyReturns),
            other => Err(KoalaError::UnknownSetting(other.to_string())),
        }
    }
}

impl ProfileSettings {
    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::AllowFriendsOfFriends => self.allow_friends_of_friends,
            Setting::NotifyNewBooks => self.notify_new_books,
            Setting::NotifyReturns => self.notify_returns,
        }
    }

    pub fn set(&mut self, setting: Setting, value: bool) {
        let slot = match setting {
            Setting::AllowFriendsOfFriends => &mut self.allow_friends_of_friends,
            Setting::NotifyNewBooks => &mut self.notify_new_books,
            Setting::NotifyReturns => &mut self.notify_returns,
        };
        *slot = value;
    }
}

/// Counters shown in the "Library Stats" section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_books: usize,
    pub books_lent: usize,
    pub books_borrowed: usize,
    pub friends: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub user: User,
    /// Avatar fallback, e.g. `AJ`
    pub initials: String,
    pub stats: LibraryStats,
    pub settings: ProfileSettings,
}

/// Up to two initials from the display name
pub fn initials(user: &User) -> String {
    user.display_name()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_on_and_toggle() {
        let mut settings = ProfileSettings::default();
        assert!(settings.get(Setting::NotifyReturns));
        settings.set(Setting::NotifyReturns, false);
        assert!(!settings.get(Setting::NotifyReturns));
        assert!(settings.get(Setting::NotifyNewBooks));
    }

    #[test]
    fn setting_names_parse() {
        assert_eq!(
            "allow_friends_of_friends".parse::<Setting>(),
            Ok(Setting::AllowFriendsOfFriends)
        );
        assert_eq!(
            "dark_mode".parse::<Setting>(),
            Err(KoalaError::UnknownSetting("dark_mode".to_string()))
        );
    }

    #[test]
    fn initials_from_display_name() {
        assert_eq!(initials(&User::named("me", "Alex Johnson", "555")), "AJ");
        assert_eq!(initials(&User::named("x", "marco", "555")), "M");
    }
}
