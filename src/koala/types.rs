//! Shared model types used across the stores

use serde::{Deserialize, Serialize};

/// A Koala user. Identity is by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// User with a display name and phone, no avatar
    pub fn named(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            phone: phone.into(),
            avatar: None,
        }
    }

    /// Name shown in lists and feed sentences; falls back to the phone number
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.phone)
    }

    pub fn same_identity(&self, other: &User) -> bool {
        self.id == other.id
    }
}

/// Geographic coordinate pair handed to the map collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Case-insensitive substring match; an empty query matches everything
pub(crate) fn matches_query(haystack: &str, query_lower: &str) -> bool {
    query_lower.is_empty() || haystack.to_lowercase().contains(query_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_phone() {
        let user = User {
            id: "123".to_string(),
            name: None,
            phone: "555-0100".to_string(),
            avatar: None,
        };
        assert_eq!(user.display_name(), "555-0100");
        assert_eq!(
            User::named("u1", "Sarah J.", "555-0101").display_name(),
            "Sarah J."
        );
    }

    #[test]
    fn query_match_ignores_case() {
        assert!(matches_query("Marco L.", "mar"));
        assert!(matches_query("anything", ""));
        assert!(!matches_query("Sarah J.", "mar"));
    }
}
