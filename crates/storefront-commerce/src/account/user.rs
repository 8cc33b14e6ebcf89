//! User accounts.

use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role, as offered by the admin user filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    Regular,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "regular",
            Role::Admin => "admin",
        }
    }

    /// Badge text in the user table.
    pub fn badge(&self) -> &'static str {
        match self {
            Role::Regular => "MEMBER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "").as_str() {
            "admin" => Ok(Role::Admin),
            "regular" | "member" | "user" => Ok(Role::Regular),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

/// A user record. The session user additionally carries a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            phone: None,
            address: None,
            avatar: None,
            created_at: None,
            token: None,
        }
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Regular
        }
    }

    /// Bearer token, when this is the signed-in user.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Initial shown in the avatar placeholder.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Admin user list filter: search term over name/email and an optional role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || user.name.to_lowercase().contains(&search)
            || user.email.to_lowercase().contains(&search);

        matches_search && self.role.map_or(true, |r| user.role() == r)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }

    /// Query parameters for `GET /api/users`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        let mut admin = User::new("u1", "Priya Admin", "priya@store.in");
        admin.is_admin = true;
        vec![
            admin,
            User::new("u2", "Karan", "karan@example.com"),
            User::new("u3", "Anita", "anita@store.in"),
        ]
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Regular".parse::<Role>(), Ok(Role::Regular));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_filter_by_search_and_role() {
        let all = users();
        let f = UserFilter {
            search: "STORE.IN".into(),
            role: None,
        };
        assert_eq!(f.apply(&all).len(), 2);

        let f = UserFilter {
            search: "store.in".into(),
            role: Some(Role::Regular),
        };
        let hits = f.apply(&all);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Anita");
    }

    #[test]
    fn test_query_pairs() {
        let f = UserFilter {
            search: "  kar ".into(),
            role: Some(Role::Admin),
        };
        assert_eq!(
            f.to_query_pairs(),
            vec![("search", "kar".to_string()), ("role", "admin".to_string())]
        );
        assert!(UserFilter::default().to_query_pairs().is_empty());
    }

    #[test]
    fn test_session_user_json() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u9","name":"zoya","email":"z@x.in","isAdmin":false,"token":"abc"}"#,
        )
        .unwrap();
        assert_eq!(user.bearer(), Some("abc"));
        assert_eq!(user.initial(), 'Z');
        assert_eq!(user.role(), Role::Regular);
    }
}
