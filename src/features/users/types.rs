use crate::api::Pagination;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    /// Any role string this front end does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }

    /// Parses the two roles an administrator may assign.
    #[must_use]
    pub fn assignable(value: &str) -> Option<Self> {
        match value.trim() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User as returned by the backend. Also the payload of the `user_data`
/// session cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "fullName")]
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One page of the admin user list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<UserRecord>,
    pub pagination: Pagination,
}

/// Query of the admin user list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub search: String,
}

impl ListQuery {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Normalizes raw query-string values: missing or unparsable numbers fall
    /// back to the defaults, `page` is at least 1 and `size` is capped.
    #[must_use]
    pub fn from_raw(page: Option<&str>, size: Option<&str>, search: Option<&str>) -> Self {
        let page = page
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);
        let size = size
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .map_or(Self::DEFAULT_SIZE, |size| size.min(Self::MAX_SIZE));
        let search = search.map(str::trim).unwrap_or_default().to_string();

        Self { page, size, search }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_raw(None, None, None)
    }
}

/// Body of `PUT /api/admin/users/{id}`.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Image attached to an admin-created user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_backend_spellings() {
        let record: UserRecord = serde_json::from_str(
            r#"{"_id":"66a1","fullName":"Ada","email":"ada@example.com","role":"admin","createdAt":"2024-01-01"}"#,
        )
        .expect("record");
        assert_eq!(record.id, "66a1");
        assert_eq!(record.name, "Ada");
        assert_eq!(record.role, Role::Admin);
        assert_eq!(record.created_at.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn unknown_and_missing_roles_decode_to_unknown() {
        let record: UserRecord =
            serde_json::from_str(r#"{"id":"1","email":"a@b.co","role":"moderator"}"#).expect("record");
        assert_eq!(record.role, Role::Unknown);

        let record: UserRecord = serde_json::from_str(r#"{"id":"1","email":"a@b.co"}"#).expect("record");
        assert_eq!(record.role, Role::Unknown);
    }

    #[test]
    fn assignable_roles() {
        assert_eq!(Role::assignable("admin"), Some(Role::Admin));
        assert_eq!(Role::assignable(" user "), Some(Role::User));
        assert_eq!(Role::assignable("unknown"), None);
        assert_eq!(Role::assignable("root"), None);
    }

    #[test]
    fn list_query_defaults_and_limits() {
        assert_eq!(
            ListQuery::default(),
            ListQuery {
                page: 1,
                size: 10,
                search: String::new()
            }
        );

        let query = ListQuery::from_raw(Some("0"), Some("5000"), Some("  ada "));
        assert_eq!(query.page, 1);
        assert_eq!(query.size, ListQuery::MAX_SIZE);
        assert_eq!(query.search, "ada");

        let query = ListQuery::from_raw(Some("3"), Some("abc"), None);
        assert_eq!(query.page, 3);
        assert_eq!(query.size, ListQuery::DEFAULT_SIZE);
    }
}
