use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::de;

/// Wire shape of a user; the id has appeared as `userID`, `UserID` and `id`.
#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(rename = "userID", default, deserialize_with = "de::opt_i64_from_any")]
    user_id_lower: Option<i64>,
    #[serde(rename = "UserID", default, deserialize_with = "de::opt_i64_from_any")]
    user_id_upper: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64_from_any")]
    id: Option<i64>,
    #[serde(alias = "Username", default)]
    username: Option<String>,
    #[serde(alias = "Last_name", default)]
    last_name: Option<String>,
    #[serde(alias = "Email", default)]
    email: Option<String>,
    #[serde(alias = "Role", default)]
    role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct User {
    #[serde(rename = "userID")]
    pub id: Option<i64>,
    /// First name; the backend calls it `username`
    pub username: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.user_id_lower.or(record.user_id_upper).or(record.id),
            username: record.username,
            last_name: record.last_name,
            email: record.email,
            role: record.role,
        }
    }
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.username.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            "Unknown".to_string()
        } else {
            full.to_string()
        }
    }
}

/// Lookup from user id to display name, used to label orders.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<i64, String>,
}

impl UserDirectory {
    pub fn from_users(users: &[User]) -> Self {
        let names = users
            .iter()
            .filter_map(|u| u.id.map(|id| (id, u.display_name())))
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name_for(&self, user_id: Option<i64>) -> String {
        match user_id {
            Some(id) => self
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("User #{}", id)),
            None => "Unknown customer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_variants() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"userID": 1, "username": "Aiko", "last_name": "Tanaka"},
            {"UserID": "2", "Username": "Ben"},
            {"id": 3},
        ]))
        .unwrap();
        assert_eq!(users[0].id, Some(1));
        assert_eq!(users[1].id, Some(2));
        assert_eq!(users[2].id, Some(3));
        assert_eq!(users[0].display_name(), "Aiko Tanaka");
        assert_eq!(users[1].display_name(), "Ben");
        assert_eq!(users[2].display_name(), "Unknown");
    }

    #[test]
    fn test_directory_names() {
        let users: Vec<User> =
            serde_json::from_value(json!([{"userID": 123, "username": "Aiko", "last_name": "Tanaka"}]))
                .unwrap();
        let directory = UserDirectory::from_users(&users);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.name_for(Some(123)), "Aiko Tanaka");
        assert_eq!(directory.name_for(Some(456)), "User #456");
        assert_eq!(directory.name_for(None), "Unknown customer");
    }
}
