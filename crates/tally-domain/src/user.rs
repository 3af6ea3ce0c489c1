//! Accounts that can sign in to the dashboard.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account, including its bcrypt password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// The public part of a [`User`]; this is what the session remembers as the
/// signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl Profile {
    /// First word of the display name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_omits_password_hash() {
        let user = User::new("Ana Souza", "ana@example.com", "$2b$04$hash");
        let json = serde_json::to_string(&user.profile()).unwrap();

        assert!(!json.contains("hash"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn first_name_takes_leading_word() {
        let user = User::new("Ana Souza", "ana@example.com", "x");
        assert_eq!(user.profile().first_name(), "Ana");
    }
}
