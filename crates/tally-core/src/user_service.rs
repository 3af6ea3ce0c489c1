//! Account registration, sign-in and profile edits.

use tracing::warn;
use uuid::Uuid;

use tally_domain::User;

use crate::{remote::RemoteUser, CoreError};

/// Requested profile changes. Password fields left blank keep the current
/// password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub struct UserService;

impl UserService {
    pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
        let username = username.trim();
        users.iter().find(|user| user.username == username)
    }

    /// Creates an account with a bcrypt hash of `password` and appends it.
    pub fn register(
        users: &mut Vec<User>,
        name: &str,
        username: &str,
        password: &str,
        cost: u32,
    ) -> Result<User, CoreError> {
        let name = name.trim();
        let username = username.trim();
        if name.is_empty() || username.is_empty() || password.is_empty() {
            return Err(CoreError::validation(
                "name, username and password are required",
            ));
        }
        if Self::find_by_username(users, username).is_some() {
            return Err(CoreError::DuplicateUsername(username.to_string()));
        }
        let hash = bcrypt::hash(password, cost)?;
        let user = User::new(name, username, hash);
        users.push(user.clone());
        Ok(user)
    }

    pub fn authenticate<'a>(
        users: &'a [User],
        username: &str,
        password: &str,
    ) -> Result<&'a User, CoreError> {
        let user =
            Self::find_by_username(users, username).ok_or(CoreError::InvalidCredentials)?;
        match bcrypt::verify(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(CoreError::InvalidCredentials),
            Err(err) => {
                warn!(username = %user.username, error = %err, "stored password hash is unreadable");
                Err(CoreError::InvalidCredentials)
            }
        }
    }

    /// Applies `update` to the user with `id` and returns the updated record.
    /// Nothing changes when validation fails.
    pub fn update_profile(
        users: &mut [User],
        id: Uuid,
        update: &ProfileUpdate,
        cost: u32,
    ) -> Result<User, CoreError> {
        if update.new_password != update.confirm_password {
            return Err(CoreError::validation("passwords do not match"));
        }
        let name = update.name.trim();
        let username = update.username.trim();
        if name.is_empty() || username.is_empty() {
            return Err(CoreError::validation("name and username are required"));
        }
        if users
            .iter()
            .any(|user| user.id != id && user.username == username)
        {
            return Err(CoreError::DuplicateUsername(username.to_string()));
        }
        let new_hash = if update.new_password.is_empty() {
            None
        } else {
            Some(bcrypt::hash(&update.new_password, cost)?)
        };

        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;
        user.name = name.to_string();
        user.username = username.to_string();
        if let Some(hash) = new_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    /// Overwrites identity fields with the remote's record, keeping the local
    /// password hash.
    pub fn adopt_remote(user: &mut User, remote: &RemoteUser) {
        user.id = remote.id;
        user.name = remote.name.clone();
        user.username = remote.username.clone();
    }
}
