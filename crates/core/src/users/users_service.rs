use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::users_model::{NewUser, User, UserData};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Loads a user, mapping a blank key to `MissingParameter` and an absent
/// record to `NotFound`.
pub(crate) fn load_user(repository: &dyn UserRepositoryTrait, username: &str) -> Result<User> {
    if username.trim().is_empty() {
        return Err(Error::MissingParameter("Username".to_string()));
    }
    repository
        .get_by_username(username)?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, username: &str) -> Result<User> {
        load_user(self.repository.as_ref(), username)
    }

    fn get_user_data(&self, username: &str) -> Result<UserData> {
        debug!("Fetching user data for {}", username);
        self.get_user(username).map(UserData::from)
    }

    fn find_credentials(&self, username: &str) -> Result<Option<String>> {
        Ok(self
            .repository
            .get_by_username(username.trim())?
            .map(|user| user.password_hash))
    }

    async fn register(&self, new_user: NewUser) -> Result<UserData> {
        let new_user = new_user.validate()?;
        if self.repository.get_by_username(&new_user.username)?.is_some() {
            return Err(Error::Duplicate("Username is already taken".to_string()));
        }
        let user = self.repository.insert(new_user).await?;
        info!("Registered user {}", user.username);
        Ok(UserData::from(user))
    }
}
