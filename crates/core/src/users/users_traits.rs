use async_trait::async_trait;

use super::users_model::{NewUser, User, UserData};
use crate::errors::Result;

/// Document store for user records, keyed by username.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    /// Overwrites the whole record identified by `user.username`.
    async fn save(&self, user: User) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, username: &str) -> Result<User>;
    fn get_user_data(&self, username: &str) -> Result<UserData>;
    /// Stored password hash for `username`, if the user exists.
    fn find_credentials(&self, username: &str) -> Result<Option<String>>;
    async fn register(&self, new_user: NewUser) -> Result<UserData>;
}
