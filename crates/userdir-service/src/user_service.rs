//! User service trait definition.

use crate::dto::{Message, UserList, UserPublic, UserSchema};
use async_trait::async_trait;
use userdir_core::{Interface, PageRequest, UserDirResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user after checking username and email are free.
    async fn create_user(&self, request: UserSchema) -> UserDirResult<UserPublic>;

    /// Lists users in creation order.
    async fn list_users(&self, page: PageRequest) -> UserDirResult<UserList>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> UserDirResult<UserPublic>;

    /// Overwrites username, email and password of an existing user.
    async fn update_user(&self, id: UserId, request: UserSchema) -> UserDirResult<UserPublic>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> UserDirResult<Message>;
}
