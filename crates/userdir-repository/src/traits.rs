//! Repository trait definitions.

use async_trait::async_trait;
use userdir_core::{Interface, NewUser, PageRequest, User, UserDirResult, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> UserDirResult<Option<User>>;

    /// Finds a user owning either the username or the email.
    ///
    /// A username match is preferred over an email match when two different
    /// rows qualify. `excluding` skips one row, so an update can keep its own
    /// values.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        excluding: Option<UserId>,
    ) -> UserDirResult<Option<User>>;

    /// Lists users in ascending id order.
    async fn find_all(&self, page: PageRequest) -> UserDirResult<Vec<User>>;

    /// Inserts a new user and returns it with its assigned id.
    async fn save(&self, user: &NewUser) -> UserDirResult<User>;

    /// Overwrites username, email and password of an existing user.
    async fn update(&self, user: &User) -> UserDirResult<User>;

    /// Deletes a user by ID. Returns false when no row matched.
    async fn delete(&self, id: UserId) -> UserDirResult<bool>;
}
