//! User service implementations.

use crate::dto::{Message, UserList, UserPublic, UserSchema};
use crate::user_service::UserService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};
use userdir_core::{NewUser, PageRequest, UserDirError, UserDirResult, UserId, ValidateExt};
use userdir_repository::UserRepository;

/// Generic user service implementation (non-DI).
pub struct UserServiceImpl<R: UserRepository + ?Sized> {
    user_repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    /// Fails with `Conflict` when another user owns the candidate's username
    /// or email. Username is reported first.
    async fn ensure_unique(&self, candidate: &NewUser, excluding: Option<UserId>) -> UserDirResult<()> {
        let existing = self
            .user_repository
            .find_by_username_or_email(&candidate.username, &candidate.email, excluding)
            .await?;

        if let Some(field) = existing.and_then(|user| user.conflicts_with(candidate)) {
            warn!("Rejecting user {}: {} already exists", candidate.username, field);
            return Err(UserDirError::conflict(field));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized + 'static> UserService for UserServiceImpl<R> {
    async fn create_user(&self, request: UserSchema) -> UserDirResult<UserPublic> {
        debug!("Creating user: {}", request.username);

        request.validate_request()?;

        let candidate = NewUser::from(request);
        self.ensure_unique(&candidate, None).await?;

        let saved_user = self.user_repository.save(&candidate).await?;

        info!("User created: {}", saved_user.id);
        Ok(UserPublic::from(saved_user))
    }

    async fn list_users(&self, page: PageRequest) -> UserDirResult<UserList> {
        debug!("Listing users, skip: {}, limit: {}", page.skip, page.limit);

        let users = self.user_repository.find_all(page).await?;
        Ok(UserList::from(users))
    }

    async fn get_user(&self, id: UserId) -> UserDirResult<UserPublic> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserDirError::not_found(id.into_inner()))?;

        Ok(UserPublic::from(user))
    }

    async fn update_user(&self, id: UserId, request: UserSchema) -> UserDirResult<UserPublic> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserDirError::not_found(id.into_inner()))?;

        let changes = NewUser::from(request);
        self.ensure_unique(&changes, Some(id)).await?;

        user.apply(changes);
        let updated_user = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        Ok(UserPublic::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> UserDirResult<Message> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(UserDirError::not_found(id.into_inner()));
        }

        info!("User deleted: {}", id);
        Ok(Message::user_deleted(id))
    }
}

/// Shaku-injectable user service.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceComponent {
    fn service(&self) -> UserServiceImpl<dyn UserRepository> {
        UserServiceImpl::new(Arc::clone(&self.user_repository))
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_user(&self, request: UserSchema) -> UserDirResult<UserPublic> {
        self.service().create_user(request).await
    }

    async fn list_users(&self, page: PageRequest) -> UserDirResult<UserList> {
        self.service().list_users(page).await
    }

    async fn get_user(&self, id: UserId) -> UserDirResult<UserPublic> {
        self.service().get_user(id).await
    }

    async fn update_user(&self, id: UserId, request: UserSchema) -> UserDirResult<UserPublic> {
        self.service().update_user(id, request).await
    }

    async fn delete_user(&self, id: UserId) -> UserDirResult<Message> {
        self.service().delete_user(id).await
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::mock;
    use std::sync::Mutex;
    use userdir_core::{ConflictField, User};

    /// In-memory repository mirroring the SQLite semantics.
    #[derive(Default)]
    struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_id(&self, id: UserId) -> UserDirResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_username_or_email(
            &self,
            username: &str,
            email: &str,
            excluding: Option<UserId>,
        ) -> UserDirResult<Option<User>> {
            let users = self.users.lock().unwrap();
            let others: Vec<&User> = users.iter().filter(|u| Some(u.id) != excluding).collect();
            Ok(others
                .iter()
                .find(|u| u.username == username)
                .or_else(|| others.iter().find(|u| u.email == email))
                .map(|u| (*u).clone()))
        }

        async fn find_all(&self, page: PageRequest) -> UserDirResult<Vec<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .skip(usize::try_from(page.skip).unwrap())
                .take(usize::try_from(page.limit).unwrap())
                .cloned()
                .collect())
        }

        async fn save(&self, user: &NewUser) -> UserDirResult<User> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let now = Utc::now();
            let saved = User {
                id: UserId::new(*next_id),
                username: user.username.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().push(saved.clone());
            Ok(saved)
        }

        async fn update(&self, user: &User) -> UserDirResult<User> {
            let mut users = self.users.lock().unwrap();
            let slot = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or_else(|| UserDirError::not_found(user.id.into_inner()))?;
            *slot = user.clone();
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> UserDirResult<bool> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok(users.len() < before)
        }
    }

    mock! {
        Repo {}

        #[async_trait]
        impl UserRepository for Repo {
            async fn find_by_id(&self, id: UserId) -> UserDirResult<Option<User>>;
            async fn find_by_username_or_email(
                &self,
                username: &str,
                email: &str,
                excluding: Option<UserId>,
            ) -> UserDirResult<Option<User>>;
            async fn find_all(&self, page: PageRequest) -> UserDirResult<Vec<User>>;
            async fn save(&self, user: &NewUser) -> UserDirResult<User>;
            async fn update(&self, user: &User) -> UserDirResult<User>;
            async fn delete(&self, id: UserId) -> UserDirResult<bool>;
        }
    }

    fn service() -> UserServiceImpl<InMemoryUserRepository> {
        UserServiceImpl::new(Arc::new(InMemoryUserRepository::default()))
    }

    fn schema(username: &str, email: &str, password: &str) -> UserSchema {
        UserSchema {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = service();

        let user = service
            .create_user(schema("Paulo", "p@x.com", "1234"))
            .await
            .unwrap();

        assert_eq!(
            user,
            UserPublic {
                id: UserId::new(1),
                username: "Paulo".to_string(),
                email: "p@x.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let service = service();

        let first = service.create_user(schema("a", "a@x.com", "1")).await.unwrap();
        let second = service.create_user(schema("b", "b@x.com", "1")).await.unwrap();
        assert!(second.id.into_inner() > first.id.into_inner());
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let service = service();
        service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let err = service
            .create_user(schema("test", "teste2@gmail.com", "12345"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Username)));
        assert_eq!(err.to_string(), "Username already exists!");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = service();
        service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let err = service
            .create_user(schema("paulo", "teste@gmail.com", "12345"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Email)));
    }

    #[tokio::test]
    async fn test_username_conflict_reported_before_email() {
        let service = service();
        service.create_user(schema("first", "first@x.com", "1")).await.unwrap();
        service.create_user(schema("second", "second@x.com", "1")).await.unwrap();

        let err = service
            .create_user(schema("second", "first@x.com", "1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Username)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let err = service()
            .create_user(schema("Paulo", "nope", "1234"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_users_in_creation_order() {
        let service = service();
        assert!(service.list_users(PageRequest::default()).await.unwrap().users.is_empty());

        for name in ["a", "b", "c"] {
            service
                .create_user(schema(name, &format!("{name}@x.com"), "1"))
                .await
                .unwrap();
        }

        let list = service.list_users(PageRequest::default()).await.unwrap();
        let names: Vec<_> = list.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let page = service.list_users(PageRequest::new(1, 1)).await.unwrap();
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].username, "b");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let err = service().get_user(UserId::new(10)).await.unwrap_err();

        assert!(matches!(err, UserDirError::NotFound { id: 10 }));
        assert_eq!(err.to_string(), "User with id 10 not found!");
    }

    #[tokio::test]
    async fn test_update_user() {
        let service = service();
        let created = service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                created.id,
                schema("Paulo Roberto", "prmorais1302@gmail.com", "1234"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, "Paulo Roberto");
        assert_eq!(updated.email, "prmorais1302@gmail.com");
        assert_eq!(service.get_user(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_may_keep_own_values() {
        let service = service();
        let created = service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let updated = service
            .update_user(created.id, schema("test", "teste@gmail.com", "changed"))
            .await
            .unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_into_other_username_is_conflict() {
        let service = service();
        service.create_user(schema("first", "first@x.com", "1")).await.unwrap();
        let second = service.create_user(schema("second", "second@x.com", "1")).await.unwrap();

        let err = service
            .update_user(second.id, schema("first", "second@x.com", "1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Username)));
        assert_eq!(service.get_user(second.id).await.unwrap().username, "second");
    }

    #[tokio::test]
    async fn test_update_into_other_email_is_conflict() {
        let service = service();
        service.create_user(schema("first", "first@x.com", "1")).await.unwrap();
        let second = service.create_user(schema("second", "second@x.com", "1")).await.unwrap();

        let err = service
            .update_user(second.id, schema("second", "first@x.com", "1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Email)));
        assert_eq!(err.to_string(), "Email already exists!");
        assert_eq!(service.get_user(second.id).await.unwrap().email, "second@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let service = service();
        service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let err = service
            .update_user(
                UserId::new(10),
                schema("Paulo Roberto", "prmorais1302@gmail.com", "1234"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::NotFound { id: 10 }));
        let list = service.list_users(PageRequest::default()).await.unwrap();
        assert_eq!(list.users.len(), 1);
        assert_eq!(list.users[0].username, "test");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = service();
        let created = service
            .create_user(schema("test", "teste@gmail.com", "testtest"))
            .await
            .unwrap();

        let message = service.delete_user(created.id).await.unwrap();
        assert_eq!(message.message, "User 1 deleted");

        let err = service.delete_user(created.id).await.unwrap_err();
        assert!(matches!(err, UserDirError::NotFound { id: 1 }));
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .returning(|_| Err(UserDirError::Database("disk I/O error".to_string())));

        let service = UserServiceImpl::new(Arc::new(repo));
        let err = service.get_user(UserId::new(1)).await.unwrap_err();

        assert!(matches!(err, UserDirError::Database(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_storage_conflict_surfaces_as_conflict() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_username_or_email()
            .returning(|_, _, _| Ok(None));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(UserDirError::conflict(ConflictField::Email)));

        let service = UserServiceImpl::new(Arc::new(repo));
        let err = service
            .create_user(schema("racer", "racer@x.com", "1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserDirError::Conflict(ConflictField::Email)));
    }

    #[tokio::test]
    async fn test_component_delegates_to_repository() {
        let mut repo = MockRepo::new();
        repo.expect_delete().returning(|_| Ok(false));

        let component = UserServiceComponent {
            user_repository: Arc::new(repo),
        };
        let err = component.delete_user(UserId::new(3)).await.unwrap_err();

        assert!(matches!(err, UserDirError::NotFound { id: 3 }));
    }
}
