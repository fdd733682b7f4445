//! SQLite user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use userdir_core::{NewUser, PageRequest, User, UserDirError, UserDirResult, UserId};

/// SQLite user repository implementation.
///
/// Every write runs inside its own transaction, which rolls back if it is
/// dropped before commit.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqliteUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            email: row.email,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> UserDirResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        excluding: Option<UserId>,
    ) -> UserDirResult<Option<User>> {
        debug!("Finding user by username {} or email {}", username, email);

        let excluding = excluding.map(UserId::into_inner);
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password, created_at, updated_at
            FROM users
            WHERE (username = ? OR email = ?)
              AND (? IS NULL OR id != ?)
            ORDER BY (username = ?) DESC, id
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(excluding)
        .bind(excluding)
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self, page: PageRequest) -> UserDirResult<Vec<User>> {
        debug!("Listing users: skip={}, limit={}", page.skip, page.limit);

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password, created_at, updated_at
            FROM users
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: &NewUser) -> UserDirResult<User> {
        debug!("Saving user: {}", user.username);

        let now = Utc::now();
        let mut tx = self.pool.inner().begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(User::from(row))
    }

    async fn update(&self, user: &User) -> UserDirResult<User> {
        debug!("Updating user: {}", user.id);

        let mut tx = self.pool.inner().begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = ?, email = ?, password = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.updated_at)
        .bind(user.id.into_inner())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| UserDirError::not_found(user.id.into_inner()))?;

        tx.commit().await?;
        Ok(User::from(row))
    }

    async fn delete(&self, id: UserId) -> UserDirResult<bool> {
        debug!("Deleting user: {}", id);

        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
