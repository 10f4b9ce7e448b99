/// User model
///
/// Users are created by the registration flow. The profile service only
/// reads their display attributes and removes them when an account is
/// deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_name TEXT NOT NULL,
///     user_email TEXT NOT NULL UNIQUE,
///     user_avatar TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub user_id: Uuid,

    /// Display name
    pub user_name: String,

    /// Email address (unique)
    pub user_email: String,

    /// Avatar URL
    pub user_avatar: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub user_name: String,
    pub user_email: String,
    pub user_avatar: Option<String>,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Fails on a duplicate email or a database fault.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, user_email, user_avatar)
            VALUES ($1, $2, $3)
            RETURNING user_id, user_name, user_email, user_avatar, created_at
            "#,
        )
        .bind(data.user_name)
        .bind(data.user_email)
        .bind(data.user_avatar)
        .fetch_one(pool)
        .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, user_email, user_avatar, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
