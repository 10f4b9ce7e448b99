/// Work experience entries
///
/// A user owns any number of experience rows. They are appended one at a
/// time and are never merged; the profile listings return them as an
/// aggregated array.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE experiences (
///     experience_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users (user_id),
///     experience_title TEXT NOT NULL,
///     experience_company TEXT NOT NULL,
///     experience_location TEXT,
///     experience_from DATE NOT NULL,
///     experience_to DATE,
///     experience_current BOOLEAN NOT NULL DEFAULT FALSE,
///     experience_description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// One work-history entry
///
/// Field names match the column names because rows are also decoded from
/// `json_agg` output in the profile listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub experience_id: Uuid,
    pub user_id: Uuid,
    pub experience_title: String,
    pub experience_company: String,
    pub experience_location: Option<String>,
    pub experience_from: NaiveDate,
    pub experience_to: Option<NaiveDate>,
    pub experience_current: bool,
    pub experience_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for adding an experience entry
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

const COLUMNS: &str = "experience_id, user_id, experience_title, experience_company, \
    experience_location, experience_from, experience_to, experience_current, \
    experience_description, created_at";

impl Experience {
    /// Appends an experience entry for `user_id`
    ///
    /// No duplicate check is made: calling this twice with the same input
    /// creates two rows.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        data: CreateExperience,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO experiences (
                user_id, experience_title, experience_company, experience_location,
                experience_from, experience_to, experience_current, experience_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Experience>(&query)
            .bind(user_id)
            .bind(data.title)
            .bind(data.company)
            .bind(data.location)
            .bind(data.from)
            .bind(data.to)
            .bind(data.current)
            .bind(data.description)
            .fetch_one(pool)
            .await
    }
}
