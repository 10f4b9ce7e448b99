/// Developer profiles
///
/// Each user has at most one profile, keyed by the user's id. Profiles are
/// written through a single upsert and read back either on their own
/// (joined with the owner's display attributes) or together with the
/// owner's experience entries.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     user_id UUID PRIMARY KEY REFERENCES users (user_id),
///     profile_company TEXT,
///     profile_website TEXT,
///     profile_location TEXT,
///     profile_status TEXT NOT NULL,
///     profile_skills TEXT[] NOT NULL,
///     profile_bio TEXT,
///     profile_githubusername TEXT,
///     profile_social JSONB NOT NULL DEFAULT '{}'::jsonb,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use devconnector_shared::models::profile::{parse_skills, Profile, ProfileFields, SocialLinks};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let fields = ProfileFields {
///     status: "Developer".to_string(),
///     skills: parse_skills("rust, sql"),
///     social: SocialLinks {
///         twitter: Some("https://twitter.com/me".to_string()),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
///
/// let profile = Profile::upsert(&pool, user_id, fields).await?;
/// assert_eq!(profile.profile_skills, vec!["rust", "sql"]);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::experience::Experience;

/// Links to the user's accounts on other platforms
///
/// Platforms that were never supplied are absent from the stored JSON
/// object rather than set to null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.youtube.is_none()
            && self.twitter.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.instagram.is_none()
    }
}

/// A row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Owning user (also the primary key)
    pub user_id: Uuid,

    pub profile_company: Option<String>,

    pub profile_website: Option<String>,

    pub profile_location: Option<String>,

    /// Professional status, e.g. "Developer"
    pub profile_status: String,

    /// Skills in the order the user listed them
    pub profile_skills: Vec<String>,

    pub profile_bio: Option<String>,

    pub profile_githubusername: Option<String>,

    pub profile_social: Json<SocialLinks>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A profile together with its owner's display attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: Profile,

    pub user_name: String,

    pub user_avatar: Option<String>,
}

/// A profile with the owner's display attributes and experience entries
///
/// `experiences` is an empty array, never null, for users without any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileWithExperiences {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user_profile: UserProfile,

    pub experiences: Json<Vec<Experience>>,
}

/// Values written by [`Profile::upsert`]
///
/// `None` leaves an existing column untouched; on first insert it stores
/// NULL. `status` and `skills` are always written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: SocialLinks,
}

/// Account rows removed by [`Profile::delete_with_user`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedAccount {
    pub experiences: u64,
    pub profiles: u64,
    pub users: u64,
}

/// Splits a comma-separated skills string
///
/// Entries are trimmed, empty entries dropped and order preserved.
///
/// # Example
///
/// ```
/// use devconnector_shared::models::profile::parse_skills;
///
/// assert_eq!(parse_skills("a, b,c"), vec!["a", "b", "c"]);
/// assert!(parse_skills(" , ").is_empty());
/// ```
pub fn parse_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

const PROFILE_COLUMNS: &str = "p.user_id, p.profile_company, p.profile_website, \
    p.profile_location, p.profile_status, p.profile_skills, p.profile_bio, \
    p.profile_githubusername, p.profile_social, p.created_at, p.updated_at";

/// Profiles joined with users and their aggregated experiences
fn profiles_with_experiences_query(filter: &str) -> String {
    format!(
        r#"
        SELECT {PROFILE_COLUMNS}, u.user_name, u.user_avatar,
               COALESCE(
                   json_agg(e ORDER BY e.experience_from DESC, e.created_at DESC)
                       FILTER (WHERE e.experience_id IS NOT NULL),
                   '[]'::json
               ) AS experiences
        FROM users u
        INNER JOIN profiles p ON p.user_id = u.user_id
        LEFT JOIN experiences e ON e.user_id = p.user_id
        {filter}
        GROUP BY p.user_id, u.user_id
        ORDER BY p.created_at
        "#
    )
}

impl Profile {
    /// Inserts or updates the profile owned by `user_id`
    ///
    /// On conflict the required fields are overwritten, optional fields
    /// passed as `None` keep their stored value, and social links are
    /// merged per platform. Applying the same fields twice leaves the
    /// profile unchanged apart from `updated_at`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        fields: ProfileFields,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO profiles AS p (
                user_id, profile_company, profile_website, profile_location,
                profile_status, profile_skills, profile_bio, profile_githubusername,
                profile_social
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                profile_company = COALESCE(EXCLUDED.profile_company, p.profile_company),
                profile_website = COALESCE(EXCLUDED.profile_website, p.profile_website),
                profile_location = COALESCE(EXCLUDED.profile_location, p.profile_location),
                profile_status = EXCLUDED.profile_status,
                profile_skills = EXCLUDED.profile_skills,
                profile_bio = COALESCE(EXCLUDED.profile_bio, p.profile_bio),
                profile_githubusername = COALESCE(EXCLUDED.profile_githubusername, p.profile_githubusername),
                profile_social = p.profile_social || EXCLUDED.profile_social,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(fields.company)
            .bind(fields.website)
            .bind(fields.location)
            .bind(fields.status)
            .bind(fields.skills)
            .bind(fields.bio)
            .bind(fields.githubusername)
            .bind(Json(fields.social))
            .fetch_one(pool)
            .await
    }

    /// Finds the profile owned by `user_id`, with the owner's name and avatar
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {PROFILE_COLUMNS}, u.user_name, u.user_avatar
            FROM users u
            INNER JOIN profiles p ON p.user_id = u.user_id
            WHERE u.user_id = $1
            "#
        );

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lists every profile with its owner's experiences
    pub async fn list_with_experiences(
        pool: &PgPool,
    ) -> Result<Vec<ProfileWithExperiences>, sqlx::Error> {
        sqlx::query_as::<_, ProfileWithExperiences>(&profiles_with_experiences_query(""))
            .fetch_all(pool)
            .await
    }

    /// Finds profiles whose owner id matches `user_id` textually
    ///
    /// The id is compared as text so a malformed id simply matches nothing.
    pub async fn find_with_experiences_by_user_id(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<ProfileWithExperiences>, sqlx::Error> {
        sqlx::query_as::<_, ProfileWithExperiences>(&profiles_with_experiences_query(
            "WHERE u.user_id::text = $1",
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Deletes the user's experiences, profile and user row
    ///
    /// All three statements run in one transaction, so either the whole
    /// account is gone or nothing changed. Missing rows are not an error.
    pub async fn delete_with_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<DeletedAccount, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let experiences = sqlx::query("DELETE FROM experiences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let profiles = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(DeletedAccount {
            experiences,
            profiles,
            users,
        })
    }
}

impl ProfileWithExperiences {
    pub fn experiences(&self) -> &[Experience] {
        &self.experiences.0
    }
}
