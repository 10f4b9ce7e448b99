/// Profile endpoints
///
/// # Endpoints
///
/// - `GET    /api/profile/me` - Caller's profile (auth)
/// - `POST   /api/profile` - Create or update the caller's profile (auth)
/// - `GET    /api/profile` - All profiles with experiences (public)
/// - `GET    /api/profile/user/:user_id` - One user's profile with experiences (public)
/// - `DELETE /api/profile` - Delete the caller's profile and account (auth)
/// - `POST   /api/profile/experience` - Add an experience entry (auth)
///
/// Every handler validates its input before touching the database and
/// issues a single statement (the account delete runs three inside one
/// transaction).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::JsonBody,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate};
use devconnector_shared::{
    auth::middleware::AuthContext,
    models::{
        experience::{CreateExperience, Experience},
        profile::{parse_skills, Profile, ProfileFields, ProfileWithExperiences, SocialLinks, UserProfile},
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// Create/update profile request
///
/// Optional fields that are missing or blank are treated as not supplied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,

    /// Comma-separated list, e.g. "HTML, CSS, Rust"
    #[validate(
        required(message = "Skills is required"),
        length(min = 1, message = "Skills is required")
    )]
    pub skills: Option<String>,

    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,

    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
}

impl ProfileRequest {
    /// Validates the request and builds the values to store
    pub fn into_fields(self) -> ApiResult<ProfileFields> {
        self.validate()?;

        let skills = parse_skills(self.skills.as_deref().unwrap_or_default());
        if skills.is_empty() {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
                "skills",
                "Skills is required",
            )]));
        }

        Ok(ProfileFields {
            company: supplied(self.company),
            website: supplied(self.website),
            location: supplied(self.location),
            status: self.status.unwrap_or_default(),
            skills,
            bio: supplied(self.bio),
            githubusername: supplied(self.githubusername),
            social: SocialLinks {
                youtube: supplied(self.youtube),
                twitter: supplied(self.twitter),
                facebook: supplied(self.facebook),
                linkedin: supplied(self.linkedin),
                instagram: supplied(self.instagram),
            },
        })
    }
}

/// Add experience request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Company is required"),
        length(min = 1, message = "Company is required")
    )]
    pub company: Option<String>,

    /// Start date, `YYYY-MM-DD` or an RFC 3339 timestamp
    #[validate(
        required(message = "From date is required"),
        length(min = 1, message = "From date is required")
    )]
    pub from: Option<String>,

    pub location: Option<String>,

    /// End date, same formats as `from`
    pub to: Option<String>,

    pub current: Option<bool>,

    pub description: Option<String>,
}

impl ExperienceRequest {
    /// Validates the request and parses its dates
    pub fn into_create(self) -> ApiResult<CreateExperience> {
        self.validate()?;

        let mut errors = Vec::new();

        let from = parse_date(self.from.as_deref().unwrap_or_default());
        if from.is_none() {
            errors.push(ValidationErrorDetail::new(
                "from",
                "From date must be a valid date",
            ));
        }

        let to = match supplied(self.to) {
            Some(raw) => {
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    errors.push(ValidationErrorDetail::new("to", "To date must be a valid date"));
                }
                parsed
            }
            None => None,
        };

        let from = match from {
            Some(from) if errors.is_empty() => from,
            _ => return Err(ApiError::ValidationError(errors)),
        };

        Ok(CreateExperience {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            location: supplied(self.location),
            from,
            to,
            current: self.current.unwrap_or(false),
            description: supplied(self.description),
        })
    }
}

/// Confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Get the caller's profile
///
/// # Endpoint
///
/// ```text
/// GET /api/profile/me
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: The caller has no profile
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database failure
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserProfile>> {
    let profile = Profile::find_by_user(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("There is no profile for this user".to_string()))?;

    Ok(Json(profile))
}

/// Create or update the caller's profile
///
/// # Endpoint
///
/// ```text
/// POST /api/profile
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "status": "Developer",
///   "skills": "HTML, CSS, Rust",
///   "company": "Acme",
///   "twitter": "https://twitter.com/me"
/// }
/// ```
///
/// Optional fields left out of an update keep their stored values; social
/// links are merged per platform.
///
/// # Errors
///
/// - `400 Bad Request`: `status` or `skills` missing or empty, or malformed JSON
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database failure
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(req): JsonBody<ProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let fields = req.into_fields()?;
    debug!(
        user_id = %auth.user_id,
        skills = fields.skills.len(),
        social = !fields.social.is_empty(),
        "Upserting profile"
    );

    let profile = Profile::upsert(&state.db, auth.user_id, fields).await?;

    Ok(Json(profile))
}

/// List all profiles with their experience entries
///
/// # Endpoint
///
/// ```text
/// GET /api/profile
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Database failure
pub async fn list_profiles(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProfileWithExperiences>>> {
    let profiles = Profile::list_with_experiences(&state.db).await?;
    debug!(count = profiles.len(), "Listed profiles");

    Ok(Json(profiles))
}

/// Get one user's profile with experience entries
///
/// The response is an array holding the single matching profile.
///
/// # Endpoint
///
/// ```text
/// GET /api/profile/user/:user_id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: No profile for that id (including malformed ids)
/// - `500 Internal Server Error`: Database failure
pub async fn get_profile_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<ProfileWithExperiences>>> {
    let profiles = Profile::find_with_experiences_by_user_id(&state.db, &user_id).await?;

    if profiles.is_empty() {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }

    Ok(Json(profiles))
}

/// Delete the caller's profile, experiences and user account
///
/// # Endpoint
///
/// ```text
/// DELETE /api/profile
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Response
///
/// ```json
/// { "msg": "User deleted" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database failure (nothing is deleted)
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Profile::delete_with_user(&state.db, auth.user_id).await?;

    info!(
        user_id = %auth.user_id,
        experiences = deleted.experiences,
        profiles = deleted.profiles,
        users = deleted.users,
        "Deleted user account"
    );

    Ok(Json(MessageResponse {
        msg: "User deleted".to_string(),
    }))
}

/// Add an experience entry to the caller's profile
///
/// # Endpoint
///
/// ```text
/// POST /api/profile/experience
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Senior Developer",
///   "company": "Acme",
///   "from": "2021-04-01",
///   "current": true
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `title`, `company` or `from` missing, a date is invalid, or malformed JSON
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database failure
pub async fn add_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(req): JsonBody<ExperienceRequest>,
) -> ApiResult<Json<Experience>> {
    let data = req.into_create()?;

    let experience = Experience::create(&state.db, auth.user_id, data).await?;
    debug!(
        user_id = %auth.user_id,
        experience_id = %experience.experience_id,
        "Added experience"
    );

    Ok(Json(experience))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(err: ApiError) -> Vec<String> {
        match err {
            ApiError::ValidationError(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_request_requires_status_and_skills() {
        let err = ProfileRequest::default().into_fields().unwrap_err();
        assert_eq!(field_names(err), vec!["skills", "status"]);
    }

    #[test]
    fn test_profile_request_reports_only_missing_field() {
        let req = ProfileRequest {
            status: Some("dev".to_string()),
            ..Default::default()
        };
        assert_eq!(field_names(req.into_fields().unwrap_err()), vec!["skills"]);

        let req = ProfileRequest {
            status: Some(String::new()),
            skills: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(field_names(req.into_fields().unwrap_err()), vec!["status"]);
    }

    #[test]
    fn test_profile_request_rejects_blank_skill_list() {
        let req = ProfileRequest {
            status: Some("dev".to_string()),
            skills: Some(" , ".to_string()),
            ..Default::default()
        };
        assert_eq!(field_names(req.into_fields().unwrap_err()), vec!["skills"]);
    }

    #[test]
    fn test_profile_request_builds_fields() {
        let req = ProfileRequest {
            status: Some("dev".to_string()),
            skills: Some("a, b,c".to_string()),
            company: Some("Acme".to_string()),
            website: Some("".to_string()),
            twitter: Some("https://twitter.com/ada".to_string()),
            facebook: Some("   ".to_string()),
            ..Default::default()
        };

        let fields = req.into_fields().unwrap();
        assert_eq!(fields.status, "dev");
        assert_eq!(fields.skills, vec!["a", "b", "c"]);
        assert_eq!(fields.company.as_deref(), Some("Acme"));
        assert!(fields.website.is_none());
        assert_eq!(
            fields.social,
            SocialLinks {
                twitter: Some("https://twitter.com/ada".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_profile_request_deserializes_wire_names() {
        let req: ProfileRequest = serde_json::from_value(serde_json::json!({
            "status": "dev",
            "skills": "js, node",
            "githubusername": "ada",
            "linkedin": "https://linkedin.com/in/ada"
        }))
        .unwrap();

        let fields = req.into_fields().unwrap();
        assert_eq!(fields.skills, vec!["js", "node"]);
        assert_eq!(fields.githubusername.as_deref(), Some("ada"));
        assert!(fields.social.linkedin.is_some());
    }

    #[test]
    fn test_experience_request_requires_fields() {
        let err = ExperienceRequest::default().into_create().unwrap_err();
        assert_eq!(field_names(err), vec!["company", "from", "title"]);

        let req = ExperienceRequest {
            title: Some("Engineer".to_string()),
            company: Some(String::new()),
            from: Some("2020-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(field_names(req.into_create().unwrap_err()), vec!["company"]);
    }

    #[test]
    fn test_experience_request_rejects_bad_dates() {
        let req = ExperienceRequest {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("last spring".to_string()),
            to: Some("2021-13-40".to_string()),
            ..Default::default()
        };
        assert_eq!(field_names(req.into_create().unwrap_err()), vec!["from", "to"]);
    }

    #[test]
    fn test_experience_request_builds_entry() {
        let req = ExperienceRequest {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("2020-01-15".to_string()),
            to: Some("2022-06-30T00:00:00Z".to_string()),
            location: Some(" ".to_string()),
            ..Default::default()
        };

        let data = req.into_create().unwrap();
        assert_eq!(data.from, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
        assert_eq!(data.to, NaiveDate::from_ymd_opt(2022, 6, 30));
        assert!(!data.current);
        assert!(data.location.is_none());
    }
}
