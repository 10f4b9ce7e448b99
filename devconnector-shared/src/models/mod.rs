/// Database models and their queries
///
/// - `user`: Registered users (read and deleted here, created by registration)
/// - `profile`: One profile per user, upserted by the owner
/// - `experience`: Work-history entries owned by a user
///
/// # Example
///
/// ```no_run
/// use devconnector_shared::models::profile::Profile;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// for entry in Profile::list_with_experiences(&pool).await? {
///     println!("{}: {} experiences", entry.user_profile.user_name, entry.experiences().len());
/// }
/// # Ok(())
/// # }
/// ```

pub mod experience;
pub mod profile;
pub mod user;
