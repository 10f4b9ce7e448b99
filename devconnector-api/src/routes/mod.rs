/// API route handlers
///
/// - `health`: Health check endpoint
/// - `profile`: Developer profiles and experience entries

pub mod health;
pub mod profile;
