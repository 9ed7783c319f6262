//! Admin account creation command.

use matchday_api::db::create_pool;
use matchday_api::services::auth::AuthService;
use matchday_core::UserRole;

use super::database_url;

/// Create an admin account.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL, the
/// email is already registered, or the password fails policy checks.
pub async fn create(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    let user = AuthService::new(&pool)
        .register_with_role(email, password, UserRole::Admin)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin account created");
    Ok(())
}
