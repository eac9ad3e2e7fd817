use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::{Config, SuperuserConfig},
    data::user::UserRepository,
    error::AppError,
    model::user::NewUserParams,
    service::{
        mail::{LogMailer, Mailer, SmtpMailer},
        storage::{CloudinaryStorage, FileStorage, UnconfiguredStorage},
    },
    util::password::hash_password,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before any request is
/// served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by the VIN decoder, geocoder and file storage.
///
/// Redirects are disabled so that a lookup can never be bounced to an arbitrary host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// Selects SMTP delivery when configured, otherwise logs outgoing mail.
pub fn setup_mailer(config: &Config) -> Result<Arc<dyn Mailer>, AppError> {
    match &config.smtp {
        Some(smtp) => Ok(Arc::new(SmtpMailer::new(smtp)?)),
        None => {
            tracing::warn!("SMTP is not configured; outgoing emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Selects Cloudinary storage when configured; uploads fail otherwise.
pub fn setup_storage(config: &Config, http_client: reqwest::Client) -> Arc<dyn FileStorage> {
    match &config.cloudinary {
        Some(cloudinary) => Arc::new(CloudinaryStorage::new(http_client, cloudinary.clone())),
        None => {
            tracing::warn!("Cloudinary is not configured; image and document uploads will fail");
            Arc::new(UnconfiguredStorage)
        }
    }
}

/// Creates the configured super admin account if its email is not registered yet.
///
/// # Arguments
/// - `db` - Database connection
/// - `superuser` - Credentials from `SUPERUSER_EMAIL` / `SUPERUSER_PASSWORD`, if set
///
/// # Returns
/// - `Ok(())` - Account exists, was created, or no credentials were configured
/// - `Err(AppError)` - Database or hashing error
pub async fn seed_superuser(
    db: &DatabaseConnection,
    superuser: Option<&SuperuserConfig>,
) -> Result<(), AppError> {
    let repo = UserRepository::new(db);

    let Some(superuser) = superuser else {
        if !repo.any_exists().await? {
            tracing::warn!(
                "No users exist; set SUPERUSER_EMAIL and SUPERUSER_PASSWORD to create a super admin"
            );
        }
        return Ok(());
    };

    if repo.find_by_email(&superuser.email).await?.is_some() {
        return Ok(());
    }

    let user = repo
        .create(NewUserParams {
            email: superuser.email.clone(),
            password_hash: hash_password(&superuser.password).await?,
            role: UserRole::SuperAdmin,
            first_name: Some("Super".to_string()),
            last_name: Some("Admin".to_string()),
            phone_number: None,
            is_verified: true,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Super admin created");

    Ok(())
}
