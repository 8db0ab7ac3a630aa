//! Job application persistence.

use sqlx::PgPool;
use uuid::Uuid;

/// Validated application ready to persist. `resume_file` holds the stored
/// filename under the upload directory when the form carried a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub resume_link: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_file: Option<String>,
}

/// Insert one application row, returning its id.
///
/// # Errors
///
/// Returns the underlying store error on write failure.
pub async fn insert_application(pool: &PgPool, application: &NewApplication) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO job_applications (id, name, email, resume_link, cover_letter, resume_file)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(&application.name)
    .bind(&application.email)
    .bind(&application.resume_link)
    .bind(&application.cover_letter)
    .bind(&application.resume_file)
    .execute(pool)
    .await?;
    Ok(id)
}

#[cfg(test)]
#[path = "application_test.rs"]
mod tests;
