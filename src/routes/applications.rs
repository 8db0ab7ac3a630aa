//! Job application submission.

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::services::application::{self, NewApplication};
use crate::services::upload;
use crate::state::AppState;

/// Collected multipart form, before validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ApplyForm {
    name: Option<String>,
    email: Option<String>,
    resume_link: Option<String>,
    cover_letter: Option<String>,
    /// Stored filename, set when the form carried a `resumeFile` part.
    resume_file: Option<String>,
}

/// `POST /api/apply`: multipart form with an optional resume file.
///
/// Requires `name`, `email`, and at least one of `resumeLink`/`resumeFile`.
pub async fn submit_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut form = ApplyForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::BadUpload(e.to_string()))? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(text_value(field).await?),
            "email" => form.email = Some(text_value(field).await?),
            "resumeLink" => form.resume_link = Some(text_value(field).await?),
            "coverLetter" => form.cover_letter = Some(text_value(field).await?),
            "resumeFile" => {
                let original = field.file_name().unwrap_or("resume").to_string();
                let bytes = field.bytes().await.map_err(|e| ApiError::BadUpload(e.to_string()))?;
                let stored = upload::store_upload(&state.upload_dir, &original, &bytes)
                    .await
                    .map_err(|e| ApiError::BadUpload(e.to_string()))?;
                form.resume_file = Some(stored);
            }
            _ => {}
        }
    }

    let application = validate_application(form)?;
    application::insert_application(&state.pool, &application)
        .await
        .map_err(ApiError::ApplicationStore)?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Application submitted successfully!" }))))
}

async fn text_value(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|e| ApiError::BadUpload(e.to_string()))
}

/// Enforce the form contract: `name`, `email`, and a resume link or file.
/// Blank strings count as missing; browsers post empty strings for untouched
/// inputs.
fn validate_application(form: ApplyForm) -> Result<NewApplication, ApiError> {
    let name = form.name.filter(|v| !v.is_empty());
    let email = form.email.filter(|v| !v.is_empty());
    let resume_link = form.resume_link.filter(|v| !v.is_empty());
    let resume_file = form.resume_file;

    match (name, email) {
        (Some(name), Some(email)) if resume_link.is_some() || resume_file.is_some() => Ok(NewApplication {
            name,
            email,
            resume_link,
            cover_letter: form.cover_letter.filter(|v| !v.is_empty()),
            resume_file,
        }),
        _ => Err(ApiError::MissingFields),
    }
}

#[cfg(test)]
#[path = "applications_test.rs"]
mod tests;
