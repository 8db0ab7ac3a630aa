//! Chat attachment upload → external storage relay.

use axum::Json;
use axum::extract::{Multipart, State};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::services::upload;
use crate::state::AppState;

/// `POST /uploadAttachment`: spool the file locally and relay the URL the
/// attachment service assigns to its reference.
///
/// The upstream reference is always `uploads/{stored_filename}` regardless
/// of the local spool path; that prefix is the contract the attachment
/// service resolves against.
pub async fn upload_attachment(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut user_id = String::new();
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::BadUpload(e.to_string()))? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "userId" => user_id = field.text().await.map_err(|e| ApiError::BadUpload(e.to_string()))?,
            "attachment" => {
                let original = field.file_name().unwrap_or("attachment").to_string();
                let bytes = field.bytes().await.map_err(|e| ApiError::BadUpload(e.to_string()))?;
                let filename = upload::store_upload(&state.upload_dir, &original, &bytes)
                    .await
                    .map_err(|e| ApiError::BadUpload(e.to_string()))?;
                stored = Some(filename);
            }
            _ => {}
        }
    }

    let Some(filename) = stored else {
        return Err(ApiError::NoFileUploaded);
    };

    let url = state.forwarder.upload_attachment(&user_id, &format!("uploads/{filename}")).await?;
    Ok(Json(json!({ "url": url })))
}
