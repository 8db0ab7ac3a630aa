//! Internship listing endpoints.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::services::internship::{self, InternshipListing};
use crate::state::AppState;

/// `GET /internships` and `GET /api/internships`: the full catalog in the
/// legacy wire shape.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<InternshipListing>>, ApiError> {
    let listings = internship::list_internships(&state.pool).await.map_err(ApiError::ListingStore)?;
    Ok(Json(listings))
}
