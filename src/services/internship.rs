//! Internship catalog reads.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Listing entry in the wire shape clients consume. Store columns carry
/// snake_case names (`company_name`, `internship_title`, `start_date`); the
/// response renames them and keeps the legacy `_id` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternshipListing {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub location: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    pub duration: String,
    pub stipend: String,
}

/// All stored internships. No ordering clause; none is promised.
///
/// # Errors
///
/// Returns the underlying store error on read failure.
pub async fn list_internships(pool: &PgPool) -> Result<Vec<InternshipListing>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, String, String, String, String)>(
        "SELECT id, company_name, internship_title, location, start_date, duration, stipend
         FROM internships",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, company, role, location, start_date, duration, stipend)| InternshipListing {
            id,
            company,
            role,
            location,
            start_date,
            duration,
            stipend,
        })
        .collect())
}

#[cfg(test)]
#[path = "internship_test.rs"]
mod tests;
