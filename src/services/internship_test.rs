use super::*;

#[test]
fn listing_serializes_legacy_wire_shape() {
    let listing = InternshipListing {
        id: Uuid::nil(),
        company: "Quasar Labs".into(),
        role: "Backend Intern".into(),
        location: "Remote".into(),
        start_date: "2026-09-01".into(),
        duration: "3 months".into(),
        stipend: "1200".into(),
    };

    let value = serde_json::to_value(&listing).unwrap();
    assert_eq!(value["_id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(value["company"], "Quasar Labs");
    assert_eq!(value["role"], "Backend Intern");
    assert_eq!(value["location"], "Remote");
    assert_eq!(value["startDate"], "2026-09-01");
    assert_eq!(value["duration"], "3 months");
    assert_eq!(value["stipend"], "1200");
    // Store-side column names must not leak onto the wire.
    assert!(value.get("company_name").is_none());
    assert!(value.get("internship_title").is_none());
    assert!(value.get("start_date").is_none());
}

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    #[ignore = "requires live Postgres"]
    async fn list_internships_round_trips_rows() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.expect("connect");

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO internships (id, company_name, internship_title, location, start_date, duration, stipend)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind("Quasar Labs")
        .bind("Backend Intern")
        .bind("Remote")
        .bind("2026-09-01")
        .bind("3 months")
        .bind("1200")
        .execute(&pool)
        .await
        .unwrap();

        let listings = list_internships(&pool).await.unwrap();
        let entry = listings.iter().find(|l| l.id == id).expect("inserted row listed");
        assert_eq!(entry.company, "Quasar Labs");
        assert_eq!(entry.role, "Backend Intern");

        sqlx::query("DELETE FROM internships WHERE id = $1").bind(id).execute(&pool).await.unwrap();
    }
}
