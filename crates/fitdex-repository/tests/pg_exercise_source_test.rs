//! Integration tests for PgExerciseSource.
//!
//! These tests run against a real Postgres database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use fitdex_core::{ExerciseId, FacetKind};
use fitdex_repository::{ExerciseSource, PgExerciseSource};

async fn seeded() -> (TestDatabase, PgExerciseSource) {
    let db = TestDatabase::new().await;
    db.insert(1, "Squat", Some("Quadriceps"), Some("Barbell")).await;
    db.insert(2, "Bench Press", Some("Chest"), Some("Barbell")).await;
    db.insert(3, "Row", Some("Back"), None).await;
    db.insert(4, "100% Effort Sprint", Some("Quadriceps"), Some("")).await;
    let source = PgExerciseSource::new(db.pool(), "exercises");
    (db, source)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_range() {
    let (_db, source) = seeded().await;

    let rows = source.select_range(0, 1).await.expect("Query failed");
    let ids: Vec<i64> = rows.iter().map(|e| e.id.into_inner()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(rows[0].movement_planes, vec!["Sagittal"]);

    let tail = source.select_range(3, 10).await.expect("Query failed");
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, ExerciseId(4));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_name_ilike_is_case_insensitive() {
    let (_db, source) = seeded().await;

    let lower = source.select_name_ilike("squat", 10).await.expect("Query failed");
    let upper = source.select_name_ilike("SQUAT", 10).await.expect("Query failed");
    assert_eq!(lower, upper);
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].name, "Squat");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_name_ilike_escapes_wildcards() {
    let (_db, source) = seeded().await;

    let percent = source.select_name_ilike("100%", 10).await.expect("Query failed");
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].id, ExerciseId(4));

    let underscore = source.select_name_ilike("_", 10).await.expect("Query failed");
    assert!(underscore.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_name_ilike_respects_limit() {
    let (_db, source) = seeded().await;

    let rows = source.select_name_ilike("", 2).await.expect("Query failed");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_by_id() {
    let (_db, source) = seeded().await;

    let found = source.select_by_id(ExerciseId(3)).await.expect("Query failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Row");

    let missing = source.select_by_id(ExerciseId(404)).await.expect("Query failed");
    assert!(missing.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_select_distinct() {
    let (_db, source) = seeded().await;

    let muscles = source
        .select_distinct(FacetKind::MuscleGroup)
        .await
        .expect("Query failed");
    assert_eq!(muscles, vec!["Back", "Chest", "Quadriceps"]);

    let equipment = source
        .select_distinct(FacetKind::Equipment)
        .await
        .expect("Query failed");
    assert_eq!(equipment, vec!["Barbell"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let (_db, source) = seeded().await;
    assert!(source.health_check().await.is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_table_is_database_error() {
    let (db, _source) = seeded().await;
    let source = PgExerciseSource::new(db.pool(), "no_such_table");

    let err = source.select_range(0, 9).await.unwrap_err();
    assert_eq!(err.error_code(), "DATABASE_ERROR");
    assert!(err.is_retriable());
}
