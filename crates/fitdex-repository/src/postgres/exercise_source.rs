//! Postgres exercise source implementation.

use crate::{traits::ExerciseSource, DatabasePoolInterface};
use async_trait::async_trait;
use fitdex_core::{Exercise, ExerciseId, FacetKind, FitdexError, FitdexResult};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const COLUMNS: &str = "id, name, difficulty_level, target_muscle_group, secondary_muscle, \
     primary_equipment, secondary_equipment, body_region, \
     movement_plane_1, movement_plane_2, movement_plane_3, \
     force_type, mechanics, laterality, \
     short_youtube_demo, in_depth_youtube_explanation, thumbnail_url";

/// Postgres exercise source.
///
/// The table name is interpolated into the SQL text, so it must already have
/// passed identifier validation (see `fitdex_core::validation::rules`).
#[derive(Clone)]
pub struct PgExerciseSource {
    pool: Arc<dyn DatabasePoolInterface>,
    table: String,
    queries: Arc<Queries>,
}

struct Queries {
    range: String,
    name_ilike: String,
    by_id: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Self {
            range: format!("SELECT {COLUMNS} FROM {table} ORDER BY id LIMIT $1 OFFSET $2"),
            name_ilike: format!(
                r"SELECT {COLUMNS} FROM {table} WHERE name ILIKE $1 ESCAPE '\' ORDER BY id LIMIT $2"
            ),
            by_id: format!("SELECT {COLUMNS} FROM {table} WHERE id = $1"),
        }
    }
}

impl PgExerciseSource {
    /// Creates a new Postgres exercise source reading from `table`.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, table: impl Into<String>) -> Self {
        let table = table.into();
        let queries = Arc::new(Queries::for_table(&table));
        Self { pool, table, queries }
    }

    /// Returns the table this source reads from.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    fn distinct_sql(&self, kind: FacetKind) -> String {
        let column = kind.column();
        format!(
            "SELECT DISTINCT {column} FROM {table} \
             WHERE {column} IS NOT NULL AND {column} <> '' ORDER BY {column}",
            table = self.table
        )
    }
}

/// Database row representation of an exercise.
#[derive(Debug, FromRow)]
struct ExerciseRow {
    id: i64,
    name: String,
    difficulty_level: Option<String>,
    target_muscle_group: Option<String>,
    secondary_muscle: Option<String>,
    primary_equipment: Option<String>,
    secondary_equipment: Option<String>,
    body_region: Option<String>,
    movement_plane_1: Option<String>,
    movement_plane_2: Option<String>,
    movement_plane_3: Option<String>,
    force_type: Option<String>,
    mechanics: Option<String>,
    laterality: Option<String>,
    short_youtube_demo: Option<String>,
    in_depth_youtube_explanation: Option<String>,
    thumbnail_url: Option<String>,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        let movement_planes = [row.movement_plane_1, row.movement_plane_2, row.movement_plane_3]
            .into_iter()
            .flatten()
            .collect();

        Exercise {
            id: ExerciseId(row.id),
            name: row.name,
            difficulty: row.difficulty_level,
            target_muscle_group: row.target_muscle_group,
            secondary_muscle: row.secondary_muscle,
            primary_equipment: row.primary_equipment,
            secondary_equipment: row.secondary_equipment,
            body_region: row.body_region,
            movement_planes,
            force_type: row.force_type,
            mechanics: row.mechanics,
            laterality: row.laterality,
            short_demo_url: row.short_youtube_demo,
            in_depth_demo_url: row.in_depth_youtube_explanation,
            thumbnail_url: row.thumbnail_url,
        }
    }
}

/// Escapes `%`, `_` and `\` so the term matches literally inside `ILIKE`.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_i64(value: usize, what: &str) -> FitdexResult<i64> {
    i64::try_from(value).map_err(|_| FitdexError::validation(format!("{what} out of range: {value}")))
}

#[async_trait]
impl ExerciseSource for PgExerciseSource {
    async fn select_range(&self, start: usize, end: usize) -> FitdexResult<Vec<Exercise>> {
        debug!("Selecting exercises {}..={} from {}", start, end, self.table);

        if end < start {
            return Ok(Vec::new());
        }
        let limit = to_i64((end - start).saturating_add(1), "limit")?;
        let offset = to_i64(start, "offset")?;

        let rows = sqlx::query_as::<_, ExerciseRow>(&self.queries.range)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }

    async fn select_name_ilike(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>> {
        debug!("Searching exercises by name: {:?} (limit {})", term, limit);

        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query_as::<_, ExerciseRow>(&self.queries.name_ilike)
            .bind(pattern)
            .bind(to_i64(limit, "limit")?)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }

    async fn select_by_id(&self, id: ExerciseId) -> FitdexResult<Vec<Exercise>> {
        debug!("Selecting exercise by id: {}", id);

        let rows = sqlx::query_as::<_, ExerciseRow>(&self.queries.by_id)
            .bind(id.into_inner())
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }

    async fn select_distinct(&self, kind: FacetKind) -> FitdexResult<Vec<String>> {
        debug!("Selecting distinct {} values from {}", kind, self.table);

        let sql = self.distinct_sql(kind);
        let values = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(values)
    }

    async fn health_check(&self) -> FitdexResult<()> {
        self.pool.health_check().await
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("squat"), "squat");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn test_queries_use_table_name() {
        let queries = Queries::for_table("catalog.exercises");
        assert!(queries.range.contains("FROM catalog.exercises ORDER BY id LIMIT $1 OFFSET $2"));
        assert!(queries.name_ilike.contains(r"WHERE name ILIKE $1 ESCAPE '\'"));
        assert!(queries.by_id.ends_with("WHERE id = $1"));
    }

    #[test]
    fn test_row_conversion_collects_planes() {
        let row = ExerciseRow {
            id: 7,
            name: "Lunge".to_string(),
            difficulty_level: Some("Beginner".to_string()),
            target_muscle_group: Some("Quadriceps".to_string()),
            secondary_muscle: None,
            primary_equipment: Some("Bodyweight".to_string()),
            secondary_equipment: None,
            body_region: Some("Lower Body".to_string()),
            movement_plane_1: Some("Sagittal".to_string()),
            movement_plane_2: None,
            movement_plane_3: Some("Frontal".to_string()),
            force_type: None,
            mechanics: Some("Compound".to_string()),
            laterality: Some("Unilateral".to_string()),
            short_youtube_demo: Some("https://youtu.be/short".to_string()),
            in_depth_youtube_explanation: None,
            thumbnail_url: None,
        };

        let exercise = Exercise::from(row);
        assert_eq!(exercise.id, ExerciseId(7));
        assert_eq!(exercise.difficulty.as_deref(), Some("Beginner"));
        assert_eq!(exercise.movement_planes, vec!["Sagittal", "Frontal"]);
        assert_eq!(exercise.short_demo_url.as_deref(), Some("https://youtu.be/short"));
    }
}
