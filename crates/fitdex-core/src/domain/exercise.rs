//! Exercise entity.

use crate::{Entity, ExerciseId};
use serde::{Deserialize, Serialize};

/// A single exercise from the catalog.
///
/// Records are created and owned by the remote table; this layer only reads
/// them. Optional columns stay `None` when the remote row holds `NULL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Exercise {
    /// Primary key.
    pub id: ExerciseId,

    /// Display name.
    pub name: String,

    /// Difficulty level (e.g. "Beginner").
    #[serde(default)]
    pub difficulty: Option<String>,

    /// Primary target muscle group.
    #[serde(default)]
    pub target_muscle_group: Option<String>,

    #[serde(default)]
    pub secondary_muscle: Option<String>,

    /// Primary equipment needed.
    #[serde(default)]
    pub primary_equipment: Option<String>,

    #[serde(default)]
    pub secondary_equipment: Option<String>,

    /// Body region (upper body, lower body, full body, ...).
    #[serde(default)]
    pub body_region: Option<String>,

    /// Planes of motion, in column order.
    #[serde(default)]
    pub movement_planes: Vec<String>,

    #[serde(default)]
    pub force_type: Option<String>,

    /// Compound or isolation.
    #[serde(default)]
    pub mechanics: Option<String>,

    /// Bilateral, unilateral, ...
    #[serde(default)]
    pub laterality: Option<String>,

    /// Short demonstration video URL.
    #[serde(default)]
    pub short_demo_url: Option<String>,

    /// In-depth explanation video URL.
    #[serde(default)]
    pub in_depth_demo_url: Option<String>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Exercise {
    /// Creates an exercise with only an id and a name set.
    #[must_use]
    pub fn new(id: impl Into<ExerciseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty: None,
            target_muscle_group: None,
            secondary_muscle: None,
            primary_equipment: None,
            secondary_equipment: None,
            body_region: None,
            movement_planes: Vec::new(),
            force_type: None,
            mechanics: None,
            laterality: None,
            short_demo_url: None,
            in_depth_demo_url: None,
            thumbnail_url: None,
        }
    }

    /// Sets the primary target muscle group.
    #[must_use]
    pub fn with_target_muscle_group(mut self, muscle: impl Into<String>) -> Self {
        self.target_muscle_group = Some(muscle.into());
        self
    }

    /// Sets the primary equipment.
    #[must_use]
    pub fn with_primary_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.primary_equipment = Some(equipment.into());
        self
    }

    /// Sets the difficulty level.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Case-insensitive substring match on the name.
    #[must_use]
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    /// Returns the value of the given facet column, if set.
    #[must_use]
    pub fn facet_value(&self, kind: crate::FacetKind) -> Option<&str> {
        match kind {
            crate::FacetKind::MuscleGroup => self.target_muscle_group.as_deref(),
            crate::FacetKind::Equipment => self.primary_equipment.as_deref(),
        }
    }
}

impl Entity<ExerciseId> for Exercise {
    fn id(&self) -> &ExerciseId {
        &self.id
    }
}
