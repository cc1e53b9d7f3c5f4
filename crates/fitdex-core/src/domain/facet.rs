//! Facet kinds and their default vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Muscle groups offered when no vocabulary is derived from the catalog.
pub const DEFAULT_MUSCLE_GROUPS: &[&str] = &[
    "Abdominals",
    "Abductors",
    "Adductors",
    "Back",
    "Biceps",
    "Calves",
    "Chest",
    "Forearms",
    "Glutes",
    "Hamstrings",
    "Hip Flexors",
    "Quadriceps",
    "Shins",
    "Shoulders",
    "Trapezius",
    "Triceps",
];

/// Equipment types offered when no vocabulary is derived from the catalog.
pub const DEFAULT_EQUIPMENT_TYPES: &[&str] = &[
    "Bodyweight",
    "Barbell",
    "Dumbbell",
    "Kettlebell",
    "Cable",
    "Resistance Band",
    "Machine",
    "Medicine Ball",
    "Stability Ball",
    "Suspension Trainer",
    "Pull Up Bar",
    "Bench",
    "Landmine",
    "Sliders",
    "Ez Bar",
    "Trap Bar",
];

/// A filter dimension with a fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Primary target muscle group.
    MuscleGroup,
    /// Primary equipment.
    Equipment,
}

impl FacetKind {
    /// Remote column the vocabulary is drawn from.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::MuscleGroup => "target_muscle_group",
            Self::Equipment => "primary_equipment",
        }
    }

    /// Hardcoded vocabulary for this facet.
    #[must_use]
    pub const fn defaults(&self) -> &'static [&'static str] {
        match self {
            Self::MuscleGroup => DEFAULT_MUSCLE_GROUPS,
            Self::Equipment => DEFAULT_EQUIPMENT_TYPES,
        }
    }

    /// Owned copy of [`Self::defaults`].
    #[must_use]
    pub fn default_labels(&self) -> Vec<String> {
        self.defaults().iter().map(|s| (*s).to_string()).collect()
    }

    /// All facet kinds.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::MuscleGroup, Self::Equipment]
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuscleGroup => write!(f, "muscle_group"),
            Self::Equipment => write!(f, "equipment"),
        }
    }
}
