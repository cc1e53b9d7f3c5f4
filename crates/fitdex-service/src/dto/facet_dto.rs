//! Facet DTOs.

use fitdex_core::FacetKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A facet vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacetListResponse {
    pub facet: FacetKind,
    pub values: Vec<String>,
}

impl FacetListResponse {
    pub fn new(facet: FacetKind, values: &[String]) -> Self {
        Self {
            facet,
            values: values.to_vec(),
        }
    }
}
