//! Facet provider over the in-memory source.

mod common;

use common::seeded_source;
use fitdex_config::{FacetMode, FacetsConfig};
use fitdex_core::FitdexError;
use fitdex_service::{FacetProvider, FacetProviderImpl};
use std::sync::Arc;

#[tokio::test]
async fn derived_vocabulary_is_sorted_and_memoized() {
    let source = seeded_source();
    let provider = FacetProviderImpl::from_config(source.clone(), &FacetsConfig::default());

    let first = provider.muscle_groups().await;
    assert_eq!(*first, vec!["Back", "Chest", "Quadriceps"]);
    let equipment = provider.equipment_types().await;
    assert_eq!(*equipment, vec!["Barbell", "Dumbbell"]);
    assert_eq!(source.query_count(), 2);

    let second = provider.muscle_groups().await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.query_count(), 2);
}

#[tokio::test]
async fn failure_falls_back_and_is_never_retried() {
    let source = seeded_source();
    source.fail_with(FitdexError::Database("timeout".to_string()));
    let provider = FacetProviderImpl::derived(source.clone());

    let fallback = provider.muscle_groups().await;
    assert!(fallback.contains(&"Hamstrings".to_string()));

    source.recover();
    let again = provider.muscle_groups().await;
    assert!(Arc::ptr_eq(&fallback, &again));
    assert_eq!(source.query_count(), 1);
}

#[tokio::test]
async fn static_mode_ignores_source() {
    let source = seeded_source();
    let config = FacetsConfig {
        mode: FacetMode::Static,
        ..FacetsConfig::default()
    };
    let provider = FacetProviderImpl::from_config(source.clone(), &config);

    provider.muscle_groups().await;
    provider.equipment_types().await;
    assert_eq!(source.query_count(), 0);
}
