//! Service behaviour over the in-memory source.

mod common;

use common::{manual_cache, seeded_source, SlowSource};
use fitdex_config::ValidityPolicy;
use fitdex_core::{ExerciseId, FitdexError, PageRequest};
use fitdex_service::{cache_keys, ExerciseCacheStore, ExerciseService, ExerciseServiceImpl, InMemoryExerciseCache, ManualClock};
use std::sync::Arc;
use std::time::Duration;

fn ids(records: &[fitdex_core::Exercise]) -> Vec<i64> {
    records.iter().map(|e| e.id.into_inner()).collect()
}

#[tokio::test]
async fn seeded_catalog_walkthrough() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    let page = service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    assert_eq!(ids(&page), vec![1, 2]);
    assert_eq!(source.query_count(), 1);

    let again = service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    assert_eq!(again, page);
    assert_eq!(source.query_count(), 1);

    let rows = service.search("row", 10).await.unwrap();
    assert_eq!(ids(&rows), vec![3]);
    assert_eq!(rows[0].name, "Row");
}

#[tokio::test]
async fn ttl_expiry_triggers_exactly_one_refetch() {
    let source = seeded_source();
    let (cache, clock) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    clock.advance(Duration::from_secs(59));
    service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    assert_eq!(source.query_count(), 1);

    clock.advance(Duration::from_secs(2));
    service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    assert_eq!(source.query_count(), 2);
}

#[tokio::test]
async fn global_timestamp_couples_unrelated_keys() {
    let source = seeded_source();
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(
        InMemoryExerciseCache::new(Duration::from_secs(60))
            .with_policy(ValidityPolicy::GlobalTimestamp)
            .with_clock(clock.clone()),
    );
    let service = ExerciseServiceImpl::new(source.clone(), cache.clone());

    service.fetch_page(PageRequest::new(1, 1)).await.unwrap();
    clock.advance(Duration::from_secs(61));

    // a fetch for another key refreshes the shared stamp
    service.fetch_page(PageRequest::new(1, 0)).await.unwrap();
    assert_eq!(source.query_count(), 2);

    // the stale page is served again without a query
    service.fetch_page(PageRequest::new(1, 1)).await.unwrap();
    assert_eq!(source.query_count(), 2);

    // a key never stored still needs a query
    assert!(!cache.is_valid(&cache_keys::page(cache_keys::DEFAULT_NAMESPACE, 1, 2)));
    service.fetch_page(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(source.query_count(), 3);
}

#[tokio::test]
async fn per_entry_keeps_stale_keys_stale() {
    let source = seeded_source();
    let (cache, clock) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    service.fetch_page(PageRequest::new(1, 1)).await.unwrap();
    clock.advance(Duration::from_secs(61));
    service.fetch_page(PageRequest::new(1, 0)).await.unwrap();
    service.fetch_page(PageRequest::new(1, 1)).await.unwrap();
    assert_eq!(source.query_count(), 3);
}

#[tokio::test]
async fn search_ignores_case() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source, cache);

    let lower = service.search("squat", 10).await.unwrap();
    let upper = service.search("SQUAT", 10).await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(ids(&lower), vec![1]);
}

#[tokio::test]
async fn search_terms_are_cached_separately() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    service.search("squat", 10).await.unwrap();
    service.search("SQUAT", 10).await.unwrap();
    service.search("squat", 5).await.unwrap();
    assert_eq!(source.query_count(), 3);
}

#[tokio::test]
async fn missing_id_is_none() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    assert_eq!(service.get_by_id(ExerciseId(99)).await.unwrap(), None);
    let found = service.get_by_id(ExerciseId(2)).await.unwrap().unwrap();
    assert_eq!(found.name, "Bench");
}

#[tokio::test]
async fn page_past_end_is_empty() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    assert_eq!(ids(&service.fetch_page(PageRequest::new(10, 2)).await.unwrap()), vec![3]);
    assert!(service.fetch_page(PageRequest::new(10, 3)).await.unwrap().is_empty());
}

#[tokio::test]
async fn page_at_largest_offset_is_empty() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    assert!(service.fetch_page(PageRequest::new(20, usize::MAX)).await.unwrap().is_empty());
    assert_eq!(ids(&service.fetch_page(PageRequest::new(usize::MAX, 1)).await.unwrap()), vec![2, 3]);
}

#[tokio::test]
async fn zero_limit_skips_source() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache);

    assert!(service.fetch_page(PageRequest::new(0, 0)).await.unwrap().is_empty());
    assert_eq!(source.query_count(), 0);
}

#[tokio::test]
async fn remote_error_surfaces_and_nothing_is_cached() {
    let source = seeded_source();
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source.clone(), cache.clone());

    source.fail_with(FitdexError::Database("connection reset".to_string()));
    let err = service.fetch_page(PageRequest::new(2, 0)).await.unwrap_err();
    assert_eq!(err, FitdexError::Database("connection reset".to_string()));
    assert!(err.is_retriable());
    assert!(cache.is_empty());

    source.recover();
    assert_eq!(service.fetch_page(PageRequest::new(2, 0)).await.unwrap().len(), 2);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn concurrent_identical_fetches_agree() {
    let inner = seeded_source();
    let source = Arc::new(SlowSource::new(inner.clone(), Duration::from_millis(20)));
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source, cache.clone());

    let (a, b) = tokio::join!(
        service.fetch_page(PageRequest::new(10, 0)),
        service.fetch_page(PageRequest::new(10, 0)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a, b);
    assert_eq!(inner.query_count(), 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&cache_keys::page(cache_keys::DEFAULT_NAMESPACE, 10, 0)), a);
}

#[tokio::test]
async fn coalescing_issues_one_query() {
    let inner = seeded_source();
    let source = Arc::new(SlowSource::new(inner.clone(), Duration::from_millis(20)));
    let (cache, _) = manual_cache();
    let service = ExerciseServiceImpl::new(source, cache).with_coalescing(true);

    let (a, b, c) = tokio::join!(
        service.fetch_page(PageRequest::new(10, 0)),
        service.fetch_page(PageRequest::new(10, 0)),
        service.fetch_page(PageRequest::new(10, 0)),
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(ids(&c.unwrap()), vec![1, 2, 3]);
    assert_eq!(inner.query_count(), 1);
}

#[tokio::test]
async fn cache_stats_reflect_activity() {
    let source = seeded_source();
    let (cache, clock) = manual_cache();
    let service = ExerciseServiceImpl::new(source, cache);

    service.fetch_page(PageRequest::new(2, 0)).await.unwrap();
    clock.advance(Duration::from_secs(61));
    service.search("bench", 5).await.unwrap();

    let stats = service.cache_stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.fresh_entries, 1);
    assert_eq!(stats.policy, ValidityPolicy::PerEntry);
}
