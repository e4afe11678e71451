use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Fetch,
    CountJobs(Vec<i64>),
    DeleteByIds(Vec<i64>),
    ListUnlocated,
    DeleteUnlocated(Vec<i64>),
}

/// In-memory store that records every call.
struct RecordingStore {
    locations: Vec<PersistedLocation>,
    jobs_per_location: HashMap<i64, u64>,
    unlocated_jobs: Vec<i64>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingStore {
    fn new(rows: &[(i64, Option<&str>, Option<&str>)]) -> Self {
        Self {
            locations: rows
                .iter()
                .map(|(id, city, state)| PersistedLocation {
                    id: *id,
                    city: city.map(str::to_string),
                    state: state.map(str::to_string),
                })
                .collect(),
            jobs_per_location: rows.iter().map(|(id, _, _)| (*id, 2)).collect(),
            unlocated_jobs: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn deletions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DeleteByIds(_) | Call::DeleteUnlocated(_)))
            .collect()
    }
}

impl LocationStore for RecordingStore {
    type Error = Infallible;

    async fn fetch_all_locations(&self) -> Result<Vec<PersistedLocation>, Infallible> {
        self.record(Call::Fetch);
        Ok(self.locations.clone())
    }

    async fn count_jobs_for_locations(&self, ids: &[i64]) -> Result<u64, Infallible> {
        self.record(Call::CountJobs(ids.to_vec()));
        Ok(ids.iter().filter_map(|id| self.jobs_per_location.get(id)).sum())
    }

    async fn delete_jobs_by_location_ids(&self, ids: &[i64]) -> Result<CleanupOutcome, Infallible> {
        self.record(Call::DeleteByIds(ids.to_vec()));
        Ok(CleanupOutcome {
            deleted_jobs: ids.iter().filter_map(|id| self.jobs_per_location.get(id)).sum(),
            deleted_locations: ids.len() as u64,
            deleted_unlocated_jobs: 0,
        })
    }

    async fn list_jobs_without_location(&self) -> Result<Vec<i64>, Infallible> {
        self.record(Call::ListUnlocated);
        Ok(self.unlocated_jobs.clone())
    }

    async fn delete_jobs_without_location(&self, job_ids: &[i64]) -> Result<u64, Infallible> {
        self.record(Call::DeleteUnlocated(job_ids.to_vec()));
        Ok(job_ids
            .iter()
            .filter(|id| self.unlocated_jobs.contains(id))
            .count() as u64)
    }
}

fn mixed_store() -> RecordingStore {
    RecordingStore::new(&[
        (1, Some("Bengaluru"), Some("Karnataka")),
        (2, Some("Cincinnati"), Some("OH")),
        (3, Some("Pune"), None),
        (4, None, None),
        (5, Some("London"), Some("UK")),
        (6, Some("Chennai"), Some("TN")),
    ])
}

#[test]
fn display_text_joins_city_and_state() {
    let loc = PersistedLocation {
        id: 1,
        city: Some(" Pune ".to_string()),
        state: Some("Maharashtra".to_string()),
    };
    assert_eq!(loc.display_text().as_deref(), Some("Pune, Maharashtra"));

    let blank = PersistedLocation {
        id: 2,
        city: Some("  ".to_string()),
        state: Some("Kerala".to_string()),
    };
    assert_eq!(blank.display_text(), None);
}

#[tokio::test]
async fn preview_flags_invalid_rows_and_never_deletes() {
    let store = mixed_store();
    let classifier = LocationClassifier::with_builtin_registry();

    let report = preview(&store, &classifier).await.unwrap();

    assert_eq!(report.invalid_ids(), vec![2, 4, 5]);
    assert_eq!(report.stats.total, 6);
    assert_eq!(report.stats.valid_count, 3);
    assert_eq!(report.affected_jobs, 6);
    assert_eq!(
        report.invalid_entries[1].category,
        RejectionCategory::NullOrEmpty
    );
    assert!(store.deletions().is_empty());
}

#[tokio::test]
async fn execute_deletes_exactly_the_previewed_ids() {
    let store = mixed_store();
    let classifier = LocationClassifier::with_builtin_registry();

    let report = preview(&store, &classifier).await.unwrap();
    let outcome = execute(&store, &report).await.unwrap();

    assert_eq!(store.deletions(), vec![Call::DeleteByIds(vec![2, 4, 5])]);
    assert_eq!(outcome.deleted_locations, 3);
    assert_eq!(outcome.deleted_jobs, 6);
}

#[tokio::test]
async fn execute_with_clean_report_touches_nothing() {
    let store = RecordingStore::new(&[(1, Some("Mumbai"), Some("Maharashtra"))]);
    let classifier = LocationClassifier::with_builtin_registry();

    let report = preview(&store, &classifier).await.unwrap();
    assert!(report.is_clean());
    let outcome = execute(&store, &report).await.unwrap();

    assert_eq!(outcome, CleanupOutcome::default());
    assert!(store.deletions().is_empty());
    assert!(!store
        .calls()
        .iter()
        .any(|c| matches!(c, Call::CountJobs(_))));
}

#[tokio::test]
async fn audit_in_preview_mode_returns_no_cleanup() {
    let mut store = mixed_store();
    store.unlocated_jobs = vec![10, 11, 12, 13];
    let classifier = LocationClassifier::with_builtin_registry();

    let outcome = audit_persisted_locations(&store, &classifier, AuditMode::Preview)
        .await
        .unwrap();

    assert!(outcome.cleanup.is_none());
    assert_eq!(outcome.report.jobs_without_location, 4);
    assert_eq!(outcome.report.unlocated_job_ids, vec![10, 11, 12, 13]);
    assert!(store.deletions().is_empty());
}

#[tokio::test]
async fn audit_in_execute_mode_deletes_previewed_ids_and_unlocated_jobs() {
    let mut store = mixed_store();
    store.unlocated_jobs = vec![10, 11, 12, 13];
    let classifier = LocationClassifier::with_builtin_registry();

    let outcome = audit_persisted_locations(&store, &classifier, AuditMode::Execute)
        .await
        .unwrap();

    let cleanup = outcome.cleanup.unwrap();
    assert_eq!(cleanup.deleted_locations, 3);
    assert_eq!(cleanup.deleted_unlocated_jobs, 4);
    assert_eq!(
        store.deletions(),
        vec![
            Call::DeleteByIds(vec![2, 4, 5]),
            Call::DeleteUnlocated(vec![10, 11, 12, 13])
        ]
    );
    assert_eq!(store.calls()[0], Call::Fetch);
}

#[tokio::test]
async fn clean_database_skips_the_unlocated_sweep() {
    let store = RecordingStore::new(&[(1, Some("Mumbai"), None)]);
    let classifier = LocationClassifier::with_builtin_registry();

    let outcome = audit_persisted_locations(&store, &classifier, AuditMode::Execute)
        .await
        .unwrap();

    assert_eq!(outcome.cleanup, Some(CleanupOutcome::default()));
    assert!(store.deletions().is_empty());
}
