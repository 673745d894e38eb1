use chrono::{DateTime, Utc};

use demotrail_application::{
    AuditLogCriteria, AuditLogOrdering, AuditLogScope, AuditLogStore, PageWindow,
};
use demotrail_core::DemoRequestId;
use demotrail_domain::{AuditLogEntry, AuditLogSortField, SortDirection};

use super::InMemoryAuditLogStore;

fn utc_seconds(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

fn entry(id: i64, demo_request_id: i32, action_type: &str, seconds: i64) -> AuditLogEntry {
    AuditLogEntry {
        id,
        demo_request_id,
        action_type: action_type.to_owned(),
        changed_field: "status".to_owned(),
        old_value: Some("New".to_owned()),
        new_value: Some("Qualified".to_owned()),
        changed_by_user_id: 9,
        changed_date: utc_seconds(seconds),
        additional_info: None,
    }
}

fn seeded_store() -> InMemoryAuditLogStore {
    InMemoryAuditLogStore::with_entries(vec![
        entry(1, 1, "Create", 1_000),
        entry(2, 1, "Update", 2_000),
        entry(3, 2, "Update", 3_000),
        entry(4, 2, "Delete", 4_000),
        entry(5, 1, "Update", 5_000),
    ])
}

fn scoped(value: i32) -> AuditLogScope {
    match DemoRequestId::new(value) {
        Ok(id) => AuditLogScope::DemoRequest(id),
        Err(error) => panic!("positive id must construct: {error}"),
    }
}

#[tokio::test]
async fn no_predicates_match_every_entry() {
    let store = seeded_store();

    let count = store
        .count_entries(AuditLogScope::AllDemoRequests, &AuditLogCriteria::default())
        .await;
    assert_eq!(count.ok(), Some(5));
}

#[tokio::test]
async fn predicates_compose_as_a_conjunction() {
    let store = seeded_store();

    let criteria = AuditLogCriteria {
        action_type: Some("Update".to_owned()),
        demo_request_id: Some(1),
        ..AuditLogCriteria::default()
    };
    let count = store
        .count_entries(AuditLogScope::AllDemoRequests, &criteria)
        .await;
    assert_eq!(count.ok(), Some(2));
}

#[tokio::test]
async fn timestamp_bounds_are_inclusive() {
    let store = seeded_store();

    let criteria = AuditLogCriteria {
        changed_date_from: Some(utc_seconds(2_000)),
        changed_date_to: Some(utc_seconds(4_000)),
        ..AuditLogCriteria::default()
    };
    let count = store
        .count_entries(AuditLogScope::AllDemoRequests, &criteria)
        .await;
    assert_eq!(count.ok(), Some(3));
}

#[tokio::test]
async fn default_ordering_is_changed_date_descending() {
    let store = seeded_store();

    let page = store
        .fetch_page(
            AuditLogScope::AllDemoRequests,
            &AuditLogCriteria::default(),
            AuditLogOrdering::default(),
            PageWindow::for_page(1, 50),
        )
        .await
        .unwrap_or_default();

    let ids: Vec<i64> = page.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn ascending_id_ordering_is_honored() {
    let store = seeded_store();

    let page = store
        .fetch_page(
            AuditLogScope::AllDemoRequests,
            &AuditLogCriteria::default(),
            AuditLogOrdering {
                field: AuditLogSortField::Id,
                direction: SortDirection::Ascending,
            },
            PageWindow::for_page(1, 50),
        )
        .await
        .unwrap_or_default();

    let ids: Vec<i64> = page.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn pages_tile_the_result_set_without_overlap() {
    let store = seeded_store();
    let ordering = AuditLogOrdering {
        field: AuditLogSortField::Id,
        direction: SortDirection::Ascending,
    };

    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let page = store
            .fetch_page(
                AuditLogScope::AllDemoRequests,
                &AuditLogCriteria::default(),
                ordering,
                PageWindow::for_page(page_number, 2),
            )
            .await
            .unwrap_or_default();
        seen.extend(page.iter().map(|entry| entry.id));
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn window_is_bounded_even_when_fewer_rows_remain() {
    let store = seeded_store();

    let last_page = store
        .fetch_page(
            AuditLogScope::AllDemoRequests,
            &AuditLogCriteria::default(),
            AuditLogOrdering::default(),
            PageWindow::for_page(3, 2),
        )
        .await
        .unwrap_or_default();
    assert_eq!(last_page.len(), 1);

    let beyond = store
        .fetch_page(
            AuditLogScope::AllDemoRequests,
            &AuditLogCriteria::default(),
            AuditLogOrdering::default(),
            PageWindow::for_page(9, 2),
        )
        .await
        .unwrap_or_default();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn scope_overrides_a_conflicting_filter_id() {
    let store = seeded_store();

    let conflicting = AuditLogCriteria {
        demo_request_id: Some(2),
        ..AuditLogCriteria::default()
    };
    let page = store
        .fetch_page(
            scoped(1),
            &conflicting,
            AuditLogOrdering::default(),
            PageWindow::for_page(1, 50),
        )
        .await
        .unwrap_or_default();

    assert_eq!(page.len(), 3);
    assert!(page.iter().all(|entry| entry.demo_request_id == 1));
}
