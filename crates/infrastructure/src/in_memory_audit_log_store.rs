use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use demotrail_application::{
    AuditLogCriteria, AuditLogOrdering, AuditLogScope, AuditLogStore, PageWindow,
};
use demotrail_core::AppResult;
use demotrail_domain::{AuditLogEntry, AuditLogSortField, SortDirection};

#[cfg(test)]
mod tests;

/// In-memory audit log store implementation.
///
/// Mirrors the SQL store's filter, ordering, and paging semantics so
/// service- and handler-level tests can exercise the full listing
/// pipeline without a database.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogStore {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store pre-seeded with the given entries.
    #[must_use]
    pub fn with_entries(entries: Vec<AuditLogEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Appends one entry to the store.
    pub async fn push_entry(&self, entry: AuditLogEntry) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl AuditLogStore for InMemoryAuditLogStore {
    async fn count_entries(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
    ) -> AppResult<u64> {
        let entries = self.entries.read().await;

        Ok(entries
            .iter()
            .filter(|entry| matches(scope, criteria, entry))
            .count() as u64)
    }

    async fn fetch_page(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
        ordering: AuditLogOrdering,
        window: PageWindow,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;

        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|entry| matches(scope, criteria, entry))
            .cloned()
            .collect();
        matching.sort_by(|left, right| compare(ordering, left, right));

        Ok(matching
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect())
    }
}

fn matches(scope: AuditLogScope, criteria: &AuditLogCriteria, entry: &AuditLogEntry) -> bool {
    let in_scope = match scope {
        AuditLogScope::AllDemoRequests => criteria
            .demo_request_id
            .is_none_or(|id| entry.demo_request_id == id),
        AuditLogScope::DemoRequest(id) => entry.demo_request_id == id.as_i32(),
    };

    in_scope
        && criteria
            .action_type
            .as_deref()
            .is_none_or(|value| entry.action_type == value)
        && criteria
            .changed_by_user_id
            .is_none_or(|value| entry.changed_by_user_id == value)
        && criteria
            .changed_field
            .as_deref()
            .is_none_or(|value| entry.changed_field == value)
        && criteria
            .changed_date_from
            .is_none_or(|bound| entry.changed_date >= bound)
        && criteria
            .changed_date_to
            .is_none_or(|bound| entry.changed_date <= bound)
}

fn compare(ordering: AuditLogOrdering, left: &AuditLogEntry, right: &AuditLogEntry) -> Ordering {
    let by_field = match ordering.field {
        AuditLogSortField::Id => left.id.cmp(&right.id),
        AuditLogSortField::DemoRequestId => left.demo_request_id.cmp(&right.demo_request_id),
        AuditLogSortField::ActionType => left.action_type.cmp(&right.action_type),
        AuditLogSortField::ChangedField => left.changed_field.cmp(&right.changed_field),
        AuditLogSortField::ChangedByUserId => {
            left.changed_by_user_id.cmp(&right.changed_by_user_id)
        }
        AuditLogSortField::ChangedDate => left.changed_date.cmp(&right.changed_date),
        AuditLogSortField::AdditionalInfo => left.additional_info.cmp(&right.additional_info),
    };

    match ordering.direction {
        SortDirection::Ascending => by_field,
        SortDirection::Descending => by_field.reverse(),
    }
}
