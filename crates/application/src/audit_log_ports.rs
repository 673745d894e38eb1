use async_trait::async_trait;
use chrono::{DateTime, Utc};

use demotrail_core::{AppResult, DemoRequestId};
use demotrail_domain::{AuditLogEntry, AuditLogSortField, SortDirection};

/// Row scope a listing request operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLogScope {
    /// Every demo request; a filter-supplied demo request id participates
    /// as an ordinary allow-listed predicate.
    AllDemoRequests,
    /// One demo request fixed by the caller's path. Any filter-supplied id
    /// is ignored and the trusted, already-typed path id is bound instead.
    DemoRequest(DemoRequestId),
}

/// Conjunctive predicate inputs for one listing request.
///
/// Every field is optional and absent fields contribute no predicate.
/// Values only ever bind as query parameters, never as query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogCriteria {
    /// Exact-match action type.
    pub action_type: Option<String>,
    /// Exact-match acting user identifier.
    pub changed_by_user_id: Option<i32>,
    /// Exact-match changed field name.
    pub changed_field: Option<String>,
    /// Exact-match demo request id; ignored under
    /// [`AuditLogScope::DemoRequest`].
    pub demo_request_id: Option<i32>,
    /// Inclusive lower bound on the change instant.
    pub changed_date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the change instant.
    pub changed_date_to: Option<DateTime<Utc>>,
}

/// Validated ordering for one listing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditLogOrdering {
    /// Allow-listed sort attribute.
    pub field: AuditLogSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Offset/limit window for one page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Rows skipped before the window.
    pub offset: u64,
    /// Maximum rows returned, even when fewer remain.
    pub limit: u32,
}

impl PageWindow {
    /// Computes the fetch window for a 1-based page number.
    ///
    /// A page beyond the last one is not an error; it simply produces a
    /// window past the end of the result set.
    #[must_use]
    pub fn for_page(page_number: u32, page_size: u32) -> Self {
        Self {
            offset: u64::from(page_number.saturating_sub(1)) * u64::from(page_size),
            limit: page_size,
        }
    }
}

/// Store port for reading the append-only audit trail.
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Counts entries matching the criteria, with no ordering or paging.
    async fn count_entries(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
    ) -> AppResult<u64>;

    /// Fetches one page of matching entries under the given ordering.
    async fn fetch_page(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
        ordering: AuditLogOrdering,
        window: PageWindow,
    ) -> AppResult<Vec<AuditLogEntry>>;
}
