use std::sync::Arc;

use demotrail_core::{AppResult, DemoRequestId};
use demotrail_domain::AuditLogEntry;

use crate::{AuditLogScope, AuditLogStore, PageWindow};

mod filter;
mod pagination;

pub use filter::{AuditLogFilter, AuditLogFilterInput};
pub use pagination::PagedResult;

/// Application service answering audit log listing requests.
#[derive(Clone)]
pub struct AuditLogService {
    store: Arc<dyn AuditLogStore>,
}

impl AuditLogService {
    /// Creates a service backed by the given store.
    #[must_use]
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Lists audit entries across all demo requests.
    pub async fn get_audit_logs(
        &self,
        filter: AuditLogFilter,
    ) -> AppResult<PagedResult<AuditLogEntry>> {
        self.list(AuditLogScope::AllDemoRequests, filter).await
    }

    /// Lists audit entries recorded against one demo request.
    ///
    /// The path-scoped id always wins: a conflicting demo request id in the
    /// filter is not combined into a second predicate, it is ignored.
    pub async fn get_audit_logs_for_demo_request(
        &self,
        demo_request_id: DemoRequestId,
        filter: AuditLogFilter,
    ) -> AppResult<PagedResult<AuditLogEntry>> {
        self.list(AuditLogScope::DemoRequest(demo_request_id), filter)
            .await
    }

    /// Runs the count-then-fetch pipeline and assembles the envelope.
    ///
    /// Both store calls share one criteria value but no transaction; writes
    /// landing between them can skew `total_count` against the fetched
    /// page. That window is an accepted property of this reader.
    async fn list(
        &self,
        scope: AuditLogScope,
        filter: AuditLogFilter,
    ) -> AppResult<PagedResult<AuditLogEntry>> {
        let criteria = filter.criteria();
        let ordering = filter.ordering();
        let window = PageWindow::for_page(filter.page_number, filter.page_size);

        let total_count = self.store.count_entries(scope, &criteria).await?;
        let entries = self
            .store
            .fetch_page(scope, &criteria, ordering, window)
            .await?;

        Ok(PagedResult::assemble(
            entries,
            total_count,
            filter.page_number,
            filter.page_size,
        ))
    }
}
