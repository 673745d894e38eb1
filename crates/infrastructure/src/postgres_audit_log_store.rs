//! PostgreSQL-backed audit log store over the `demo_request_logs` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use demotrail_application::{
    AuditLogCriteria, AuditLogOrdering, AuditLogScope, AuditLogStore, PageWindow,
};
use demotrail_core::{AppError, AppResult};
use demotrail_domain::{AuditLogEntry, AuditLogSortField, SortDirection};


/// PostgreSQL implementation of the audit log store port.
///
/// Listing is a two-step count-then-fetch pipeline sharing one predicate
/// set. The steps run outside a transaction: writes landing between them
/// can skew the count against the fetched page, an accepted property of
/// this analytics-style reader.
#[derive(Clone)]
pub struct PostgresAuditLogStore {
    pool: PgPool,
}

impl PostgresAuditLogStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    demo_request_id: i32,
    action_type: String,
    changed_field: String,
    old_value: Option<String>,
    new_value: Option<String>,
    changed_by_user_id: i32,
    changed_date: DateTime<Utc>,
    additional_info: Option<String>,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            demo_request_id: row.demo_request_id,
            action_type: row.action_type,
            changed_field: row.changed_field,
            old_value: row.old_value,
            new_value: row.new_value,
            changed_by_user_id: row.changed_by_user_id,
            changed_date: row.changed_date,
            additional_info: row.additional_info,
        }
    }
}

#[async_trait]
impl AuditLogStore for PostgresAuditLogStore {
    async fn count_entries(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
    ) -> AppResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM demo_request_logs");
        push_predicates(&mut builder, scope, criteria);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to count audit log entries: {error}"))
            })?;

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("negative audit log count: {error}")))
    }

    async fn fetch_page(
        &self,
        scope: AuditLogScope,
        criteria: &AuditLogCriteria,
        ordering: AuditLogOrdering,
        window: PageWindow,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let offset = i64::try_from(window.offset).map_err(|error| {
            AppError::Validation(format!("invalid page offset '{}': {error}", window.offset))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, demo_request_id, action_type, changed_field, old_value, new_value, \
             changed_by_user_id, changed_date, additional_info FROM demo_request_logs",
        );
        push_predicates(&mut builder, scope, criteria);
        push_ordering(&mut builder, ordering);

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to fetch audit log page: {error}"))
            })?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}

/// Emits ` WHERE ` before the first predicate and ` AND ` before the rest.
struct PredicateSeparator {
    has_predicate: bool,
}

impl PredicateSeparator {
    fn new() -> Self {
        Self {
            has_predicate: false,
        }
    }

    fn push<'a, 'b>(
        &mut self,
        builder: &'a mut QueryBuilder<'b, Postgres>,
        fragment: &'static str,
    ) -> &'a mut QueryBuilder<'b, Postgres> {
        builder.push(if self.has_predicate { " AND " } else { " WHERE " });
        self.has_predicate = true;
        builder.push(fragment)
    }
}

/// Appends the conjunctive `WHERE` clause for the scope and criteria.
///
/// Column/operator fragments are compile-time literals; caller values only
/// ever attach through `push_bind`, so no request text can become query
/// text. Under a demo-request scope the filter-supplied id is skipped and
/// the trusted path id is bound in its place.
fn push_predicates(
    builder: &mut QueryBuilder<'_, Postgres>,
    scope: AuditLogScope,
    criteria: &AuditLogCriteria,
) {
    let mut separator = PredicateSeparator::new();

    if let Some(action_type) = &criteria.action_type {
        separator
            .push(builder, "action_type = ")
            .push_bind(action_type.clone());
    }

    if let Some(changed_by_user_id) = criteria.changed_by_user_id {
        separator
            .push(builder, "changed_by_user_id = ")
            .push_bind(changed_by_user_id);
    }

    if let Some(changed_field) = &criteria.changed_field {
        separator
            .push(builder, "changed_field = ")
            .push_bind(changed_field.clone());
    }

    match scope {
        AuditLogScope::AllDemoRequests => {
            if let Some(demo_request_id) = criteria.demo_request_id {
                separator
                    .push(builder, "demo_request_id = ")
                    .push_bind(demo_request_id);
            }
        }
        AuditLogScope::DemoRequest(demo_request_id) => {
            separator
                .push(builder, "demo_request_id = ")
                .push_bind(demo_request_id.as_i32());
        }
    }

    if let Some(changed_date_from) = criteria.changed_date_from {
        separator
            .push(builder, "changed_date >= ")
            .push_bind(changed_date_from);
    }

    if let Some(changed_date_to) = criteria.changed_date_to {
        separator
            .push(builder, "changed_date <= ")
            .push_bind(changed_date_to);
    }
}

/// Appends the `ORDER BY` clause for a validated ordering.
fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, ordering: AuditLogOrdering) {
    builder.push(" ORDER BY ");
    builder.push(sort_column(ordering.field));
    match ordering.direction {
        SortDirection::Ascending => builder.push(" ASC"),
        SortDirection::Descending => builder.push(" DESC"),
    };
}

/// Maps a sort field to its column name.
///
/// Exhaustive over the ordering allow-list; the match arms are the only
/// way text reaches the `ORDER BY` clause.
fn sort_column(field: AuditLogSortField) -> &'static str {
    match field {
        AuditLogSortField::Id => "id",
        AuditLogSortField::DemoRequestId => "demo_request_id",
        AuditLogSortField::ActionType => "action_type",
        AuditLogSortField::ChangedField => "changed_field",
        AuditLogSortField::ChangedByUserId => "changed_by_user_id",
        AuditLogSortField::ChangedDate => "changed_date",
        AuditLogSortField::AdditionalInfo => "additional_info",
    }
}
