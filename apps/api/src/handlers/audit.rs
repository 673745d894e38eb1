use axum::Json;
use axum::extract::{Path, Query, State};

use demotrail_application::{AuditLogFilter, AuditLogFilterInput};
use demotrail_core::DemoRequestId;

use crate::dto::{AuditLogFilterQuery, PagedAuditLogResponse};
use crate::error::ApiResult;
use crate::state::AppState;


/// Lists audit entries across all demo requests.
pub async fn list_audit_logs_handler(
    State(state): State<AppState>,
    Query(query): Query<AuditLogFilterQuery>,
) -> ApiResult<Json<PagedAuditLogResponse>> {
    let filter = AuditLogFilter::from_input(AuditLogFilterInput::from(query))?;
    let result = state.audit_log_service.get_audit_logs(filter).await?;

    Ok(Json(PagedAuditLogResponse::from(result)))
}

/// Lists audit entries recorded against one demo request.
///
/// The path id is validated before any store access; a query-string
/// `demoRequestId` never overrides it.
pub async fn list_demo_request_audit_logs_handler(
    State(state): State<AppState>,
    Path(demo_request_id): Path<i32>,
    Query(query): Query<AuditLogFilterQuery>,
) -> ApiResult<Json<PagedAuditLogResponse>> {
    let demo_request_id = DemoRequestId::new(demo_request_id)?;
    let filter = AuditLogFilter::from_input(AuditLogFilterInput::from(query))?;
    let result = state
        .audit_log_service
        .get_audit_logs_for_demo_request(demo_request_id, filter)
        .await?;

    Ok(Json(PagedAuditLogResponse::from(result)))
}
