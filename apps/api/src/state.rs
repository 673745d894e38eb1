use demotrail_application::AuditLogService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub audit_log_service: AuditLogService,
    pub postgres_pool: PgPool,
}
