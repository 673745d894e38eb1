mod audit;
mod common;

pub use audit::{AuditLogEntryResponse, AuditLogFilterQuery, PagedAuditLogResponse};
pub use common::HealthResponse;
