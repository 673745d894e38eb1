//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_ports;
mod audit_log_service;

pub use audit_log_ports::{
    AuditLogCriteria, AuditLogOrdering, AuditLogScope, AuditLogStore, PageWindow,
};
pub use audit_log_service::{AuditLogFilter, AuditLogFilterInput, AuditLogService, PagedResult};
