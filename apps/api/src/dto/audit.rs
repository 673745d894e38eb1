use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use demotrail_application::{AuditLogFilterInput, PagedResult};
use demotrail_domain::AuditLogEntry;

/// Query-string filter for audit log listings.
///
/// Every field is optional; date and sort fields stay raw strings here and
/// are normalized by the application layer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilterQuery {
    pub action_type: Option<String>,
    pub changed_by_user_id: Option<i32>,
    pub changed_field: Option<String>,
    pub demo_request_id: Option<i32>,
    pub changed_date_from: Option<String>,
    pub changed_date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<AuditLogFilterQuery> for AuditLogFilterInput {
    fn from(value: AuditLogFilterQuery) -> Self {
        Self {
            action_type: value.action_type,
            changed_by_user_id: value.changed_by_user_id,
            changed_field: value.changed_field,
            demo_request_id: value.demo_request_id,
            changed_date_from: value.changed_date_from,
            changed_date_to: value.changed_date_to,
            sort_by: value.sort_by,
            sort_direction: value.sort_direction,
            page_number: value.page_number,
            page_size: value.page_size,
        }
    }
}

/// API representation of one audit log entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntryResponse {
    pub id: i64,
    pub demo_request_id: i32,
    pub action_type: String,
    pub changed_field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by_user_id: i32,
    /// RFC 3339 instant with a `Z` suffix.
    pub changed_date: String,
    pub additional_info: Option<String>,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            id: value.id,
            demo_request_id: value.demo_request_id,
            action_type: value.action_type,
            changed_field: value.changed_field,
            old_value: value.old_value,
            new_value: value.new_value,
            changed_by_user_id: value.changed_by_user_id,
            changed_date: value
                .changed_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            additional_info: value.additional_info,
        }
    }
}

/// Paged envelope for audit log listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedAuditLogResponse {
    pub data: Vec<AuditLogEntryResponse>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PagedResult<AuditLogEntry>> for PagedAuditLogResponse {
    fn from(value: PagedResult<AuditLogEntry>) -> Self {
        Self {
            data: value
                .data
                .into_iter()
                .map(AuditLogEntryResponse::from)
                .collect(),
            total_count: value.total_count,
            page_number: value.page_number,
            page_size: value.page_size,
            total_pages: value.total_pages,
            has_next_page: value.has_next_page,
            has_previous_page: value.has_previous_page,
        }
    }
}
