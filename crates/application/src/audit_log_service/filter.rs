use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use demotrail_core::{AppError, AppResult};
use demotrail_domain::{AuditLogSortField, SortDirection};

use crate::{AuditLogCriteria, AuditLogOrdering};

/// Page size applied when the caller does not supply one.
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Raw listing request exactly as received from the transport.
///
/// Sort and timestamp fields stay untyped strings here; normalization into
/// [`AuditLogFilter`] is where validation and fallback happen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilterInput {
    /// Requested exact-match action type.
    pub action_type: Option<String>,
    /// Requested exact-match acting user identifier.
    pub changed_by_user_id: Option<i32>,
    /// Requested exact-match changed field name.
    pub changed_field: Option<String>,
    /// Requested exact-match demo request id.
    pub demo_request_id: Option<i32>,
    /// Requested inclusive lower timestamp bound, unparsed.
    pub changed_date_from: Option<String>,
    /// Requested inclusive upper timestamp bound, unparsed.
    pub changed_date_to: Option<String>,
    /// Requested sort key, unvalidated.
    pub sort_by: Option<String>,
    /// Requested sort direction, unvalidated.
    pub sort_direction: Option<String>,
    /// Requested 1-based page number.
    pub page_number: Option<u32>,
    /// Requested page size.
    pub page_size: Option<u32>,
}

/// Normalized listing request: timestamps in UTC, sort validated against
/// the allow-list, paging bounds clamped to at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogFilter {
    /// Exact-match action type, absent when not filtered.
    pub action_type: Option<String>,
    /// Exact-match acting user identifier.
    pub changed_by_user_id: Option<i32>,
    /// Exact-match changed field name.
    pub changed_field: Option<String>,
    /// Exact-match demo request id.
    pub demo_request_id: Option<i32>,
    /// Inclusive lower bound on the change instant, UTC.
    pub changed_date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the change instant, UTC.
    pub changed_date_to: Option<DateTime<Utc>>,
    /// Validated sort key.
    pub sort_by: AuditLogSortField,
    /// Validated sort direction.
    pub sort_direction: SortDirection,
    /// 1-based page number, at least 1.
    pub page_number: u32,
    /// Page size, at least 1.
    pub page_size: u32,
}

impl Default for AuditLogFilter {
    fn default() -> Self {
        Self {
            action_type: None,
            changed_by_user_id: None,
            changed_field: None,
            demo_request_id: None,
            changed_date_from: None,
            changed_date_to: None,
            sort_by: AuditLogSortField::default(),
            sort_direction: SortDirection::default(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AuditLogFilter {
    /// Normalizes a raw request into a query-ready filter.
    ///
    /// Timestamp bounds carrying an explicit offset are converted to UTC;
    /// bounds without one are reinterpreted as already-UTC rather than
    /// assumed to be in a server-local zone. Unknown sort keys and
    /// directions degrade to the defaults instead of erroring; unparseable
    /// timestamps are a validation error.
    pub fn from_input(input: AuditLogFilterInput) -> AppResult<Self> {
        let changed_date_from = input
            .changed_date_from
            .as_deref()
            .map(parse_utc_bound)
            .transpose()?;
        let changed_date_to = input
            .changed_date_to
            .as_deref()
            .map(parse_utc_bound)
            .transpose()?;

        Ok(Self {
            action_type: non_empty(input.action_type),
            changed_by_user_id: input.changed_by_user_id,
            changed_field: non_empty(input.changed_field),
            demo_request_id: input.demo_request_id,
            changed_date_from,
            changed_date_to,
            sort_by: input
                .sort_by
                .as_deref()
                .map(AuditLogSortField::parse)
                .unwrap_or_default(),
            sort_direction: input
                .sort_direction
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
            page_number: input.page_number.unwrap_or(1).max(1),
            page_size: input.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        })
    }

    /// Returns the predicate inputs this filter contributes.
    #[must_use]
    pub fn criteria(&self) -> AuditLogCriteria {
        AuditLogCriteria {
            action_type: self.action_type.clone(),
            changed_by_user_id: self.changed_by_user_id,
            changed_field: self.changed_field.clone(),
            demo_request_id: self.demo_request_id,
            changed_date_from: self.changed_date_from,
            changed_date_to: self.changed_date_to,
        }
    }

    /// Returns the validated ordering this filter requests.
    #[must_use]
    pub fn ordering(&self) -> AuditLogOrdering {
        AuditLogOrdering {
            field: self.sort_by,
            direction: self.sort_direction,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Parses one caller-supplied timestamp bound into a UTC instant.
///
/// Accepted shapes, tried in order: RFC 3339 with an explicit offset
/// (converted to UTC), an offset-less date-time (reinterpreted as UTC),
/// and a bare date (midnight UTC).
fn parse_utc_bound(value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(AppError::Validation(format!(
        "invalid timestamp bound '{value}'"
    )))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use demotrail_core::AppError;
    use demotrail_domain::{AuditLogSortField, SortDirection};

    use super::{AuditLogFilter, AuditLogFilterInput, parse_utc_bound};

    fn utc(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_default()
    }

    #[test]
    fn explicit_offset_converts_to_utc() {
        let parsed = parse_utc_bound("2024-06-01T12:00:00+02:00");
        assert_eq!(parsed.ok(), Some(utc("2024-06-01T10:00:00Z")));
    }

    #[test]
    fn utc_marker_passes_through_unchanged() {
        let parsed = parse_utc_bound("2024-06-01T10:00:00Z");
        assert_eq!(parsed.ok(), Some(utc("2024-06-01T10:00:00Z")));
    }

    #[test]
    fn offset_less_bound_is_reinterpreted_as_utc() {
        let parsed = parse_utc_bound("2024-06-01T10:00:00");
        assert_eq!(parsed.ok(), Some(utc("2024-06-01T10:00:00Z")));

        let spaced = parse_utc_bound("2024-06-01 10:00:00.250");
        assert_eq!(spaced.ok(), Some(utc("2024-06-01T10:00:00.250Z")));
    }

    #[test]
    fn bare_date_means_midnight_utc() {
        let parsed = parse_utc_bound("2024-06-01");
        assert_eq!(parsed.ok(), Some(utc("2024-06-01T00:00:00Z")));
    }

    #[test]
    fn garbage_timestamp_is_a_validation_error() {
        assert!(matches!(
            parse_utc_bound("next tuesday"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn defaults_apply_when_nothing_is_supplied() {
        let filter = AuditLogFilter::from_input(AuditLogFilterInput::default());
        let Ok(filter) = filter else {
            panic!("empty input must normalize");
        };

        assert_eq!(filter, AuditLogFilter::default());
        assert_eq!(filter.page_number, 1);
        assert_eq!(filter.page_size, 50);
        assert_eq!(filter.sort_by, AuditLogSortField::ChangedDate);
        assert_eq!(filter.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn out_of_set_sort_input_degrades_without_error() {
        let filter = AuditLogFilter::from_input(AuditLogFilterInput {
            sort_by: Some("DROP TABLE demo_request_logs".to_owned()),
            sort_direction: Some("sideways".to_owned()),
            ..AuditLogFilterInput::default()
        });

        let Ok(filter) = filter else {
            panic!("bad sort input must not fail normalization");
        };
        assert_eq!(filter.sort_by, AuditLogSortField::ChangedDate);
        assert_eq!(filter.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn non_positive_paging_clamps_up_to_one() {
        let filter = AuditLogFilter::from_input(AuditLogFilterInput {
            page_number: Some(0),
            page_size: Some(0),
            ..AuditLogFilterInput::default()
        });

        let Ok(filter) = filter else {
            panic!("paging input must normalize");
        };
        assert_eq!(filter.page_number, 1);
        assert_eq!(filter.page_size, 1);
    }

    #[test]
    fn empty_match_values_contribute_no_predicate() {
        let filter = AuditLogFilter::from_input(AuditLogFilterInput {
            action_type: Some("  ".to_owned()),
            changed_field: Some(String::new()),
            ..AuditLogFilterInput::default()
        });

        let Ok(filter) = filter else {
            panic!("blank match values must normalize");
        };
        let criteria = filter.criteria();
        assert_eq!(criteria.action_type, None);
        assert_eq!(criteria.changed_field, None);
    }
}
