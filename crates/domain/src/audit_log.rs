use chrono::{DateTime, Utc};

/// One recorded field-level change event against a demo request.
///
/// Entries are produced elsewhere and never updated or deleted here; this
/// system is a pure reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Unique entry identifier, monotonic by insertion.
    pub id: i64,
    /// Demo request the change was recorded against.
    pub demo_request_id: i32,
    /// Change action tag, e.g. "Create", "Update" or "Delete".
    pub action_type: String,
    /// Name of the field that changed.
    pub changed_field: String,
    /// Field value before the change.
    pub old_value: Option<String>,
    /// Field value after the change.
    pub new_value: Option<String>,
    /// User who made the change.
    pub changed_by_user_id: i32,
    /// Instant of the change, always UTC.
    pub changed_date: DateTime<Utc>,
    /// Free-form context recorded with the change.
    pub additional_info: Option<String>,
}

/// Sortable attributes of an audit log entry.
///
/// The variants double as the ordering allow-list: caller input that does
/// not parse to a variant sorts by [`Self::ChangedDate`] instead of
/// failing the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuditLogSortField {
    /// Entry identifier.
    Id,
    /// Owning demo request identifier.
    DemoRequestId,
    /// Change action tag.
    ActionType,
    /// Changed field name.
    ChangedField,
    /// Acting user identifier.
    ChangedByUserId,
    /// Change instant.
    #[default]
    ChangedDate,
    /// Free-form context text.
    AdditionalInfo,
}

impl AuditLogSortField {
    /// Returns the canonical transport spelling of this sort key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DemoRequestId => "demoRequestId",
            Self::ActionType => "actionType",
            Self::ChangedField => "changedField",
            Self::ChangedByUserId => "changedByUserId",
            Self::ChangedDate => "changedDate",
            Self::AdditionalInfo => "additionalInfo",
        }
    }

    /// Parses a caller-supplied sort key.
    ///
    /// Matching is case-insensitive and accepts both the camelCase
    /// transport spelling and the snake_case column spelling. Anything
    /// outside the allow-list degrades to [`Self::ChangedDate`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Self::Id,
            "demorequestid" | "demo_request_id" => Self::DemoRequestId,
            "actiontype" | "action_type" => Self::ActionType,
            "changedfield" | "changed_field" => Self::ChangedField,
            "changedbyuserid" | "changed_by_user_id" => Self::ChangedByUserId,
            "changeddate" | "changed_date" => Self::ChangedDate,
            "additionalinfo" | "additional_info" => Self::AdditionalInfo,
            _ => Self::ChangedDate,
        }
    }
}

/// Ordering direction for audit log listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest or oldest values first.
    Ascending,
    /// Largest or newest values first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Returns a stable transport value for this direction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parses a caller-supplied direction.
    ///
    /// Only a case-insensitive "asc" or "ascending" selects ascending
    /// order; every other value degrades to [`Self::Descending`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("asc") || value.eq_ignore_ascii_case("ascending") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuditLogSortField, SortDirection};

    #[test]
    fn sort_field_accepts_both_spellings_case_insensitively() {
        assert_eq!(
            AuditLogSortField::parse("demoRequestId"),
            AuditLogSortField::DemoRequestId
        );
        assert_eq!(
            AuditLogSortField::parse("DEMO_REQUEST_ID"),
            AuditLogSortField::DemoRequestId
        );
        assert_eq!(
            AuditLogSortField::parse("ActionType"),
            AuditLogSortField::ActionType
        );
        assert_eq!(
            AuditLogSortField::parse(" changed_date "),
            AuditLogSortField::ChangedDate
        );
    }

    #[test]
    fn sort_field_falls_back_to_changed_date_for_unknown_input() {
        assert_eq!(
            AuditLogSortField::parse("DROP TABLE demo_request_logs"),
            AuditLogSortField::ChangedDate
        );
        assert_eq!(AuditLogSortField::parse(""), AuditLogSortField::ChangedDate);
        assert_eq!(
            AuditLogSortField::parse("changed_date; --"),
            AuditLogSortField::ChangedDate
        );
    }

    #[test]
    fn sort_direction_only_ascending_spellings_select_ascending() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Ascending);
        assert_eq!(SortDirection::parse("ASCENDING"), SortDirection::Ascending);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Descending);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Descending);
        assert_eq!(SortDirection::parse(""), SortDirection::Descending);
    }

    #[test]
    fn defaults_are_changed_date_descending() {
        assert_eq!(
            AuditLogSortField::default(),
            AuditLogSortField::ChangedDate
        );
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }
}
