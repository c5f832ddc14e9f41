use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    New,
    Resolved,
    Ignored,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::New => write!(f, "new"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Ignored => write!(f, "ignored"),
        }
    }
}

/// Operator action on a report.
///
/// All three actions are allowed from any current status and overwrite it
/// unconditionally: re-applying an action is a no-op, and `reopen` brings a
/// closed report back to `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    Resolve,
    Ignore,
    Reopen,
}

impl ReportAction {
    /// The status this action drives a report to, regardless of where it was
    pub fn target_status(self) -> ReportStatus {
        match self {
            ReportAction::Resolve => ReportStatus::Resolved,
            ReportAction::Ignore => ReportStatus::Ignored,
            ReportAction::Reopen => ReportStatus::New,
        }
    }
}

/// Database model for a broken link report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    /// Weak reference to the reported content item; the item may be deleted
    /// after the report was filed
    pub post_id: Option<i64>,
    pub url: String,
    pub user_ip: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_targets() {
        assert_eq!(ReportAction::Resolve.target_status(), ReportStatus::Resolved);
        assert_eq!(ReportAction::Ignore.target_status(), ReportStatus::Ignored);
        assert_eq!(ReportAction::Reopen.target_status(), ReportStatus::New);
    }

    #[test]
    fn test_action_deserializes_from_snake_case() {
        let action: ReportAction = serde_json::from_str("\"resolve\"").unwrap();
        assert_eq!(action, ReportAction::Resolve);
        let action: ReportAction = serde_json::from_str("\"ignore\"").unwrap();
        assert_eq!(action, ReportAction::Ignore);
        let action: ReportAction = serde_json::from_str("\"reopen\"").unwrap();
        assert_eq!(action, ReportAction::Reopen);

        assert!(serde_json::from_str::<ReportAction>("\"delete\"").is_err());
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        for status in [
            ReportStatus::New,
            ReportStatus::Resolved,
            ReportStatus::Ignored,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status));
        }
    }
}
