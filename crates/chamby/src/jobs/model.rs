use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ServiceJob {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Option<Uuid>,

    pub category: String,
    pub description: Option<String>,
    pub status: String,
    pub visit_fee_cents: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub client_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub visit_fee_cents: i64,
}

/// Lifecycle of a service job as the marketplace sees it. The status column
/// stores the wire string; parse at the edges, match exhaustively inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Searching,
    Accepted,
    EnRoute,
    OnSite,
    Quoted,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Searching => "searching",
            JobStatus::Accepted => "accepted",
            JobStatus::EnRoute => "en_route",
            JobStatus::OnSite => "on_site",
            JobStatus::Quoted => "quoted",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "searching" => Some(Self::Searching),
            "accepted" => Some(Self::Accepted),
            "en_route" => Some(Self::EnRoute),
            "on_site" => Some(Self::OnSite),
            "quoted" => Some(Self::Quoted),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_string() {
        for status in [
            JobStatus::Searching,
            JobStatus::Accepted,
            JobStatus::EnRoute,
            JobStatus::OnSite,
            JobStatus::Quoted,
            JobStatus::InProgress,
            JobStatus::Completed,
            JobStatus::Cancelled,
        ] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert_eq!(JobStatus::parse("paused"), None);
        assert_eq!(JobStatus::parse(""), None);
    }
}
