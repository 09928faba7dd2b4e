use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One attendance fact for a teacher on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub teacher_id: i64,
    pub day: NaiveDate,
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPresenceRequest {
    pub teacher_id: i64,
    #[serde(alias = "presence", alias = "isPresent")]
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceUpdate {
    #[serde(alias = "presence", alias = "isPresent")]
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayQuery {
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReport {
    pub day: NaiveDate,
    pub affected: u64,
}
