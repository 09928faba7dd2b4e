use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::campus::{Campus, CampusIdInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub campus_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentWithCampus {
    #[serde(flatten)]
    pub student: Student,
    pub campus: Option<Campus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub matricule: String,
    pub campus_id: Option<CampusIdInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub matricule: Option<String>,
    pub campus_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCampusRequest {
    pub campus_id: i64,
}

/// One row of a registrar roster.
///
/// An `email` key in the payload is ignored; the address is always derived
/// from the matricule and the student domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentImportRow {
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
    pub campus_id: CampusIdInput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub inserted: usize,
    pub skipped: usize,
}

/// Shape returned by `GET /user`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: Option<CampusName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampusName {
    pub name: String,
}
