use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Campus {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampusRequest {
    pub name: String,
}

/// A campus id as sent by the admin UI, which posts it either as a number or as
/// the string value of a `<select>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CampusIdInput {
    Number(i64),
    Text(String),
}

impl CampusIdInput {
    pub fn resolve(&self) -> Option<i64> {
        match self {
            CampusIdInput::Number(id) => Some(*id),
            CampusIdInput::Text(raw) => raw.trim().parse().ok(),
        }
    }
}
