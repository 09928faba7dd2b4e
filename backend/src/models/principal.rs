use serde::{Deserialize, Serialize};

use super::{Student, Teacher};

/// Who a bearer token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Principal {
    Student(Student),
    Teacher(Teacher),
}

impl Principal {
    pub fn id(&self) -> i64 {
        match self {
            Principal::Student(s) => s.id,
            Principal::Teacher(t) => t.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::Student(s) => &s.email,
            Principal::Teacher(t) => &t.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Principal::Student(_) => Role::Student,
            Principal::Teacher(_) => Role::Teacher,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
