use sqlx::SqlitePool;
use tracing::info;

use crate::auth::Claims;
use crate::config::Config;
use crate::db::repository;
use crate::error::AppError;
use crate::identity::{IdentityProfile, local_part, role_for_email, split_display_name};
use crate::models::{Principal, Role, UpdateStudentRequest, UpdateTeacherRequest};

/// Finds the account behind a login, creating it on first sight.
pub async fn resolve_login(
    db: &SqlitePool,
    profile: &IdentityProfile,
    config: &Config,
) -> Result<Principal, AppError> {
    let email = profile.email.trim().to_ascii_lowercase();
    let role = role_for_email(&email, &config.student_domain, &config.staff_domain)
        .ok_or_else(|| AppError::Forbidden("Email domain not allowed".to_string()))?;
    let (first_name, last_name) = split_display_name(&profile.display_name);

    match role {
        Role::Student => {
            if let Some(student) = repository::find_student_by_email(db, &email).await? {
                return Ok(Principal::Student(student));
            }
            let matricule = local_part(&email);
            let student =
                repository::insert_student(db, matricule, &first_name, &last_name, &email, None).await?;
            info!("created student {} on first login", student.matricule);
            Ok(Principal::Student(student))
        }
        Role::Teacher => {
            if let Some(teacher) = repository::find_teacher_by_email(db, &email).await? {
                return Ok(Principal::Teacher(teacher));
            }
            let teacher = repository::insert_teacher(db, &first_name, &last_name, &email, None).await?;
            info!("created teacher {} on first login", teacher.email);
            Ok(Principal::Teacher(teacher))
        }
    }
}

/// Loads the account a verified token points at.
pub async fn load_principal(db: &SqlitePool, claims: &Claims) -> Result<Principal, AppError> {
    let principal = match claims.role {
        Role::Student => repository::find_student_by_id(db, claims.sub)
            .await?
            .map(Principal::Student),
        Role::Teacher => repository::find_teacher_by_id(db, claims.sub)
            .await?
            .map(Principal::Teacher),
    };

    principal.ok_or(AppError::NotFound)
}

pub async fn rename_principal(
    db: &SqlitePool,
    claims: &Claims,
    first_name: String,
    last_name: String,
) -> Result<Principal, AppError> {
    let principal = match claims.role {
        Role::Student => {
            let req = UpdateStudentRequest {
                first_name: Some(first_name),
                last_name: Some(last_name),
                ..Default::default()
            };
            repository::update_student(db, claims.sub, req)
                .await?
                .map(Principal::Student)
        }
        Role::Teacher => {
            let req = UpdateTeacherRequest {
                first_name: Some(first_name),
                last_name: Some(last_name),
                ..Default::default()
            };
            repository::update_teacher(db, claims.sub, req)
                .await?
                .map(Principal::Teacher)
        }
    };

    principal.ok_or(AppError::NotFound)
}
