use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::identity::student_email;
use crate::models::{ImportStats, StudentImportRow};

/// Inserts roster rows, skipping any whose campus is unknown or whose
/// matricule is already registered.
pub async fn import_students(
    db: &SqlitePool,
    rows: Vec<StudentImportRow>,
    student_domain: &str,
) -> Result<ImportStats, AppError> {
    info!("Importing {} students", rows.len());
    let mut stats = ImportStats::default();

    for row in rows {
        let Some(campus_id) = row.campus_id.resolve() else {
            warn!("Skipping {} {}: invalid campus id {:?}", row.first_name, row.last_name, row.campus_id);
            stats.skipped += 1;
            continue;
        };

        if repository::find_campus_by_id(db, campus_id).await?.is_none() {
            warn!("Skipping {} {}: campus {} not found", row.first_name, row.last_name, campus_id);
            stats.skipped += 1;
            continue;
        }

        if repository::find_student_by_matricule(db, &row.matricule).await?.is_some() {
            warn!("Skipping {} {}: matricule {} already exists", row.first_name, row.last_name, row.matricule);
            stats.skipped += 1;
            continue;
        }

        let email = student_email(&row.matricule, student_domain);
        match repository::insert_student(
            db,
            &row.matricule,
            &row.first_name,
            &row.last_name,
            &email,
            Some(campus_id),
        )
        .await
        .map_err(AppError::from)
        {
            Ok(_) => stats.inserted += 1,
            Err(AppError::Conflict(msg)) => {
                warn!("Skipping {}: {}", row.matricule, msg);
                stats.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!("Import finished: {} inserted, {} skipped", stats.inserted, stats.skipped);
    Ok(stats)
}
