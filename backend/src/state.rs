use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{AttendanceStore, SqliteAttendanceStore};
use crate::identity::IdentityProvider;
use crate::services::{AttendanceService, Clock, ResetJob};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub attendance: Arc<AttendanceService>,
    pub reset_job: ResetJob,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let store: Arc<dyn AttendanceStore> = Arc::new(SqliteAttendanceStore::new(db.clone()));
        let attendance = Arc::new(AttendanceService::new(store.clone(), clock.clone()));
        let reset_job = ResetJob::new(store, clock, config.reset_scope);

        Self {
            db,
            attendance,
            reset_job,
            identity,
            config: Arc::new(config),
        }
    }
}
