use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::db::{AttendanceStore, DayPredicate};
use crate::error::AppError;
use crate::models::ResetReport;
use crate::services::clock::Clock;

/// Which records the nightly sweep puts back to "present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetScope {
    /// Only records dated today.
    #[default]
    Today,
    /// Every record dated today or earlier. Rewrites past absences.
    ThroughToday,
}

impl ResetScope {
    pub fn predicate(self, today: NaiveDate) -> DayPredicate {
        match self {
            ResetScope::Today => DayPredicate::On(today),
            ResetScope::ThroughToday => DayPredicate::OnOrBefore(today),
        }
    }
}

impl FromStr for ResetScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(ResetScope::Today),
            "through-today" | "through_today" => Ok(ResetScope::ThroughToday),
            other => Err(AppError::Config(format!(
                "RESET_SCOPE must be `today` or `through-today`, got `{other}`"
            ))),
        }
    }
}

/// Sweep that restores the "present by default" state.
#[derive(Clone)]
pub struct ResetJob {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    scope: ResetScope,
}

impl ResetJob {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>, scope: ResetScope) -> Self {
        Self { store, clock, scope }
    }

    pub fn scope(&self) -> ResetScope {
        self.scope
    }

    /// Runs the sweep once and returns what it touched.
    pub async fn sweep(&self) -> Result<ResetReport, AppError> {
        let day = self.clock.today();
        let affected = self
            .store
            .bulk_set_present(self.scope.predicate(day), true)
            .await?;

        Ok(ResetReport { day, affected })
    }

    /// Scheduler entry point. Failures are logged and swallowed; the next
    /// trigger repeats the same sweep.
    pub async fn run(&self) -> Option<u64> {
        match self.sweep().await {
            Ok(report) => {
                info!(
                    "attendance reset completed - day: {} scope: {:?} affected: {}",
                    report.day, self.scope, report.affected
                );
                Some(report.affected)
            }
            Err(e) => {
                warn!("attendance reset failed: {:?}", e);
                None
            }
        }
    }
}
