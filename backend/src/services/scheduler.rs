use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use tracing::info;

use crate::services::clock::Clock;
use crate::services::reset_job::ResetJob;

/// When the reset sweep fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Once a day at a fixed local wall-clock time.
    DailyAt(NaiveTime),
    /// Fixed period, first run after one period.
    Every(Duration),
}

/// Drives [`ResetJob`] from a timer. Each sweep is awaited before the next
/// delay is computed, so runs never overlap.
pub struct ResetScheduler {
    job: ResetJob,
    clock: Arc<dyn Clock>,
    schedule: Schedule,
}

impl ResetScheduler {
    pub fn new(job: ResetJob, clock: Arc<dyn Clock>, schedule: Schedule) -> Self {
        Self { job, clock, schedule }
    }

    pub async fn start(self) {
        info!("Starting attendance reset scheduler ({:?}, scope {:?})", self.schedule, self.job.scope());

        loop {
            let delay = match self.schedule {
                Schedule::DailyAt(at) => delay_until_next(self.clock.now(), at),
                Schedule::Every(period) => period,
            };

            tokio::time::sleep(delay).await;

            self.job.run().await;
        }
    }
}

/// Time left until the next occurrence of `at`, strictly after `now`.
pub fn delay_until_next(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let today_at = now.date().and_time(at);
    let next = if now < today_at {
        today_at
    } else {
        today_at + TimeDelta::days(1)
    };

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
