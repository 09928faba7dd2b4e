use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of "now" for day-keyed logic.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Calendar day of the current instant, time of day discarded.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now: DateTime<Local> = Local::now();
        now.naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn on(day: NaiveDate) -> Self {
        Self(day.and_time(NaiveTime::default()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
