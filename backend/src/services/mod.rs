pub mod account_service;
pub mod attendance_service;
pub mod clock;
pub mod import_service;
pub mod reset_job;
pub mod scheduler;

pub use attendance_service::{AttendanceService, ReconcileOutcome, Reconciled};
pub use clock::{Clock, FixedClock, SystemClock};
pub use import_service::import_students;
pub use reset_job::{ResetJob, ResetScope};
pub use scheduler::{ResetScheduler, Schedule};
