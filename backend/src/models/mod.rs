pub mod attendance;
pub mod campus;
pub mod news;
pub mod principal;
pub mod student;
pub mod teacher;

pub use attendance::{AttendanceRecord, DayQuery, PresenceUpdate, ReportPresenceRequest, ResetReport};
pub use campus::{Campus, CampusIdInput, CampusRequest};
pub use news::{NewNewsRequest, News, NewsWithCampus, UpdateNewsRequest};
pub use principal::{Principal, Role, UpdateProfileRequest};
pub use student::{
    AssignCampusRequest, CampusName, ImportStats, NewStudentRequest, Student, StudentImportRow,
    StudentProfile, StudentWithCampus, UpdateStudentRequest,
};
pub use teacher::{NewTeacherRequest, Teacher, UpdateTeacherRequest};
