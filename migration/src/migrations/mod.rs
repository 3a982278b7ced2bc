pub mod m202510190001_create_users;
pub mod m202510190002_create_profiles;
pub mod m202510190003_create_attendance_logs;
pub mod m202510190004_create_leave;
pub mod m202510190005_create_reminders;
