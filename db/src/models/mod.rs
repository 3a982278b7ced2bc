pub mod attendance_log;
pub mod college_leave;
pub mod holiday_leave;
pub mod reminder_setting;
pub mod sms_log;
pub mod student;
pub mod user;
pub mod warden;

pub use attendance_log::Entity as AttendanceLog;
pub use college_leave::Entity as CollegeLeave;
pub use holiday_leave::Entity as HolidayLeave;
pub use reminder_setting::Entity as ReminderSetting;
pub use sms_log::Entity as SmsLog;
pub use student::Entity as Student;
pub use user::Entity as User;
pub use warden::Entity as Warden;
