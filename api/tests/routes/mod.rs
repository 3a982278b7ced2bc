mod attendance_test;
mod auth_test;
mod college_leave_test;
mod health_test;
mod holiday_leave_test;
mod reminders_test;
mod students_test;
mod wardens_test;
