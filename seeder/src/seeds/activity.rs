use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::Duration;
use db::models::attendance_log::{LogType, Model as AttendanceLogModel};
use db::models::college_leave::{CollegeLeaveStatus, Model as CollegeLeaveModel};
use db::models::holiday_leave::Model as HolidayLeaveModel;
use db::models::student::Model as StudentModel;
use sea_orm::{DatabaseConnection, DbErr};
use util::dates::{Clock, is_working_day};

/// Gate scans and leave records for the demo student, relative to today.
pub struct ActivitySeeder;

#[async_trait]
impl Seeder for ActivitySeeder {
    async fn seed(&self, db: &DatabaseConnection, clock: &dyn Clock) -> Result<(), DbErr> {
        let Some(student) = StudentModel::find_by_student_number(db, "STU001").await? else {
            return Ok(());
        };
        let now = clock.now();
        let today = clock.today();

        if AttendanceLogModel::latest_for_student(db, student.id)
            .await?
            .is_none()
        {
            let tag = student.rfid_tag.clone().unwrap_or_default();
            AttendanceLogModel::create(db, student.id, LogType::Exit, &tag, now - Duration::hours(2))
                .await?;
            AttendanceLogModel::create(db, student.id, LogType::Entry, &tag, now - Duration::hours(1))
                .await?;
        }

        if HolidayLeaveModel::list(db, None, Some(student.id))
            .await?
            .is_empty()
        {
            HolidayLeaveModel::create(
                db,
                student.id,
                today + Duration::days(5),
                today + Duration::days(7),
                "Family function at home",
                now,
            )
            .await?;
        }

        if is_working_day(today) {
            CollegeLeaveModel::upsert(
                db,
                student.id,
                today,
                "Not feeling well",
                CollegeLeaveStatus::InsideHostel,
            )
            .await?;
        }

        Ok(())
    }
}
