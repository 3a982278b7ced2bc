use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::NaiveTime;
use db::models::reminder_setting::Model as ReminderSettingModel;
use db::models::user::Model as UserModel;
use sea_orm::{DatabaseConnection, DbErr};
use util::dates::Clock;

pub struct ReminderSeeder;

#[async_trait]
impl Seeder for ReminderSeeder {
    async fn seed(&self, db: &DatabaseConnection, _clock: &dyn Clock) -> Result<(), DbErr> {
        if ReminderSettingModel::current(db).await?.is_some() {
            return Ok(());
        }

        let admin = UserModel::find_by_username(db, "admin").await?;
        let at = NaiveTime::from_hms_opt(20, 0, 0)
            .ok_or_else(|| DbErr::Custom("Invalid reminder time".into()))?;
        ReminderSettingModel::upsert(db, at, true, admin.map(|a| a.id)).await?;
        Ok(())
    }
}
