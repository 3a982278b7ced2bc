use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::user::{Model as UserModel, Role};
use db::models::warden::Model as WardenModel;
use sea_orm::{DatabaseConnection, DbErr};
use util::dates::Clock;

/// Staff logins. Passwords are reset to the demo values on every run.
pub struct AccountSeeder;

#[async_trait]
impl Seeder for AccountSeeder {
    async fn seed(&self, db: &DatabaseConnection, _clock: &dyn Clock) -> Result<(), DbErr> {
        UserModel::ensure(db, "admin", "admin@hostel.com", "admin123", Role::Admin).await?;

        let warden =
            UserModel::ensure(db, "warden1", "warden1@hostel.com", "warden123", Role::Warden)
                .await?;
        if WardenModel::find_by_user_id(db, warden.id).await?.is_none() {
            WardenModel::create(db, warden.id, "Raj", "Kumar", Some("+919900000001")).await?;
        }

        Ok(())
    }
}
