use chrono::NaiveDate;
use db::models::student::{self, NewStudent};
use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;

/// 2024-06-10, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// 2024-06-15, a Saturday.
pub fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub struct TestStudent;

impl TestStudent {
    pub async fn insert(
        db: &DatabaseConnection,
        number: &str,
        rfid_tag: Option<&str>,
        phone: Option<&str>,
    ) -> student::Model {
        let username = number.to_lowercase();
        let owner = user::Model::create(
            db,
            &username,
            &format!("{username}@hostel.com"),
            "student123",
            Role::Student,
        )
        .await
        .unwrap();

        student::Model::create(
            db,
            owner.id,
            NewStudent {
                student_number: number.into(),
                first_name: format!("First{number}"),
                last_name: "Tester".into(),
                rfid_tag: rfid_tag.map(Into::into),
                phone_number: phone.map(Into::into),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }
}

pub async fn staff_user(db: &DatabaseConnection, username: &str, role: Role) -> user::Model {
    user::Model::create(db, username, &format!("{username}@hostel.com"), "pw", role)
        .await
        .unwrap()
}
