use api::auth::generate_jwt;
use db::models::student::NewStudent;
use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;
use services::accounts::{self, Credentials, StudentAccount, WardenAccount};

pub fn token_for(user: &user::Model) -> String {
    generate_jwt(user.id, user.role).unwrap().0
}

pub async fn admin(db: &DatabaseConnection) -> user::Model {
    user::Model::create(db, "admin", "admin@hostel.com", "admin123", Role::Admin)
        .await
        .unwrap()
}

pub async fn warden(db: &DatabaseConnection, username: &str) -> WardenAccount {
    accounts::enroll_warden(
        db,
        Credentials {
            username: username.into(),
            email: format!("{username}@hostel.com"),
            password: "warden123".into(),
        },
        "Raj",
        "Kumar",
        Some("+919900000001"),
    )
    .await
    .unwrap()
}

/// Student `number` with login `number` lowercased and password `student123`.
pub async fn student(
    db: &DatabaseConnection,
    number: &str,
    rfid_tag: Option<&str>,
    phone: Option<&str>,
) -> StudentAccount {
    let username = number.to_lowercase();
    accounts::enroll_student(
        db,
        Credentials {
            email: format!("{username}@hostel.com"),
            username,
            password: "student123".into(),
        },
        NewStudent {
            student_number: number.into(),
            first_name: format!("First{number}"),
            last_name: "Tester".into(),
            room_number: Some("A-101".into()),
            rfid_tag: rfid_tag.map(str::to_owned),
            phone_number: phone.map(str::to_owned),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}
