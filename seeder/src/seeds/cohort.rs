use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::student::{Model as StudentModel, NewStudent};
use db::models::user::{Model as UserModel, Role};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::name::en::{FirstName, LastName};
use sea_orm::{DatabaseConnection, DbErr};
use util::dates::Clock;

const GENERATED_STUDENTS: u32 = 5;
const BLOOD_GROUPS: [&str; 4] = ["A+", "B+", "O+", "AB+"];

/// The fixed demo student plus a handful of generated residents.
pub struct CohortSeeder;

async fn ensure_student(
    db: &DatabaseConnection,
    username: &str,
    profile: NewStudent,
) -> Result<(), DbErr> {
    if StudentModel::find_by_student_number(db, &profile.student_number)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let email = format!("{username}@hostel.com");
    let login = UserModel::ensure(db, username, &email, "student123", Role::Student).await?;
    StudentModel::create(db, login.id, profile).await?;
    Ok(())
}

#[async_trait]
impl Seeder for CohortSeeder {
    async fn seed(&self, db: &DatabaseConnection, _clock: &dyn Clock) -> Result<(), DbErr> {
        ensure_student(
            db,
            "student1",
            NewStudent {
                student_number: "STU001".into(),
                first_name: "Anu".into(),
                last_name: "Sharma".into(),
                phone_number: Some("+919900000010".into()),
                parent_name: Some("Ravi Sharma".into()),
                parent_phone: Some("+919900000020".into()),
                room_number: Some("A-101".into()),
                rfid_tag: Some("RFID-STU001".into()),
                blood_group: Some("O+".into()),
                ..Default::default()
            },
        )
        .await?;

        for n in 2..=GENERATED_STUDENTS + 1 {
            let number = format!("STU{n:03}");
            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            let street: String = StreetName().fake();

            ensure_student(
                db,
                &number.to_lowercase(),
                NewStudent {
                    rfid_tag: Some(format!("RFID-{number}")),
                    phone_number: Some(format!("+9199000000{}", 9 + n)),
                    room_number: Some(format!(
                        "{}-{}",
                        ['A', 'B', 'C'][fastrand::usize(0..3)],
                        fastrand::u32(101..=120)
                    )),
                    blood_group: Some(BLOOD_GROUPS[fastrand::usize(..BLOOD_GROUPS.len())].into()),
                    address: Some(format!("{} {street}", fastrand::u32(1..=200))),
                    parent_name: Some(format!("{} {last}", FirstName().fake::<String>())),
                    student_number: number,
                    first_name: first,
                    last_name: last,
                    ..Default::default()
                },
            )
            .await?;
        }

        Ok(())
    }
}
