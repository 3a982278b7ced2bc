use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// Represents a student profile in the `students` table, owned 1:1 by a `users` row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user account. Deleting the user cascades here.
    pub user_id: i64,
    /// Unique institutional number (e.g. `STU001`).
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub room_number: Option<String>,
    /// Unique RFID tag scanned at the hostel gate.
    pub rfid_tag: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::attendance_log::Entity")]
    AttendanceLogs,
    #[sea_orm(has_many = "super::college_leave::Entity")]
    CollegeLeave,
    #[sea_orm(has_many = "super::holiday_leave::Entity")]
    HolidayLeave,
    #[sea_orm(has_many = "super::sms_log::Entity")]
    SmsLogs,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::attendance_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceLogs.def()
    }
}

impl Related<super::college_leave::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollegeLeave.def()
    }
}

impl Related<super::holiday_leave::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HolidayLeave.def()
    }
}

impl Related<super::sms_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmsLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Profile fields supplied when a student is enrolled.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub room_number: Option<String>,
    pub rfid_tag: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub room_number: Option<String>,
    pub rfid_tag: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
}

/// Blank strings are stored as NULL so the unique RFID index never sees `""` twice.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Phone number to remind, if one is on file.
    pub fn reminder_phone(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        profile: NewStudent,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            user_id: Set(user_id),
            student_number: Set(profile.student_number.trim().to_owned()),
            first_name: Set(profile.first_name.trim().to_owned()),
            last_name: Set(profile.last_name.trim().to_owned()),
            date_of_birth: Set(profile.date_of_birth),
            phone_number: Set(non_blank(profile.phone_number)),
            emergency_contact: Set(non_blank(profile.emergency_contact)),
            parent_name: Set(non_blank(profile.parent_name)),
            parent_phone: Set(non_blank(profile.parent_phone)),
            address: Set(non_blank(profile.address)),
            room_number: Set(non_blank(profile.room_number)),
            rfid_tag: Set(non_blank(profile.rfid_tag)),
            blood_group: Set(non_blank(profile.blood_group)),
            medical_conditions: Set(non_blank(profile.medical_conditions)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_user_id<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn find_by_rfid_tag<C: ConnectionTrait>(
        db: &C,
        rfid_tag: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RfidTag.eq(rfid_tag.trim()))
            .one(db)
            .await
    }

    pub async fn find_by_student_number<C: ConnectionTrait>(
        db: &C,
        student_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentNumber.eq(student_number.trim()))
            .one(db)
            .await
    }

    /// All students ordered by student number.
    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::StudentNumber)
            .all(db)
            .await
    }

    /// Students with a non-empty phone number, i.e. the reminder audience.
    pub async fn list_reachable<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        let students = Entity::find()
            .filter(Column::PhoneNumber.is_not_null())
            .filter(Column::PhoneNumber.ne(""))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        Ok(students
            .into_iter()
            .filter(|s| s.reminder_phone().is_some())
            .collect())
    }

    pub async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        existing: Model,
        changes: StudentChanges,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = existing.into();

        if let Some(v) = changes.first_name {
            active.first_name = Set(v.trim().to_owned());
        }
        if let Some(v) = changes.last_name {
            active.last_name = Set(v.trim().to_owned());
        }
        if let Some(v) = changes.date_of_birth {
            active.date_of_birth = Set(Some(v));
        }
        if changes.phone_number.is_some() {
            active.phone_number = Set(non_blank(changes.phone_number));
        }
        if changes.emergency_contact.is_some() {
            active.emergency_contact = Set(non_blank(changes.emergency_contact));
        }
        if changes.parent_name.is_some() {
            active.parent_name = Set(non_blank(changes.parent_name));
        }
        if changes.parent_phone.is_some() {
            active.parent_phone = Set(non_blank(changes.parent_phone));
        }
        if changes.address.is_some() {
            active.address = Set(non_blank(changes.address));
        }
        if changes.room_number.is_some() {
            active.room_number = Set(non_blank(changes.room_number));
        }
        if changes.rfid_tag.is_some() {
            active.rfid_tag = Set(non_blank(changes.rfid_tag));
        }
        if changes.blood_group.is_some() {
            active.blood_group = Set(non_blank(changes.blood_group));
        }
        if changes.medical_conditions.is_some() {
            active.medical_conditions = Set(non_blank(changes.medical_conditions));
        }

        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{self, Role};
    use crate::test_utils::setup_test_db;

    async fn owner(db: &DatabaseConnection, name: &str) -> user::Model {
        user::Model::create(db, name, &format!("{name}@hostel.com"), "pw", Role::Student)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn blank_optional_fields_are_stored_as_null() {
        let db = setup_test_db().await;
        let u = owner(&db, "s1").await;
        let s = Model::create(
            &db,
            u.id,
            NewStudent {
                student_number: "STU001".into(),
                first_name: "Anu".into(),
                last_name: "Sharma".into(),
                phone_number: Some("   ".into()),
                rfid_tag: Some("".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(s.phone_number, None);
        assert_eq!(s.rfid_tag, None);
        assert_eq!(s.reminder_phone(), None);
    }

    #[tokio::test]
    async fn list_reachable_skips_students_without_phone() {
        let db = setup_test_db().await;
        let a = owner(&db, "a").await;
        let b = owner(&db, "b").await;
        Model::create(
            &db,
            a.id,
            NewStudent {
                student_number: "STU001".into(),
                first_name: "Anu".into(),
                last_name: "Sharma".into(),
                phone_number: Some("+919900000010".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        Model::create(
            &db,
            b.id,
            NewStudent {
                student_number: "STU002".into(),
                first_name: "Ravi".into(),
                last_name: "Das".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let reachable = Model::list_reachable(&db).await.unwrap();
        assert_eq!(reachable.len(), 1);
        assert_eq!(reachable[0].student_number, "STU001");
    }

    #[tokio::test]
    async fn deleting_owner_cascades_to_profile() {
        let db = setup_test_db().await;
        let u = owner(&db, "gone").await;
        let s = Model::create(
            &db,
            u.id,
            NewStudent {
                student_number: "STU009".into(),
                first_name: "Gone".into(),
                last_name: "Soon".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        user::Model::delete_by_id(&db, u.id).await.unwrap();
        assert!(Model::get_by_id(&db, s.id).await.unwrap().is_none());
    }
}
