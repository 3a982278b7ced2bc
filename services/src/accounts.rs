//! Student and warden accounts.
//!
//! A profile and its owning user row are created and deleted together inside one
//! transaction; a failure at any step rolls both back.

use crate::error::{ServiceError, ServiceResult};
use crate::input;
use chrono::{DateTime, Utc};
use db::models::attendance_log::{self, LogType};
use db::models::student::{self, NewStudent, StudentChanges};
use db::models::user::{self, Role};
use db::models::warden;
use sea_orm::{
    DatabaseConnection, DatabaseTransaction, EntityTrait, QueryOrder, TransactionError,
    TransactionTrait,
};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAccount {
    pub user: user::Model,
    pub student: student::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct WardenAccount {
    pub user: user::Model,
    pub warden: warden::Model,
}

/// A student together with their last gate scan.
#[derive(Debug, Clone, Serialize)]
pub struct StudentOverview {
    #[serde(flatten)]
    pub student: student::Model,
    pub username: Option<String>,
    pub email: Option<String>,
    pub last_log_type: Option<LogType>,
    pub last_log_time: Option<DateTime<Utc>>,
}

type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'c>>;

/// Runs `work` in a transaction, committing on success and rolling back on error.
async fn in_transaction<T, F>(db: &DatabaseConnection, work: F) -> ServiceResult<T>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    T: Send,
{
    db.transaction::<F, T, ServiceError>(work)
        .await
        .map_err(|e| match e {
            TransactionError::Connection(err) => {
                error!(error = %err, "Transaction failed to commit or roll back");
                ServiceError::StorageUnavailable(err)
            }
            TransactionError::Transaction(err) => err,
        })
}

fn require_credentials(c: &Credentials, extra: &[(&str, &str)]) -> ServiceResult<()> {
    let mut fields = vec![
        ("username", c.username.as_str()),
        ("email", c.email.as_str()),
        ("password", c.password.as_str()),
    ];
    fields.extend_from_slice(extra);
    input::require_fields(&fields)
}

pub async fn enroll_student(
    db: &DatabaseConnection,
    credentials: Credentials,
    profile: NewStudent,
) -> ServiceResult<StudentAccount> {
    require_credentials(
        &credentials,
        &[
            ("student_number", profile.student_number.as_str()),
            ("first_name", profile.first_name.as_str()),
            ("last_name", profile.last_name.as_str()),
        ],
    )?;

    let account = in_transaction(db, move |txn| {
        Box::pin(async move {
            let user = user::Model::create(
                txn,
                &credentials.username,
                &credentials.email,
                &credentials.password,
                Role::Student,
            )
            .await
            .map_err(ServiceError::from_insert)?;

            let student = student::Model::create(txn, user.id, profile)
                .await
                .map_err(ServiceError::from_insert)?;

            Ok(StudentAccount { user, student })
        })
    })
    .await?;

    info!(
        student_id = account.student.id,
        user_id = account.user.id,
        student_number = %account.student.student_number,
        "Student enrolled"
    );
    Ok(account)
}

pub async fn enroll_warden(
    db: &DatabaseConnection,
    credentials: Credentials,
    first_name: &str,
    last_name: &str,
    phone_number: Option<&str>,
) -> ServiceResult<WardenAccount> {
    require_credentials(
        &credentials,
        &[("first_name", first_name), ("last_name", last_name)],
    )?;

    let first_name = first_name.to_owned();
    let last_name = last_name.to_owned();
    let phone_number = phone_number.map(str::to_owned);

    let account = in_transaction(db, move |txn| {
        Box::pin(async move {
            let user = user::Model::create(
                txn,
                &credentials.username,
                &credentials.email,
                &credentials.password,
                Role::Warden,
            )
            .await
            .map_err(ServiceError::from_insert)?;

            let warden = warden::Model::create(
                txn,
                user.id,
                &first_name,
                &last_name,
                phone_number.as_deref(),
            )
            .await
            .map_err(ServiceError::from_insert)?;

            Ok(WardenAccount { user, warden })
        })
    })
    .await?;

    info!(warden_id = account.warden.id, user_id = account.user.id, "Warden created");
    Ok(account)
}

pub async fn student_by_id(db: &DatabaseConnection, id: i64) -> ServiceResult<student::Model> {
    student::Model::get_by_id(db, id)
        .await?
        .ok_or(ServiceError::NotFound("Student"))
}

/// The student profile owned by `user_id`.
pub async fn student_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> ServiceResult<student::Model> {
    student::Model::find_by_user_id(db, user_id)
        .await?
        .ok_or(ServiceError::NotFound("Student profile"))
}

pub async fn warden_for_user(db: &DatabaseConnection, user_id: i64) -> ServiceResult<warden::Model> {
    warden::Model::find_by_user_id(db, user_id)
        .await?
        .ok_or(ServiceError::NotFound("Warden profile"))
}

pub async fn update_student(
    db: &DatabaseConnection,
    id: i64,
    changes: StudentChanges,
) -> ServiceResult<student::Model> {
    let existing = student_by_id(db, id).await?;
    let updated = student::Model::apply_changes(db, existing, changes)
        .await
        .map_err(ServiceError::from_insert)?;
    info!(student_id = id, "Student updated");
    Ok(updated)
}

pub async fn update_warden(
    db: &DatabaseConnection,
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_number: Option<String>,
) -> ServiceResult<warden::Model> {
    let existing = warden::Model::get_by_id(db, id)
        .await?
        .ok_or(ServiceError::NotFound("Warden"))?;
    let updated =
        warden::Model::update_details(db, existing, first_name, last_name, phone_number).await?;
    info!(warden_id = id, "Warden updated");
    Ok(updated)
}

/// Removes the student profile and its user account.
pub async fn delete_student(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
    let existing = student_by_id(db, id).await?;
    let user_id = existing.user_id;

    let student_id = existing.id;

    in_transaction(db, move |txn| {
        Box::pin(async move {
            student::Entity::delete_by_id(student_id).exec(txn).await?;
            user::Model::delete_by_id(txn, user_id).await?;
            Ok(())
        })
    })
    .await?;

    info!(student_id = id, user_id, "Student deleted");
    Ok(())
}

pub async fn delete_warden(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
    let existing = warden::Model::get_by_id(db, id)
        .await?
        .ok_or(ServiceError::NotFound("Warden"))?;
    let user_id = existing.user_id;

    let warden_id = existing.id;

    in_transaction(db, move |txn| {
        Box::pin(async move {
            warden::Entity::delete_by_id(warden_id).exec(txn).await?;
            user::Model::delete_by_id(txn, user_id).await?;
            Ok(())
        })
    })
    .await?;

    info!(warden_id = id, user_id, "Warden deleted");
    Ok(())
}

/// Every student with login details and last scan, ordered by student number.
pub async fn student_overview(db: &DatabaseConnection) -> ServiceResult<Vec<StudentOverview>> {
    let rows = student::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(student::Column::StudentNumber)
        .all(db)
        .await?;

    let mut overview = Vec::with_capacity(rows.len());
    for (student, owner) in rows {
        let last = attendance_log::Model::latest_for_student(db, student.id).await?;
        overview.push(StudentOverview {
            username: owner.as_ref().map(|u| u.username.clone()),
            email: owner.map(|u| u.email),
            last_log_type: last.as_ref().map(|l| l.log_type),
            last_log_time: last.map(|l| l.timestamp),
            student,
        });
    }
    Ok(overview)
}

pub async fn wardens(db: &DatabaseConnection) -> ServiceResult<Vec<warden::Model>> {
    Ok(warden::Model::list_all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::setup_test_db;
    use sea_orm::PaginatorTrait;

    fn creds(name: &str) -> Credentials {
        Credentials {
            username: name.into(),
            email: format!("{name}@hostel.com"),
            password: "secret123".into(),
        }
    }

    fn profile(number: &str, tag: &str) -> NewStudent {
        NewStudent {
            student_number: number.into(),
            first_name: "Anu".into(),
            last_name: "Sharma".into(),
            rfid_tag: Some(tag.into()),
            phone_number: Some("+919900000010".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn enrollment_creates_user_and_profile() {
        let db = setup_test_db().await;
        let account = enroll_student(&db, creds("student1"), profile("STU001", "RFID-STU001"))
            .await
            .unwrap();

        assert_eq!(account.user.role, Role::Student);
        assert_eq!(account.student.user_id, account.user.id);
        assert_eq!(
            student_for_user(&db, account.user.id).await.unwrap().id,
            account.student.id
        );
    }

    #[tokio::test]
    async fn duplicate_tag_rolls_back_the_user_row() {
        let db = setup_test_db().await;
        enroll_student(&db, creds("student1"), profile("STU001", "RFID-STU001"))
            .await
            .unwrap();

        let err = enroll_student(&db, creds("student2"), profile("STU002", "RFID-STU001"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(ref what) if what == "RFID tag"));

        assert!(
            user::Model::find_by_username(&db, "student2")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() {
        let db = setup_test_db().await;
        enroll_student(&db, creds("student1"), profile("STU001", "RFID-STU001"))
            .await
            .unwrap();
        let err = enroll_student(&db, creds("student1"), profile("STU002", "RFID-STU002"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(ref what) if what == "Username"));
    }

    #[tokio::test]
    async fn missing_fields_are_listed() {
        let db = setup_test_db().await;
        let err = enroll_student(
            &db,
            Credentials {
                username: "".into(),
                email: "x@hostel.com".into(),
                password: "pw".into(),
            },
            NewStudent::default(),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, ServiceError::MissingFields(ref f) if f == "username, student_number, first_name, last_name")
        );
    }

    #[tokio::test]
    async fn deleting_student_removes_user_too() {
        let db = setup_test_db().await;
        let account = enroll_student(&db, creds("student1"), profile("STU001", "RFID-STU001"))
            .await
            .unwrap();

        delete_student(&db, account.student.id).await.unwrap();
        assert!(user::Model::get_by_id(&db, account.user.id).await.unwrap().is_none());
        assert!(matches!(
            delete_student(&db, account.student.id).await,
            Err(ServiceError::NotFound("Student"))
        ));
    }

    #[tokio::test]
    async fn warden_lifecycle() {
        let db = setup_test_db().await;
        let account = enroll_warden(&db, creds("warden1"), "Raj", "Kumar", Some("+919900000001"))
            .await
            .unwrap();
        assert_eq!(account.user.role, Role::Warden);

        let updated = update_warden(&db, account.warden.id, None, None, Some("".into()))
            .await
            .unwrap();
        assert_eq!(updated.phone_number, None);

        delete_warden(&db, account.warden.id).await.unwrap();
        assert!(wardens(&db).await.unwrap().is_empty());
        assert!(user::Model::get_by_id(&db, account.user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overview_reports_last_scan() {
        let db = setup_test_db().await;
        let account = enroll_student(&db, creds("student1"), profile("STU001", "RFID-STU001"))
            .await
            .unwrap();
        attendance_log::Model::create(&db, account.student.id, LogType::Exit, "RFID-STU001", Utc::now())
            .await
            .unwrap();

        let rows = student_overview(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_log_type, Some(LogType::Exit));
        assert_eq!(rows[0].username.as_deref(), Some("student1"));
    }
}
