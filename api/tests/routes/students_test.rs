#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, student, token_for, warden};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::{student as student_model, user};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::{Value, json};

    fn new_student(username: &str, number: &str, rfid: &str) -> Value {
        json!({
            "username": username,
            "email": format!("{username}@hostel.com"),
            "password": "secret123",
            "student_number": number,
            "first_name": "Ravi",
            "last_name": "Patel",
            "date_of_birth": "2004-02-29",
            "phone_number": "+919900000011",
            "room_number": "A-102",
            "rfid_tag": rfid
        })
    }

    #[tokio::test]
    async fn warden_creates_student_with_login() {
        let app = make_test_app().await;
        let w = warden(app.state.db(), "warden1").await;

        let (status, json) = app
            .post(
                "/api/students",
                Some(&token_for(&w.user)),
                new_student("ravi", "STU002", "RFID-STU002"),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["user"]["role"], "student");
        assert_eq!(json["data"]["student"]["date_of_birth"], "2004-02-29");

        let (status, _) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "username": "ravi", "password": "secret123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn duplicate_rfid_rolls_back_the_user() {
        let app = make_test_app().await;
        let db = app.state.db();
        let admin = admin(db).await;
        student(db, "STU001", Some("RFID-STU001"), None).await;
        let users_before = user::Entity::find().count(db).await.unwrap();

        let (status, json) = app
            .post(
                "/api/students",
                Some(&token_for(&admin)),
                new_student("ravi", "STU002", "RFID-STU001"),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "RFID tag already exists");
        assert_eq!(user::Entity::find().count(db).await.unwrap(), users_before);
        assert_eq!(student_model::Entity::find().count(db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_required_fields_are_named() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;

        let (status, json) = app
            .post(
                "/api/students",
                Some(&token_for(&admin)),
                json!({ "username": "x", "email": "x@hostel.com", "password": "secret123" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "Missing required fields: student_number, first_name, last_name"
        );
    }

    #[tokio::test]
    async fn students_read_only_their_own_profile() {
        let app = make_test_app().await;
        let db = app.state.db();
        let me = student(db, "STU001", None, None).await;
        let other = student(db, "STU002", None, None).await;
        let token = token_for(&me.user);

        let (status, json) = app
            .get(&format!("/api/students/{}", me.student.id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["username"], "stu001");

        let (status, _) = app
            .get(&format!("/api/students/{}", other.student.id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = app.get("/api/students/me/profile", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["student_number"], "STU001");

        let (status, _) = app.get("/api/students", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let app = make_test_app().await;
        let db = app.state.db();
        let admin = admin(db).await;
        let w = warden(db, "warden1").await;
        let s = student(db, "STU001", None, None).await;
        let uri = format!("/api/students/{}", s.student.id);

        let (status, json) = app
            .put(&uri, Some(&token_for(&w.user)), json!({ "room_number": "B-204" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["room_number"], "B-204");
        assert_eq!(json["data"]["first_name"], "FirstSTU001");

        let (status, _) = app.delete(&uri, Some(&token_for(&w.user))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.delete(&uri, Some(&token_for(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(user::Entity::find_by_id(s.user.id).one(db).await.unwrap().is_none());

        let (status, _) = app.get(&uri, Some(&token_for(&admin))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
