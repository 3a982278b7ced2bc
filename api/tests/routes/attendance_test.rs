#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, student, token_for, warden};
    use crate::helpers::make_test_app;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn rfid_scan_is_logged_without_auth() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", Some("RFID-STU001"), None).await;

        let (status, json) = app
            .post(
                "/api/attendance/rfid-log",
                None,
                json!({ "rfid_tag": "RFID-STU001", "log_type": "entry" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["student_id"], s.student.id);
        assert_eq!(json["data"]["log_type"], "entry");
    }

    #[tokio::test]
    async fn rfid_scan_validation() {
        let app = make_test_app().await;
        student(app.state.db(), "STU001", Some("RFID-STU001"), None).await;

        let (status, json) = app
            .post("/api/attendance/rfid-log", None, json!({ "log_type": "entry" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing required fields: rfid_tag");

        let (status, _) = app
            .post(
                "/api/attendance/rfid-log",
                None,
                json!({ "rfid_tag": "RFID-STU001", "log_type": "sideways" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = app
            .post(
                "/api/attendance/rfid-log",
                None,
                json!({ "rfid_tag": "RFID-NOPE", "log_type": "exit" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Unknown RFID tag");
    }

    #[tokio::test]
    async fn exit_then_entry_reads_present() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", Some("RFID-STU001"), None).await;
        let token = token_for(&s.user);

        for direction in ["exit", "entry"] {
            let (status, _) = app
                .post(
                    "/api/attendance/rfid-log",
                    None,
                    json!({ "rfid_tag": "RFID-STU001", "log_type": direction }),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, json) = app.get("/api/attendance/my-status", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["present"], true);
        assert_eq!(json["data"]["display"], "Present");
        assert_eq!(json["data"]["last_direction"], "entry");

        let (status, json) = app.get("/api/attendance/my-logs", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn staff_listing_filters_and_validates_dates() {
        let app = make_test_app().await;
        let db = app.state.db();
        let a = student(db, "STU001", Some("RFID-STU001"), None).await;
        student(db, "STU002", Some("RFID-STU002"), None).await;
        let w = warden(db, "warden1").await;
        let token = token_for(&w.user);

        for tag in ["RFID-STU001", "RFID-STU002", "RFID-STU001"] {
            app.post(
                "/api/attendance/rfid-log",
                None,
                json!({ "rfid_tag": tag, "log_type": "entry" }),
            )
            .await;
        }

        let (status, json) = app.get("/api/attendance", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);

        let uri = format!(
            "/api/attendance?student_id={}&from_date=2024-06-10&to_date=2024-06-10",
            a.student.id
        );
        let (status, json) = app.get(&uri, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["student_number"], "STU001");

        let (status, _) = app
            .get("/api/attendance?from_date=2024-06-11&to_date=2024-06-10", Some(&token))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .get("/api/attendance?from_date=10-06-2024", Some(&token))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn roster_is_staff_only() {
        let app = make_test_app().await;
        let db = app.state.db();
        let s = student(db, "STU001", Some("RFID-STU001"), None).await;
        let admin = admin(db).await;

        let (status, _) = app
            .get("/api/attendance/current-status", Some(&token_for(&s.user)))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = app
            .get("/api/attendance/current-status", Some(&token_for(&admin)))
            .await;
        assert_eq!(status, StatusCode::OK);
        let roster = json["data"].as_array().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0]["display"], "Outside");
        assert_eq!(roster[0]["present"], false);
    }

    #[tokio::test]
    async fn malformed_scan_body_gets_message_envelope() {
        let app = make_test_app().await;
        student(app.state.db(), "STU001", Some("RFID-STU001"), None).await;

        let (status, json) = app
            .post(
                "/api/attendance/rfid-log",
                None,
                json!({ "rfid_tag": 42, "log_type": "entry" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body")
        );

        let (status, json) = app
            .send(Method::POST, "/api/attendance/rfid-log", None, None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn bad_query_value_gets_message_envelope() {
        let app = make_test_app().await;
        let w = warden(app.state.db(), "warden1").await;

        let (status, json) = app
            .get("/api/attendance?limit=abc", Some(&token_for(&w.user)))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid query parameters")
        );
    }
}
