#[cfg(test)]
mod tests {
    use crate::helpers::app::{make_test_app_at, monday, saturday};
    use crate::helpers::fixtures::{student, token_for, warden};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn declaring_overrides_an_exit_scan() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", Some("RFID-STU001"), None).await;
        let token = token_for(&s.user);

        app.post(
            "/api/attendance/rfid-log",
            None,
            json!({ "rfid_tag": "RFID-STU001", "log_type": "exit" }),
        )
        .await;

        let (status, json) = app
            .post(
                "/api/college-leave",
                Some(&token),
                json!({ "date": "2024-06-10", "reason": "Fever" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "inside_hostel");

        let (_, json) = app.get("/api/attendance/my-status", Some(&token)).await;
        assert_eq!(json["data"]["present"], true);
        assert_eq!(json["data"]["display"], "Inside Hostel (College Leave)");
        assert_eq!(json["data"]["college_leave_reason"], "Fever");
    }

    #[tokio::test]
    async fn declaring_twice_keeps_one_record() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", None, None).await;
        let token = token_for(&s.user);

        for reason in ["Fever", "Exam prep"] {
            let (status, _) = app
                .post(
                    "/api/college-leave",
                    Some(&token),
                    json!({ "date": "2024-06-10", "reason": reason }),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, json) = app.get("/api/college-leave/my-records", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        let records = json["data"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["reason"], "Exam prep");
    }

    #[tokio::test]
    async fn only_today_on_a_working_day() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", None, None).await;
        let token = token_for(&s.user);

        let (status, json) = app
            .post(
                "/api/college-leave",
                Some(&token),
                json!({ "date": "2024-06-11", "reason": "Fever" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "College leave can only be declared for today (2024-06-10)"
        );

        let (status, _) = app
            .post(
                "/api/college-leave",
                Some(&token),
                json!({ "date": "2024-06-10", "reason": "ok" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let weekend = make_test_app_at(saturday()).await;
        let s = student(weekend.state.db(), "STU001", None, None).await;
        let (status, json) = weekend
            .post(
                "/api/college-leave",
                Some(&token_for(&s.user)),
                json!({ "date": "2024-06-15", "reason": "Fever" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "College leave is only available on working days (Monday to Friday)"
        );
    }

    #[tokio::test]
    async fn revoke_own_record_only() {
        let app = make_test_app().await;
        let db = app.state.db();
        let owner = student(db, "STU001", None, None).await;
        let other = student(db, "STU002", None, None).await;

        let (_, json) = app
            .post(
                "/api/college-leave",
                Some(&token_for(&owner.user)),
                json!({ "date": "2024-06-10", "reason": "Fever" }),
            )
            .await;
        let uri = format!("/api/college-leave/{}", json["data"]["id"]);

        let (status, _) = app.delete(&uri, Some(&token_for(&other.user))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.delete(&uri, Some(&token_for(&owner.user))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.delete(&uri, Some(&token_for(&owner.user))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn staff_listing_defaults_to_today() {
        let app = make_test_app().await;
        let db = app.state.db();
        let s = student(db, "STU001", None, None).await;
        let w = warden(db, "warden1").await;

        app.post(
            "/api/college-leave",
            Some(&token_for(&s.user)),
            json!({ "date": monday().to_string(), "reason": "Fever" }),
        )
        .await;

        let token = token_for(&w.user);
        let (status, json) = app.get("/api/college-leave", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["student_number"], "STU001");

        let (_, json) = app
            .get("/api/college-leave?date=2024-06-07", Some(&token))
            .await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = app
            .post(
                "/api/college-leave",
                Some(&token),
                json!({ "date": "2024-06-10", "reason": "Fever" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
