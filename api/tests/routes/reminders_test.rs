#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, student, token_for};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn defaults_until_saved() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;

        let (status, json) = app.get("/api/reminders", Some(&token_for(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["reminder_time"], "20:00:00");
        assert_eq!(json["data"]["is_active"], false);
        assert!(json["data"]["next_run"].is_null());
    }

    #[tokio::test]
    async fn saving_arms_the_schedule() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;
        let token = token_for(&admin);

        let (status, json) = app
            .put(
                "/api/reminders",
                Some(&token),
                json!({ "reminder_time": "20:00", "is_active": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["reminder_time"], "20:00:00");
        assert_eq!(json["data"]["next_run"], "2024-06-10T20:00:00Z");

        let (status, _) = app
            .put("/api/reminders", Some(&token), json!({ "reminder_time": "8pm" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = app
            .put(
                "/api/reminders",
                Some(&token),
                json!({ "reminder_time": "20:00:00", "is_active": false }),
            )
            .await;
        assert!(json["data"]["next_run"].is_null());
        app.state.scheduler().shutdown().await;
    }

    #[tokio::test]
    async fn send_now_logs_one_row_per_reachable_student() {
        let app = make_test_app().await;
        let db = app.state.db();
        let admin = admin(db).await;
        student(db, "STU001", None, Some("+919900000010")).await;
        student(db, "STU002", None, Some("+919900000011")).await;
        student(db, "STU003", None, None).await;
        let token = token_for(&admin);

        let (status, json) = app.post("/api/reminders/test", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["attempted"], 2);
        assert_eq!(json["data"]["sent"], 2);
        assert_eq!(app.transport.sent.lock().unwrap().len(), 2);

        let (status, json) = app.get("/api/reminders/logs", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        let logs = json["data"].as_array().unwrap();
        assert_eq!(logs.len(), 2);
        for log in logs {
            assert_eq!(log["status"], "sent");
            assert_eq!(log["simulated"], false);
        }

        let (_, json) = app.get("/api/reminders/logs?limit=1", Some(&token)).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn students_cannot_manage_reminders() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", None, Some("+919900000010")).await;
        let token = token_for(&s.user);

        let (status, _) = app.get("/api/reminders", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.post("/api/reminders/test", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(app.transport.sent.lock().unwrap().is_empty());
    }
}
