#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, student, token_for, warden};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::holiday_leave;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::json;

    #[tokio::test]
    async fn inverted_range_is_rejected_before_any_write() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", None, None).await;

        let (status, json) = app
            .post(
                "/api/holiday-leave",
                Some(&token_for(&s.user)),
                json!({ "from_date": "2024-06-10", "to_date": "2024-06-08", "reason": "Trip home" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "To date (2024-06-08) must be on or after from date (2024-06-10)"
        );
        assert_eq!(
            holiday_leave::Entity::find().count(app.state.db()).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn review_once_then_conflict() {
        let app = make_test_app().await;
        let db = app.state.db();
        let s = student(db, "STU001", None, None).await;
        let w = warden(db, "warden1").await;
        let admin = admin(db).await;

        let (status, json) = app
            .post(
                "/api/holiday-leave",
                Some(&token_for(&s.user)),
                json!({ "from_date": "2024-06-15", "to_date": "2024-06-17", "reason": "Family function" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "pending");
        let uri = format!("/api/holiday-leave/{}", json["data"]["id"]);

        let (status, json) = app
            .put(
                &uri,
                Some(&token_for(&w.user)),
                json!({ "status": "approved", "remarks": "Enjoy" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "approved");
        assert_eq!(json["data"]["approved_by"], w.user.id);

        let (status, _) = app
            .put(&uri, Some(&token_for(&admin)), json!({ "status": "rejected" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = app
            .get("/api/holiday-leave?status=approved", Some(&token_for(&admin)))
            .await;
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["approved_by_username"], "warden1");
        assert_eq!(rows[0]["remarks"], "Enjoy");
    }

    #[tokio::test]
    async fn review_rejects_bad_status_and_missing_application() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;
        let token = token_for(&admin);

        let (status, _) = app
            .put("/api/holiday-leave/99", Some(&token), json!({ "status": "approved" }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .put("/api/holiday-leave/99", Some(&token), json!({ "status": "pending" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .get("/api/holiday-leave?status=maybe", Some(&token))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = app
            .put("/api/holiday-leave/abc", Some(&token), json!({ "status": "approved" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid path parameter")
        );
    }

    #[tokio::test]
    async fn cancel_pending_then_not_found() {
        let app = make_test_app().await;
        let s = student(app.state.db(), "STU001", None, None).await;
        let token = token_for(&s.user);

        let (_, json) = app
            .post(
                "/api/holiday-leave",
                Some(&token),
                json!({ "from_date": "2024-06-15", "to_date": "2024-06-15", "reason": "Wedding" }),
            )
            .await;
        let uri = format!("/api/holiday-leave/{}", json["data"]["id"]);

        let (status, _) = app.delete(&uri, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.delete(&uri, Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = app.get("/api/holiday-leave/my-applications", Some(&token)).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reviewed_application_cannot_be_cancelled() {
        let app = make_test_app().await;
        let db = app.state.db();
        let s = student(db, "STU001", None, None).await;
        let admin = admin(db).await;
        let token = token_for(&s.user);

        let (_, json) = app
            .post(
                "/api/holiday-leave",
                Some(&token),
                json!({ "from_date": "2024-06-15", "to_date": "2024-06-16", "reason": "Wedding" }),
            )
            .await;
        let uri = format!("/api/holiday-leave/{}", json["data"]["id"]);
        app.put(&uri, Some(&token_for(&admin)), json!({ "status": "rejected" }))
            .await;

        let (status, json) = app.delete(&uri, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Only pending applications can be cancelled");
    }
}
