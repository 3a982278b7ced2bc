#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, student, token_for};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn login_returns_token_usable_for_me() {
        let app = make_test_app().await;
        student(app.state.db(), "STU001", None, None).await;

        let (status, json) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "username": "stu001", "password": "student123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["user"]["role"], "student");
        assert!(json["data"]["user"].get("password_hash").is_none());

        let token = json["data"]["token"].as_str().unwrap().to_owned();
        let (status, me) = app.get("/api/auth/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["username"], "stu001");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = make_test_app().await;
        admin(app.state.db()).await;

        let (status, json) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "username": "admin", "password": "nope" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn blank_login_fields_are_rejected() {
        let app = make_test_app().await;

        let (status, _) = app
            .post("/api/auth/login", None, json!({ "username": "", "password": "" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn me_requires_a_valid_token() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;

        let (status, _) = app.get("/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get("/api/auth/me", Some("not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get("/api/auth/me", Some(&token_for(&admin))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
