#[cfg(test)]
mod tests {
    use crate::helpers::fixtures::{admin, token_for, warden};
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn admin_manages_wardens() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;
        let token = token_for(&admin);

        let (status, json) = app
            .post(
                "/api/wardens",
                Some(&token),
                json!({
                    "username": "warden2",
                    "email": "warden2@hostel.com",
                    "password": "secret123",
                    "first_name": "Meena",
                    "last_name": "Iyer"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["data"]["warden"]["id"].as_i64().unwrap();

        let (status, json) = app
            .put(
                &format!("/api/wardens/{id}"),
                Some(&token),
                json!({ "phone_number": "+919900000002" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["phone_number"], "+919900000002");

        let (_, json) = app.get("/api/wardens", Some(&token)).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = app.delete(&format!("/api/wardens/{id}"), Some(&token)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = app.get("/api/wardens", Some(&token)).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn warden_sees_own_profile_but_not_the_list() {
        let app = make_test_app().await;
        let w = warden(app.state.db(), "warden1").await;
        let token = token_for(&w.user);

        let (status, json) = app.get("/api/wardens/me/profile", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["first_name"], "Raj");

        let (status, _) = app.get("/api/wardens", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let app = make_test_app().await;
        let admin = admin(app.state.db()).await;

        let (status, json) = app
            .post(
                "/api/wardens",
                Some(&token_for(&admin)),
                json!({
                    "username": "admin",
                    "email": "other@hostel.com",
                    "password": "secret123",
                    "first_name": "A",
                    "last_name": "B"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Username already exists");
    }
}
