use api::routes::routes;
use api::state::AppState;
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::sms::{DeliveryOutcome, SmsTransport};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use util::dates::FixedClock;

/// Monday 2024-06-10, a working day.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// Saturday 2024-06-15.
pub fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Records every message and fails the numbers listed in `reject`.
#[derive(Default)]
pub struct StubTransport {
    pub sent: Mutex<Vec<String>>,
    pub reject: Vec<String>,
}

#[async_trait]
impl SmsTransport for StubTransport {
    async fn send(&self, phone_number: &str, _message: &str) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(phone_number.to_owned());
        if self.reject.iter().any(|r| r == phone_number) {
            DeliveryOutcome::Failed {
                error: "Invalid 'To' Phone Number".into(),
            }
        } else {
            DeliveryOutcome::Delivered {
                reference: Some(format!("SM-{phone_number}")),
            }
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub transport: Arc<StubTransport>,
}

impl TestApp {
    /// Sends one request and returns the status and parsed JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }
}

/// App over a fresh in-memory database with the clock frozen at noon UTC on `date`.
pub async fn make_test_app_at(date: NaiveDate) -> TestApp {
    let db = setup_test_db().await;
    let transport = Arc::new(StubTransport::default());
    let state = AppState::new(db, Arc::new(FixedClock::on(date, Tz::UTC)), transport.clone());
    let router = Router::new().nest("/api", routes(state.clone()));

    TestApp {
        router,
        state,
        transport,
    }
}

pub async fn make_test_app() -> TestApp {
    make_test_app_at(monday()).await
}
