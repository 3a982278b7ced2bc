//! SMS transports for attendance reminders.
//!
//! When no provider credentials are configured the [`SimulatedTransport`] is used; its
//! sends are reported as [`DeliveryOutcome::Simulated`] so they can never be mistaken
//! for a real delivery.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use util::config;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Accepted by the provider.
    Delivered { reference: Option<String> },
    /// Logged only; no provider was contacted.
    Simulated,
    Failed { error: String },
}

#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send(&self, phone_number: &str, message: &str) -> DeliveryOutcome;

    fn name(&self) -> &'static str;
}

/// Demo-mode transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedTransport;

#[async_trait]
impl SmsTransport for SimulatedTransport {
    async fn send(&self, phone_number: &str, message: &str) -> DeliveryOutcome {
        info!(to = phone_number, body = message, "[SIMULATED] SMS not sent, no credentials configured");
        DeliveryOutcome::Simulated
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Twilio Programmable Messaging over its REST API.
#[derive(Debug, Clone)]
pub struct TwilioTransport {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioError {
    message: Option<String>,
}

impl TwilioTransport {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self::with_base_url(TWILIO_API_BASE, account_sid, auth_token, from_number)
    }

    pub fn with_base_url(
        base_url: &str,
        account_sid: String,
        auth_token: String,
        from_number: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            account_sid,
            auth_token,
            from_number,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl SmsTransport for TwilioTransport {
    async fn send(&self, phone_number: &str, message: &str) -> DeliveryOutcome {
        let form = [
            ("To", phone_number),
            ("From", self.from_number.as_str()),
            ("Body", message),
        ];

        let response = match self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(to = phone_number, error = %e, "SMS request failed");
                return DeliveryOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            let reference = response
                .json::<TwilioMessage>()
                .await
                .ok()
                .and_then(|m| m.sid);
            return DeliveryOutcome::Delivered { reference };
        }

        let detail = response
            .json::<TwilioError>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.to_string());
        warn!(to = phone_number, %status, detail = %detail, "SMS provider rejected message");
        DeliveryOutcome::Failed { error: detail }
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}

/// Picks Twilio when all three credentials are present, the simulator otherwise.
pub fn transport_from_config() -> Arc<dyn SmsTransport> {
    let sid = config::twilio_account_sid();
    let token = config::twilio_auth_token();
    let from = config::twilio_phone_number();

    if [&sid, &token, &from].iter().any(|v| v.trim().is_empty()) {
        warn!("Twilio credentials not configured; reminders will be simulated");
        return Arc::new(SimulatedTransport);
    }

    info!("SMS transport: twilio");
    Arc::new(TwilioTransport::new(sid, token, from))
}
