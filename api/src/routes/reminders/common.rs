use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use services::reminder::ReminderSettingsView;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub reminder_time: String,
    /// Defaults to `true` when omitted.
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ReminderStatus {
    #[serde(flatten)]
    pub settings: ReminderSettingsView,
    /// Next scheduled dispatch; `null` while the schedule is inactive.
    pub next_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LogListQuery {
    pub student_id: Option<i64>,
    pub limit: Option<u64>,
}
