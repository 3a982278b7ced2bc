use crate::response::ApiError;
use crate::routes::common::optional_date;
use chrono::{DateTime, Utc};
use db::models::attendance_log::{self, LogType};
use serde::{Deserialize, Serialize};
use services::ledger::LogFilter;

#[derive(Debug, Deserialize)]
pub struct RfidLogRequest {
    #[serde(default)]
    pub rfid_tag: String,
    #[serde(default)]
    pub log_type: String,
}

#[derive(Debug, Serialize)]
pub struct RfidLogResponse {
    pub id: i64,
    pub student_id: i64,
    pub log_type: LogType,
    pub timestamp: DateTime<Utc>,
}

impl From<attendance_log::Model> for RfidLogResponse {
    fn from(event: attendance_log::Model) -> Self {
        Self {
            id: event.id,
            student_id: event.student_id,
            log_type: event.log_type,
            timestamp: event.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct LogListQuery {
    pub student_id: Option<i64>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<u64>,
}

impl LogListQuery {
    pub fn into_filter(self) -> Result<LogFilter, ApiError> {
        Ok(LogFilter {
            student_id: self.student_id,
            from_date: optional_date("from_date", self.from_date.as_deref())?,
            to_date: optional_date("to_date", self.to_date.as_deref())?,
            limit: self.limit,
        })
    }
}
