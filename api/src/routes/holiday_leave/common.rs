use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub from_date: String,
    #[serde(default)]
    pub to_date: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub student_id: Option<i64>,
}
