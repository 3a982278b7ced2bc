use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeclareRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecordListQuery {
    pub date: Option<String>,
    pub student_id: Option<i64>,
}
