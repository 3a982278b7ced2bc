use crate::response::ApiError;
use chrono::NaiveDate;
use db::models::student::{self, NewStudent, StudentChanges};
use serde::{Deserialize, Serialize};
use services::accounts::Credentials;

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "student_id")]
    pub student_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub room_number: Option<String>,
    pub rfid_tag: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub room_number: Option<String>,
    pub rfid_tag: Option<String>,
    pub blood_group: Option<String>,
    pub medical_conditions: Option<String>,
}

/// A student profile with its login details.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: student::Model,
    pub username: Option<String>,
    pub email: Option<String>,
}

fn date_of_birth(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    crate::routes::common::optional_date("date_of_birth", raw)
}

impl CreateStudentRequest {
    pub fn into_parts(self) -> Result<(Credentials, NewStudent), ApiError> {
        let date_of_birth = date_of_birth(self.date_of_birth.as_deref())?;
        Ok((
            Credentials {
                username: self.username.trim().to_owned(),
                email: self.email.trim().to_owned(),
                password: self.password,
            },
            NewStudent {
                student_number: self.student_number.trim().to_owned(),
                first_name: self.first_name.trim().to_owned(),
                last_name: self.last_name.trim().to_owned(),
                date_of_birth,
                phone_number: self.phone_number,
                emergency_contact: self.emergency_contact,
                parent_name: self.parent_name,
                parent_phone: self.parent_phone,
                address: self.address,
                room_number: self.room_number,
                rfid_tag: self.rfid_tag,
                blood_group: self.blood_group,
                medical_conditions: self.medical_conditions,
            },
        ))
    }
}

impl UpdateStudentRequest {
    pub fn into_changes(self) -> Result<StudentChanges, ApiError> {
        // Blank names leave the stored name untouched.
        let name = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());

        Ok(StudentChanges {
            first_name: name(self.first_name),
            last_name: name(self.last_name),
            date_of_birth: date_of_birth(self.date_of_birth.as_deref())?,
            phone_number: self.phone_number,
            emergency_contact: self.emergency_contact,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            address: self.address,
            room_number: self.room_number,
            rfid_tag: self.rfid_tag,
            blood_group: self.blood_group,
            medical_conditions: self.medical_conditions,
        })
    }
}
