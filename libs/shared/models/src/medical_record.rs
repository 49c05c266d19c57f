use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire_time;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "wire_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "wire_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecordCreateRequest {
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecordUpdateRequest {
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

impl MedicalRecordUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_none() && self.treatment.is_none() && self.notes.is_none()
    }
}

/// Most recently updated first.
pub fn sort_by_updated_desc(records: &mut [MedicalRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
