use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire_time;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    #[serde(alias = "cancelled")]
    Canceled,
    Completed,
}

impl AppointmentStatus {
    /// Label shown to patients and doctors.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Confirmed => "Confirmado",
            AppointmentStatus::Canceled => "Cancelado",
            AppointmentStatus::Completed => "Completado",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, AppointmentStatus::Canceled | AppointmentStatus::Completed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    #[serde(rename = "startAt", alias = "start_at", with = "wire_time")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endAt", alias = "end_at", with = "wire_time")]
    pub end_at: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentCreateRequest {
    pub doctor_id: i64,
    pub patient_id: i64,
    #[serde(with = "wire_time")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "wire_time")]
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentBlock {
    pub id: i64,
    #[serde(rename = "availabilityId", alias = "availability_id")]
    pub availability_id: i64,
    #[serde(rename = "blockNumber", alias = "block_number")]
    pub block_number: u32,
    #[serde(rename = "startAt", alias = "start_at", with = "wire_time")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endAt", alias = "end_at", with = "wire_time")]
    pub end_at: DateTime<Utc>,
    #[serde(rename = "isBooked", alias = "is_booked", default)]
    pub is_booked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    pub id: i64,
    pub doctor_id: i64,
    #[serde(rename = "startAt", alias = "start_at", with = "wire_time")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endAt", alias = "end_at", with = "wire_time")]
    pub end_at: DateTime<Utc>,
    #[serde(default = "default_slots")]
    pub slots: u8,
    #[serde(default)]
    pub blocks: Vec<AppointmentBlock>,
}

impl Availability {
    pub fn total_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn booked_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_booked).count()
    }

    pub fn free_blocks(&self) -> usize {
        self.total_blocks() - self.booked_blocks()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityCreateRequest {
    pub doctor_id: i64,
    #[serde(with = "wire_time")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "wire_time")]
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityUpdateRequest {
    #[serde(
        with = "wire_time::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(
        with = "wire_time::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<u8>,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Pending
}

fn default_slots() -> u8 {
    1
}

/// Orders appointments by start time, earliest first.
pub fn sort_by_start(items: &mut [Appointment]) {
    items.sort_by_key(|item| item.start_at);
}

/// Orders availability windows by start time, earliest first.
pub fn sort_availability_by_start(items: &mut [Availability]) {
    items.sort_by_key(|item| item.start_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn availability_accepts_mixed_casing() {
        let availability: Availability = serde_json::from_value(json!({
            "id": 4,
            "doctor_id": 2,
            "startAt": "2025-10-20T09:00:00",
            "endAt": "2025-10-20T11:00:00",
            "blocks": [
                {
                    "id": 10,
                    "availability_id": 4,
                    "block_number": 1,
                    "startAt": "2025-10-20T09:00:00",
                    "endAt": "2025-10-20T10:00:00",
                    "isBooked": true
                },
                {
                    "id": 11,
                    "availabilityId": 4,
                    "blockNumber": 2,
                    "startAt": "2025-10-20T10:00:00",
                    "endAt": "2025-10-20T11:00:00",
                    "isBooked": false
                }
            ]
        }))
        .unwrap();

        assert_eq!(availability.slots, 1);
        assert_eq!(availability.total_blocks(), 2);
        assert_eq!(availability.booked_blocks(), 1);
        assert_eq!(availability.free_blocks(), 1);
        assert_eq!(
            availability.start_at,
            Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn create_request_uses_snake_case() {
        let request = AppointmentCreateRequest {
            doctor_id: 2,
            patient_id: 5,
            start_at: Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2025, 10, 20, 10, 0, 0).unwrap(),
            notes: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "doctor_id": 2,
                "patient_id": 5,
                "start_at": "2025-10-20T09:00:00Z",
                "end_at": "2025-10-20T10:00:00Z"
            })
        );
    }

    #[test]
    fn slot_only_update_serializes_alone() {
        let update = AvailabilityUpdateRequest {
            slots: Some(3),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "slots": 3 }));
    }

    #[test]
    fn final_statuses() {
        assert!(AppointmentStatus::Canceled.is_final());
        assert!(AppointmentStatus::Completed.is_final());
        assert!(!AppointmentStatus::Pending.is_final());
        assert_eq!(AppointmentStatus::Confirmed.label(), "Confirmado");
    }
}
