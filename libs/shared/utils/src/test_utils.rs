use serde_json::{json, Value};

/// JSON payloads shaped like the TurnoPlus API responses, for mock servers.
pub struct MockApiResponses;

impl MockApiResponses {
    pub fn patient(id: i64, email: &str, full_name: Option<&str>) -> Value {
        json!({
            "id": id,
            "email": email,
            "password": "hashed",
            "full_name": full_name,
            "is_active": true,
            "is_superuser": false,
            "role": "patient",
            "date_of_birth": "1990-05-17",
            "medical_record_number": format!("HC-{:04}", id),
            "emergency_contact": "María (hermana) 11-5555-0000"
        })
    }

    pub fn doctor(id: i64, email: &str, full_name: Option<&str>, office_id: Option<i64>) -> Value {
        json!({
            "id": id,
            "email": email,
            "password": "hashed",
            "full_name": full_name,
            "is_active": true,
            "is_superuser": false,
            "role": "doctor",
            "specialty": "Clínica médica",
            "license_number": format!("MN-{}", 1000 + id),
            "years_experience": 8,
            "office_id": office_id
        })
    }

    pub fn user(id: i64, email: &str, full_name: Option<&str>, role: &str) -> Value {
        json!({
            "id": id,
            "email": email,
            "password": "hashed",
            "full_name": full_name,
            "is_active": true,
            "is_superuser": role == "admin",
            "role": role
        })
    }

    pub fn admin(id: i64, email: &str) -> Value {
        json!({
            "id": id,
            "email": email,
            "password": "hashed",
            "full_name": "Admin TurnoPlus",
            "is_active": true,
            "is_superuser": true,
            "role": "superadmin",
            "permissions": ["users:write", "settings:write"]
        })
    }

    pub fn login(access_token: &str, user: Value) -> Value {
        json!({
            "access_token": access_token,
            "token_type": "bearer",
            "user": user
        })
    }

    pub fn appointment(id: i64, doctor_id: i64, patient_id: i64, start_at: &str, end_at: &str, status: &str) -> Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "patient_id": patient_id,
            "startAt": start_at,
            "endAt": end_at,
            "status": status,
            "notes": null
        })
    }

    pub fn block(id: i64, availability_id: i64, number: u32, start_at: &str, end_at: &str, is_booked: bool) -> Value {
        json!({
            "id": id,
            "availability_id": availability_id,
            "block_number": number,
            "startAt": start_at,
            "endAt": end_at,
            "isBooked": is_booked
        })
    }

    pub fn availability(id: i64, doctor_id: i64, start_at: &str, end_at: &str, blocks: Vec<Value>) -> Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "startAt": start_at,
            "endAt": end_at,
            "blocks": blocks
        })
    }

    pub fn medical_record(id: i64, patient_id: i64, doctor_id: Option<i64>, diagnosis: Option<&str>, updated_at: &str) -> Value {
        json!({
            "id": id,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "diagnosis": diagnosis,
            "treatment": null,
            "notes": null,
            "created_at": "2025-01-10T12:00:00",
            "updated_at": updated_at,
            "doctor_name": null
        })
    }

    pub fn office(id: i64, code: &str, name: Option<&str>) -> Value {
        json!({
            "id": id,
            "code": code,
            "name": name,
            "address": "Av. Corrientes 1234"
        })
    }

    pub fn block_duration_setting(minutes: u32) -> Value {
        json!({
            "id": 1,
            "setting_key": "appointment_block_duration_minutes",
            "setting_value": minutes.to_string(),
            "description": "Duration of each appointment block in minutes"
        })
    }
}
