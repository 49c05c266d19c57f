use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::user::BaseUser;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login responses for patients, doctors and admins share this envelope. Only
/// the base user fields are needed to build a session, so the extra
/// role-specific fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: BaseUser,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientRegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_login_payload_decodes_into_base_user() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "bearer",
            "user": {
                "id": 3,
                "email": "admin@turnoplus.test",
                "password": "hashed",
                "is_active": true,
                "is_superuser": true,
                "role": "support",
                "permissions": []
            }
        }))
        .unwrap();

        assert_eq!(response.user.id, 3);
        assert_eq!(response.user.role, "support");
        assert_eq!(response.token_type, "bearer");
    }

    #[test]
    fn register_omits_empty_optionals() {
        let request = PatientRegisterRequest {
            email: "ana@turnoplus.test".into(),
            password: "secreto".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "ana@turnoplus.test", "password": "secreto" })
        );
    }
}
