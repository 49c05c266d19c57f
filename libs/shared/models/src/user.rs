use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role of a client session. Patients log in as `user`; guards accept `user`
/// wherever `patient` is allowed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Patient => "patient",
            UserRole::Doctor => "doctor",
            UserRole::Admin => "admin",
        }
    }

    pub fn is_patient_like(&self) -> bool {
        matches!(self, UserRole::User | UserRole::Patient)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Role that can be managed from the admin console.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManagedRole {
    Patient,
    Doctor,
    Admin,
}

impl ManagedRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagedRole::Patient => "patient",
            ManagedRole::Doctor => "doctor",
            ManagedRole::Admin => "admin",
        }
    }

    pub fn from_wire(role: &str) -> Option<Self> {
        match role {
            "patient" | "user" => Some(ManagedRole::Patient),
            "doctor" => Some(ManagedRole::Doctor),
            "admin" | "superadmin" | "manager" | "support" => Some(ManagedRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for ManagedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Manager,
    Support,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Raw role as reported by the API. Admin payloads carry their grade here.
    #[serde(default)]
    pub role: String,
}

impl BaseUser {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    #[serde(flatten)]
    pub user: BaseUser,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub medical_record_number: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    #[serde(flatten)]
    pub user: BaseUser,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i32>,
    #[serde(default)]
    pub office_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    #[serde(flatten)]
    pub user: BaseUser,
    #[serde(default)]
    pub admin_role: Option<AdminRole>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Admin {
    /// The API reports the admin grade in `role`; `admin_role` wins when set.
    pub fn grade(&self) -> Option<AdminRole> {
        self.admin_role.or_else(|| match self.user.role.as_str() {
            "superadmin" => Some(AdminRole::Superadmin),
            "manager" => Some(AdminRole::Manager),
            "support" => Some(AdminRole::Support),
            _ => None,
        })
    }
}

/// Any account shown in the admin user list.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    User(BaseUser),
    Doctor(Doctor),
    Patient(Patient),
}

impl Account {
    pub fn base(&self) -> &BaseUser {
        match self {
            Account::User(user) => user,
            Account::Doctor(doctor) => &doctor.user,
            Account::Patient(patient) => &patient.user,
        }
    }

    pub fn id(&self) -> i64 {
        self.base().id
    }

    pub fn managed_role(&self) -> Option<ManagedRole> {
        match self {
            Account::Doctor(_) => Some(ManagedRole::Doctor),
            Account::Patient(_) => Some(ManagedRole::Patient),
            Account::User(user) => ManagedRole::from_wire(&user.role),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    pub role: UserRole,
    #[serde(skip)]
    pub token: String,
    #[serde(rename = "tokenType", default = "default_token_type")]
    pub token_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientCreateRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorCreateRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    pub years_experience: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_id: Option<i64>,
}

/// `office_id` is tri-state: absent leaves it untouched, `Some(None)` sends an
/// explicit `null` to unassign the office.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DoctorUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCreateRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ManagedRole>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ManagedRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminCreateRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(rename = "role")]
    pub admin_role: AdminRole,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "role", skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<AdminRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doctor_flattens_base_fields() {
        let doctor: Doctor = serde_json::from_value(json!({
            "id": 7,
            "email": "house@turnoplus.test",
            "full_name": "Gregory House",
            "is_active": true,
            "is_superuser": false,
            "role": "doctor",
            "specialty": "Diagnóstico",
            "years_experience": 20,
            "office_id": null
        }))
        .unwrap();

        assert_eq!(doctor.user.id, 7);
        assert_eq!(doctor.user.display_name(), "Gregory House");
        assert_eq!(doctor.office_id, None);
        assert_eq!(doctor.years_experience, Some(20));
    }

    #[test]
    fn admin_grade_comes_from_role_field() {
        let admin: Admin = serde_json::from_value(json!({
            "id": 1,
            "email": "root@turnoplus.test",
            "is_active": true,
            "is_superuser": true,
            "role": "superadmin",
            "permissions": ["users:write"]
        }))
        .unwrap();

        assert_eq!(admin.grade(), Some(AdminRole::Superadmin));
    }

    #[test]
    fn unassigning_an_office_sends_null() {
        let update = DoctorUpdateRequest {
            office_id: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "office_id": null }));

        let untouched = DoctorUpdateRequest::default();
        assert_eq!(serde_json::to_value(&untouched).unwrap(), json!({}));
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("Doctor".parse::<UserRole>().unwrap(), UserRole::Doctor);
        assert!("staff".parse::<UserRole>().is_err());
        assert!(UserRole::User.is_patient_like());
        assert_eq!(ManagedRole::from_wire("support"), Some(ManagedRole::Admin));
    }
}
