use shared_models::{Appointment, FormError, Patient, PatientUpdateRequest};
use shared_utils::forms::{is_blank, is_valid_email};
use shared_utils::tabs::TabConfig;

pub const EMAIL_REQUIRED: &str = "El email es obligatorio.";
pub const EMAIL_INVALID: &str = "Ingresá un email válido.";

pub const PATIENT_TABS: [TabConfig; 4] = [
    TabConfig::new("profile", "Mi Perfil", "person"),
    TabConfig::new("appointments", "Mis Turnos", "event"),
    TabConfig::new("booking", "Reservar Turno", "add_circle"),
    TabConfig::new("records", "Historial Médico", "medical_services"),
];

/// Editable copy of the patient's own profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub medical_record_number: String,
    pub emergency_contact: String,
}

impl ProfileForm {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            full_name: patient.user.full_name.clone().unwrap_or_default(),
            email: patient.user.email.clone(),
            medical_record_number: patient.medical_record_number.clone().unwrap_or_default(),
            emergency_contact: patient.emergency_contact.clone().unwrap_or_default(),
        }
    }

    /// Every field is sent as typed, so clearing a field clears it remotely.
    pub fn validate(&self) -> Result<PatientUpdateRequest, FormError> {
        if is_blank(&self.email) {
            return Err(FormError::new(EMAIL_REQUIRED));
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::new(EMAIL_INVALID));
        }

        Ok(PatientUpdateRequest {
            full_name: Some(self.full_name.clone()),
            email: Some(self.email.trim().to_string()),
            medical_record_number: Some(self.medical_record_number.clone()),
            emergency_contact: Some(self.emergency_contact.clone()),
            ..Default::default()
        })
    }
}

/// Cancel and confirm are off for finished appointments and for the one
/// currently being updated.
pub fn is_action_disabled(appointment: &Appointment, action_id: Option<i64>) -> bool {
    appointment.status.is_final() || action_id == Some(appointment.id)
}
