use shared_models::{
    FormError, MedicalRecord, MedicalRecordCreateRequest, MedicalRecordUpdateRequest,
};
use shared_utils::forms::normalize_optional;

pub const MISSING_PATIENT: &str = "Indicá el paciente destinatario.";
pub const EMPTY_UPDATE: &str = "Ingresá al menos un dato para actualizar.";

/// New clinical note written from the doctor dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCreateForm {
    pub patient_id: i64,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
}

impl RecordCreateForm {
    pub fn to_request(&self, doctor_id: i64) -> Result<MedicalRecordCreateRequest, FormError> {
        if self.patient_id < 1 {
            return Err(FormError::new(MISSING_PATIENT));
        }
        Ok(MedicalRecordCreateRequest {
            patient_id: self.patient_id,
            doctor_id: Some(doctor_id),
            diagnosis: normalize_optional(Some(&self.diagnosis)),
            treatment: normalize_optional(Some(&self.treatment)),
            notes: normalize_optional(Some(&self.notes)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEditForm {
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
}

impl RecordEditForm {
    pub fn from_record(record: &MedicalRecord) -> Self {
        Self {
            diagnosis: record.diagnosis.clone().unwrap_or_default(),
            treatment: record.treatment.clone().unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> Result<MedicalRecordUpdateRequest, FormError> {
        let changes = self.changes();
        if changes.is_empty() {
            return Err(FormError::new(EMPTY_UPDATE));
        }
        Ok(changes)
    }

    /// Blank fields are sent as null.
    pub fn changes(&self) -> MedicalRecordUpdateRequest {
        MedicalRecordUpdateRequest {
            diagnosis: normalize_optional(Some(&self.diagnosis)),
            treatment: normalize_optional(Some(&self.treatment)),
            notes: normalize_optional(Some(&self.notes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn create_requires_patient() {
        let form = RecordCreateForm::default();
        assert_eq!(form.to_request(7).unwrap_err().message(), MISSING_PATIENT);
    }

    #[test]
    fn create_trims_optional_fields() {
        let form = RecordCreateForm {
            patient_id: 3,
            diagnosis: "  Gripe ".into(),
            treatment: "   ".into(),
            notes: String::new(),
        };
        let request = form.to_request(7).unwrap();
        assert_eq!(request.doctor_id, Some(7));
        assert_eq!(request.diagnosis.as_deref(), Some("Gripe"));
        assert!(request.treatment.is_none());
        assert!(request.notes.is_none());
    }

    #[test]
    fn edit_needs_one_field() {
        let mut form = RecordEditForm {
            diagnosis: " ".into(),
            ..Default::default()
        };
        assert_eq!(form.to_request().unwrap_err().message(), EMPTY_UPDATE);

        form.notes = "Control en 15 días".into();
        let request = form.to_request().unwrap();
        assert_eq!(request.notes.as_deref(), Some("Control en 15 días"));
        assert!(request.diagnosis.is_none());
    }

    #[test]
    fn edit_starts_from_record() {
        let record = MedicalRecord {
            id: 1,
            patient_id: 3,
            doctor_id: Some(7),
            diagnosis: Some("Gripe".into()),
            treatment: None,
            notes: Some("Reposo".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            doctor_name: None,
        };
        let form = RecordEditForm::from_record(&record);
        assert_eq!(form.diagnosis, "Gripe");
        assert_eq!(form.treatment, "");
        assert_eq!(form.notes, "Reposo");
    }
}
