use tracing::warn;

use records_cell::MedicalRecordsService;
use shared_models::{MedicalRecord, MedicalRecordCreateRequest, Patient};

use crate::records::RecordEditForm;

pub const HISTORY_FAILED: &str = "No pudimos cargar el historial del paciente.";
pub const MODAL_CREATE_FAILED: &str = "No pudimos crear el registro. Reintentá más tarde.";

/// Case-insensitive search over name, id and medical record number. A blank
/// query keeps every patient.
pub fn filter_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return patients.iter().collect();
    }

    patients
        .iter()
        .filter(|patient| {
            let name_matches = patient
                .user
                .full_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&query));
            let mrn_matches = patient
                .medical_record_number
                .as_deref()
                .is_some_and(|mrn| mrn.to_lowercase().contains(&query));
            name_matches || patient.user.id.to_string().contains(&query) || mrn_matches
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalTab {
    #[default]
    History,
    New,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalCloseEvent {
    Close,
    RecordCreated(MedicalRecord),
}

/// History and quick note entry for one patient, opened from the patient list.
pub struct PatientMedicalModal {
    records: MedicalRecordsService,
    pub patient_id: i64,
    pub patient_name: String,
    pub doctor_id: i64,
    pub active_tab: ModalTab,
    pub history: Vec<MedicalRecord>,
    pub loading_history: bool,
    pub saving_record: bool,
    pub history_error: Option<String>,
    pub save_error: Option<String>,
    pub form: RecordEditForm,
}

impl PatientMedicalModal {
    pub fn new(records: MedicalRecordsService, patient: &Patient, doctor_id: i64) -> Self {
        Self {
            records,
            patient_id: patient.user.id,
            patient_name: patient.user.display_name().to_string(),
            doctor_id,
            active_tab: ModalTab::default(),
            history: Vec::new(),
            loading_history: false,
            saving_record: false,
            history_error: None,
            save_error: None,
            form: RecordEditForm::default(),
        }
    }

    /// Builds the modal and loads the history right away.
    pub async fn open(records: MedicalRecordsService, patient: &Patient, doctor_id: i64) -> Self {
        let mut modal = Self::new(records, patient, doctor_id);
        modal.load_history().await;
        modal
    }

    pub fn change_tab(&mut self, tab: ModalTab) {
        self.active_tab = tab;
        self.save_error = None;
    }

    pub fn close(&self) -> ModalCloseEvent {
        ModalCloseEvent::Close
    }

    pub async fn load_history(&mut self) {
        self.loading_history = true;
        self.history_error = None;

        match self.records.patient_history(self.patient_id).await {
            Ok(history) => {
                self.history = history;
                self.loading_history = false;
            }
            Err(e) => {
                warn!("History for patient {} failed: {}", self.patient_id, e);
                self.loading_history = false;
                self.history_error = Some(HISTORY_FAILED.to_string());
            }
        }
    }

    /// Empty notes are allowed here; every blank field is sent as null.
    pub async fn submit_new_record(&mut self) -> Option<ModalCloseEvent> {
        if self.saving_record {
            return None;
        }
        self.saving_record = true;
        self.save_error = None;

        let changes = self.form.changes();
        let request = MedicalRecordCreateRequest {
            patient_id: self.patient_id,
            doctor_id: Some(self.doctor_id),
            diagnosis: changes.diagnosis,
            treatment: changes.treatment,
            notes: changes.notes,
        };

        match self.records.create(&request).await {
            Ok(record) => {
                self.saving_record = false;
                self.form = RecordEditForm::default();
                self.load_history().await;
                Some(ModalCloseEvent::RecordCreated(record))
            }
            Err(e) => {
                warn!("Record for patient {} failed: {}", self.patient_id, e);
                self.saving_record = false;
                self.save_error = Some(MODAL_CREATE_FAILED.to_string());
                None
            }
        }
    }
}
