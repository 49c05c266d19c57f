use tracing::warn;

use appointment_cell::planning::clamp_slots;
use appointment_cell::{AppointmentsService, AvailabilityDraft, AvailabilityPlanner};
use records_cell::MedicalRecordsService;
use shared_api::ApiClient;
use shared_models::{
    sort_availability_by_start, sort_by_start, sort_by_updated_desc, Appointment,
    AuthenticatedUser, Availability, AvailabilityUpdateRequest, MedicalRecord, Patient, UserRole,
};

use crate::models::SectionState;
use crate::patients::PatientMedicalModal;
use crate::records::{RecordCreateForm, RecordEditForm};
use crate::services::DoctorService;

pub const INVALID_SESSION: &str = "No pudimos validar tu sesión de profesional.";
pub const RESTART_SESSION: &str = "Reiniciá tu sesión para continuar.";

pub const APPOINTMENTS_LOAD_FAILED: &str = "No pudimos obtener tus turnos programados.";
pub const AVAILABILITY_LOAD_FAILED: &str = "No pudimos cargar tu agenda disponible.";
pub const RECORDS_LOAD_FAILED: &str = "No pudimos obtener tus registros clínicos.";
pub const PATIENTS_LOAD_FAILED: &str = "No pudimos obtener tus pacientes.";

pub const AVAILABILITY_CREATED: &str = "Disponibilidad agregada correctamente.";
pub const AVAILABILITY_CREATE_FAILED: &str =
    "No pudimos agregar la disponibilidad. Reintentá más tarde.";
pub const AVAILABILITY_UPDATED: &str = "Actualizamos tu disponibilidad.";
pub const AVAILABILITY_UPDATE_FAILED: &str = "No pudimos actualizar la disponibilidad.";

pub const RECORD_CREATED: &str = "Registro creado con éxito.";
pub const RECORD_CREATE_FAILED: &str =
    "No pudimos crear el registro. Revisá los datos e intentá nuevamente.";
pub const RECORD_UPDATED: &str = "Registro actualizado correctamente.";
pub const RECORD_UPDATE_FAILED: &str = "No pudimos actualizar el registro.";

/// Doctor dashboard: schedule, availability windows and clinical records.
pub struct DoctorShell {
    appointments_service: AppointmentsService,
    records_service: MedicalRecordsService,
    doctors: DoctorService,
    doctor_id: Option<i64>,
    greeting: Option<String>,
    planner: AvailabilityPlanner,

    pub appointments: SectionState<Appointment>,
    pub availability: SectionState<Availability>,
    pub records: SectionState<MedicalRecord>,
    pub patients: SectionState<Patient>,

    pub is_creating_availability: bool,
    pub availability_mutation_id: Option<i64>,
    pub is_saving_record: bool,
    pub record_mutation_id: Option<i64>,
}

impl DoctorShell {
    /// Only doctor sessions get a usable shell. Anything else leaves every
    /// section showing the invalid session message.
    pub fn new(api: ApiClient, user: Option<&AuthenticatedUser>) -> Self {
        let mut shell = Self {
            appointments_service: AppointmentsService::new(api.clone()),
            records_service: MedicalRecordsService::new(api.clone()),
            doctors: DoctorService::new(api),
            doctor_id: None,
            greeting: None,
            planner: AvailabilityPlanner::default(),
            appointments: SectionState::default(),
            availability: SectionState::default(),
            records: SectionState::default(),
            patients: SectionState::default(),
            is_creating_availability: false,
            availability_mutation_id: None,
            is_saving_record: false,
            record_mutation_id: None,
        };

        match user.filter(|user| user.role == UserRole::Doctor) {
            Some(user) => {
                shell.doctor_id = Some(user.id);
                shell.greeting = Some(
                    user.full_name
                        .clone()
                        .unwrap_or_else(|| format!("Profesional #{}", user.id)),
                );
            }
            None => {
                shell.appointments.error = Some(INVALID_SESSION.to_string());
                shell.availability.error = Some(INVALID_SESSION.to_string());
                shell.records.error = Some(INVALID_SESSION.to_string());
            }
        }
        shell
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.doctor_id
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn planner(&self) -> AvailabilityPlanner {
        self.planner
    }

    /// Initial load of the three dashboard sections.
    pub async fn load(&mut self) {
        if self.doctor_id.is_none() {
            return;
        }
        self.load_appointments().await;
        self.load_availability().await;
        self.load_records().await;
    }

    fn ensure_doctor_session(&mut self) -> Option<i64> {
        if self.doctor_id.is_none() {
            self.appointments.error = Some(RESTART_SESSION.to_string());
            self.availability.error = Some(RESTART_SESSION.to_string());
            self.records.error = Some(RESTART_SESSION.to_string());
        }
        self.doctor_id
    }

    pub async fn load_appointments(&mut self) {
        let Some(doctor_id) = self.ensure_doctor_session() else {
            return;
        };
        self.appointments.start_loading();

        match self.appointments_service.list_for_doctor(doctor_id).await {
            Ok(mut items) => {
                sort_by_start(&mut items);
                self.appointments.loaded(items);
            }
            Err(e) => {
                warn!("Appointments for doctor {} failed: {}", doctor_id, e);
                self.appointments.failed(APPOINTMENTS_LOAD_FAILED);
            }
        }
    }

    /// Also refreshes the block length used to check new windows locally.
    pub async fn load_availability(&mut self) {
        let Some(doctor_id) = self.ensure_doctor_session() else {
            return;
        };
        self.availability.start_loading();

        match self.appointments_service.block_duration().await {
            Ok(config) => self.planner = AvailabilityPlanner::from(&config),
            Err(e) => warn!("Block duration unavailable, keeping {} min: {}", self.planner.block_minutes(), e),
        }

        match self.appointments_service.list_doctor_availability(doctor_id).await {
            Ok(mut slots) => {
                sort_availability_by_start(&mut slots);
                self.availability.loaded(slots);
            }
            Err(e) => {
                warn!("Availability for doctor {} failed: {}", doctor_id, e);
                self.availability.failed(AVAILABILITY_LOAD_FAILED);
            }
        }
    }

    pub async fn load_records(&mut self) {
        let Some(doctor_id) = self.ensure_doctor_session() else {
            return;
        };
        self.records.start_loading();

        match self.records_service.list_for_doctor(doctor_id).await {
            Ok(mut items) => {
                sort_by_updated_desc(&mut items);
                self.records.loaded(items);
            }
            Err(e) => {
                warn!("Records for doctor {} failed: {}", doctor_id, e);
                self.records.failed(RECORDS_LOAD_FAILED);
            }
        }
    }

    pub async fn load_patients(&mut self) {
        let Some(doctor_id) = self.ensure_doctor_session() else {
            return;
        };
        self.patients.start_loading();

        match self.doctors.list_patients(doctor_id).await {
            Ok(mut patients) => {
                patients.sort_by(|a, b| a.user.display_name().cmp(b.user.display_name()));
                self.patients.loaded(patients);
            }
            Err(e) => {
                warn!("Patients for doctor {} failed: {}", doctor_id, e);
                self.patients.failed(PATIENTS_LOAD_FAILED);
            }
        }
    }

    /// Checks the draft against the loaded windows first; a clash or a
    /// misaligned window is reported without calling the API.
    pub async fn create_availability(&mut self, draft: AvailabilityDraft) -> Option<Availability> {
        if self.is_creating_availability {
            return None;
        }
        let doctor_id = self.ensure_doctor_session()?;
        self.availability.reset_feedback();

        if let Err(e) = self.planner.check(&draft, &self.availability.items) {
            self.availability.error = Some(e.to_string());
            return None;
        }

        self.is_creating_availability = true;
        let result = self
            .appointments_service
            .create_availability(&draft.into_request(doctor_id))
            .await;
        self.is_creating_availability = false;

        match result {
            Ok(slot) => {
                self.availability.items.push(slot.clone());
                sort_availability_by_start(&mut self.availability.items);
                self.availability.message = Some(AVAILABILITY_CREATED.to_string());
                Some(slot)
            }
            Err(e) => {
                warn!("Availability create failed: {}", e);
                self.availability.error = Some(AVAILABILITY_CREATE_FAILED.to_string());
                None
            }
        }
    }

    /// Changes the slot capacity of a window by `delta`, clamped to 1..=4.
    pub async fn adjust_slots(&mut self, availability_id: i64, delta: i32) -> Option<Availability> {
        if self.availability_mutation_id == Some(availability_id) {
            return None;
        }
        self.ensure_doctor_session()?;

        let current = self
            .availability
            .items
            .iter()
            .find(|slot| slot.id == availability_id)?
            .slots;
        let slots = clamp_slots(current, delta)?;

        self.availability_mutation_id = Some(availability_id);
        self.availability.reset_feedback();

        let request = AvailabilityUpdateRequest {
            slots: Some(slots),
            ..Default::default()
        };
        let result = self
            .appointments_service
            .update_availability(availability_id, &request)
            .await;
        self.availability_mutation_id = None;

        match result {
            Ok(updated) => {
                for slot in self.availability.items.iter_mut() {
                    if slot.id == updated.id {
                        *slot = updated.clone();
                    }
                }
                sort_availability_by_start(&mut self.availability.items);
                self.availability.message = Some(AVAILABILITY_UPDATED.to_string());
                Some(updated)
            }
            Err(e) => {
                warn!("Availability {} update failed: {}", availability_id, e);
                self.availability.error = Some(AVAILABILITY_UPDATE_FAILED.to_string());
                None
            }
        }
    }

    pub async fn create_record(&mut self, form: &RecordCreateForm) -> Option<MedicalRecord> {
        if self.is_saving_record {
            return None;
        }
        let doctor_id = self.ensure_doctor_session()?;
        let request = match form.to_request(doctor_id) {
            Ok(request) => request,
            Err(e) => {
                self.records.error = Some(e.message().to_string());
                return None;
            }
        };

        self.is_saving_record = true;
        self.records.reset_feedback();
        let result = self.records_service.create(&request).await;
        self.is_saving_record = false;

        match result {
            Ok(record) => {
                self.records.items.push(record.clone());
                sort_by_updated_desc(&mut self.records.items);
                self.records.message = Some(RECORD_CREATED.to_string());
                Some(record)
            }
            Err(e) => {
                warn!("Record create failed: {}", e);
                self.records.error = Some(RECORD_CREATE_FAILED.to_string());
                None
            }
        }
    }

    pub async fn update_record(&mut self, record_id: i64, form: &RecordEditForm) -> Option<MedicalRecord> {
        let changes = match form.to_request() {
            Ok(changes) => changes,
            Err(e) => {
                self.records.error = Some(e.message().to_string());
                return None;
            }
        };
        self.ensure_doctor_session()?;

        self.record_mutation_id = Some(record_id);
        self.records.reset_feedback();
        let result = self.records_service.update(record_id, &changes).await;
        self.record_mutation_id = None;

        match result {
            Ok(updated) => {
                for record in self.records.items.iter_mut() {
                    if record.id == updated.id {
                        *record = updated.clone();
                    }
                }
                sort_by_updated_desc(&mut self.records.items);
                self.records.message = Some(RECORD_UPDATED.to_string());
                Some(updated)
            }
            Err(e) => {
                warn!("Record {} update failed: {}", record_id, e);
                self.records.error = Some(RECORD_UPDATE_FAILED.to_string());
                None
            }
        }
    }

    /// Opens the history modal for one of the doctor's patients.
    pub async fn open_patient(&mut self, patient: &Patient) -> Option<PatientMedicalModal> {
        let doctor_id = self.ensure_doctor_session()?;
        Some(PatientMedicalModal::open(self.records_service.clone(), patient, doctor_id).await)
    }
}
