use tracing::warn;

use appointment_cell::AppointmentsService;
use doctor_cell::SectionState;
use records_cell::MedicalRecordsService;
use shared_api::ApiClient;
use shared_models::{
    sort_by_start, Appointment, AppointmentBlock, AuthenticatedUser, MedicalRecord, Patient,
};

use crate::booking::BookingFlow;
use crate::models::ProfileForm;
use crate::services::PatientsService;

pub const INVALID_SESSION: &str = "Tu sesión no es válida. Ingresá nuevamente.";
pub const PROFILE_LOAD_FAILED: &str = "No pudimos cargar tu perfil. Intentá nuevamente.";
pub const APPOINTMENTS_LOAD_FAILED: &str = "No pudimos obtener tus turnos.";
pub const RECORDS_LOAD_FAILED: &str = "No pudimos cargar tu historial médico.";
pub const UNKNOWN_SESSION: &str = "No pudimos determinar tu sesión actual.";
pub const PROFILE_SAVE_FAILED: &str = "No pudimos guardar los cambios. Intentá más tarde.";
pub const APPOINTMENT_UPDATE_FAILED: &str = "No pudimos actualizar el turno. Intentá nuevamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppointmentAction {
    Cancel,
    Confirm,
}

/// Patient dashboard. Profile, appointment and booking errors share
/// `error_message`; the medical history keeps its own.
pub struct PatientShell {
    patients: PatientsService,
    appointments_service: AppointmentsService,
    records_service: MedicalRecordsService,
    user_id: Option<i64>,

    pub profile: Option<Patient>,
    pub appointments: Vec<Appointment>,
    pub records: SectionState<MedicalRecord>,
    pub booking: BookingFlow,

    pub is_loading_profile: bool,
    pub is_loading_appointments: bool,
    pub is_saving_profile: bool,
    pub appointment_action_id: Option<i64>,
    pub error_message: Option<String>,
}

impl PatientShell {
    pub fn new(api: ApiClient, user: Option<&AuthenticatedUser>) -> Self {
        Self {
            patients: PatientsService::new(api.clone()),
            appointments_service: AppointmentsService::new(api.clone()),
            records_service: MedicalRecordsService::new(api.clone()),
            user_id: user.map(|user| user.id),
            profile: None,
            appointments: Vec::new(),
            records: SectionState::default(),
            booking: BookingFlow::new(api),
            is_loading_profile: false,
            is_loading_appointments: false,
            is_saving_profile: false,
            appointment_action_id: None,
            error_message: None,
        }
    }

    pub fn patient_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn has_content(&self) -> bool {
        self.profile.is_some() || !self.appointments.is_empty()
    }

    /// Appointments by start time, earliest first.
    pub fn sorted_appointments(&self) -> Vec<Appointment> {
        let mut items = self.appointments.clone();
        sort_by_start(&mut items);
        items
    }

    pub fn profile_form(&self) -> ProfileForm {
        self.profile
            .as_ref()
            .map(ProfileForm::from_patient)
            .unwrap_or_default()
    }

    pub async fn refresh(&mut self) {
        self.load_profile().await;
        self.load_appointments().await;
        self.load_records().await;
    }

    pub async fn load_profile(&mut self) {
        let Some(patient_id) = self.user_id else {
            self.error_message = Some(INVALID_SESSION.to_string());
            return;
        };
        self.is_loading_profile = true;
        self.error_message = None;

        match self.patients.get_patient(patient_id).await {
            Ok(patient) => self.profile = Some(patient),
            Err(e) => {
                warn!("Profile for patient {} failed: {}", patient_id, e);
                self.error_message = Some(PROFILE_LOAD_FAILED.to_string());
            }
        }
        self.is_loading_profile = false;
    }

    pub async fn load_appointments(&mut self) {
        let Some(patient_id) = self.user_id else {
            return;
        };
        self.is_loading_appointments = true;

        match self.appointments_service.list_for_patient(patient_id).await {
            Ok(items) => self.appointments = items,
            Err(e) => {
                warn!("Appointments for patient {} failed: {}", patient_id, e);
                self.error_message = Some(APPOINTMENTS_LOAD_FAILED.to_string());
            }
        }
        self.is_loading_appointments = false;
    }

    pub async fn load_records(&mut self) {
        let Some(patient_id) = self.user_id else {
            self.records.error = Some(INVALID_SESSION.to_string());
            return;
        };
        self.records.start_loading();

        match self.records_service.list_for_patient(patient_id).await {
            Ok(records) => self.records.loaded(records),
            Err(e) => {
                warn!("Records for patient {} failed: {}", patient_id, e);
                self.records.failed(RECORDS_LOAD_FAILED);
            }
        }
    }

    /// Invalid forms are reported without calling the API.
    pub async fn save_profile(&mut self, form: &ProfileForm) -> Option<Patient> {
        let Some(patient_id) = self.user_id else {
            self.error_message = Some(UNKNOWN_SESSION.to_string());
            return None;
        };
        let changes = match form.validate() {
            Ok(changes) => changes,
            Err(e) => {
                self.error_message = Some(e.message().to_string());
                return None;
            }
        };

        self.is_saving_profile = true;
        self.error_message = None;
        let result = self.patients.update_patient(patient_id, &changes).await;
        self.is_saving_profile = false;

        match result {
            Ok(patient) => {
                self.profile = Some(patient.clone());
                Some(patient)
            }
            Err(e) => {
                warn!("Profile save for patient {} failed: {}", patient_id, e);
                self.error_message = Some(PROFILE_SAVE_FAILED.to_string());
                None
            }
        }
    }

    pub async fn cancel_appointment(&mut self, appointment_id: i64) -> Option<Appointment> {
        self.mutate_appointment(appointment_id, AppointmentAction::Cancel).await
    }

    pub async fn confirm_appointment(&mut self, appointment_id: i64) -> Option<Appointment> {
        self.mutate_appointment(appointment_id, AppointmentAction::Confirm).await
    }

    async fn mutate_appointment(
        &mut self,
        appointment_id: i64,
        action: AppointmentAction,
    ) -> Option<Appointment> {
        self.appointment_action_id = Some(appointment_id);
        self.error_message = None;

        let result = match action {
            AppointmentAction::Cancel => self.appointments_service.cancel(appointment_id).await,
            AppointmentAction::Confirm => self.appointments_service.confirm(appointment_id).await,
        };
        self.appointment_action_id = None;

        match result {
            Ok(updated) => {
                for item in self.appointments.iter_mut() {
                    if item.id == updated.id {
                        *item = updated.clone();
                    }
                }
                Some(updated)
            }
            Err(e) => {
                warn!("Appointment {} {:?} failed: {}", appointment_id, action, e);
                self.error_message = Some(APPOINTMENT_UPDATE_FAILED.to_string());
                None
            }
        }
    }

    /// Books through the booking flow and records the new appointment.
    pub async fn book(&mut self, block: &AppointmentBlock) -> Option<Appointment> {
        let appointment = self.booking.book_block(self.user_id, block).await?;
        self.on_appointment_booked(appointment.clone()).await;
        Some(appointment)
    }

    pub async fn on_appointment_booked(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
        self.error_message = None;
        self.load_records().await;
    }
}
