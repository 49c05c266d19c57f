use chrono::{Duration, Utc};
use tracing::{error, warn};

use appointment_cell::AppointmentsService;
use doctor_cell::DoctorService;
use shared_api::ApiClient;
use shared_models::{Appointment, AppointmentBlock, AppointmentCreateRequest, Availability, Doctor};

pub const DOCTORS_LOAD_FAILED: &str = "No pudimos obtener la lista de profesionales.";
pub const AVAILABILITY_LOAD_FAILED: &str = "No pudimos cargar la disponibilidad de este profesional.";
pub const SESSION_REQUIRED: &str = "Necesitamos tu sesión para reservar un turno. Ingresá nuevamente.";
pub const DOCTOR_REQUIRED: &str = "Seleccioná un profesional antes de reservar.";
pub const BOOKED: &str = "¡Turno reservado con éxito!";
pub const BOOKING_FAILED: &str = "No pudimos reservar el turno. Intentá nuevamente.";

/// How far ahead free blocks are offered.
pub const BOOKING_WINDOW_DAYS: i64 = 30;

/// Pick a doctor, browse their free blocks and book one.
pub struct BookingFlow {
    doctors_service: DoctorService,
    appointments: AppointmentsService,
    selected_doctor_id: Option<i64>,

    pub doctors: Vec<Doctor>,
    pub availability: Vec<Availability>,
    pub available_blocks: Vec<AppointmentBlock>,
    pub is_loading_doctors: bool,
    pub is_loading_availability: bool,
    pub is_loading_blocks: bool,
    pub is_booking: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl BookingFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            doctors_service: DoctorService::new(api.clone()),
            appointments: AppointmentsService::new(api),
            selected_doctor_id: None,
            doctors: Vec::new(),
            availability: Vec::new(),
            available_blocks: Vec::new(),
            is_loading_doctors: false,
            is_loading_availability: false,
            is_loading_blocks: false,
            is_booking: false,
            message: None,
            error: None,
        }
    }

    pub async fn load_doctors(&mut self) {
        self.is_loading_doctors = true;
        match self.doctors_service.list_doctors().await {
            Ok(doctors) => self.doctors = doctors,
            Err(e) => {
                warn!("Doctor list failed: {}", e);
                self.error = Some(DOCTORS_LOAD_FAILED.to_string());
            }
        }
        self.is_loading_doctors = false;
    }

    /// The selected doctor, if it is one of the loaded doctors.
    pub fn selected_doctor(&self) -> Option<&Doctor> {
        let doctor_id = self.selected_doctor_id?;
        self.doctors.iter().find(|doctor| doctor.user.id == doctor_id)
    }

    /// Ids below 1 are ignored. A successful availability load is followed
    /// by the free blocks for the booking window.
    pub async fn select_doctor(&mut self, doctor_id: i64) {
        if doctor_id <= 0 {
            return;
        }
        self.selected_doctor_id = Some(doctor_id);
        if self.load_availability(doctor_id).await {
            self.load_available_blocks(doctor_id).await;
        }
    }

    async fn load_availability(&mut self, doctor_id: i64) -> bool {
        self.is_loading_availability = true;
        let result = self.appointments.list_doctor_availability(doctor_id).await;
        self.is_loading_availability = false;

        match result {
            Ok(slots) => {
                self.availability = slots;
                true
            }
            Err(e) => {
                warn!("Availability for doctor {} failed: {}", doctor_id, e);
                self.error = Some(AVAILABILITY_LOAD_FAILED.to_string());
                false
            }
        }
    }

    /// Block failures are only logged; the previous list stays visible.
    async fn load_available_blocks(&mut self, doctor_id: i64) {
        self.is_loading_blocks = true;
        let start = Utc::now();
        let end = start + Duration::days(BOOKING_WINDOW_DAYS);

        match self.appointments.get_available_blocks(doctor_id, start, end).await {
            Ok(blocks) => self.available_blocks = blocks,
            Err(e) => error!("Error loading available blocks for doctor {}: {}", doctor_id, e),
        }
        self.is_loading_blocks = false;
    }

    pub async fn book_block(
        &mut self,
        patient_id: Option<i64>,
        block: &AppointmentBlock,
    ) -> Option<Appointment> {
        let Some(patient_id) = patient_id else {
            self.error = Some(SESSION_REQUIRED.to_string());
            return None;
        };
        let Some(doctor_id) = self.selected_doctor().map(|doctor| doctor.user.id) else {
            self.error = Some(DOCTOR_REQUIRED.to_string());
            return None;
        };

        self.is_booking = true;
        self.error = None;
        self.message = None;

        let request = AppointmentCreateRequest {
            doctor_id,
            patient_id,
            start_at: block.start_at,
            end_at: block.end_at,
            notes: None,
        };
        let result = self.appointments.book(&request).await;
        self.is_booking = false;

        match result {
            Ok(appointment) => {
                self.message = Some(BOOKED.to_string());
                self.load_availability(doctor_id).await;
                self.load_available_blocks(doctor_id).await;
                Some(appointment)
            }
            Err(e) => {
                warn!("Booking block {} failed: {}", block.id, e);
                self.error = Some(BOOKING_FAILED.to_string());
                None
            }
        }
    }
}
