use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{
    wire_time, AppError, Appointment, AppointmentBlock, AppointmentCreateRequest, Availability,
    AvailabilityCreateRequest, AvailabilityUpdateRequest, BlockDurationConfig,
};

/// Appointments, availability windows and bookable blocks.
#[derive(Clone)]
pub struct AppointmentsService {
    api: ApiClient,
}

impl AppointmentsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, AppError> {
        self.api
            .get(&format!("/appointments/patients/{}", patient_id))
            .await
    }

    pub async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, AppError> {
        self.api
            .get(&format!("/appointments/doctors/{}", doctor_id))
            .await
    }

    pub async fn book(&self, request: &AppointmentCreateRequest) -> Result<Appointment, AppError> {
        debug!(
            "Booking doctor {} for patient {} at {}",
            request.doctor_id, request.patient_id, request.start_at
        );
        let appointment: Appointment = self.api.post("/appointments/", request).await?;
        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn cancel(&self, appointment_id: i64) -> Result<Appointment, AppError> {
        self.transition(appointment_id, "cancel").await
    }

    pub async fn confirm(&self, appointment_id: i64) -> Result<Appointment, AppError> {
        self.transition(appointment_id, "confirm").await
    }

    pub async fn complete(&self, appointment_id: i64) -> Result<Appointment, AppError> {
        self.transition(appointment_id, "complete").await
    }

    async fn transition(&self, appointment_id: i64, action: &str) -> Result<Appointment, AppError> {
        debug!("Appointment {} -> {}", appointment_id, action);
        self.api
            .post(&format!("/appointments/{}/{}", appointment_id, action), &json!({}))
            .await
    }

    pub async fn list_doctor_availability(&self, doctor_id: i64) -> Result<Vec<Availability>, AppError> {
        self.api
            .get(&format!("/appointments/doctor/{}/availability", doctor_id))
            .await
    }

    pub async fn create_availability(
        &self,
        request: &AvailabilityCreateRequest,
    ) -> Result<Availability, AppError> {
        let availability: Availability = self.api.post("/appointments/availability", request).await?;
        info!(
            "Availability {} created for doctor {} with {} blocks",
            availability.id,
            availability.doctor_id,
            availability.total_blocks()
        );
        Ok(availability)
    }

    pub async fn update_availability(
        &self,
        availability_id: i64,
        request: &AvailabilityUpdateRequest,
    ) -> Result<Availability, AppError> {
        self.api
            .patch(&format!("/appointments/availability/{}", availability_id), request)
            .await
    }

    /// Unbooked blocks of a doctor between two instants.
    pub async fn get_available_blocks(
        &self,
        doctor_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentBlock>, AppError> {
        let query = [
            ("start_date", wire_time::format(&start)),
            ("end_date", wire_time::format(&end)),
        ];
        self.api
            .get_with_query(&format!("/doctors/{}/available-blocks", doctor_id), &query)
            .await
    }

    /// Current block length, readable by any signed-in role.
    pub async fn block_duration(&self) -> Result<BlockDurationConfig, AppError> {
        self.api.get("/settings/block-duration").await
    }
}
