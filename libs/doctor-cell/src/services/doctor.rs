use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{AppError, Doctor, DoctorCreateRequest, DoctorUpdateRequest, Patient};

#[derive(Clone)]
pub struct DoctorService {
    api: ApiClient,
}

impl DoctorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        self.api.get("/doctors/").await
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, AppError> {
        self.api.get(&format!("/doctors/{}", doctor_id)).await
    }

    pub async fn create_doctor(&self, request: &DoctorCreateRequest) -> Result<Doctor, AppError> {
        debug!("Creating doctor account for: {}", request.email);
        let doctor: Doctor = self.api.post("/doctors/", request).await?;
        info!("Doctor {} created", doctor.user.id);
        Ok(doctor)
    }

    pub async fn update_doctor(
        &self,
        doctor_id: i64,
        request: &DoctorUpdateRequest,
    ) -> Result<Doctor, AppError> {
        self.api
            .put(&format!("/doctors/{}", doctor_id), request)
            .await
    }

    pub async fn delete_doctor(&self, doctor_id: i64) -> Result<(), AppError> {
        self.api.delete(&format!("/doctors/{}", doctor_id)).await?;
        info!("Doctor {} deleted", doctor_id);
        Ok(())
    }

    /// Patients that have at least one appointment with the doctor.
    pub async fn list_patients(&self, doctor_id: i64) -> Result<Vec<Patient>, AppError> {
        self.api
            .get(&format!("/doctors/{}/patients", doctor_id))
            .await
    }
}
