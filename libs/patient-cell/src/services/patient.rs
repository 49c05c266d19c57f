use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{AppError, Patient, PatientCreateRequest, PatientUpdateRequest};

#[derive(Clone)]
pub struct PatientsService {
    api: ApiClient,
}

impl PatientsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        self.api.get("/patients/").await
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, AppError> {
        self.api.get(&format!("/patients/{}", patient_id)).await
    }

    pub async fn create_patient(&self, request: &PatientCreateRequest) -> Result<Patient, AppError> {
        debug!("Creating patient account for: {}", request.email);
        let patient: Patient = self.api.post("/patients/", request).await?;
        info!("Patient {} created", patient.user.id);
        Ok(patient)
    }

    pub async fn update_patient(
        &self,
        patient_id: i64,
        request: &PatientUpdateRequest,
    ) -> Result<Patient, AppError> {
        debug!("Updating patient profile {}", patient_id);
        self.api
            .put(&format!("/patients/{}", patient_id), request)
            .await
    }

    pub async fn delete_patient(&self, patient_id: i64) -> Result<(), AppError> {
        self.api.delete(&format!("/patients/{}", patient_id)).await?;
        info!("Patient {} deleted", patient_id);
        Ok(())
    }
}
