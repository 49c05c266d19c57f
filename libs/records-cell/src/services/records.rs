use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{
    AppError, MedicalRecord, MedicalRecordCreateRequest, MedicalRecordUpdateRequest,
};

#[derive(Clone)]
pub struct MedicalRecordsService {
    api: ApiClient,
}

impl MedicalRecordsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(&self, patient_id: i64) -> Result<Vec<MedicalRecord>, AppError> {
        self.api
            .get(&format!("/medical-records/patients/{}", patient_id))
            .await
    }

    pub async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<MedicalRecord>, AppError> {
        self.api
            .get(&format!("/medical-records/doctors/{}", doctor_id))
            .await
    }

    /// Full history of a patient across every doctor, with doctor names.
    pub async fn patient_history(&self, patient_id: i64) -> Result<Vec<MedicalRecord>, AppError> {
        debug!("Loading medical history for patient {}", patient_id);
        self.api
            .get(&format!("/medical-records/patients/{}/history", patient_id))
            .await
    }

    pub async fn get(&self, record_id: i64) -> Result<MedicalRecord, AppError> {
        self.api
            .get(&format!("/medical-records/{}", record_id))
            .await
    }

    pub async fn create(&self, request: &MedicalRecordCreateRequest) -> Result<MedicalRecord, AppError> {
        let record: MedicalRecord = self.api.post("/medical-records/", request).await?;
        info!("Medical record {} created for patient {}", record.id, record.patient_id);
        Ok(record)
    }

    pub async fn update(
        &self,
        record_id: i64,
        request: &MedicalRecordUpdateRequest,
    ) -> Result<MedicalRecord, AppError> {
        self.api
            .patch(&format!("/medical-records/{}", record_id), request)
            .await
    }
}
