use tracing::info;

use shared_api::ApiClient;
use shared_models::{AppError, Office, OfficeCreateRequest, OfficeUpdateRequest};

#[derive(Clone)]
pub struct OfficeService {
    api: ApiClient,
}

impl OfficeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_offices(&self) -> Result<Vec<Office>, AppError> {
        self.api.get("/offices/").await
    }

    pub async fn get_office(&self, office_id: i64) -> Result<Office, AppError> {
        self.api.get(&format!("/offices/{}", office_id)).await
    }

    pub async fn create_office(&self, request: &OfficeCreateRequest) -> Result<Office, AppError> {
        let office: Office = self.api.post("/offices/", request).await?;
        info!("Office {} ({}) created", office.id, office.code);
        Ok(office)
    }

    pub async fn update_office(
        &self,
        office_id: i64,
        request: &OfficeUpdateRequest,
    ) -> Result<Office, AppError> {
        self.api
            .put(&format!("/offices/{}", office_id), request)
            .await
    }

    pub async fn delete_office(&self, office_id: i64) -> Result<(), AppError> {
        self.api.delete(&format!("/offices/{}", office_id)).await?;
        info!("Office {} deleted", office_id);
        Ok(())
    }
}
