use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{Admin, AdminCreateRequest, AdminUpdateRequest, AppError};

#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>, AppError> {
        self.api.get("/admins/").await
    }

    pub async fn get_admin(&self, admin_id: i64) -> Result<Admin, AppError> {
        self.api.get(&format!("/admins/{}", admin_id)).await
    }

    pub async fn create_admin(&self, request: &AdminCreateRequest) -> Result<Admin, AppError> {
        debug!("Creating admin account for: {}", request.email);
        let admin: Admin = self.api.post("/admins/", request).await?;
        info!("Admin {} created", admin.user.id);
        Ok(admin)
    }

    pub async fn update_admin(
        &self,
        admin_id: i64,
        request: &AdminUpdateRequest,
    ) -> Result<Admin, AppError> {
        self.api.put(&format!("/admins/{}", admin_id), request).await
    }

    pub async fn delete_admin(&self, admin_id: i64) -> Result<(), AppError> {
        self.api.delete(&format!("/admins/{}", admin_id)).await?;
        info!("Admin {} deleted", admin_id);
        Ok(())
    }
}
