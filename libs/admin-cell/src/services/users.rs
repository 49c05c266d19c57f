use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{AppError, BaseUser, UserCreateRequest, UserUpdateRequest};

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_users(&self) -> Result<Vec<BaseUser>, AppError> {
        self.api.get("/users/").await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<BaseUser, AppError> {
        self.api.get(&format!("/users/{}", user_id)).await
    }

    pub async fn create_user(&self, request: &UserCreateRequest) -> Result<BaseUser, AppError> {
        debug!("Creating user account for: {}", request.email);
        let user: BaseUser = self.api.post("/users/", request).await?;
        info!("User {} created", user.id);
        Ok(user)
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        request: &UserUpdateRequest,
    ) -> Result<BaseUser, AppError> {
        self.api.put(&format!("/users/{}", user_id), request).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        self.api.delete(&format!("/users/{}", user_id)).await?;
        info!("User {} deleted", user_id);
        Ok(())
    }
}
