use tracing::info;

use shared_api::ApiClient;
use shared_models::{AppError, BlockDurationConfig, SystemSetting, SystemSettingUpdateRequest};

#[derive(Clone)]
pub struct SystemSettingsService {
    api: ApiClient,
}

impl SystemSettingsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_settings(&self) -> Result<Vec<SystemSetting>, AppError> {
        self.api.get("/settings/").await
    }

    pub async fn block_duration(&self) -> Result<BlockDurationConfig, AppError> {
        self.api.get("/settings/block-duration").await
    }

    /// The API stores every setting as text.
    pub async fn update_block_duration(&self, minutes: u32) -> Result<SystemSetting, AppError> {
        let request = SystemSettingUpdateRequest {
            setting_value: minutes.to_string(),
        };
        let setting: SystemSetting = self.api.put("/settings/block-duration", &request).await?;
        info!("Block duration set to {} minutes", minutes);
        Ok(setting)
    }
}
