use tracing::error;

use shared_api::ApiClient;
use shared_models::DEFAULT_BLOCK_DURATION_MINUTES;

use crate::services::SystemSettingsService;

pub const MIN_BLOCK_MINUTES: u32 = 15;
pub const MAX_BLOCK_MINUTES: u32 = 240;

pub const SETTINGS_LOAD_FAILED: &str = "Error al cargar la configuración actual";
pub const SETTINGS_SAVED: &str = "Configuración actualizada exitosamente";
pub const SETTINGS_SAVE_FAILED: &str = "Error al actualizar la configuración";

pub fn is_valid_block_duration(minutes: u32) -> bool {
    (MIN_BLOCK_MINUTES..=MAX_BLOCK_MINUTES).contains(&minutes)
}

/// Block duration editor. `block_duration` is the form value and
/// `current_duration` the last value confirmed by the API.
pub struct SystemSettingsPanel {
    service: SystemSettingsService,
    pub block_duration: u32,
    pub current_duration: Option<u32>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl SystemSettingsPanel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: SystemSettingsService::new(api),
            block_duration: DEFAULT_BLOCK_DURATION_MINUTES,
            current_duration: None,
            loading: false,
            saving: false,
            error: None,
            message: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.block_duration().await {
            Ok(config) => {
                self.current_duration = Some(config.block_duration_minutes);
                self.block_duration = config.block_duration_minutes;
            }
            Err(e) => {
                error!("Error loading settings: {}", e);
                self.error = Some(SETTINGS_LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Out-of-range values and saves already in flight are ignored.
    pub async fn submit(&mut self) -> bool {
        if !is_valid_block_duration(self.block_duration) || self.saving {
            return false;
        }
        self.saving = true;
        self.error = None;
        self.message = None;

        let minutes = self.block_duration;
        let result = self.service.update_block_duration(minutes).await;
        self.saving = false;

        match result {
            Ok(_) => {
                self.current_duration = Some(minutes);
                self.message = Some(SETTINGS_SAVED.to_string());
                true
            }
            Err(e) => {
                error!("Error updating settings: {}", e);
                self.error = Some(SETTINGS_SAVE_FAILED.to_string());
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.block_duration = self
            .current_duration
            .filter(|minutes| *minutes != 0)
            .unwrap_or(DEFAULT_BLOCK_DURATION_MINUTES);
        self.error = None;
        self.message = None;
    }
}
