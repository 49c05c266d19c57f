use tracing::error;

use shared_api::ApiClient;
use shared_models::{FormError, Office, OfficeCreateRequest, OfficeUpdateRequest};
use shared_utils::forms::{is_blank, non_empty};

use crate::services::OfficeService;

pub const CODE_REQUIRED: &str = "El código del consultorio es obligatorio";
pub const OFFICES_LOAD_FAILED: &str = "Error al cargar consultorios";
pub const OFFICE_CREATE_FAILED: &str = "Error al crear consultorio";
pub const OFFICE_UPDATE_FAILED: &str = "Error al actualizar consultorio";
pub const OFFICE_DELETE_FAILED: &str = "Error al eliminar consultorio";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficeForm {
    pub code: String,
    pub name: String,
    pub address: String,
}

impl OfficeForm {
    pub fn from_office(office: &Office) -> Self {
        Self {
            code: office.code.clone(),
            name: office.name.clone().unwrap_or_default(),
            address: office.address.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.code) {
            return Err(FormError::new(CODE_REQUIRED));
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> OfficeCreateRequest {
        OfficeCreateRequest {
            code: self.code.clone(),
            name: non_empty(&self.name),
            address: non_empty(&self.address),
        }
    }

    pub fn to_update_request(&self) -> OfficeUpdateRequest {
        OfficeUpdateRequest {
            code: Some(self.code.clone()),
            name: non_empty(&self.name),
            address: non_empty(&self.address),
        }
    }
}

pub struct OfficeManagement {
    service: OfficeService,
    pub offices: Vec<Office>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OfficeManagement {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: OfficeService::new(api),
            offices: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn load_offices(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.list_offices().await {
            Ok(offices) => self.offices = offices,
            Err(e) => {
                error!("Error loading offices: {}", e);
                self.error = Some(OFFICES_LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn submit(&mut self, form: &OfficeForm, editing_id: Option<i64>) -> bool {
        if let Err(e) = form.validate() {
            self.error = Some(e.message().to_string());
            return false;
        }
        self.loading = true;
        self.error = None;

        let result = match editing_id {
            Some(id) => self
                .service
                .update_office(id, &form.to_update_request())
                .await
                .map_err(|e| (OFFICE_UPDATE_FAILED, e)),
            None => self
                .service
                .create_office(&form.to_create_request())
                .await
                .map_err(|e| (OFFICE_CREATE_FAILED, e)),
        };

        match result {
            Ok(_) => {
                self.load_offices().await;
                true
            }
            Err((message, e)) => {
                error!("Error saving office: {}", e);
                self.error = Some(message.to_string());
                self.loading = false;
                false
            }
        }
    }

    pub async fn delete(&mut self, office_id: i64) -> bool {
        self.loading = true;
        self.error = None;
        match self.service.delete_office(office_id).await {
            Ok(()) => {
                self.load_offices().await;
                true
            }
            Err(e) => {
                error!("Error deleting office {}: {}", office_id, e);
                self.error = Some(OFFICE_DELETE_FAILED.to_string());
                self.loading = false;
                false
            }
        }
    }
}
