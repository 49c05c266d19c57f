use tracing::error;

use doctor_cell::DoctorService;
use shared_api::ApiClient;
use shared_models::{Doctor, DoctorCreateRequest, DoctorUpdateRequest, FormError, Office};
use shared_utils::forms::{is_blank, non_empty};

use crate::models::office_name;
use crate::services::OfficeService;

pub const EMAIL_REQUIRED: &str = "El email es obligatorio";
pub const PASSWORD_REQUIRED: &str = "La contraseña es obligatoria para nuevos usuarios";
pub const DOCTORS_LOAD_FAILED: &str = "Error al cargar doctores";
pub const DOCTOR_CREATE_FAILED: &str = "Error al crear doctor";
pub const DOCTOR_UPDATE_FAILED: &str = "Error al actualizar doctor";
pub const DOCTOR_DELETE_FAILED: &str = "Error al eliminar doctor";

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub specialty: String,
    pub license_number: String,
    pub years_experience: i32,
    pub office_id: Option<i64>,
}

impl Default for DoctorForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            is_active: true,
            is_superuser: false,
            specialty: String::new(),
            license_number: String::new(),
            years_experience: 0,
            office_id: None,
        }
    }
}

impl DoctorForm {
    pub fn from_doctor(doctor: &Doctor) -> Self {
        Self {
            email: doctor.user.email.clone(),
            password: String::new(),
            full_name: doctor.user.full_name.clone().unwrap_or_default(),
            is_active: doctor.user.is_active,
            is_superuser: doctor.user.is_superuser,
            specialty: doctor.specialty.clone().unwrap_or_default(),
            license_number: doctor.license_number.clone().unwrap_or_default(),
            years_experience: doctor.years_experience.unwrap_or_default(),
            office_id: doctor.office_id.filter(|id| *id != 0),
        }
    }

    pub fn validate(&self, is_new: bool) -> Result<(), FormError> {
        if is_blank(&self.email) {
            return Err(FormError::new(EMAIL_REQUIRED));
        }
        if is_new && is_blank(&self.password) {
            return Err(FormError::new(PASSWORD_REQUIRED));
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> DoctorCreateRequest {
        DoctorCreateRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: non_empty(&self.full_name),
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            specialty: non_empty(&self.specialty),
            license_number: non_empty(&self.license_number),
            years_experience: self.years_experience,
            office_id: self.office_id,
        }
    }

    /// An unassigned office is sent as `null` so the API clears it.
    pub fn to_update_request(&self) -> DoctorUpdateRequest {
        DoctorUpdateRequest {
            password: Some(self.password.clone()).filter(|password| !is_blank(password)),
            email: Some(self.email.clone()),
            is_active: Some(self.is_active),
            is_superuser: Some(self.is_superuser),
            full_name: non_empty(&self.full_name),
            specialty: non_empty(&self.specialty),
            license_number: non_empty(&self.license_number),
            years_experience: Some(self.years_experience),
            office_id: Some(self.office_id),
        }
    }
}

pub struct DoctorManagement {
    doctors_service: DoctorService,
    offices_service: OfficeService,

    pub doctors: Vec<Doctor>,
    pub offices: Vec<Office>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DoctorManagement {
    pub fn new(api: ApiClient) -> Self {
        Self {
            doctors_service: DoctorService::new(api.clone()),
            offices_service: OfficeService::new(api),
            doctors: Vec::new(),
            offices: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.load_doctors().await;
        self.load_offices().await;
    }

    pub async fn load_doctors(&mut self) {
        self.loading = true;
        self.error = None;
        match self.doctors_service.list_doctors().await {
            Ok(doctors) => self.doctors = doctors,
            Err(e) => {
                error!("Error loading doctors: {}", e);
                self.error = Some(DOCTORS_LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn load_offices(&mut self) {
        match self.offices_service.list_offices().await {
            Ok(offices) => self.offices = offices,
            Err(e) => error!("Error loading offices: {}", e),
        }
    }

    pub fn office_name(&self, office_id: Option<i64>) -> &str {
        office_name(&self.offices, office_id)
    }

    pub async fn submit(&mut self, form: &DoctorForm, editing_id: Option<i64>) -> bool {
        if let Err(e) = form.validate(editing_id.is_none()) {
            self.error = Some(e.message().to_string());
            return false;
        }
        self.loading = true;
        self.error = None;

        let result = match editing_id {
            Some(id) => self
                .doctors_service
                .update_doctor(id, &form.to_update_request())
                .await
                .map_err(|e| (DOCTOR_UPDATE_FAILED, e)),
            None => self
                .doctors_service
                .create_doctor(&form.to_create_request())
                .await
                .map_err(|e| (DOCTOR_CREATE_FAILED, e)),
        };

        match result {
            Ok(_) => {
                self.load_doctors().await;
                true
            }
            Err((message, e)) => {
                error!("Error saving doctor: {}", e);
                self.error = Some(message.to_string());
                self.loading = false;
                false
            }
        }
    }

    pub async fn delete(&mut self, doctor_id: i64) -> bool {
        self.loading = true;
        self.error = None;
        match self.doctors_service.delete_doctor(doctor_id).await {
            Ok(()) => {
                self.load_doctors().await;
                true
            }
            Err(e) => {
                error!("Error deleting doctor {}: {}", doctor_id, e);
                self.error = Some(DOCTOR_DELETE_FAILED.to_string());
                self.loading = false;
                false
            }
        }
    }
}
