use chrono::NaiveDate;
use futures::try_join;
use tracing::{error, warn};

use doctor_cell::DoctorService;
use patient_cell::PatientsService;
use shared_api::ApiClient;
use shared_models::{
    Account, AdminRole, AppError, DoctorCreateRequest, DoctorUpdateRequest, ManagedRole, Office,
    PatientCreateRequest, PatientUpdateRequest, UserCreateRequest, UserUpdateRequest,
};
use shared_utils::forms::{is_blank, non_empty};

use crate::models::office_name;
use crate::services::{OfficeService, UserService};

pub const USERS_LOAD_FAILED: &str = "Error al cargar usuarios";
pub const CREDENTIALS_REQUIRED: &str = "Email y contraseña son obligatorios";
pub const INVALID_USER_TYPE: &str = "Tipo de usuario no válido";

/// Create/edit form for any account kind. Fields that do not apply to the
/// selected role are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role: ManagedRole,

    pub date_of_birth: Option<NaiveDate>,
    pub medical_record_number: String,
    pub emergency_contact: String,

    pub specialty: String,
    pub license_number: String,
    pub years_experience: i32,
    pub office_id: Option<i64>,

    pub admin_role: AdminRole,
    pub permissions: Vec<String>,
}

impl UserForm {
    pub fn new(role: ManagedRole) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            is_active: true,
            is_superuser: false,
            role,
            date_of_birth: None,
            medical_record_number: String::new(),
            emergency_contact: String::new(),
            specialty: String::new(),
            license_number: String::new(),
            years_experience: 0,
            office_id: None,
            admin_role: AdminRole::Support,
            permissions: Vec::new(),
        }
    }

    /// Pre-fills the form for editing; the password always starts empty.
    pub fn from_account(account: &Account) -> Self {
        let base = account.base();
        let mut form = Self::new(account.managed_role().unwrap_or(ManagedRole::Patient));
        form.email = base.email.clone();
        form.full_name = base.full_name.clone().unwrap_or_default();
        form.is_active = base.is_active;
        form.is_superuser = base.is_superuser;

        match account {
            Account::Patient(patient) => {
                form.date_of_birth = patient.date_of_birth;
                form.medical_record_number = patient.medical_record_number.clone().unwrap_or_default();
                form.emergency_contact = patient.emergency_contact.clone().unwrap_or_default();
            }
            Account::Doctor(doctor) => {
                form.specialty = doctor.specialty.clone().unwrap_or_default();
                form.license_number = doctor.license_number.clone().unwrap_or_default();
                form.years_experience = doctor.years_experience.unwrap_or_default();
                form.office_id = doctor.office_id.filter(|id| *id != 0);
            }
            Account::User(_) => {}
        }
        form
    }

    fn password_change(&self) -> Option<String> {
        if is_blank(&self.password) {
            None
        } else {
            Some(self.password.clone())
        }
    }
}

/// Sorts by full name; accounts without one sort first.
pub fn sort_accounts(accounts: &mut [Account]) {
    accounts.sort_by_key(|account| {
        account
            .base()
            .full_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    });
}

/// Admin view over every account kind.
pub struct UserManagement {
    users_service: UserService,
    doctors_service: DoctorService,
    patients_service: PatientsService,
    offices_service: OfficeService,

    pub accounts: Vec<Account>,
    pub offices: Vec<Office>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserManagement {
    pub fn new(api: ApiClient) -> Self {
        Self {
            users_service: UserService::new(api.clone()),
            doctors_service: DoctorService::new(api.clone()),
            patients_service: PatientsService::new(api.clone()),
            offices_service: OfficeService::new(api),
            accounts: Vec::new(),
            offices: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.load_users().await;
        self.load_offices().await;
    }

    /// Users, doctors and patients are fetched together; any failure
    /// fails the whole list.
    pub async fn load_users(&mut self) {
        self.loading = true;
        self.error = None;

        let result = try_join!(
            self.users_service.list_users(),
            self.doctors_service.list_doctors(),
            self.patients_service.list_patients(),
        );

        match result {
            Ok((users, doctors, patients)) => {
                let mut accounts: Vec<Account> = users
                    .into_iter()
                    .map(Account::User)
                    .chain(doctors.into_iter().map(Account::Doctor))
                    .chain(patients.into_iter().map(Account::Patient))
                    .collect();
                sort_accounts(&mut accounts);
                self.accounts = accounts;
            }
            Err(e) => {
                error!("Error loading users: {}", e);
                self.error = Some(USERS_LOAD_FAILED.to_string());
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

    /// Creates when `editing_id` is `None`, otherwise updates that account.
    /// Reloads the list on success.
    pub async fn submit(&mut self, form: &UserForm, editing_id: Option<i64>) -> bool {
        if is_blank(&form.email) || (editing_id.is_none() && is_blank(&form.password)) {
            self.error = Some(CREDENTIALS_REQUIRED.to_string());
            return false;
        }
        self.loading = true;
        self.error = None;

        let (result, verb) = match editing_id {
            None => (self.create(form).await, "crear"),
            Some(id) => (self.update(id, form).await, "actualizar"),
        };

        match result {
            Ok(()) => {
                self.load_users().await;
                true
            }
            Err(e) => {
                warn!("Saving {} account {:?} failed: {}", form.role, editing_id, e);
                self.error = Some(format!("Error al {} {}", verb, form.role));
                self.loading = false;
                false
            }
        }
    }

    async fn create(&self, form: &UserForm) -> Result<(), AppError> {
        let full_name = non_empty(&form.full_name);
        match form.role {
            ManagedRole::Doctor => {
                let request = DoctorCreateRequest {
                    email: form.email.clone(),
                    password: form.password.clone(),
                    full_name,
                    is_active: form.is_active,
                    is_superuser: form.is_superuser,
                    specialty: non_empty(&form.specialty),
                    license_number: non_empty(&form.license_number),
                    years_experience: form.years_experience,
                    office_id: form.office_id.filter(|id| *id != 0),
                };
                self.doctors_service.create_doctor(&request).await?;
            }
            ManagedRole::Patient => {
                let request = PatientCreateRequest {
                    email: form.email.clone(),
                    password: form.password.clone(),
                    full_name,
                    is_active: form.is_active,
                    is_superuser: form.is_superuser,
                    date_of_birth: form.date_of_birth,
                    medical_record_number: non_empty(&form.medical_record_number),
                    emergency_contact: non_empty(&form.emergency_contact),
                };
                self.patients_service.create_patient(&request).await?;
            }
            ManagedRole::Admin => {
                let request = UserCreateRequest {
                    email: form.email.clone(),
                    password: form.password.clone(),
                    full_name,
                    is_active: form.is_active,
                    is_superuser: form.is_superuser,
                    role: Some(ManagedRole::Admin),
                };
                self.users_service.create_user(&request).await?;
            }
        }
        Ok(())
    }

    async fn update(&self, id: i64, form: &UserForm) -> Result<(), AppError> {
        let password = form.password_change();
        let full_name = non_empty(&form.full_name);
        match form.role {
            ManagedRole::Doctor => {
                let request = DoctorUpdateRequest {
                    password,
                    email: Some(form.email.clone()),
                    is_active: Some(form.is_active),
                    is_superuser: Some(form.is_superuser),
                    full_name,
                    specialty: non_empty(&form.specialty),
                    license_number: non_empty(&form.license_number),
                    years_experience: Some(form.years_experience).filter(|years| *years != 0),
                    office_id: form.office_id.filter(|id| *id != 0).map(Some),
                };
                self.doctors_service.update_doctor(id, &request).await?;
            }
            ManagedRole::Patient => {
                let request = PatientUpdateRequest {
                    password,
                    email: Some(form.email.clone()),
                    is_active: Some(form.is_active),
                    is_superuser: Some(form.is_superuser),
                    full_name,
                    date_of_birth: form.date_of_birth,
                    medical_record_number: non_empty(&form.medical_record_number),
                    emergency_contact: non_empty(&form.emergency_contact),
                };
                self.patients_service.update_patient(id, &request).await?;
            }
            ManagedRole::Admin => {
                let request = UserUpdateRequest {
                    password,
                    email: Some(form.email.clone()),
                    is_active: Some(form.is_active),
                    is_superuser: Some(form.is_superuser),
                    full_name,
                    role: Some(ManagedRole::Admin),
                };
                self.users_service.update_user(id, &request).await?;
            }
        }
        Ok(())
    }

    /// Deletes through the endpoint matching the account's role.
    pub async fn delete(&mut self, account: &Account) -> bool {
        let Some(role) = account.managed_role() else {
            self.error = Some(INVALID_USER_TYPE.to_string());
            return false;
        };
        self.loading = true;
        self.error = None;

        let id = account.id();
        let result = match role {
            ManagedRole::Doctor => self.doctors_service.delete_doctor(id).await,
            ManagedRole::Patient => self.patients_service.delete_patient(id).await,
            ManagedRole::Admin => self.users_service.delete_user(id).await,
        };

        match result {
            Ok(()) => {
                self.load_users().await;
                true
            }
            Err(e) => {
                warn!("Deleting {} {} failed: {}", role, id, e);
                self.error = Some(format!("Error al eliminar {}", role));
                self.loading = false;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::{BaseUser, Doctor};

    fn base(id: i64, name: Option<&str>, role: &str) -> BaseUser {
        BaseUser {
            id,
            email: format!("user{}@turnoplus.test", id),
            full_name: name.map(String::from),
            is_active: true,
            is_superuser: false,
            password: None,
            role: role.into(),
        }
    }

    #[test]
    fn accounts_sort_by_full_name() {
        let mut accounts = vec![
            Account::User(base(1, Some("Zoe Admin"), "admin")),
            Account::User(base(2, Some("ana Paciente"), "patient")),
            Account::User(base(3, None, "admin")),
        ];
        sort_accounts(&mut accounts);
        let ids: Vec<i64> = accounts.iter().map(Account::id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn form_prefills_doctor_fields() {
        let doctor = Account::Doctor(Doctor {
            user: base(7, Some("Dra. Ruiz"), "doctor"),
            specialty: Some("Clínica".into()),
            license_number: None,
            years_experience: Some(12),
            office_id: Some(2),
        });

        let form = UserForm::from_account(&doctor);
        assert_eq!(form.role, ManagedRole::Doctor);
        assert_eq!(form.password, "");
        assert_eq!(form.specialty, "Clínica");
        assert_eq!(form.years_experience, 12);
        assert_eq!(form.office_id, Some(2));
        assert_eq!(form.password_change(), None);
    }

    #[test]
    fn office_zero_prefills_as_unassigned() {
        let doctor = Account::Doctor(Doctor {
            user: base(7, Some("Dra. Ruiz"), "doctor"),
            specialty: None,
            license_number: None,
            years_experience: None,
            office_id: Some(0),
        });

        assert_eq!(UserForm::from_account(&doctor).office_id, None);
    }
}
