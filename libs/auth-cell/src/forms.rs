use tracing::warn;

use shared_models::{FormError, LoginRequest, PatientRegisterRequest, UserRole};
use shared_utils::forms::{is_blank, is_valid_email, meets_min_length, non_empty, MIN_PASSWORD_LENGTH};

use crate::router::landing_for_role;
use crate::services::AuthService;

pub const LOGIN_FAILED: &str = "Credenciales inválidas. Intentá nuevamente.";
pub const REQUIRED_FIELDS: &str = "Completá los datos obligatorios.";
pub const PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden.";
pub const REGISTER_FAILED: &str = "No pudimos crear tu cuenta. Probá más tarde.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: UserRole::User,
        }
    }
}

impl LoginForm {
    pub fn is_valid(&self) -> bool {
        !is_blank(&self.email)
            && is_valid_email(&self.email)
            && meets_min_length(&self.password, MIN_PASSWORD_LENGTH)
    }

    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        if !self.is_valid() {
            return Err(FormError::new(REQUIRED_FIELDS));
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// The mismatch check wins over every other validation error.
    pub fn validate(&self) -> Result<PatientRegisterRequest, FormError> {
        if self.password != self.confirm_password {
            return Err(FormError::new(PASSWORD_MISMATCH));
        }
        let valid = is_valid_email(&self.email)
            && meets_min_length(&self.password, MIN_PASSWORD_LENGTH)
            && !self.confirm_password.is_empty();
        if !valid {
            return Err(FormError::new(REQUIRED_FIELDS));
        }

        Ok(PatientRegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: non_empty(&self.full_name),
            ..Default::default()
        })
    }
}

/// Login screen state.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: LoginForm,
    pub is_submitting: bool,
    pub error_message: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path to navigate to after a successful login. Landing is
    /// chosen from the role picked in the form.
    pub async fn submit(&mut self, auth: &AuthService) -> Option<&'static str> {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error_message = Some(e.message().to_string());
                return None;
            }
        };

        self.error_message = None;
        self.is_submitting = true;
        let result = auth.login(self.form.role, &request).await;
        self.is_submitting = false;

        match result {
            Ok(_) => Some(landing_for_role(self.form.role)),
            Err(e) => {
                warn!("Login failed for {}: {}", request.email, e);
                self.error_message = Some(LOGIN_FAILED.to_string());
                None
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: RegisterForm,
    pub is_submitting: bool,
    pub error_message: Option<String>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, auth: &AuthService) -> Option<&'static str> {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error_message = Some(e.message().to_string());
                return None;
            }
        };

        self.error_message = None;
        self.is_submitting = true;
        let result = auth.register_patient(&request).await;
        self.is_submitting = false;

        match result {
            Ok(_) => Some(landing_for_role(UserRole::User)),
            Err(e) => {
                warn!("Registration failed for {}: {}", request.email, e);
                self.error_message = Some(REGISTER_FAILED.to_string());
                None
            }
        }
    }
}
