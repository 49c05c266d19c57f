use std::sync::Arc;

use tracing::{debug, info};

use shared_api::ApiClient;
use shared_models::{
    AppError, AuthenticatedUser, LoginRequest, LoginResponse, Patient, PatientRegisterRequest,
    UserRole,
};

use crate::services::session::SessionState;

pub struct AuthService {
    api: ApiClient,
    session: Arc<SessionState>,
}

impl AuthService {
    pub fn new(api: ApiClient, session: Arc<SessionState>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn login(
        &self,
        role: UserRole,
        request: &LoginRequest,
    ) -> Result<AuthenticatedUser, AppError> {
        let endpoint = resolve_login_endpoint(role);
        debug!("Logging in {} via {}", request.email, endpoint);

        let response: LoginResponse = self.api.post(endpoint, request).await?;
        let user = normalize_login_response(response, role);
        self.session.persist(user.clone())?;

        info!("User {} signed in as {}", user.id, user.role);
        Ok(user)
    }

    /// Creates the patient account and signs it in right away. The register
    /// endpoint returns no token, so the session carries a placeholder one.
    pub async fn register_patient(
        &self,
        request: &PatientRegisterRequest,
    ) -> Result<AuthenticatedUser, AppError> {
        debug!("Registering patient {}", request.email);

        let patient: Patient = self.api.post("/patients/", request).await?;
        let response = LoginResponse {
            access_token: format!("user-token-{}", patient.user.id),
            token_type: "bearer".to_string(),
            user: patient.user,
        };
        let user = normalize_login_response(response, UserRole::User);
        self.session.persist(user.clone())?;

        info!("Patient {} registered", user.id);
        Ok(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.session.user() {
            info!("User {} signed out", user.id);
        }
        self.session.clear();
    }
}

pub fn resolve_login_endpoint(role: UserRole) -> &'static str {
    match role {
        UserRole::Doctor => "/doctors/login",
        UserRole::Admin => "/admins/login",
        UserRole::Patient | UserRole::User => "/users/login",
    }
}

/// Patients always end up with the `user` role on the client; every other
/// session keeps the role it asked for.
pub fn normalize_login_response(response: LoginResponse, role: UserRole) -> AuthenticatedUser {
    let LoginResponse {
        access_token,
        token_type,
        user,
    } = response;

    let normalized_role = if role == UserRole::Patient || user.role == "patient" {
        UserRole::User
    } else {
        role
    };

    AuthenticatedUser {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: normalized_role,
        token: access_token,
        token_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::BaseUser;

    fn response(role: &str) -> LoginResponse {
        LoginResponse {
            access_token: "tok".into(),
            token_type: "bearer".into(),
            user: BaseUser {
                id: 5,
                email: "x@turnoplus.test".into(),
                full_name: None,
                is_active: true,
                is_superuser: false,
                password: None,
                role: role.into(),
            },
        }
    }

    #[test]
    fn endpoints_by_role() {
        assert_eq!(resolve_login_endpoint(UserRole::Doctor), "/doctors/login");
        assert_eq!(resolve_login_endpoint(UserRole::Admin), "/admins/login");
        assert_eq!(resolve_login_endpoint(UserRole::Patient), "/users/login");
        assert_eq!(resolve_login_endpoint(UserRole::User), "/users/login");
    }

    #[test]
    fn patients_become_users() {
        assert_eq!(
            normalize_login_response(response("patient"), UserRole::User).role,
            UserRole::User
        );
        assert_eq!(
            normalize_login_response(response("user"), UserRole::Patient).role,
            UserRole::User
        );
    }

    #[test]
    fn other_roles_keep_the_requested_role() {
        let admin = normalize_login_response(response("support"), UserRole::Admin);
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.token, "tok");

        let doctor = normalize_login_response(response("doctor"), UserRole::Doctor);
        assert_eq!(doctor.role, UserRole::Doctor);
    }
}
