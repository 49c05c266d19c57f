use std::fmt;

use shared_models::{AuthenticatedUser, UserRole};

pub const LOGIN_PATH: &str = "/auth/login";

/// A navigation target: path plus query parameters, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTree {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl UrlTree {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for UrlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                separator,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(UrlTree),
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

pub fn redirect_to_login(redirect_to: Option<&str>) -> UrlTree {
    let tree = UrlTree::new(LOGIN_PATH);
    match redirect_to.filter(|target| !target.is_empty()) {
        Some(target) => tree.with_query("redirectTo", target),
        None => tree,
    }
}

/// `/auth/login?unauthorized=1`
pub fn unauthorized() -> UrlTree {
    UrlTree::new(LOGIN_PATH).with_query("unauthorized", "1")
}

/// Any signed-in user passes; everyone else is sent to the login page with a
/// way back to `url`.
pub fn auth_guard(user: Option<&AuthenticatedUser>, url: &str) -> GuardOutcome {
    if user.is_some() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(redirect_to_login(Some(url)))
    }
}

pub fn has_allowed_role(user_role: UserRole, allowed: &[UserRole]) -> bool {
    if allowed.contains(&user_role) {
        return true;
    }
    user_role == UserRole::User && allowed.contains(&UserRole::Patient)
}

/// An empty role list means the route is open to any signed-in user.
pub fn role_guard(user: Option<&AuthenticatedUser>, allowed: &[UserRole]) -> GuardOutcome {
    if allowed.is_empty() {
        return GuardOutcome::Allow;
    }
    match user {
        Some(user) if has_allowed_role(user.role, allowed) => GuardOutcome::Allow,
        _ => GuardOutcome::Redirect(unauthorized()),
    }
}

/// Normalizes loose role names from route data, dropping unknown ones.
pub fn normalize_roles<S: AsRef<str>>(roles: &[S]) -> Vec<UserRole> {
    roles
        .iter()
        .filter_map(|role| role.as_ref().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "someone@turnoplus.test".into(),
            full_name: None,
            role,
            token: "tok".into(),
            token_type: "bearer".into(),
        }
    }

    #[test]
    fn anonymous_users_are_sent_to_login_with_return_url() {
        let outcome = auth_guard(None, "/doctor");
        match outcome {
            GuardOutcome::Redirect(tree) => {
                assert_eq!(tree.path, "/auth/login");
                assert_eq!(tree.query_value("redirectTo"), Some("/doctor"));
                assert_eq!(tree.to_string(), "/auth/login?redirectTo=%2Fdoctor");
            }
            GuardOutcome::Allow => panic!("anonymous user was allowed"),
        }
    }

    #[test]
    fn signed_in_users_pass_the_auth_guard() {
        let user = session(UserRole::Admin);
        assert!(auth_guard(Some(&user), "/admin").is_allowed());
    }

    #[test]
    fn user_role_counts_as_patient() {
        assert!(has_allowed_role(UserRole::User, &[UserRole::Patient]));
        assert!(!has_allowed_role(UserRole::Patient, &[UserRole::User]));
        assert!(!has_allowed_role(UserRole::Doctor, &[UserRole::Patient, UserRole::User]));
    }

    #[test]
    fn role_guard_outcomes() {
        let doctor = session(UserRole::Doctor);

        assert!(role_guard(Some(&doctor), &[]).is_allowed());
        assert!(role_guard(None, &[]).is_allowed());
        assert!(role_guard(Some(&doctor), &[UserRole::Doctor]).is_allowed());
        assert_eq!(
            role_guard(Some(&doctor), &[UserRole::Admin]),
            GuardOutcome::Redirect(unauthorized())
        );
        assert_eq!(
            role_guard(None, &[UserRole::Admin]),
            GuardOutcome::Redirect(unauthorized())
        );
        assert_eq!(unauthorized().to_string(), "/auth/login?unauthorized=1");
    }

    #[test]
    fn unknown_roles_are_dropped() {
        assert_eq!(
            normalize_roles(&["patient", "staff", "user"]),
            vec![UserRole::Patient, UserRole::User]
        );
    }
}
