use shared_models::{AuthenticatedUser, UserRole};

use crate::guards::{auth_guard, role_guard, GuardOutcome, UrlTree, LOGIN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    PatientShell,
    DoctorShell,
    AdminShell,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Page),
    Redirect(UrlTree),
}

/// A guarded top-level route.
#[derive(Debug, Clone, Copy)]
pub struct ShellRoute {
    pub path: &'static str,
    pub roles: &'static [UserRole],
    pub page: Page,
}

pub const SHELL_ROUTES: [ShellRoute; 3] = [
    ShellRoute {
        path: "patient",
        roles: &[UserRole::Patient, UserRole::User],
        page: Page::PatientShell,
    },
    ShellRoute {
        path: "doctor",
        roles: &[UserRole::Doctor],
        page: Page::DoctorShell,
    },
    ShellRoute {
        path: "admin",
        roles: &[UserRole::Admin],
        page: Page::AdminShell,
    },
];

/// Resolves `url` for the given session, running the auth guard and then the
/// role guard on shell routes.
pub fn navigate(url: &str, user: Option<&AuthenticatedUser>) -> Navigation {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_matches('/');

    match path {
        "" | "auth" => Navigation::Redirect(UrlTree::new(LOGIN_PATH)),
        "auth/login" => Navigation::Render(Page::Login),
        "auth/register" => Navigation::Render(Page::Register),
        other => match SHELL_ROUTES.iter().find(|route| route.path == other) {
            Some(route) => guard_shell(route, user),
            None => Navigation::Render(Page::NotFound),
        },
    }
}

fn guard_shell(route: &ShellRoute, user: Option<&AuthenticatedUser>) -> Navigation {
    let target = format!("/{}", route.path);
    if let GuardOutcome::Redirect(tree) = auth_guard(user, &target) {
        return Navigation::Redirect(tree);
    }
    match role_guard(user, route.roles) {
        GuardOutcome::Allow => Navigation::Render(route.page),
        GuardOutcome::Redirect(tree) => Navigation::Redirect(tree),
    }
}

/// Where a freshly signed-in user lands.
pub fn landing_for_role(role: UserRole) -> &'static str {
    match role {
        UserRole::Doctor => "/doctor",
        UserRole::Admin => "/admin",
        UserRole::User | UserRole::Patient => "/patient",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 9,
            email: "x@turnoplus.test".into(),
            full_name: None,
            role,
            token: "tok".into(),
            token_type: "bearer".into(),
        }
    }

    #[test]
    fn root_redirects_to_login() {
        assert_eq!(
            navigate("/", None),
            Navigation::Redirect(UrlTree::new("/auth/login"))
        );
        assert_eq!(
            navigate("auth", None),
            Navigation::Redirect(UrlTree::new("/auth/login"))
        );
    }

    #[test]
    fn auth_pages_are_public() {
        assert_eq!(navigate("/auth/login?unauthorized=1", None), Navigation::Render(Page::Login));
        assert_eq!(navigate("/auth/register", None), Navigation::Render(Page::Register));
    }

    #[test]
    fn shells_require_a_session() {
        match navigate("/admin", None) {
            Navigation::Redirect(tree) => {
                assert_eq!(tree.to_string(), "/auth/login?redirectTo=%2Fadmin")
            }
            other => panic!("unexpected navigation: {other:?}"),
        }
    }

    #[test]
    fn shells_check_roles() {
        let patient = session(UserRole::User);
        let doctor = session(UserRole::Doctor);

        assert_eq!(navigate("/patient", Some(&patient)), Navigation::Render(Page::PatientShell));
        assert_eq!(navigate("/doctor", Some(&doctor)), Navigation::Render(Page::DoctorShell));
        match navigate("/doctor", Some(&patient)) {
            Navigation::Redirect(tree) => assert_eq!(tree.query_value("unauthorized"), Some("1")),
            other => panic!("unexpected navigation: {other:?}"),
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(navigate("/patient/extra", None), Navigation::Render(Page::NotFound));
        assert_eq!(navigate("/nowhere", None), Navigation::Render(Page::NotFound));
    }

    #[test]
    fn landing_pages() {
        assert_eq!(landing_for_role(UserRole::Doctor), "/doctor");
        assert_eq!(landing_for_role(UserRole::Admin), "/admin");
        assert_eq!(landing_for_role(UserRole::User), "/patient");
        assert_eq!(landing_for_role(UserRole::Patient), "/patient");
    }
}
