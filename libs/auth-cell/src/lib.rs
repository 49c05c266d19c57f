pub mod forms;
pub mod guards;
pub mod router;
pub mod services;

pub use guards::{auth_guard, role_guard, GuardOutcome, UrlTree};
pub use router::{landing_for_role, navigate, Navigation, Page};
pub use services::*;
