pub mod booking;
pub mod models;
pub mod services;
pub mod shell;

pub use booking::BookingFlow;
pub use models::{is_action_disabled, ProfileForm, PATIENT_TABS};
pub use services::*;
pub use shell::PatientShell;
