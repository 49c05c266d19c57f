pub mod doctors;
pub mod models;
pub mod offices;
pub mod services;
pub mod settings;
pub mod shell;
pub mod users;

pub use doctors::{DoctorForm, DoctorManagement};
pub use models::{office_name, role_display_name, role_icon, ADMIN_TABS};
pub use offices::{OfficeForm, OfficeManagement};
pub use services::*;
pub use settings::SystemSettingsPanel;
pub use shell::AdminShell;
pub use users::{UserForm, UserManagement};
