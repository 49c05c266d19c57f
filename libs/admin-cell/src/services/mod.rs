pub mod admins;
pub mod offices;
pub mod settings;
pub mod users;

pub use admins::AdminService;
pub use offices::OfficeService;
pub use settings::SystemSettingsService;
pub use users::UserService;
