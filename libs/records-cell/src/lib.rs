pub mod services;

pub use services::MedicalRecordsService;
