pub mod patient;

pub use patient::PatientsService;
