pub mod models;
pub mod patients;
pub mod records;
pub mod services;
pub mod shell;

pub use models::SectionState;
pub use patients::{filter_patients, ModalCloseEvent, ModalTab, PatientMedicalModal};
pub use records::{RecordCreateForm, RecordEditForm};
pub use services::*;
pub use shell::DoctorShell;
