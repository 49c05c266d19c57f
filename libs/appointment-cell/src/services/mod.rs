pub mod appointments;

pub use appointments::AppointmentsService;
