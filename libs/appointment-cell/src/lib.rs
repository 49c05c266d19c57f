pub mod calendar;
pub mod models;
pub mod planning;
pub mod services;

pub use calendar::{AvailabilityCalendar, CalendarDay};
pub use models::{AvailabilityDraft, AvailabilityError, PlannedBlock};
pub use planning::{AvailabilityForm, AvailabilityPlanner};
pub use services::AppointmentsService;
