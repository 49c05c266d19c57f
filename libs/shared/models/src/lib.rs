pub mod appointment;
pub mod auth;
pub mod error;
pub mod medical_record;
pub mod office;
pub mod settings;
pub mod user;
pub mod wire_time;

pub use appointment::*;
pub use auth::*;
pub use error::{AppError, FormError};
pub use medical_record::*;
pub use office::*;
pub use settings::*;
pub use user::*;
