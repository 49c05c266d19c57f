use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::{AvailabilityCreateRequest, FormError};

pub const MIN_SLOTS: u8 = 1;
pub const MAX_SLOTS: u8 = 4;

/// A validated availability window, ready to be sent for a doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDraft {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub slots: u8,
}

impl AvailabilityDraft {
    pub fn into_request(self, doctor_id: i64) -> AvailabilityCreateRequest {
        AvailabilityCreateRequest {
            doctor_id,
            start_at: self.start_at,
            end_at: self.end_at,
            slots: Some(self.slots),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedBlock {
    pub block_number: u32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Completá los campos requeridos.")]
    MissingFields,

    #[error("Ingresá fechas válidas.")]
    InvalidDates,

    #[error("La hora de fin debe ser posterior a la de inicio.")]
    EndBeforeStart,

    #[error("Ya tenés una disponibilidad que se superpone con ese horario.")]
    Overlap { availability_id: i64 },

    #[error("El inicio debe coincidir con una hora en punto (por ejemplo 9:00 o 10:00).")]
    StartNotAligned,

    #[error("La duración debe ser múltiplo de {block_minutes} minutos.")]
    DurationNotMultiple { block_minutes: u32 },

    #[error("La duración de los bloques no es válida.")]
    InvalidBlockDuration,
}

impl From<AvailabilityError> for FormError {
    fn from(err: AvailabilityError) -> Self {
        FormError::new(err.to_string())
    }
}
