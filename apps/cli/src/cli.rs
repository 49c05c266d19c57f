use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};

use shared_models::UserRole;

#[derive(Parser)]
#[command(name = "turnoplus")]
#[command(version)]
#[command(about = "Turnos médicos desde la terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL, overrides API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file, overrides TURNOPLUS_SESSION_PATH
    #[arg(long, global = true)]
    pub session: Option<std::path::PathBuf>,

    /// UTC offset used to read and print local times
    #[arg(long, global = true, default_value = "-03:00", value_parser = parse_offset)]
    pub utc_offset: FixedOffset,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// user (patient), doctor or admin
        #[arg(long, default_value = "user")]
        role: UserRole,
    },

    /// Create a patient account and sign in
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Drop the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Resolve a path through the route guards
    Route { url: String },

    /// List doctors available for booking
    Doctors,

    /// Free blocks of a doctor for the next 30 days
    Blocks {
        #[arg(long)]
        doctor: i64,
    },

    /// Book a free block
    Book {
        #[arg(long)]
        doctor: i64,
        #[arg(long)]
        block: i64,
    },

    #[command(subcommand)]
    Availability(AvailabilityCommand),

    #[command(subcommand)]
    Appointments(AppointmentsCommand),

    #[command(subcommand)]
    Records(RecordsCommand),

    #[command(subcommand)]
    Offices(OfficesCommand),

    #[command(subcommand)]
    Users(UsersCommand),

    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
pub enum AvailabilityCommand {
    /// The doctor's availability windows
    List,
    /// Offer a new window, times as YYYY-MM-DDTHH:MM local
    Create {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value_t = 1)]
        slots: u8,
    },
    /// Change the slot capacity of a window
    Slots {
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
    },
    /// Month view of the availability
    Calendar {
        /// Months to move from the current one
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        months: i32,
    },
}

#[derive(Subcommand)]
pub enum AppointmentsCommand {
    List,
    Cancel { id: i64 },
    Confirm { id: i64 },
}

#[derive(Args)]
pub struct RecordFields {
    #[arg(long, default_value = "")]
    pub diagnosis: String,
    #[arg(long, default_value = "")]
    pub treatment: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand)]
pub enum RecordsCommand {
    List,
    Create {
        #[arg(long)]
        patient: i64,
        #[command(flatten)]
        fields: RecordFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: RecordFields,
    },
    /// Clinical history of one of the doctor's patients
    History { patient: i64 },
}

#[derive(Args)]
pub struct OfficeFields {
    #[arg(long)]
    pub code: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub address: String,
}

#[derive(Subcommand)]
pub enum OfficesCommand {
    List,
    Create {
        #[command(flatten)]
        fields: OfficeFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: OfficeFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// Every account, patients, doctors and admins
    List,
    /// Admin accounts with their grade
    Admins,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    BlockDuration,
    SetBlockDuration { minutes: u32 },
}

/// Accepts `+HH:MM` / `-HH:MM`.
fn parse_offset(raw: &str) -> Result<FixedOffset, String> {
    let stamp = format!("2000-01-01T00:00:00{}", raw.trim());
    DateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M:%S%:z")
        .map(|value| *value.offset())
        .map_err(|_| format!("invalid UTC offset: {raw}"))
}
