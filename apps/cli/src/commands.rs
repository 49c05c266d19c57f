use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, FixedOffset, NaiveDate, Utc};

use admin_cell::{AdminShell, OfficeForm};
use appointment_cell::planning::end_after;
use appointment_cell::{AvailabilityCalendar, AvailabilityForm};
use auth_cell::forms::{LoginForm, LoginPage, RegisterForm, RegisterPage};
use auth_cell::{landing_for_role, navigate, AuthService, Navigation, Page};
use doctor_cell::{DoctorShell, RecordCreateForm, RecordEditForm};
use patient_cell::PatientShell;
use shared_api::ApiClient;
use shared_models::{AuthenticatedUser, Availability};
use shared_utils::date_format::{format_day_month_date, format_month_year};

use crate::cli::{
    AppointmentsCommand, AvailabilityCommand, Command, OfficeFields, OfficesCommand, RecordFields,
    RecordsCommand, SettingsCommand, UsersCommand,
};
use crate::output;

pub struct Context {
    pub api: ApiClient,
    pub auth: AuthService,
    pub offset: FixedOffset,
}

impl Context {
    /// Runs the route guards for `path` and returns the signed-in user when
    /// the shell may be rendered.
    fn enter(&self, path: &str) -> Result<AuthenticatedUser> {
        let user = self.auth.user();
        match navigate(path, user.as_ref()) {
            Navigation::Render(_) => user.ok_or_else(|| anyhow!("Tu sesión no es válida. Ingresá nuevamente.")),
            Navigation::Redirect(target) => bail!("Acceso denegado, redirigido a {}", target),
        }
    }

    /// Shell path for the current role, patients when nobody is signed in.
    fn home(&self) -> &'static str {
        self.auth
            .user()
            .map(|user| landing_for_role(user.role))
            .unwrap_or("/patient")
    }

    fn patient_shell(&self) -> Result<PatientShell> {
        let user = self.enter("/patient")?;
        Ok(PatientShell::new(self.api.clone(), Some(&user)))
    }

    fn doctor_shell(&self) -> Result<DoctorShell> {
        let user = self.enter("/doctor")?;
        Ok(DoctorShell::new(self.api.clone(), Some(&user)))
    }

    fn admin_shell(&self) -> Result<AdminShell> {
        self.enter("/admin")?;
        Ok(AdminShell::new(self.api.clone()))
    }
}

fn check(error: Option<&String>) -> Result<()> {
    match error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password, role } => {
            let mut page = LoginPage::new();
            page.form = LoginForm { email, password, role };
            match page.submit(&ctx.auth).await {
                Some(landing) => println!("Sesión iniciada. Inicio: {}", landing),
                None => check(page.error_message.as_ref())?,
            }
        }
        Command::Register { full_name, email, password, confirm_password } => {
            let mut page = RegisterPage::new();
            page.form = RegisterForm { full_name, email, password, confirm_password };
            match page.submit(&ctx.auth).await {
                Some(landing) => println!("Cuenta creada. Inicio: {}", landing),
                None => check(page.error_message.as_ref())?,
            }
        }
        Command::Logout => {
            ctx.auth.logout();
            println!("Sesión cerrada.");
        }
        Command::Whoami => match ctx.auth.user() {
            Some(user) => println!(
                "#{} {} ({}) {}",
                user.id,
                user.full_name.as_deref().unwrap_or(&user.email),
                user.email,
                user.role
            ),
            None => println!("Sin sesión activa."),
        },
        Command::Route { url } => match navigate(&url, ctx.auth.user().as_ref()) {
            Navigation::Render(page) => println!("{}", page_name(page)),
            Navigation::Redirect(target) => println!("-> {}", target),
        },
        Command::Doctors => {
            let mut shell = ctx.patient_shell()?;
            shell.booking.load_doctors().await;
            check(shell.booking.error.as_ref())?;
            output::print_doctors(&shell.booking.doctors);
        }
        Command::Blocks { doctor } => {
            let mut shell = ctx.patient_shell()?;
            shell.booking.select_doctor(doctor).await;
            check(shell.booking.error.as_ref())?;
            output::print_blocks(&shell.booking.available_blocks, &ctx.offset);
        }
        Command::Book { doctor, block } => book(ctx, doctor, block).await?,
        Command::Availability(command) => availability(ctx, command).await?,
        Command::Appointments(command) => appointments(ctx, command).await?,
        Command::Records(command) => records(ctx, command).await?,
        Command::Offices(command) => offices(ctx, command).await?,
        Command::Users(command) => users(ctx, command).await?,
        Command::Settings(command) => settings(ctx, command).await?,
    }
    Ok(())
}

fn page_name(page: Page) -> &'static str {
    match page {
        Page::Login => "login",
        Page::Register => "register",
        Page::PatientShell => "patient",
        Page::DoctorShell => "doctor",
        Page::AdminShell => "admin",
        Page::NotFound => "not found",
    }
}

async fn book(ctx: &Context, doctor_id: i64, block_id: i64) -> Result<()> {
    let mut shell = ctx.patient_shell()?;
    shell.booking.load_doctors().await;
    shell.booking.select_doctor(doctor_id).await;
    check(shell.booking.error.as_ref())?;

    let block = shell
        .booking
        .available_blocks
        .iter()
        .find(|block| block.id == block_id)
        .cloned()
        .ok_or_else(|| anyhow!("El turno #{} ya no está disponible.", block_id))?;

    match shell.book(&block).await {
        Some(appointment) => {
            println!("{}", shell.booking.message.as_deref().unwrap_or_default());
            output::print_appointments(&[appointment], &ctx.offset);
            Ok(())
        }
        None => check(shell.booking.error.as_ref()),
    }
}

async fn availability(ctx: &Context, command: AvailabilityCommand) -> Result<()> {
    let mut shell = ctx.doctor_shell()?;
    shell.load_availability().await;
    check(shell.availability.error.as_ref())?;

    match command {
        AvailabilityCommand::List => output::print_availability(&shell.availability.items, &ctx.offset),
        AvailabilityCommand::Create { start, end, slots } => {
            let block_minutes = shell.planner().block_minutes();
            let defaults = AvailabilityForm::default_range_for(Utc::now(), &ctx.offset, block_minutes);
            let start = start.unwrap_or(defaults.start);
            let end = end
                .or_else(|| end_after(&start, &ctx.offset, block_minutes))
                .unwrap_or(defaults.end);
            let form = AvailabilityForm { start, end, slots };
            let draft = form.submit(&ctx.offset)?;
            match shell.create_availability(draft).await {
                Some(created) => {
                    println!("{}", shell.availability.message.as_deref().unwrap_or_default());
                    output::print_availability(&[created], &ctx.offset);
                }
                None => check(shell.availability.error.as_ref())?,
            }
        }
        AvailabilityCommand::Slots { id, delta } => match shell.adjust_slots(id, delta).await {
            Some(updated) => {
                println!("{}", shell.availability.message.as_deref().unwrap_or_default());
                output::print_availability(&[updated], &ctx.offset);
            }
            None => {
                check(shell.availability.error.as_ref())?;
                println!("Sin cambios en la disponibilidad #{}.", id);
            }
        },
        AvailabilityCommand::Calendar { months } => {
            let now = Utc::now();
            let today = now.with_timezone(&ctx.offset).date_naive();
            let mut calendar = AvailabilityCalendar::starting_at(now, ctx.offset);
            for _ in 0..months.unsigned_abs() {
                if months > 0 {
                    calendar.next_month();
                } else {
                    calendar.previous_month();
                }
            }
            print_calendar(&calendar, &shell.availability.items, today);
        }
    }
    Ok(())
}

fn print_calendar(
    calendar: &AvailabilityCalendar,
    availability: &[Availability],
    today: NaiveDate,
) {
    println!("{}", format_month_year(calendar.year(), calendar.month()));
    println!(" dom  lun  mar  mié  jue  vie  sáb");
    let days = calendar.days(availability, today);
    for week in days.chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|day| {
                let marker = if day.is_today {
                    '*'
                } else if day.total_blocks() > 0 {
                    '+'
                } else {
                    ' '
                };
                if day.is_current_month {
                    format!("{:>3}{} ", day.date.day(), marker)
                } else {
                    "     ".to_string()
                }
            })
            .collect();
        println!("{}", line.concat().trim_end());
    }
    for day in days.iter().filter(|day| day.is_current_month && day.total_blocks() > 0) {
        println!(
            "{}: {}",
            format_day_month_date(day.date),
            day.summary()
        );
    }
}

async fn appointments(ctx: &Context, command: AppointmentsCommand) -> Result<()> {
    if let AppointmentsCommand::List = command {
        if ctx.home() == "/doctor" {
            let mut shell = ctx.doctor_shell()?;
            shell.load_appointments().await;
            check(shell.appointments.error.as_ref())?;
            output::print_appointments(&shell.appointments.items, &ctx.offset);
            return Ok(());
        }
    }

    let mut shell = ctx.patient_shell()?;
    shell.load_appointments().await;
    check(shell.error_message.as_ref())?;

    let updated = match command {
        AppointmentsCommand::List => {
            output::print_appointments(&shell.sorted_appointments(), &ctx.offset);
            return Ok(());
        }
        AppointmentsCommand::Cancel { id } => shell.cancel_appointment(id).await,
        AppointmentsCommand::Confirm { id } => shell.confirm_appointment(id).await,
    };
    match updated {
        Some(appointment) => {
            output::print_appointments(&[appointment], &ctx.offset);
            Ok(())
        }
        None => check(shell.error_message.as_ref()),
    }
}

async fn records(ctx: &Context, command: RecordsCommand) -> Result<()> {
    if let RecordsCommand::List = command {
        if ctx.home() != "/doctor" {
            let mut shell = ctx.patient_shell()?;
            shell.load_records().await;
            check(shell.records.error.as_ref())?;
            output::print_records(&shell.records.items, &ctx.offset);
            return Ok(());
        }
    }

    let mut shell = ctx.doctor_shell()?;
    match command {
        RecordsCommand::List => {
            shell.load_records().await;
            check(shell.records.error.as_ref())?;
            output::print_records(&shell.records.items, &ctx.offset);
        }
        RecordsCommand::Create { patient, fields } => {
            let form = RecordCreateForm {
                patient_id: patient,
                diagnosis: fields.diagnosis,
                treatment: fields.treatment,
                notes: fields.notes,
            };
            let record = shell.create_record(&form).await;
            check(shell.records.error.as_ref())?;
            if let Some(record) = record {
                println!("{}", shell.records.message.as_deref().unwrap_or_default());
                output::print_records(&[record], &ctx.offset);
            }
        }
        RecordsCommand::Update { id, fields } => {
            let form = edit_form(fields);
            let record = shell.update_record(id, &form).await;
            check(shell.records.error.as_ref())?;
            if let Some(record) = record {
                println!("{}", shell.records.message.as_deref().unwrap_or_default());
                output::print_records(&[record], &ctx.offset);
            }
        }
        RecordsCommand::History { patient } => {
            shell.load_patients().await;
            check(shell.patients.error.as_ref())?;
            let found = shell
                .patients
                .items
                .iter()
                .find(|item| item.user.id == patient)
                .cloned()
                .ok_or_else(|| anyhow!("El paciente #{} no tiene turnos con vos.", patient))?;
            let modal = shell
                .open_patient(&found)
                .await
                .ok_or_else(|| anyhow!("Reiniciá tu sesión para continuar."))?;
            check(modal.history_error.as_ref())?;
            println!("Historial de {}", modal.patient_name);
            output::print_records(&modal.history, &ctx.offset);
        }
    }
    Ok(())
}

fn edit_form(fields: RecordFields) -> RecordEditForm {
    RecordEditForm {
        diagnosis: fields.diagnosis,
        treatment: fields.treatment,
        notes: fields.notes,
    }
}

fn office_form(fields: OfficeFields) -> OfficeForm {
    OfficeForm {
        code: fields.code,
        name: fields.name,
        address: fields.address,
    }
}

async fn offices(ctx: &Context, command: OfficesCommand) -> Result<()> {
    let mut shell = ctx.admin_shell()?;
    let panel = &mut shell.offices;

    let saved = match command {
        OfficesCommand::List => {
            panel.load_offices().await;
            check(panel.error.as_ref())?;
            output::print_offices(&panel.offices);
            return Ok(());
        }
        OfficesCommand::Create { fields } => panel.submit(&office_form(fields), None).await,
        OfficesCommand::Update { id, fields } => panel.submit(&office_form(fields), Some(id)).await,
        OfficesCommand::Delete { id } => panel.delete(id).await,
    };
    if !saved {
        check(panel.error.as_ref())?;
    }
    output::print_offices(&panel.offices);
    Ok(())
}

async fn users(ctx: &Context, command: UsersCommand) -> Result<()> {
    let mut shell = ctx.admin_shell()?;
    match command {
        UsersCommand::List => {
            shell.select_tab("users").await;
            check(shell.users.error.as_ref())?;
            output::print_accounts(&shell.users.accounts, &shell.users.offices);
        }
        UsersCommand::Admins => {
            for admin in shell.admins.list_admins().await? {
                let grade = admin
                    .grade()
                    .map(|grade| format!("{:?}", grade).to_lowercase())
                    .unwrap_or_default();
                println!("#{:<5} {:<30} {}", admin.user.id, admin.user.email, grade);
            }
        }
    }
    Ok(())
}

async fn settings(ctx: &Context, command: SettingsCommand) -> Result<()> {
    let mut shell = ctx.admin_shell()?;
    shell.select_tab("settings").await;
    let panel = &mut shell.settings;

    match command {
        SettingsCommand::BlockDuration => {
            check(panel.error.as_ref())?;
            println!("Duración de bloque: {} minutos", panel.block_duration);
        }
        SettingsCommand::SetBlockDuration { minutes } => {
            panel.block_duration = minutes;
            if !panel.submit().await {
                check(panel.error.as_ref())?;
                bail!(
                    "La duración debe estar entre {} y {} minutos.",
                    admin_cell::settings::MIN_BLOCK_MINUTES,
                    admin_cell::settings::MAX_BLOCK_MINUTES
                );
            }
            println!("{}", panel.message.as_deref().unwrap_or_default());
        }
    }
    Ok(())
}
