use chrono::FixedOffset;

use admin_cell::{office_name, role_display_name};
use shared_models::{
    Account, Appointment, AppointmentBlock, Availability, Doctor, MedicalRecord, Office,
};
use shared_utils::date_format::{format_date_time, format_short_date, format_time};

pub fn print_appointments(items: &[Appointment], offset: &FixedOffset) {
    if items.is_empty() {
        println!("No hay turnos.");
        return;
    }
    for item in items {
        println!(
            "#{:<5} {} - {}  {:<11} doctor #{} paciente #{}",
            item.id,
            format_date_time(&item.start_at, offset),
            format_time(&item.end_at, offset),
            item.status.label(),
            item.doctor_id,
            item.patient_id,
        );
    }
}

pub fn print_availability(items: &[Availability], offset: &FixedOffset) {
    if items.is_empty() {
        println!("No hay disponibilidad cargada.");
        return;
    }
    for item in items {
        println!(
            "#{:<5} {} - {}  cupos {}  bloques {}/{} libres",
            item.id,
            format_date_time(&item.start_at, offset),
            format_time(&item.end_at, offset),
            item.slots,
            item.free_blocks(),
            item.total_blocks(),
        );
    }
}

pub fn print_blocks(items: &[AppointmentBlock], offset: &FixedOffset) {
    if items.is_empty() {
        println!("No hay turnos libres en los próximos 30 días.");
        return;
    }
    for block in items {
        println!(
            "#{:<5} {} - {}",
            block.id,
            format_date_time(&block.start_at, offset),
            format_time(&block.end_at, offset),
        );
    }
}

pub fn print_records(items: &[MedicalRecord], offset: &FixedOffset) {
    if items.is_empty() {
        println!("Sin registros.");
        return;
    }
    for record in items {
        println!(
            "#{:<5} {}  paciente #{}  {}",
            record.id,
            format_short_date(&record.updated_at, offset),
            record.patient_id,
            record.doctor_name.as_deref().unwrap_or_default(),
        );
        for (label, value) in [
            ("Diagnóstico", &record.diagnosis),
            ("Tratamiento", &record.treatment),
            ("Notas", &record.notes),
        ] {
            if let Some(value) = value {
                println!("       {}: {}", label, value);
            }
        }
    }
}

pub fn print_doctors(items: &[Doctor]) {
    for doctor in items {
        println!(
            "#{:<5} {}  {}",
            doctor.user.id,
            doctor.user.display_name(),
            doctor.specialty.as_deref().unwrap_or_default(),
        );
    }
}

pub fn print_offices(items: &[Office]) {
    for office in items {
        println!(
            "#{:<5} {:<10} {}  {}",
            office.id,
            office.code,
            office.name.as_deref().unwrap_or_default(),
            office.address.as_deref().unwrap_or_default(),
        );
    }
}

pub fn print_accounts(items: &[Account], offices: &[Office]) {
    for account in items {
        let base = account.base();
        let role = account.managed_role().map(|role| role.as_str()).unwrap_or(&base.role);
        let mut line = format!(
            "#{:<5} {:<14} {:<30} {}",
            base.id,
            role_display_name(role),
            base.email,
            base.full_name.as_deref().unwrap_or_default(),
        );
        if let Account::Doctor(doctor) = account {
            line.push_str(&format!("  [{}]", office_name(offices, doctor.office_id)));
        }
        if !base.is_active {
            line.push_str("  (inactivo)");
        }
        println!("{}", line);
    }
}
