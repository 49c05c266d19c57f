use shared_models::{ManagedRole, Office};
use shared_utils::tabs::TabConfig;

pub const NOT_ASSIGNED: &str = "Sin asignar";
pub const OFFICE_NOT_FOUND: &str = "Consultorio no encontrado";

pub const ADMIN_TABS: [TabConfig; 4] = [
    TabConfig::new("users", "Usuarios", "group"),
    TabConfig::new("doctors", "Doctores", "medical_services"),
    TabConfig::new("offices", "Consultorios", "meeting_room"),
    TabConfig::new("settings", "Configuración", "settings"),
];

pub fn role_display_name(role: &str) -> &str {
    match ManagedRole::from_wire(role) {
        Some(ManagedRole::Patient) => "Paciente",
        Some(ManagedRole::Doctor) => "Doctor",
        Some(ManagedRole::Admin) => "Administrador",
        None => role,
    }
}

pub fn role_icon(role: &str) -> &'static str {
    match ManagedRole::from_wire(role) {
        Some(ManagedRole::Doctor) => "medical_services",
        Some(ManagedRole::Admin) => "admin_panel_settings",
        _ => "person",
    }
}

/// Label for a doctor's office: its name, else its code.
pub fn office_name(offices: &[Office], office_id: Option<i64>) -> &str {
    let Some(office_id) = office_id.filter(|id| *id != 0) else {
        return NOT_ASSIGNED;
    };
    offices
        .iter()
        .find(|office| office.id == office_id)
        .map(Office::display_name)
        .unwrap_or(OFFICE_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office(id: i64, code: &str, name: Option<&str>) -> Office {
        Office {
            id,
            code: code.into(),
            name: name.map(String::from),
            address: None,
        }
    }

    #[test]
    fn role_labels_and_icons() {
        assert_eq!(role_display_name("patient"), "Paciente");
        assert_eq!(role_display_name("doctor"), "Doctor");
        assert_eq!(role_display_name("admin"), "Administrador");
        assert_eq!(role_display_name("nurse"), "nurse");

        assert_eq!(role_icon("doctor"), "medical_services");
        assert_eq!(role_icon("admin"), "admin_panel_settings");
        assert_eq!(role_icon("nurse"), "person");
    }

    #[test]
    fn office_lookup() {
        let offices = vec![office(1, "C-101", Some("Consultorio Norte")), office(2, "C-102", None)];

        assert_eq!(office_name(&offices, None), NOT_ASSIGNED);
        assert_eq!(office_name(&offices, Some(1)), "Consultorio Norte");
        assert_eq!(office_name(&offices, Some(2)), "C-102");
        assert_eq!(office_name(&offices, Some(9)), OFFICE_NOT_FOUND);
    }
}
