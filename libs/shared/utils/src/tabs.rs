/// A tab in a dashboard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Option<&'static str>,
    pub disabled: bool,
}

impl TabConfig {
    pub const fn new(id: &'static str, label: &'static str, icon: &'static str) -> Self {
        Self {
            id,
            label,
            icon: Some(icon),
            disabled: false,
        }
    }
}

/// Index of the tab with `id`, skipping disabled tabs.
pub fn tab_index(tabs: &[TabConfig], id: &str) -> Option<usize> {
    tabs.iter().position(|tab| tab.id == id && !tab.disabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_enabled_tabs() {
        let mut tabs = [
            TabConfig::new("profile", "Mi Perfil", "person"),
            TabConfig::new("records", "Historial Médico", "medical_services"),
        ];
        assert_eq!(tab_index(&tabs, "records"), Some(1));

        tabs[1].disabled = true;
        assert_eq!(tab_index(&tabs, "records"), None);
        assert_eq!(tab_index(&tabs, "missing"), None);
    }
}
