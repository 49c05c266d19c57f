use shared_api::ApiClient;
use shared_utils::tabs::{tab_index, TabConfig};

use crate::doctors::DoctorManagement;
use crate::models::ADMIN_TABS;
use crate::offices::OfficeManagement;
use crate::services::AdminService;
use crate::settings::SystemSettingsPanel;
use crate::users::UserManagement;

/// Admin dashboard. Each tab is loaded the first time it is selected and
/// again on later selections until a load succeeds.
pub struct AdminShell {
    pub admins: AdminService,
    pub users: UserManagement,
    pub doctors: DoctorManagement,
    pub offices: OfficeManagement,
    pub settings: SystemSettingsPanel,
    active_tab: usize,
    loaded: [bool; ADMIN_TABS.len()],
}

impl AdminShell {
    pub fn new(api: ApiClient) -> Self {
        Self {
            admins: AdminService::new(api.clone()),
            users: UserManagement::new(api.clone()),
            doctors: DoctorManagement::new(api.clone()),
            offices: OfficeManagement::new(api.clone()),
            settings: SystemSettingsPanel::new(api),
            active_tab: 0,
            loaded: [false; ADMIN_TABS.len()],
        }
    }

    pub fn tabs(&self) -> &'static [TabConfig] {
        &ADMIN_TABS
    }

    pub fn active_tab(&self) -> &'static TabConfig {
        &ADMIN_TABS[self.active_tab]
    }

    /// Unknown or disabled tab ids leave the selection unchanged.
    pub async fn select_tab(&mut self, id: &str) -> bool {
        let Some(index) = tab_index(&ADMIN_TABS, id) else {
            return false;
        };
        self.active_tab = index;
        if !self.loaded[index] {
            self.reload_active().await;
        }
        true
    }

    pub async fn reload_active(&mut self) {
        match ADMIN_TABS[self.active_tab].id {
            "users" => self.users.load().await,
            "doctors" => self.doctors.load().await,
            "offices" => self.offices.load_offices().await,
            _ => self.settings.load().await,
        }
        self.loaded[self.active_tab] = self.active_error().is_none();
    }

    /// Error of the active tab, if any.
    pub fn active_error(&self) -> Option<&str> {
        match ADMIN_TABS[self.active_tab].id {
            "users" => self.users.error.as_deref(),
            "doctors" => self.doctors.error.as_deref(),
            "offices" => self.offices.error.as_deref(),
            _ => self.settings.error.as_deref(),
        }
    }
}
