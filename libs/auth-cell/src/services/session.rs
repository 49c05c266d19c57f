use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, warn};

use shared_api::TokenProvider;
use shared_models::{AppError, AuthenticatedUser, UserRole};

pub const STORAGE_TOKEN_KEY: &str = "turnoplus.token";
pub const STORAGE_USER_KEY: &str = "turnoplus.user";

/// Key/value persistence for the session, shaped after browser storage.
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
    }
}

/// Stores all keys as one JSON object in a file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return HashMap::new(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
            HashMap::new()
        })
    }

    fn write_items(&self, items: &HashMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Session(format!("cannot create {}: {}", parent.display(), e)))?;
        }
        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Session(format!("cannot write {}: {}", self.path.display(), e)))
    }
}

impl SessionStore for FileSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read_items().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.read_items();
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.read_items();
        if items.remove(key).is_some() {
            if let Err(e) = self.write_items(&items) {
                warn!("Failed to remove {} from session file: {}", key, e);
            }
        }
    }
}

/// The signed-in user, shared by the auth service, the guards and the HTTP
/// client's token injection.
pub struct SessionState {
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<AuthenticatedUser>>,
}

impl SessionState {
    /// Restores whatever session the store holds. A partial or corrupt
    /// session is wiped.
    pub fn load(store: Arc<dyn SessionStore>) -> Self {
        let user = load_stored_user(store.as_ref());
        Self {
            store,
            user: RwLock::new(user),
        }
    }

    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|user| user.role)
    }

    pub fn persist(&self, user: AuthenticatedUser) -> Result<(), AppError> {
        self.store.set_item(STORAGE_TOKEN_KEY, &user.token)?;
        self.store
            .set_item(STORAGE_USER_KEY, &serde_json::to_string(&user)?)?;
        debug!("Session persisted for user {}", user.id);
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
        Ok(())
    }

    pub fn clear(&self) {
        self.store.remove_item(STORAGE_TOKEN_KEY);
        self.store.remove_item(STORAGE_USER_KEY);
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl TokenProvider for SessionState {
    fn token(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|user| user.token.clone())
    }

    fn token_type(&self) -> String {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|user| user.token_type.clone())
            .unwrap_or_else(|| "bearer".to_string())
    }
}

fn load_stored_user(store: &dyn SessionStore) -> Option<AuthenticatedUser> {
    let stored = store.get_item(STORAGE_USER_KEY)?;
    let token = store.get_item(STORAGE_TOKEN_KEY)?;

    match serde_json::from_str::<AuthenticatedUser>(&stored) {
        Ok(mut user) => {
            user.token = token;
            Some(user)
        }
        Err(e) => {
            warn!("Discarding corrupted session: {}", e);
            store.remove_item(STORAGE_TOKEN_KEY);
            store.remove_item(STORAGE_USER_KEY);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_session() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 12,
            email: "doc@turnoplus.test".into(),
            full_name: Some("Dra. Ruiz".into()),
            role: UserRole::Doctor,
            token: "tok-12".into(),
            token_type: "bearer".into(),
        }
    }

    #[test]
    fn persisted_session_survives_reload() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let session = SessionState::load(store.clone());
        assert!(!session.is_authenticated());

        session.persist(doctor_session()).unwrap();

        let reloaded = SessionState::load(store);
        assert_eq!(reloaded.user(), Some(doctor_session()));
        assert_eq!(reloaded.token().as_deref(), Some("tok-12"));
        assert_eq!(reloaded.role(), Some(UserRole::Doctor));
    }

    #[test]
    fn stored_user_without_token_is_anonymous() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .set_item(STORAGE_USER_KEY, r#"{"id":1,"email":"a@b.c","role":"user"}"#)
            .unwrap();

        let session = SessionState::load(store);
        assert!(session.user().is_none());
    }

    #[test]
    fn corrupted_session_is_wiped() {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item(STORAGE_TOKEN_KEY, "tok").unwrap();
        store.set_item(STORAGE_USER_KEY, "{not json").unwrap();

        let session = SessionState::load(store.clone());
        assert!(session.user().is_none());
        assert!(store.get_item(STORAGE_TOKEN_KEY).is_none());
        assert!(store.get_item(STORAGE_USER_KEY).is_none());
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item(STORAGE_TOKEN_KEY, "tok").unwrap();
        store
            .set_item(
                STORAGE_USER_KEY,
                r#"{"id":1,"email":"a@b.c","fullName":null,"role":"admin"}"#,
            )
            .unwrap();

        let session = SessionState::load(store);
        assert_eq!(session.token_type(), "bearer");

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }
}
