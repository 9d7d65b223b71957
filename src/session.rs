//! Application context and the signed-in session.

use crate::api::{ApiClient, ApiError};
use crate::auth::{self, LoginForm, LOGIN_FAILED};
use crate::config::Config;
use crate::i18n::LanguagePreference;
use crate::notify::Notifications;
use crate::record::User;
use crate::storage::{LocalStore, TOKEN_KEY};
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Authentication state. A stored token means a signed-in session.
///
/// The token is read from the store on every check, so a token written by
/// another handle on the same store is seen immediately.
pub struct Session {
    store: Arc<LocalStore>,
    user: Mutex<Option<User>>,
}

impl Session {
    pub fn restore(store: Arc<LocalStore>) -> Self {
        let session = Self {
            store,
            user: Mutex::new(None),
        };
        if session.is_authenticated() {
            info!("Restored session from stored token");
        }
        session
    }

    fn lock(&self) -> MutexGuard<'_, Option<User>> {
        self.user.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(TOKEN_KEY).is_some_and(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        self.lock().clone()
    }

    /// "Welcome, <name>" for the dashboard header.
    pub fn greeting(&self) -> String {
        let user = self.user().unwrap_or_default();
        format!("Welcome, {}", user.display_name())
    }

    /// Log in and persist the issued token. Outcome is also posted to `notices`.
    pub async fn login(&self, client: &ApiClient, form: &LoginForm, notices: &Notifications) -> Result<(), ApiError> {
        let outcome = match auth::login(client, form).await {
            Ok(outcome) => outcome,
            Err(e) => {
                notices.error(e.user_message(LOGIN_FAILED));
                return Err(e);
            }
        };

        if let Some(token) = &outcome.token {
            if let Err(e) = self.store.set(TOKEN_KEY, token) {
                warn!("Could not persist auth token: {:#}", e);
            }
        }

        *self.lock() = outcome.user;
        notices.success(outcome.message);
        Ok(())
    }

    pub fn logout(&self, notices: &Notifications) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!("Could not clear auth token: {:#}", e);
        }
        *self.lock() = None;
        notices.success("Logged out");
    }
}

/// Everything the site and dashboard need, passed explicitly.
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<LocalStore>,
    pub client: ApiClient,
    pub notices: Notifications,
    pub session: Session,
    pub language: Mutex<LanguagePreference>,
}

impl AppContext {
    /// Open the persisted state file named by the config.
    pub fn open(config: Config) -> Result<Self> {
        let store = LocalStore::open(&config.state_file)
            .with_context(|| format!("Failed to open state file {}", config.state_file.display()))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: Config, store: Arc<LocalStore>) -> Self {
        let client = ApiClient::new(&config, Arc::clone(&store));
        Self {
            config: Arc::new(config),
            client,
            notices: Notifications::new(),
            session: Session::restore(Arc::clone(&store)),
            language: Mutex::new(LanguagePreference::restore(Arc::clone(&store))),
            store,
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<(), ApiError> {
        self.session.login(&self.client, form, &self.notices).await
    }

    pub fn logout(&self) {
        self.session.logout(&self.notices);
    }
}
