use crate::config::AppConfig;
use crate::users::repo::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Ok(Self::from_parts(Arc::new(UserStore::new()), config))
    }

    pub fn from_parts(users: Arc<UserStore>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    /// Fresh empty store with default config, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(Arc::new(UserStore::new()), Arc::new(AppConfig::default()))
    }
}
