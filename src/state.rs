use crate::config::AppConfig;
use crate::db::ConnectionManager;
use crate::store::{CalorieStore, MongoCalorieStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CalorieStore>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        let conn = ConnectionManager::new(&config.mongo);
        let store = Arc::new(MongoCalorieStore::new(conn)) as Arc<dyn CalorieStore>;
        Self::from_parts(Arc::new(config), store)
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn CalorieStore>) -> Self {
        Self { config, store }
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn CalorieStore>) -> Self {
        use crate::config::{MongoConfig, DEFAULT_DATABASE, DEFAULT_MONGODB_URI};

        let config = Arc::new(AppConfig {
            mongo: MongoConfig {
                uri: DEFAULT_MONGODB_URI.into(),
                database: DEFAULT_DATABASE.into(),
            },
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(config, store)
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::store::memory::MemoryCalorieStore;

        Self::with_store(Arc::new(MemoryCalorieStore::default()))
    }
}
