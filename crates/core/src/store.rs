use async_trait::async_trait;
use byteshop_db::{AppRecord, AppSummary, Database, DbError, NewApp};
use tokio::sync::RwLock;

/// Storage backend for app records
///
/// Listing is in insertion order and lookups return the earliest inserted
/// match, since identifiers are not unique.
#[async_trait]
pub trait AppStore: Send + Sync {
    /// All apps without their source
    async fn list_all(&self) -> Result<Vec<AppSummary>, DbError>;

    /// First app stored under `identifier`
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AppRecord>, DbError>;

    /// Persist a new app
    async fn insert(&self, app: NewApp) -> Result<AppRecord, DbError>;
}

#[async_trait]
impl AppStore for Database {
    async fn list_all(&self) -> Result<Vec<AppSummary>, DbError> {
        self.apps().list_summaries().await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AppRecord>, DbError> {
        self.apps().find_by_identifier(identifier).await
    }

    async fn insert(&self, app: NewApp) -> Result<AppRecord, DbError> {
        self.apps().create(app).await
    }
}

/// Process-local store; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryAppStore {
    records: RwLock<Vec<AppRecord>>,
}

impl MemoryAppStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppStore for MemoryAppStore {
    async fn list_all(&self) -> Result<Vec<AppSummary>, DbError> {
        let records = self.records.read().await;
        Ok(records.iter().map(AppRecord::summary).collect())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AppRecord>, DbError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|record| record.identifier == identifier)
            .cloned())
    }

    async fn insert(&self, app: NewApp) -> Result<AppRecord, DbError> {
        let record = AppRecord::from_new(app);
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}
