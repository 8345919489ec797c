use crate::store::AppStore;
use byteshop_db::{AppRecord, AppSummary, DbError, NewApp};
use std::sync::Arc;
use tracing::{debug, info};

/// Service for app record operations
///
/// Wraps whichever [`AppStore`] the server was started with, so handlers never
/// see the concrete backend. No field is validated: empty strings are stored
/// as given and identifiers may repeat.
#[derive(Clone)]
pub struct AppService {
    store: Arc<dyn AppStore>,
}

impl AppService {
    /// Create a new `AppService`
    #[must_use]
    pub fn new(store: Arc<dyn AppStore>) -> Self {
        Self { store }
    }

    /// List all apps without their source
    pub async fn list_apps(&self) -> Result<Vec<AppSummary>, DbError> {
        let apps = self.store.list_all().await?;
        debug!("Listed {} apps", apps.len());
        Ok(apps)
    }

    /// Source text of the first app stored under `identifier`
    ///
    /// # Returns
    /// * `Ok(Some(source))` - An app with this identifier exists
    /// * `Ok(None)` - The identifier is empty or nothing matches
    pub async fn get_source(&self, identifier: &str) -> Result<Option<String>, DbError> {
        if identifier.is_empty() {
            return Ok(None);
        }

        let app = self.store.find_by_identifier(identifier).await?;
        if app.is_none() {
            debug!("No app found for identifier '{}'", identifier);
        }
        Ok(app.map(|app| app.source))
    }

    /// Persist an uploaded app
    ///
    /// # Examples
    /// ```ignore
    /// let service = AppService::new(Arc::new(MemoryAppStore::new()));
    /// let app = service.upload_app(NewApp { identifier: "a1".into(), ..Default::default() }).await?;
    /// ```
    pub async fn upload_app(&self, app: NewApp) -> Result<AppRecord, DbError> {
        let record = self.store.insert(app).await?;
        info!(
            "Stored app '{}' (identifier: '{}', {} bytes of source)",
            record.name,
            record.identifier,
            record.source.len()
        );
        Ok(record)
    }
}

impl std::fmt::Debug for AppService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAppStore;
    use byteshop_db::Database;
    use tempfile::{tempdir, TempDir};

    async fn setup_sqlite_service() -> Result<(TempDir, AppService), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(&db_path).await?;
        db.migrate().await?;
        Ok((temp_dir, AppService::new(Arc::new(db))))
    }

    fn example_app() -> NewApp {
        NewApp {
            identifier: "a1".to_string(),
            name: "App One".to_string(),
            description: "desc".to_string(),
            source: "print(1)".to_string(),
        }
    }

    async fn exercise(service: &AppService) -> Result<(), Box<dyn std::error::Error>> {
        assert!(service.list_apps().await?.is_empty());

        let stored = service.upload_app(example_app()).await?;
        assert_eq!(stored.identifier, "a1");

        let apps = service.list_apps().await?;
        assert_eq!(apps, vec![stored.summary()]);

        assert_eq!(
            service.get_source("a1").await?.as_deref(),
            Some("print(1)")
        );
        assert_eq!(service.get_source("missing").await?, None);

        Ok(())
    }

    /// The same behavior holds for both backends
    #[tokio::test]
    async fn test_service_with_sqlite_store() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_sqlite_service().await?;
        exercise(&service).await
    }

    #[tokio::test]
    async fn test_service_with_memory_store() -> Result<(), Box<dyn std::error::Error>> {
        let service = AppService::new(Arc::new(MemoryAppStore::new()));
        exercise(&service).await
    }

    /// An empty identifier never reaches the store, even if an app was
    /// uploaded with an empty identifier
    #[tokio::test]
    async fn test_empty_identifier_is_no_lookup() -> Result<(), Box<dyn std::error::Error>> {
        let service = AppService::new(Arc::new(MemoryAppStore::new()));
        service
            .upload_app(NewApp {
                source: "hidden".to_string(),
                ..NewApp::default()
            })
            .await?;

        assert_eq!(service.get_source("").await?, None);
        assert_eq!(service.list_apps().await?.len(), 1);

        Ok(())
    }
}
