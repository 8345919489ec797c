use crate::error::Result;
use crate::models::{AppRecord, AppSummary, NewApp};
use crate::Database;

/// Repository for app record operations
pub struct AppRepository<'a> {
    db: &'a Database,
}

impl<'a> AppRepository<'a> {
    /// Create a new `AppRepository`
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a new app record. Duplicate identifiers are allowed.
    pub async fn create(&self, app: NewApp) -> Result<AppRecord> {
        let record = AppRecord::from_new(app);

        sqlx::query_as::<_, AppRecord>(
            "INSERT INTO apps (id, identifier, name, description, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&record.id)
        .bind(&record.identifier)
        .bind(&record.name)
        .bind(&record.description)
        .bind(&record.source)
        .bind(record.created_at)
        .fetch_one(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// List every app without its source, in insertion order
    pub async fn list_summaries(&self) -> Result<Vec<AppSummary>> {
        sqlx::query_as::<_, AppSummary>(
            "SELECT identifier, name, description FROM apps ORDER BY rowid ASC",
        )
        .fetch_all(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// Get the earliest stored app with the given identifier
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AppRecord>> {
        sqlx::query_as::<_, AppRecord>(
            "SELECT * FROM apps WHERE identifier = ? ORDER BY rowid ASC LIMIT 1",
        )
        .bind(identifier)
        .fetch_optional(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// Number of stored apps
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM apps")
            .fetch_one(&self.db.pool)
            .await?;

        Ok(count)
    }
}
