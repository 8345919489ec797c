use serde::Serialize;
use sqlx::FromRow;

/// A stored app record
///
/// `id` and `created_at` are storage bookkeeping and never leave the server.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AppRecord {
    pub id: String,
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub created_at: i64,
}

impl AppRecord {
    /// Build a record from upload fields, assigning a fresh id and timestamp
    #[must_use]
    pub fn from_new(app: NewApp) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            identifier: app.identifier,
            name: app.name,
            description: app.description,
            source: app.source,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Public projection of this record (everything except the source)
    #[must_use]
    pub fn summary(&self) -> AppSummary {
        AppSummary {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Fields supplied by an upload. Empty strings are accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewApp {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub source: String,
}

/// Listing entry for an app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AppSummary {
    pub identifier: String,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_assigns_bookkeeping() {
        let record = AppRecord::from_new(NewApp {
            identifier: "a1".to_string(),
            name: "App One".to_string(),
            description: "desc".to_string(),
            source: "print(1)".to_string(),
        });

        assert!(!record.id.is_empty());
        assert!(record.created_at > 0);
        assert_eq!(record.source, "print(1)");
    }

    #[test]
    fn test_summary_serializes_without_source() {
        let record = AppRecord::from_new(NewApp {
            identifier: "a1".to_string(),
            name: "App One".to_string(),
            description: "desc".to_string(),
            source: "print(1)".to_string(),
        });

        let json = serde_json::to_string(&record.summary()).unwrap();
        assert_eq!(
            json,
            r#"{"identifier":"a1","name":"App One","description":"desc"}"#
        );
    }
}
