use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::WeeklySurveyEntry;

/// Append-only sink for weekly workload submissions.
///
/// Entries are never read back by the survey routes.
#[async_trait]
pub trait WeeklyEntryStore: Send + Sync {
    async fn append_weekly_entry(&self, entry: &WeeklySurveyEntry) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        entries: Mutex<Vec<WeeklySurveyEntry>>,
    }

    impl MemoryStore {
        pub fn entries(&self) -> Vec<WeeklySurveyEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeeklyEntryStore for MemoryStore {
        async fn append_weekly_entry(&self, entry: &WeeklySurveyEntry) -> Result<(), StoreError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    pub struct FailingStore;

    #[async_trait]
    impl WeeklyEntryStore for FailingStore {
        async fn append_weekly_entry(&self, _entry: &WeeklySurveyEntry) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }
}
