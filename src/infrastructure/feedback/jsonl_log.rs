//! Line-delimited JSON feedback log

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::DomainError;
use crate::domain::feedback::{FeedbackLog, FeedbackRecord};

/// Feedback log persisted as one JSON object per line, appended atomically
/// under a single-writer mutex. Concurrent feedback submissions serialize on
/// the lock instead of losing writes to a read-modify-rewrite race.
#[derive(Debug)]
pub struct JsonlFeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlFeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, oldest first. Not used by the request path;
    /// the log is an audit trail.
    pub async fn read_all(&self) -> Result<Vec<FeedbackRecord>, DomainError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read feedback log: {}",
                    e
                )));
            }
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    DomainError::storage(format!("Corrupt feedback log entry: {}", e))
                })
            })
            .collect()
    }
}

#[async_trait]
impl FeedbackLog for JsonlFeedbackLog {
    async fn append(&self, record: &FeedbackRecord) -> Result<(), DomainError> {
        let line = serde_json::to_string(record).map_err(|e| {
            DomainError::storage(format!("Failed to serialize feedback record: {}", e))
        })?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DomainError::storage(format!("Failed to create log directory: {}", e))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open feedback log: {}", e)))?;

        file.write_all(format!("{}\n", line).as_bytes())
            .await
            .map_err(|e| DomainError::storage(format!("Failed to append feedback: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to flush feedback log: {}", e)))?;

        Ok(())
    }
}
