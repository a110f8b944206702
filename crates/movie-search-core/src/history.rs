use async_trait::async_trait;
use movie_search_models::{SearchRecord, StatsRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize search record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence boundary for completed searches
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Store one record; concurrent appends never interleave
    async fn append(&self, record: SearchRecord) -> Result<(), HistoryError>;

    /// All records of a requester, in storage order
    async fn load(&self, requester_id: i64) -> Result<Vec<SearchRecord>, HistoryError>;

    async fn clear(&self) -> Result<(), HistoryError>;

    /// Records of a requester, most recent first
    async fn history(&self, requester_id: i64) -> Result<Vec<SearchRecord>, HistoryError> {
        let mut records = self.load(requester_id).await?;
        records.reverse();
        Ok(records)
    }

    async fn stats(&self, requester_id: i64) -> Result<Vec<StatsRecord>, HistoryError> {
        Ok(aggregate_stats(&self.load(requester_id).await?))
    }
}

/// Count searches per resolved title, most searched first
///
/// Titles are grouped by exact, case-sensitive match and records without a
/// title are skipped. Titles with equal counts keep the order in which they
/// first appear in `records`.
pub fn aggregate_stats(records: &[SearchRecord]) -> Vec<StatsRecord> {
    let mut stats: Vec<StatsRecord> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.has_title()) {
        match index.get(record.title.as_str()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(record.title.as_str(), stats.len());
                stats.push(StatsRecord {
                    title: record.title.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Process-local history, lost on exit
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<SearchRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: SearchRecord) -> Result<(), HistoryError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn load(&self, requester_id: i64) -> Result<Vec<SearchRecord>, HistoryError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.requester_id == requester_id).cloned().collect())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.records.write().await.clear();
        Ok(())
    }
}

/// History kept as one JSON object per line
pub struct JsonlHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<SearchRecord>, HistoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("History file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SearchRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping unreadable history line {} in {}: {}",
                    line_no + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    async fn append(&self, record: SearchRecord) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended search '{}' to {}", record.query, self.path.display());
        Ok(())
    }

    async fn load(&self, requester_id: i64) -> Result<Vec<SearchRecord>, HistoryError> {
        let records = self.read_all().await?;
        Ok(records.into_iter().filter(|r| r.requester_id == requester_id).collect())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
