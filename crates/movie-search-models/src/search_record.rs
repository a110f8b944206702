use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed search, as written to history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    pub requester_id: i64, // Chat (or CLI user) the search belongs to
    pub query: String,
    pub title: String, // Resolved title, empty when nothing was found
    pub searched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_kp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tmdb: Option<u64>,
}

impl SearchRecord {
    pub fn new(
        requester_id: i64,
        query: impl Into<String>,
        title: impl Into<String>,
        searched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            requester_id,
            query: query.into(),
            title: title.into(),
            searched_at,
            id_kp: None,
            id_tmdb: None,
        }
    }

    pub fn with_ids(mut self, id_kp: Option<u64>, id_tmdb: Option<u64>) -> Self {
        self.id_kp = id_kp;
        self.id_tmdb = id_tmdb;
        self
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}
