use serde::{Deserialize, Serialize};

/// Number of searches that resolved to one title, derived from history at read time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsRecord {
    pub title: String,
    pub count: usize,
}
