use serde::{Deserialize, Serialize};

/// A single movie as returned by one catalog, or reconciled from several
///
/// Every field is optional because each catalog exposes a different subset.
/// `links_to_watch` holds one slot per configured watch site, in site order,
/// and is the only field filled after reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_kp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tmdb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_imdb: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_kp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_imdb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_kp: Option<String>,
    #[serde(default)]
    pub links_to_watch: Vec<Option<String>>,
}

/// True when a text value is missing or whitespace only
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn fill_text(target: &mut Option<String>, other: &Option<String>) {
    if is_blank(target) && !is_blank(other) {
        *target = other.clone();
    }
}

fn fill_value<T: Copy>(target: &mut Option<T>, other: Option<T>) {
    if target.is_none() {
        *target = other;
    }
}

impl MovieRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_imdb_id(&self) -> bool {
        !is_blank(&self.id_imdb)
    }

    /// Check whether both records carry the same non-empty IMDb id
    ///
    /// This is the only identity used to decide that two catalogs describe
    /// the same movie; titles are never compared.
    pub fn same_imdb_id(&self, other: &MovieRecord) -> bool {
        if !self.has_imdb_id() || !other.has_imdb_id() {
            return false;
        }
        match (self.id_imdb.as_deref(), other.id_imdb.as_deref()) {
            (Some(a), Some(b)) => a.trim() == b.trim(),
            _ => false,
        }
    }

    /// Fill every empty field from `other`, keeping existing non-empty values
    pub fn fill_missing_from(&mut self, other: &MovieRecord) {
        fill_text(&mut self.title, &other.title);
        fill_text(&mut self.original_title, &other.original_title);
        fill_text(&mut self.description, &other.description);
        fill_text(&mut self.poster, &other.poster);
        fill_value(&mut self.id_kp, other.id_kp);
        fill_value(&mut self.id_tmdb, other.id_tmdb);
        fill_text(&mut self.id_imdb, &other.id_imdb);
        fill_value(&mut self.rating_kp, other.rating_kp);
        fill_value(&mut self.rating_imdb, other.rating_imdb);
        fill_text(&mut self.link_kp, &other.link_kp);

        if self.links_to_watch.len() < other.links_to_watch.len() {
            self.links_to_watch.resize(other.links_to_watch.len(), None);
        }
        for (slot, link) in self.links_to_watch.iter_mut().zip(&other.links_to_watch) {
            fill_text(slot, link);
        }
    }

    /// Title used for display, link lookups and history
    ///
    /// Falls back to the original title when the localized one is missing.
    pub fn display_title(&self) -> &str {
        [&self.title, &self.original_title]
            .into_iter()
            .find(|t| !is_blank(*t))
            .and_then(|t| t.as_deref())
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_imdb_id(mut self, id_imdb: impl Into<String>) -> Self {
        self.id_imdb = Some(id_imdb.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_imdb_id_requires_both_non_empty() {
        let a = MovieRecord::new().with_imdb_id("tt100");
        let b = MovieRecord::new().with_imdb_id("tt100");
        let blank = MovieRecord::new().with_imdb_id("  ");
        let missing = MovieRecord::new();

        assert!(a.same_imdb_id(&b));
        assert!(!a.same_imdb_id(&blank));
        assert!(!blank.same_imdb_id(&blank));
        assert!(!missing.same_imdb_id(&missing));
        assert!(!a.same_imdb_id(&MovieRecord::new().with_imdb_id("tt200")));
        assert!(a.same_imdb_id(&MovieRecord::new().with_imdb_id(" tt100 ")));
    }

    #[test]
    fn test_has_imdb_id_ignores_blank() {
        assert!(MovieRecord::new().with_imdb_id("tt100").has_imdb_id());
        assert!(!MovieRecord::new().with_imdb_id(" ").has_imdb_id());
        assert!(!MovieRecord::new().has_imdb_id());
    }

    #[test]
    fn test_fill_missing_from_keeps_existing_values() {
        let mut a = MovieRecord {
            title: Some("Начало".to_string()),
            description: Some("".to_string()),
            rating_kp: Some(8.7),
            ..MovieRecord::default()
        };
        let b = MovieRecord {
            title: Some("Inception".to_string()),
            description: Some("A thief who steals corporate secrets".to_string()),
            rating_imdb: Some(8.8),
            rating_kp: Some(1.0),
            id_tmdb: Some(27205),
            ..MovieRecord::default()
        };

        a.fill_missing_from(&b);

        assert_eq!(a.title.as_deref(), Some("Начало"));
        assert_eq!(a.description.as_deref(), Some("A thief who steals corporate secrets"));
        assert_eq!(a.rating_kp, Some(8.7));
        assert_eq!(a.rating_imdb, Some(8.8));
        assert_eq!(a.id_tmdb, Some(27205));
    }

    #[test]
    fn test_display_title_falls_back_to_original() {
        let movie = MovieRecord {
            title: Some(" ".to_string()),
            original_title: Some("Inception".to_string()),
            ..MovieRecord::default()
        };
        assert_eq!(movie.display_title(), "Inception");
        assert_eq!(MovieRecord::new().display_title(), "");
    }

    #[test]
    fn test_links_to_watch_default_when_missing_in_json() {
        let movie: MovieRecord = serde_json::from_str(r#"{"title":"Heat"}"#).unwrap();
        assert!(movie.links_to_watch.is_empty());
        assert_eq!(movie.title.as_deref(), Some("Heat"));
    }
}
