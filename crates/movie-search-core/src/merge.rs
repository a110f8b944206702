use movie_search_models::MovieRecord;
use tracing::debug;

/// Return the first candidate that is present, in declared order
pub fn first_present<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}

/// Reconcile the answers of two catalogs
///
/// The two records are combined only when they share a non-empty IMDb id.
/// In every other case the higher priority answer (`a`) wins unchanged, or
/// `b` if `a` found nothing.
pub fn merge_movies(a: Option<MovieRecord>, b: Option<MovieRecord>) -> Option<MovieRecord> {
    match (a, b) {
        (Some(mut a), Some(b)) if a.same_imdb_id(&b) => {
            debug!("Merging provider results sharing IMDb id {:?}", a.id_imdb);
            a.fill_missing_from(&b);
            Some(a)
        }
        (a, b) => first_present([a, b]),
    }
}

/// Fold `merge_movies` over provider answers in priority order
pub fn merge_ranked(candidates: Vec<Option<MovieRecord>>) -> Option<MovieRecord> {
    candidates.into_iter().fold(None, |merged, next| match merged {
        None => next,
        Some(current) => merge_movies(Some(current), next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp_record() -> MovieRecord {
        MovieRecord {
            title: Some("Начало".to_string()),
            id_kp: Some(447301),
            id_imdb: Some("tt1375666".to_string()),
            rating_kp: Some(8.7),
            rating_imdb: Some(8.8),
            link_kp: Some("https://www.kinopoisk.ru/film/447301/".to_string()),
            poster: Some("https://kp.example/poster.jpg".to_string()),
            ..MovieRecord::default()
        }
    }

    fn tmdb_record() -> MovieRecord {
        MovieRecord {
            title: Some("Inception".to_string()),
            original_title: Some("Inception".to_string()),
            description: Some("Cobb steals secrets from dreams.".to_string()),
            id_tmdb: Some(27205),
            id_imdb: Some("tt1375666".to_string()),
            poster: Some("https://tmdb.example/poster.jpg".to_string()),
            ..MovieRecord::default()
        }
    }

    #[test]
    fn test_first_present() {
        assert_eq!(first_present([None::<u8>, None]), None);
        assert_eq!(first_present([None, Some(2), Some(3)]), Some(2));
        assert_eq!(first_present(Vec::<Option<u8>>::new()), None);
    }

    #[test]
    fn test_merge_absent_only_when_both_absent() {
        assert!(merge_movies(None, None).is_none());
        assert!(merge_movies(Some(kp_record()), None).is_some());
        assert!(merge_movies(None, Some(tmdb_record())).is_some());
    }

    #[test]
    fn test_single_answer_is_returned_unmodified() {
        assert_eq!(merge_movies(Some(kp_record()), None), Some(kp_record()));
        assert_eq!(merge_movies(None, Some(tmdb_record())), Some(tmdb_record()));
    }

    #[test]
    fn test_scenario_shared_imdb_id_fills_gaps_from_second() {
        let a = MovieRecord::new().with_title("Начало").with_imdb_id("tt100");
        let b = MovieRecord {
            rating_imdb: Some(8.8),
            ..MovieRecord::new().with_title("Inception").with_imdb_id("tt100")
        };

        let merged = merge_movies(Some(a), Some(b)).unwrap();
        assert_eq!(merged.title.as_deref(), Some("Начало"));
        assert_eq!(merged.rating_imdb, Some(8.8));
        assert_eq!(merged.id_imdb.as_deref(), Some("tt100"));
    }

    #[test]
    fn test_merge_keeps_every_non_empty_field() {
        let merged = merge_movies(Some(kp_record()), Some(tmdb_record())).unwrap();

        assert_eq!(merged.title.as_deref(), Some("Начало"));
        assert_eq!(merged.original_title.as_deref(), Some("Inception"));
        assert_eq!(merged.description.as_deref(), Some("Cobb steals secrets from dreams."));
        assert_eq!(merged.poster.as_deref(), Some("https://kp.example/poster.jpg"));
        assert_eq!(merged.id_kp, Some(447301));
        assert_eq!(merged.id_tmdb, Some(27205));
        assert_eq!(merged.rating_kp, Some(8.7));
        assert_eq!(merged.rating_imdb, Some(8.8));
        assert!(merged.link_kp.is_some());
    }

    #[test]
    fn test_scenario_different_imdb_ids_keep_first() {
        let a = MovieRecord::new().with_imdb_id("tt1");
        let b = MovieRecord::new().with_title("Other").with_imdb_id("tt2");
        assert_eq!(merge_movies(Some(a.clone()), Some(b)), Some(a));
    }

    #[test]
    fn test_missing_or_blank_imdb_id_keeps_first() {
        let a = MovieRecord::new().with_title("Heat");
        let b = tmdb_record();
        assert_eq!(merge_movies(Some(a.clone()), Some(b)), Some(a));

        let blank = MovieRecord::new().with_title("Heat").with_imdb_id("");
        let b_blank = MovieRecord::new().with_title("Heat 2").with_imdb_id("");
        assert_eq!(merge_movies(Some(blank.clone()), Some(b_blank)), Some(blank));
    }

    #[test]
    fn test_merge_ranked_matches_pairwise_merge() {
        let pairs = [
            (None, None),
            (Some(kp_record()), None),
            (None, Some(tmdb_record())),
            (Some(kp_record()), Some(tmdb_record())),
            (Some(MovieRecord::new().with_imdb_id("tt1")), Some(tmdb_record())),
        ];
        for (a, b) in pairs {
            assert_eq!(merge_ranked(vec![a.clone(), b.clone()]), merge_movies(a, b));
        }
        assert!(merge_ranked(Vec::new()).is_none());
    }
}
