//! End-to-end tests for the blender on the built-in 25-book catalog.

use catalog::{Book, BookId, RatingMap};
use engine::{BlendMode, BlendWeights, Blender, EngineConfig, EngineContext, Strategy};
use std::collections::HashSet;
use std::sync::Arc;

fn create_test_blender(config: EngineConfig) -> Blender {
    let context = EngineContext::sample(config).expect("sample context");
    Blender::new(Arc::new(context))
}

fn scenario_ratings() -> RatingMap {
    [(1, 5.0), (3, 4.0), (6, 5.0)].into_iter().collect()
}

fn ids(books: &[Book]) -> Vec<BookId> {
    books.iter().map(|b| b.id).collect()
}

#[test]
fn test_hybrid_scenario() {
    let blender = create_test_blender(EngineConfig::default());
    let books = blender.hybrid(&scenario_ratings(), 5).unwrap();

    assert_eq!(books.len(), 5);
    for rated in [1, 3, 6] {
        assert!(!ids(&books).contains(&rated));
    }
    assert!(books.windows(2).all(|w| w[0].rating >= w[1].rating));

    let unique: HashSet<BookId> = ids(&books).into_iter().collect();
    assert_eq!(unique.len(), 5);
}

#[test]
fn test_hybrid_without_ratings_is_popular() {
    let blender = create_test_blender(EngineConfig::default());
    for n in [1, 5, 6, 30] {
        assert_eq!(
            blender.hybrid(&RatingMap::new(), n).unwrap(),
            blender.popular(n).unwrap()
        );
    }
}

#[test]
fn test_popular_ordering() {
    let blender = create_test_blender(EngineConfig::default());
    let books = blender.popular(6).unwrap();
    assert_eq!(ids(&books), vec![4, 12, 17, 25, 1, 5]);

    let everything = blender.popular(100).unwrap();
    assert_eq!(everything.len(), 25);
    assert!(everything.windows(2).all(|w| w[0].rating >= w[1].rating));
}

#[test]
fn test_no_strategy_returns_rated_books() {
    let ratings: RatingMap = [(1, 5.0), (2, 4.5), (10, 2.0), (17, 4.0), (9999, 5.0)]
        .into_iter()
        .collect();

    let weighted = EngineConfig::new().with_blend(BlendMode::Weighted(BlendWeights::default()));
    for config in [EngineConfig::default(), weighted] {
        let blender = create_test_blender(config);
        for strategy in Strategy::ALL {
            for n in [1, 5, 25] {
                let books = blender.recommend(strategy, &ratings, n).unwrap();
                assert!(books.len() <= n);
                assert!(books.iter().all(|b| !ratings.contains_key(&b.id)));
            }
        }
    }
}

#[test]
fn test_recommendations_are_idempotent() {
    let blender = create_test_blender(EngineConfig::default());
    let ratings = scenario_ratings();
    for strategy in Strategy::ALL {
        let first = blender.recommend(strategy, &ratings, 6).unwrap();
        let second = blender.recommend(strategy, &ratings, 6).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_similar_to_first_book() {
    let blender = create_test_blender(EngineConfig::default());
    let books = blender.similar_books(1, 3).unwrap();
    assert!(books.len() <= 3);
    assert!(!ids(&books).contains(&1));
}

#[test]
fn test_unknown_book_lookups() {
    let blender = create_test_blender(EngineConfig::default());
    assert!(blender.similar_books(9999, 3).unwrap_err().is_not_found());
    assert!(blender.neighbors(9999, 3).unwrap_err().is_not_found());
    assert!(blender.context().catalog.book(9999).unwrap_err().is_not_found());
}

#[test]
fn test_unknown_rated_ids_are_ignored() {
    let blender = create_test_blender(EngineConfig::default());
    let ratings: RatingMap = [(9999, 5.0)].into_iter().collect();

    // Only unknown ids: nothing is liked, so no strategy has a seed
    assert!(blender.hybrid(&ratings, 4).unwrap().is_empty());
    assert!(blender.content_based(&ratings, 4).unwrap().is_empty());
    assert!(blender.preference_based(&ratings, 4).unwrap().is_empty());
}

#[test]
fn test_hybrid_with_only_low_ratings_is_empty() {
    let blender = create_test_blender(EngineConfig::default());
    let ratings: RatingMap = [(1, 2.0), (3, 3.0)].into_iter().collect();

    assert!(blender.content_based(&ratings, 5).unwrap().is_empty());
    assert!(blender.preference_based(&ratings, 5).unwrap().is_empty());
    assert!(blender.hybrid(&ratings, 5).unwrap().is_empty());
}

#[test]
fn test_weighted_blend_scenario() {
    let config = EngineConfig::new().with_blend(BlendMode::Weighted(BlendWeights::default()));
    let blender = create_test_blender(config);
    let books = blender.hybrid(&scenario_ratings(), 6).unwrap();

    assert_eq!(books.len(), 6);
    for rated in [1, 3, 6] {
        assert!(!ids(&books).contains(&rated));
    }
}

#[test]
fn test_json_round_trip() {
    let blender = create_test_blender(EngineConfig::default());
    let body = r#"{"ratings": {"1": 5, "3": 4, "6": 5}, "method": "hybrid", "n": 5}"#;
    let response = blender.handle_json(body).unwrap();

    let books: Vec<serde_json::Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(books.len(), 5);
    for book in &books {
        assert!(book.get("book_id").is_some());
        assert!(book.get("title").is_some());
    }
}

#[test]
fn test_json_rejects_bad_requests() {
    let blender = create_test_blender(EngineConfig::default());
    assert!(blender.handle_json(r#"{"ratings": {"x": 5}}"#).unwrap_err().is_validation());
    assert!(blender.handle_json(r#"{"n": 0}"#).is_err());
    assert!(blender.handle_json("not json").is_err());
}
