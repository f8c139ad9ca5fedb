//! Result normalizer and sorter behaviour across result shapes.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use e2e_tests::{fallback_service, strings};
use recipe_scoring::{filter_and_sort_json, filter_and_sort_recipes, normalize_match_value, MatchValue};
use recipe_types::RecipeScore;

fn ids(values: &[Value]) -> Vec<&str> {
    values.iter().filter_map(|v| v["id"].as_str()).collect()
}

/// 85, "85", "85%" and 0.85 all mean the same match.
#[test]
fn test_equivalent_representations() {
    let expected = normalize_match_value(Some(&MatchValue::from(85_i64)));
    assert_eq!(expected, 85.0);

    for raw in [
        MatchValue::from("85"),
        MatchValue::from("85%"),
        MatchValue::from(0.85_f64),
    ] {
        assert!((normalize_match_value(Some(&raw)) - expected).abs() < 1e-9);
    }
}

#[test]
fn test_missing_or_garbage_is_zero() {
    assert_eq!(normalize_match_value(None), 0.0);
    assert_eq!(normalize_match_value(Some(&MatchValue::from("not a number"))), 0.0);
    assert_eq!(normalize_match_value(Some(&MatchValue::Unsupported)), 0.0);
}

#[test]
fn test_stable_descending() {
    let doc = json!([
        {"id": "a", "score": 30},
        {"id": "b", "score": 90},
        {"id": "c", "score": 60},
        {"id": "d", "score": 60},
    ]);

    assert_eq!(ids(&filter_and_sort_json(&doc)), vec!["b", "c", "d", "a"]);
}

/// Mixed legacy field names, zero and unusable values.
#[test]
fn test_heterogeneous_shapes() {
    let doc = json!([
        {"id": "coverage", "coverageScore": 0.5},
        {"id": "pct", "matchPercentage": "75%"},
        {"id": "zero", "match": 0},
        {"id": "nothing"},
        {"id": "negative", "score": -10},
        {"id": "flag", "match": true, "score": 99},
        {"id": "sim", "similarity": 0.2},
    ]);

    assert_eq!(ids(&filter_and_sort_json(&doc)), vec!["pct", "coverage", "sim"]);
}

#[test]
fn test_idempotent_and_input_untouched() {
    let doc = json!([
        {"id": "a", "match": "40%"},
        {"id": "b", "match": 0.9},
        {"id": "c", "match": null},
        {"id": "d", "match": 12},
    ]);
    let before = doc.clone();

    let once = filter_and_sort_json(&doc);
    let twice = filter_and_sort_json(&Value::Array(once.clone()));

    assert_eq!(once, twice);
    assert_eq!(doc, before);
    assert!(once.len() <= before.as_array().map(Vec::len).unwrap_or(0));
}

#[test]
fn test_empty_inputs() {
    assert!(filter_and_sort_json(&Value::Null).is_empty());
    assert!(filter_and_sort_json(&json!([])).is_empty());
    assert!(filter_and_sort_json(&json!({"match": 50})).is_empty());
    assert!(filter_and_sort_recipes::<RecipeScore>(None).is_empty());
}

/// Re-ranking service output leaves it unchanged.
#[tokio::test]
async fn test_service_output_is_a_fixed_point() {
    let results = fallback_service()
        .generate_recipe_recommendations(&strings(&["garlic", "cheese", "onion", "sugar"]))
        .await
        .unwrap();

    let reranked = filter_and_sort_recipes(Some(results.as_slice()));
    assert_eq!(reranked, results);
}
