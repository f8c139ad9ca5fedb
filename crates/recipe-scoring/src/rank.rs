//! Result normalization and ranking.
//!
//! Results arrive with their match value under different field names and
//! in different formats: a 0-100 percentage, a 0-1 fraction, a string such
//! as "85%" or "85", or nothing at all. Every shape declares an ordered
//! list of [`MatchField`] accessors; the first one that yields a value
//! wins, and the value is normalized onto the percentage scale.

use serde_json::Value;

use recipe_types::RecipeScore;

/// A raw match value before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchValue {
    /// Ambiguous number: a fraction in (0, 1] is scaled to a percentage
    Number(f64),
    /// Already on the percentage scale, never rescaled
    Percent(f64),
    Text(String),
    /// Present but not a number or string (bool, array, object)
    Unsupported,
}

impl From<f64> for MatchValue {
    fn from(v: f64) -> Self {
        MatchValue::Number(v)
    }
}

impl From<f32> for MatchValue {
    fn from(v: f32) -> Self {
        MatchValue::Number(f64::from(v))
    }
}

impl From<i64> for MatchValue {
    fn from(v: i64) -> Self {
        MatchValue::Number(v as f64)
    }
}

impl From<&str> for MatchValue {
    fn from(v: &str) -> Self {
        MatchValue::Text(v.to_string())
    }
}

impl From<String> for MatchValue {
    fn from(v: String) -> Self {
        MatchValue::Text(v)
    }
}

impl MatchValue {
    /// A value known to be a fraction, clamped to [0, 1] and expressed as a
    /// percentage.
    pub fn from_fraction(v: f32) -> Self {
        MatchValue::Percent(f64::from(v.clamp(0.0, 1.0)) * 100.0)
    }

    /// Read a JSON value. `null` counts as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().map(MatchValue::Number).unwrap_or(MatchValue::Unsupported)),
            Value::String(s) => Some(MatchValue::Text(s.clone())),
            _ => Some(MatchValue::Unsupported),
        }
    }
}

/// Normalize a raw match value onto the percentage scale.
///
/// - absent, non-finite, unparsable or unsupported -> 0
/// - "85%" and `Percent(85.0)` -> 85 (already a percentage)
/// - 0 < v <= 1 -> v * 100, for numbers and plain numeric strings
/// - anything else is returned unchanged, including negatives and values
///   above 100
pub fn normalize_match_value(raw: Option<&MatchValue>) -> f64 {
    match raw {
        None | Some(MatchValue::Unsupported) => 0.0,
        Some(MatchValue::Number(v)) => normalize_number(*v),
        Some(MatchValue::Percent(v)) => {
            if v.is_finite() {
                *v
            } else {
                0.0
            }
        }
        Some(MatchValue::Text(text)) => {
            let trimmed = text.trim();
            match trimmed.strip_suffix('%') {
                Some(percent) => match percent.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => v,
                    _ => 0.0,
                },
                None => trimmed
                    .parse::<f64>()
                    .map(normalize_number)
                    .unwrap_or(0.0),
            }
        }
    }
}

fn normalize_number(v: f64) -> f64 {
    if !v.is_finite() {
        0.0
    } else if v > 0.0 && v <= 1.0 {
        v * 100.0
    } else {
        v
    }
}

/// A named accessor for one possible location of the match value.
pub struct MatchField<T> {
    pub name: &'static str,
    pub accessor: fn(&T) -> Option<MatchValue>,
}

impl<T> Clone for MatchField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchField<T> {}

impl<T> std::fmt::Debug for MatchField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchField").field("name", &self.name).finish()
    }
}

/// Result shapes with a fixed match-field priority.
pub trait MatchFields: Sized {
    /// Accessors in priority order.
    fn match_fields() -> &'static [MatchField<Self>];
}

fn score_ranking(s: &RecipeScore) -> Option<MatchValue> {
    Some(MatchValue::from_fraction(s.ranking_score()))
}

fn score_coverage(s: &RecipeScore) -> Option<MatchValue> {
    Some(MatchValue::from_fraction(s.coverage_score()))
}

fn score_similarity(s: &RecipeScore) -> Option<MatchValue> {
    Some(MatchValue::from_fraction(s.similarity_score))
}

static RECIPE_SCORE_FIELDS: [MatchField<RecipeScore>; 3] = [
    MatchField {
        name: "rankingScore",
        accessor: score_ranking,
    },
    MatchField {
        name: "coverageScore",
        accessor: score_coverage,
    },
    MatchField {
        name: "similarity",
        accessor: score_similarity,
    },
];

impl MatchFields for RecipeScore {
    fn match_fields() -> &'static [MatchField<Self>] {
        &RECIPE_SCORE_FIELDS
    }
}

fn json_field(value: &Value, key: &str) -> Option<MatchValue> {
    value.get(key).and_then(MatchValue::from_json)
}

fn json_coverage_score(v: &Value) -> Option<MatchValue> {
    json_field(v, "coverageScore")
}

fn json_match(v: &Value) -> Option<MatchValue> {
    json_field(v, "match")
}

fn json_match_percentage(v: &Value) -> Option<MatchValue> {
    json_field(v, "matchPercentage")
}

fn json_score(v: &Value) -> Option<MatchValue> {
    json_field(v, "score")
}

fn json_similarity(v: &Value) -> Option<MatchValue> {
    json_field(v, "similarity")
}

static JSON_FIELDS: [MatchField<Value>; 5] = [
    MatchField {
        name: "coverageScore",
        accessor: json_coverage_score,
    },
    MatchField {
        name: "match",
        accessor: json_match,
    },
    MatchField {
        name: "matchPercentage",
        accessor: json_match_percentage,
    },
    MatchField {
        name: "score",
        accessor: json_score,
    },
    MatchField {
        name: "similarity",
        accessor: json_similarity,
    },
];

impl MatchFields for Value {
    fn match_fields() -> &'static [MatchField<Self>] {
        &JSON_FIELDS
    }
}

/// Normalized match value of an item: the first accessor that yields a value.
pub fn resolve_match_value<T>(item: &T, fields: &[MatchField<T>]) -> f64 {
    fields
        .iter()
        .find_map(|field| (field.accessor)(item))
        .map(|raw| normalize_match_value(Some(&raw)))
        .unwrap_or(0.0)
}

/// Drop items whose normalized match is <= 0 and stable-sort the rest by
/// match, descending. The input is left untouched.
pub fn filter_and_sort_by<T: Clone>(items: Option<&[T]>, fields: &[MatchField<T>]) -> Vec<T> {
    let Some(items) = items else {
        return Vec::new();
    };

    let mut ranked: Vec<(f64, &T)> = items
        .iter()
        .map(|item| (resolve_match_value(item, fields), item))
        .filter(|(value, _)| *value > 0.0)
        .collect();

    // sort_by is stable: ties keep their input order
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    ranked.into_iter().map(|(_, item)| item.clone()).collect()
}

/// [`filter_and_sort_by`] with the shape's own field priority.
pub fn filter_and_sort_recipes<T: MatchFields + Clone + 'static>(items: Option<&[T]>) -> Vec<T> {
    filter_and_sort_by(items, T::match_fields())
}

/// Rank a JSON document. Anything but an array yields an empty result.
pub fn filter_and_sort_json(document: &Value) -> Vec<Value> {
    match document {
        Value::Array(items) => filter_and_sort_recipes(Some(items.as_slice())),
        _ => Vec::new(),
    }
}
