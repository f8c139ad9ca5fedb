//! Ingredient matching predicates.
//!
//! `ingredients_match` is the lenient matcher used for coverage and for the
//! matched/missing partition. `is_exact_match` is stricter and only feeds
//! the exact-match count.

/// Lowercase an ingredient and collapse its whitespace to single spaces.
pub fn normalize_ingredient(ingredient: &str) -> String {
    ingredient
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether a user ingredient matches a recipe ingredient.
///
/// Equal after normalization, or either side occurs inside the other as a
/// whole-word span ("pepper" matches "bell pepper", "rice" does not match
/// "licorice"). Empty tokens never match.
pub fn ingredients_match(user_ingredient: &str, recipe_ingredient: &str) -> bool {
    let user = normalize_ingredient(user_ingredient);
    let recipe = normalize_ingredient(recipe_ingredient);

    if user.is_empty() || recipe.is_empty() {
        return false;
    }

    if user == recipe {
        return true;
    }

    contains_word(&recipe, &user) || contains_word(&user, &recipe)
}

/// Whether a user ingredient is a precise hit for a recipe ingredient.
///
/// - identical after normalization (internal whitespace collapsed)
/// - both multi-word with different word counts, and every word of the
///   shorter phrase appears in the longer one
///
/// A single word never exact-matches a multi-word phrase: "cheese" is not
/// a hit for "feta cheese".
pub fn is_exact_match(user_ingredient: &str, recipe_ingredient: &str) -> bool {
    let user = normalize_ingredient(user_ingredient);
    let recipe = normalize_ingredient(recipe_ingredient);

    if user.is_empty() || recipe.is_empty() {
        return false;
    }

    let user_words: Vec<&str> = user.split(' ').collect();
    let recipe_words: Vec<&str> = recipe.split(' ').collect();

    if user_words == recipe_words {
        return true;
    }

    if user_words.len() < 2 || recipe_words.len() < 2 || user_words.len() == recipe_words.len() {
        return false;
    }

    let (shorter, longer) = if user_words.len() < recipe_words.len() {
        (&user_words, &recipe_words)
    } else {
        (&recipe_words, &user_words)
    };

    shorter.iter().all(|w| longer.contains(w))
}

/// Whether `needle` occurs in `haystack` with no letter or digit directly
/// on either side. `needle` must be non-empty.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;

    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let open = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let close = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if open && close {
            return true;
        }

        // Matches may overlap, so step one character rather than past the match
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }

    false
}
