//! Row classification by category and product text.
//!
//! Matching is case-insensitive per character but keeps diacritics: `Á`
//! matches `á`, never `a`.

const BEER_CATEGORY_PREFIXES: [&str; 2] = ["Pivovar", "Pivo na čepu"];
const BOTTLE_CATEGORY: &str = "PET láhve";
const BOTTLE_PRODUCT_PREFIX: &str = "Láhev";

/// Case-insensitive equality of two characters.
pub fn char_eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

/// Case-insensitive string equality, character by character.
pub fn eq_fold(s: &str, other: &str) -> bool {
    let mut left = s.chars();
    let mut right = other.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if char_eq_fold(a, b) => {}
            _ => return false,
        }
    }
}

/// Case-insensitive `starts_with`.
pub fn has_prefix_fold(s: &str, prefix: &str) -> bool {
    let mut chars = s.chars();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|c| char_eq_fold(c, p)))
}

/// Draft beer rows: categories starting with "Pivovar" or "Pivo na čepu".
pub fn is_beer_category(category: &str) -> bool {
    BEER_CATEGORY_PREFIXES
        .iter()
        .any(|prefix| has_prefix_fold(category, prefix))
}

/// PET bottle rows: category "PET láhve" and a product starting with "Láhev".
pub fn is_bottle_row(category: &str, product: &str) -> bool {
    eq_fold(category, BOTTLE_CATEGORY) && has_prefix_fold(product, BOTTLE_PRODUCT_PREFIX)
}
