//! Deterministic keyword rules mapping a transaction description to its
//! category. No learning, no multi-category assignment.

use crate::models::transaction::Category;

const FOOD_KEYWORDS: [&str; 3] = ["coffee", "restaurant", "food"];
const HOUSING_KEYWORDS: [&str; 3] = ["rent", "emi", "loan"];

/// First match wins. "salary" outranks everything else, so a
/// description mentioning both salary and coffee is still income.
pub fn categorize(description: &str) -> Category {
    let description = description.to_lowercase();

    if description.contains("salary") {
        Category::Income
    } else if FOOD_KEYWORDS.iter().any(|word| description.contains(word)) {
        Category::Food
    } else if HOUSING_KEYWORDS.iter().any(|word| description.contains(word)) {
        Category::Housing
    } else {
        Category::Other
    }
}
