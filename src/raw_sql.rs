//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - User input is ALWAYS passed via `.bind()` parameters
//! - No string concatenation or interpolation with user data

/// Query to get the distinct tags used across all recipes.
///
/// Uses `jsonb_array_elements_text()` to expand the JSON-encoded tag
/// column, which isn't in Diesel's DSL.
///
/// # Safety
/// Static SQL string with no user input.
pub const DISTINCT_TAGS_QUERY: &str =
    "SELECT DISTINCT jsonb_array_elements_text(tags) AS tag FROM recipes ORDER BY tag";
