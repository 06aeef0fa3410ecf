//! Recipe search: criteria validation, ILIKE pattern building, and the
//! post-fetch tag filter.
//!
//! Name and description narrow the store query (case-insensitive substring,
//! parameterized). Tags are never pushed into SQL: candidate rows are
//! filtered in memory so tag matching stays exact and independent of the
//! store's JSON query support. Malformed criteria never reach the store;
//! they yield an empty result instead of an error.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 3000;
/// Bound on the JSON-encoded form of the tag list, matching the column it
/// is compared against.
pub const MAX_TAGS_ENCODED_LEN: usize = 255;

/// Search criteria as supplied by the caller.
///
/// `tags` is kept as raw JSON values so a request with a non-string element
/// reaches [`Criteria::validate`] and gets the fail-soft empty result,
/// rather than bouncing at deserialization.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct Criteria {
    /// Case-insensitive substring to match against recipe names
    pub name: Option<String>,
    /// Case-insensitive substring to match against recipe descriptions
    pub description: Option<String>,
    /// Tags the recipe must all carry (exact, case-sensitive)
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Value>,
}

/// Criteria that passed shape validation. Empty strings are normalized to
/// absent; a missing tag list and an empty one are the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCriteria {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl Criteria {
    /// Validate shape and bounds. `None` means the search must yield an
    /// empty result without touching the store: oversized name or
    /// description, a tag list that isn't a list, a tag list whose encoded
    /// form exceeds the column bound, or any non-string tag element.
    pub fn validate(self) -> Option<ValidCriteria> {
        let name = self.name.filter(|n| !n.is_empty());
        if name
            .as_deref()
            .is_some_and(|n| n.chars().count() > MAX_NAME_LEN)
        {
            return None;
        }

        let description = self.description.filter(|d| !d.is_empty());
        if description
            .as_deref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return None;
        }

        let tags = match self.tags {
            None => Vec::new(),
            Some(Value::Array(values)) => {
                let mut tags = Vec::with_capacity(values.len());
                for value in values {
                    match value {
                        Value::String(s) => tags.push(s),
                        _ => return None,
                    }
                }
                let encoded_len = serde_json::to_string(&tags)
                    .map(|s| s.len())
                    .unwrap_or(usize::MAX);
                if encoded_len > MAX_TAGS_ENCODED_LEN {
                    return None;
                }
                tags
            }
            Some(_) => return None,
        };

        Some(ValidCriteria {
            name,
            description,
            tags,
        })
    }
}

impl ValidCriteria {
    pub fn name_pattern(&self) -> Option<String> {
        self.name.as_deref().map(like_pattern)
    }

    pub fn description_pattern(&self) -> Option<String> {
        self.description.as_deref().map(like_pattern)
    }
}

/// `%term%` with LIKE wildcards escaped, for ILIKE substring matching.
pub fn like_pattern(term: &str) -> String {
    format!(
        "%{}%",
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

/// True when every requested tag is an exact, case-sensitive member of
/// `recipe_tags`.
pub fn matches_tags(recipe_tags: &[String], requested: &[String]) -> bool {
    requested
        .iter()
        .all(|tag| recipe_tags.iter().any(|t| t == tag))
}

/// Post-fetch tag filter: keeps the records carrying every requested tag,
/// preserving input order. An empty `requested` list keeps everything.
pub fn retain_matching<T>(
    items: Vec<T>,
    requested: &[String],
    tags_of: impl Fn(&T) -> &[String],
) -> Vec<T> {
    if requested.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| matches_tags(tags_of(item), requested))
        .collect()
}

/// Decode the JSON-encoded tag column into a tag list. Anything that isn't
/// an array of strings decodes as no tags.
pub fn decode_tags(value: Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn criteria(name: Option<&str>, description: Option<&str>, tags: Option<Value>) -> Criteria {
        Criteria {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            tags,
        }
    }

    #[test]
    fn test_validate_no_criteria() {
        let valid = criteria(None, None, None).validate().unwrap();
        assert!(valid.name.is_none());
        assert!(valid.description.is_none());
        assert!(valid.tags.is_empty());
    }

    #[test]
    fn test_validate_empty_strings_treated_as_absent() {
        let valid = criteria(Some(""), Some(""), None).validate().unwrap();
        assert!(valid.name.is_none());
        assert!(valid.description.is_none());
    }

    #[test]
    fn test_validate_empty_tag_list_same_as_missing() {
        let with_empty = criteria(None, None, Some(json!([]))).validate().unwrap();
        let with_none = criteria(None, None, None).validate().unwrap();
        assert_eq!(with_empty, with_none);
    }

    #[test]
    fn test_validate_string_tags() {
        let valid = criteria(None, None, Some(json!(["vegan", "quick"])))
            .validate()
            .unwrap();
        assert_eq!(valid.tags, vec!["vegan", "quick"]);
    }

    #[test]
    fn test_validate_rejects_non_string_tag() {
        assert!(criteria(None, None, Some(json!(["vegan", 7])))
            .validate()
            .is_none());
        assert!(criteria(None, None, Some(json!([null]))).validate().is_none());
        assert!(criteria(None, None, Some(json!([["nested"]])))
            .validate()
            .is_none());
    }

    #[test]
    fn test_validate_rejects_non_list_tags() {
        assert!(criteria(None, None, Some(json!("vegan"))).validate().is_none());
        assert!(criteria(None, None, Some(json!({"tag": "vegan"})))
            .validate()
            .is_none());
    }

    #[test]
    fn test_validate_rejects_oversized_name() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(criteria(Some(&long), None, None).validate().is_none());

        let at_limit = "x".repeat(MAX_NAME_LEN);
        assert!(criteria(Some(&at_limit), None, None).validate().is_some());
    }

    #[test]
    fn test_validate_rejects_oversized_description() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(criteria(None, Some(&long), None).validate().is_none());
    }

    #[test]
    fn test_validate_rejects_oversized_tag_list() {
        let tags = json!(["a".repeat(MAX_TAGS_ENCODED_LEN)]);
        assert!(criteria(None, None, Some(tags)).validate().is_none());
    }

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("pasta"), "%pasta%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_tags_requires_every_tag() {
        let recipe = tags(&["vegan", "quick", "dinner"]);
        assert!(matches_tags(&recipe, &tags(&["vegan", "quick"])));
        assert!(!matches_tags(&recipe, &tags(&["vegan", "dessert"])));
    }

    #[test]
    fn test_matches_tags_is_case_sensitive() {
        let recipe = tags(&["Vegan"]);
        assert!(!matches_tags(&recipe, &tags(&["vegan"])));
        assert!(matches_tags(&recipe, &tags(&["Vegan"])));
    }

    #[test]
    fn test_matches_tags_rejects_partial_matches() {
        let recipe = tags(&["veganish"]);
        assert!(!matches_tags(&recipe, &tags(&["vegan"])));
    }

    #[test]
    fn test_matches_tags_empty_request_matches_anything() {
        assert!(matches_tags(&tags(&[]), &[]));
        assert!(matches_tags(&tags(&["anything"]), &[]));
    }

    struct Row {
        id: u32,
        tags: Vec<String>,
    }

    fn store() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                tags: tags(&["vegan", "quick"]),
            },
            Row {
                id: 2,
                tags: tags(&["vegan"]),
            },
        ]
    }

    #[test]
    fn test_retain_matching_keeps_recipes_with_all_tags() {
        let kept = retain_matching(store(), &tags(&["vegan", "quick"]), |r| &r.tags);
        assert_eq!(kept.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_retain_matching_unknown_tag_yields_nothing() {
        let kept = retain_matching(store(), &tags(&["nonexistent"]), |r| &r.tags);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_retain_matching_no_tags_keeps_everything() {
        let kept = retain_matching(store(), &[], |r| &r.tags);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_retain_matching_preserves_input_order() {
        let rows = vec![
            Row {
                id: 9,
                tags: tags(&["vegan"]),
            },
            Row {
                id: 3,
                tags: tags(&["vegan"]),
            },
            Row {
                id: 7,
                tags: tags(&["other"]),
            },
            Row {
                id: 5,
                tags: tags(&["vegan"]),
            },
        ];
        let kept = retain_matching(rows, &tags(&["vegan"]), |r| &r.tags);
        assert_eq!(kept.iter().map(|r| r.id).collect::<Vec<_>>(), vec![9, 3, 5]);
    }

    #[test]
    fn test_decode_tags_array() {
        assert_eq!(decode_tags(json!(["a", "b"])), tags(&["a", "b"]));
    }

    #[test]
    fn test_decode_tags_tolerates_malformed_column() {
        assert!(decode_tags(json!("not an array")).is_empty());
        assert!(decode_tags(json!({"tag": "vegan"})).is_empty());
        assert!(decode_tags(json!([1, 2])).is_empty());
    }
}
