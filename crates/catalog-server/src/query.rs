//! Query semantics of the catalog endpoint.
//!
//! A request is either a page lookup or a search. Searches flatten every page
//! and keep entries whose title or any genre contains the query as a
//! case-insensitive substring. Page lookups that fall outside the dataset are
//! served the first page.

use crate::dataset::{Dataset, RawPage};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{MangaEntry, SearchResults};

/// Cap on search results when the request does not carry a usable `limit`
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Raw query string parameters, kept as strings so malformed values degrade
/// to defaults instead of rejecting the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub page: Option<String>,
    pub query: Option<String>,
    pub limit: Option<String>,
}

impl QueryParams {
    /// Collect the known keys from decoded query pairs. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "query" => &mut params.query,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// A parsed catalog request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// 1-based page number as requested; `None` when it was not a number
    Page { requested: Option<i64> },
    /// Trimmed, non-empty query text
    Search { query: String, limit: usize },
}

/// What the endpoint returns
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QueryResult {
    Page(RawPage),
    Search(SearchResults<Value>),
}

impl CatalogQuery {
    pub fn from_params(params: &QueryParams, default_limit: usize) -> Self {
        let query = params.query.as_deref().map(str::trim).unwrap_or_default();

        if !query.is_empty() {
            return CatalogQuery::Search {
                query: query.to_string(),
                limit: parse_limit(params.limit.as_deref(), default_limit),
            };
        }

        let requested = match params.page.as_deref() {
            None => Some(1),
            Some(raw) => raw.trim().parse::<i64>().ok(),
        };

        CatalogQuery::Page { requested }
    }

    /// Run the query against a loaded dataset
    pub fn execute(&self, dataset: Dataset) -> Result<QueryResult, CatalogError> {
        match self {
            CatalogQuery::Page { requested } => {
                let index = resolve_page_index(*requested, dataset.page_count());
                let page = dataset
                    .into_pages()
                    .into_iter()
                    .nth(index)
                    .unwrap_or_default();
                Ok(QueryResult::Page(page))
            }
            CatalogQuery::Search { query, limit } => {
                Ok(QueryResult::Search(search(&dataset, query, *limit)?))
            }
        }
    }
}

/// Positive integer limit, otherwise the default
fn parse_limit(raw: Option<&str>, default_limit: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(default_limit)
}

/// Zero-based index to serve for a requested 1-based page.
///
/// Anything outside `1..=page_count` (zero, negative, unparsable, past the
/// end) maps to the first page.
pub fn resolve_page_index(requested: Option<i64>, page_count: usize) -> usize {
    match requested {
        Some(page) if page >= 1 && ((page - 1) as u64) < page_count as u64 => (page - 1) as usize,
        _ => 0,
    }
}

/// Whether an entry matches an already lowercased needle
pub fn entry_matches(entry: &MangaEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry
            .genres()
            .iter()
            .any(|genre| genre.to_lowercase().contains(needle))
}

/// Filter every entry of the dataset, keeping at most `limit` matches.
///
/// Matches are returned as the records found in the dataset.
pub fn search(
    dataset: &Dataset,
    query: &str,
    limit: usize,
) -> Result<SearchResults<Value>, CatalogError> {
    let needle = query.to_lowercase();

    let mut results = Vec::new();
    let mut total = 0;
    for (index, raw) in dataset.entries().enumerate() {
        let entry = MangaEntry::deserialize(raw)
            .map_err(|source| CatalogError::Entry { index, source })?;
        if !entry_matches(&entry, &needle) {
            continue;
        }
        if results.len() < limit {
            results.push(raw.clone());
        }
        total += 1;
    }

    Ok(SearchResults {
        results,
        total,
        limited: total > limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(title: &str, genres: &[&str]) -> Value {
        json!({
            "title": title,
            "cover_url": format!("https://covers.example/{}.jpg", title.to_lowercase()),
            "genres": genres,
        })
    }

    fn shonen_page() -> Dataset {
        Dataset::new(vec![vec![
            entry("Naruto", &["Action", "Shonen"]),
            entry("Bleach", &["Action"]),
        ]])
    }

    fn three_pages() -> Dataset {
        Dataset::new(vec![
            vec![entry("Naruto", &["Action"]), entry("Bleach", &["Action"])],
            vec![entry("Monster", &["Mystery"])],
            vec![entry("Vagabond", &["Seinen"]), entry("Berserk", &["Seinen", "Dark Fantasy"])],
        ])
    }

    fn params(page: Option<&str>, query: Option<&str>, limit: Option<&str>) -> QueryParams {
        QueryParams {
            page: page.map(String::from),
            query: query.map(String::from),
            limit: limit.map(String::from),
        }
    }

    fn titles(results: &[Value]) -> Vec<&str> {
        results.iter().filter_map(|e| e["title"].as_str()).collect()
    }

    fn search_ok(dataset: &Dataset, query: &str, limit: usize) -> SearchResults<Value> {
        search(dataset, query, limit).unwrap()
    }

    // ============================================================
    // PARAMETER PARSING
    // ============================================================

    #[test]
    fn test_defaults_to_first_page() {
        let query = CatalogQuery::from_params(&QueryParams::default(), DEFAULT_SEARCH_LIMIT);
        assert_eq!(query, CatalogQuery::Page { requested: Some(1) });
    }

    #[test]
    fn test_whitespace_query_is_paged_mode() {
        let query = CatalogQuery::from_params(&params(Some("2"), Some("   "), None), 100);
        assert_eq!(query, CatalogQuery::Page { requested: Some(2) });
    }

    #[test]
    fn test_query_is_trimmed() {
        let query = CatalogQuery::from_params(&params(None, Some("  naruto "), None), 100);
        assert_eq!(
            query,
            CatalogQuery::Search {
                query: "naruto".to_string(),
                limit: 100
            }
        );
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(parse_limit(Some("25"), 100), 25);
        assert_eq!(parse_limit(Some("abc"), 100), 100);
        assert_eq!(parse_limit(Some("0"), 100), 100);
        assert_eq!(parse_limit(Some("-5"), 100), 100);
        assert_eq!(parse_limit(None, 40), 40);
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let parsed = QueryParams::from_pairs([
            ("page", "2"),
            ("page", "3"),
            ("limit", "5"),
            ("sort", "title"),
            ("limit", "9"),
        ]);

        assert_eq!(parsed, params(Some("2"), None, Some("5")));
    }

    #[test]
    fn test_non_numeric_page() {
        let query = CatalogQuery::from_params(&params(Some("two"), None, None), 100);
        assert_eq!(query, CatalogQuery::Page { requested: None });
    }

    // ============================================================
    // PAGE FALLBACK POLICY
    // ============================================================

    #[test]
    fn test_resolve_page_index_in_range() {
        assert_eq!(resolve_page_index(Some(1), 3), 0);
        assert_eq!(resolve_page_index(Some(3), 3), 2);
    }

    #[test]
    fn test_resolve_page_index_out_of_range() {
        assert_eq!(resolve_page_index(Some(0), 3), 0);
        assert_eq!(resolve_page_index(Some(-4), 3), 0);
        assert_eq!(resolve_page_index(Some(4), 3), 0);
        assert_eq!(resolve_page_index(Some(i64::MAX), 3), 0);
        assert_eq!(resolve_page_index(None, 3), 0);
        assert_eq!(resolve_page_index(Some(1), 0), 0);
    }

    #[test]
    fn test_every_page_served_unmodified() {
        let dataset = three_pages();
        for (index, expected) in dataset.clone().into_pages().into_iter().enumerate() {
            let page = (index + 1).to_string();
            let query = CatalogQuery::from_params(&params(Some(page.as_str()), None, None), 100);
            assert_eq!(query.execute(dataset.clone()).unwrap(), QueryResult::Page(expected));
        }
    }

    #[test]
    fn test_out_of_range_pages_match_first_page() {
        let dataset = three_pages();
        let first = CatalogQuery::Page { requested: Some(1) }.execute(dataset.clone()).unwrap();

        for raw in ["5", "0", "-1", "abc", "4"] {
            let query = CatalogQuery::from_params(&params(Some(raw), None, None), 100);
            assert_eq!(query.execute(dataset.clone()).unwrap(), first, "page={}", raw);
        }
    }

    #[test]
    fn test_empty_dataset_gives_empty_page() {
        let result = CatalogQuery::Page { requested: Some(1) }.execute(Dataset::default()).unwrap();
        assert_eq!(result, QueryResult::Page(Vec::new()));
    }

    // ============================================================
    // SEARCH
    // ============================================================

    #[test]
    fn test_search_by_genre() {
        let results = search_ok(&shonen_page(), "action", 100);

        assert_eq!(titles(&results.results), vec!["Naruto", "Bleach"]);
        assert_eq!(results.total, 2);
        assert!(!results.limited);
    }

    #[test]
    fn test_search_by_title() {
        let results = search_ok(&shonen_page(), "naruto", 100);

        assert_eq!(titles(&results.results), vec!["Naruto"]);
        assert_eq!(results.total, 1);
        assert!(!results.limited);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dataset = three_pages();
        assert_eq!(search_ok(&dataset, "NARUTO", 100), search_ok(&dataset, "naruto", 100));
        assert_eq!(search_ok(&dataset, "SeInEn", 100).total, 2);
    }

    #[test]
    fn test_search_substring_in_genre() {
        let results = search_ok(&three_pages(), "fanta", 100);
        assert_eq!(titles(&results.results), vec!["Berserk"]);
    }

    #[test]
    fn test_search_spans_pages_in_order() {
        // "e" hits Bleach, Monster, Vagabond (Seinen), Berserk
        let results = search_ok(&three_pages(), "e", 100);
        assert_eq!(
            titles(&results.results),
            vec!["Bleach", "Monster", "Vagabond", "Berserk"]
        );
    }

    #[test]
    fn test_search_caps_results_but_counts_all() {
        let results = search_ok(&three_pages(), "e", 2);

        assert_eq!(titles(&results.results), vec!["Bleach", "Monster"]);
        assert_eq!(results.total, 4);
        assert!(results.limited);
    }

    #[test]
    fn test_search_limit_equal_to_total_is_not_limited() {
        let results = search_ok(&three_pages(), "e", 4);
        assert_eq!(results.results.len(), 4);
        assert!(!results.limited);
    }

    #[test]
    fn test_search_entry_without_genres() {
        let dataset = Dataset::new(vec![vec![
            json!({"title": "Akira"}),
            json!({"title": "Domu", "genres": null}),
        ]]);

        assert_eq!(search_ok(&dataset, "akira", 100).total, 1);
        assert_eq!(search_ok(&dataset, "domu", 100).total, 1);
        assert_eq!(search_ok(&dataset, "action", 100).total, 0);
    }

    #[test]
    fn test_search_no_match() {
        let results = search_ok(&three_pages(), "romance", 100);
        assert_eq!(results, SearchResults::empty());
    }

    #[test]
    fn test_repeated_search_is_identical() {
        let dataset = three_pages();
        let query = CatalogQuery::from_params(&params(None, Some("Seinen"), Some("1")), 100);

        let first = serde_json::to_string(&query.execute(dataset.clone()).unwrap()).unwrap();
        let second = serde_json::to_string(&query.execute(dataset).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_ignores_page_param() {
        let query = CatalogQuery::from_params(&params(Some("3"), Some("bleach"), None), 100);
        match query.execute(three_pages()).unwrap() {
            QueryResult::Search(results) => assert_eq!(titles(&results.results), vec!["Bleach"]),
            other => panic!("expected search result, got {:?}", other),
        }
    }

    #[test]
    fn test_page_records_served_as_stored() {
        let original = json!([
            {"title": "Akira", "genres": null},
            {"title": "Monster", "cover_url": "m.jpg", "rank": 3},
        ]);
        let dataset = Dataset::new(vec![original.as_array().unwrap().clone()]);

        let result = CatalogQuery::Page { requested: Some(1) }.execute(dataset).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), original);
    }

    #[test]
    fn test_search_results_served_as_stored() {
        let record = json!({"title": "Yotsuba&!", "author": "Azuma"});
        let dataset = Dataset::new(vec![vec![record.clone()]]);

        let found = search_ok(&dataset, "yotsuba", 100);
        assert_eq!(found.results, vec![record]);
    }

    #[test]
    fn test_search_rejects_entry_without_title() {
        let dataset = Dataset::new(vec![
            vec![entry("Naruto", &[])],
            vec![json!({"cover_url": "x.jpg"})],
        ]);

        let err = search(&dataset, "naruto", 100).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { index: 1, .. }));
    }
}
