//! Table Query State
//!
//! Pagination, sorting, free-text search and fixed filters for list
//! requests, encoded as json-server style query parameters.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// Characters escaped inside query parameter values.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parameter value understood by the backend.
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Everything that shapes one list request.
///
/// `page` is 1-based and stays ≥ 1; any change besides the page itself
/// starts over from page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    sort: Option<(String, SortDirection)>,
    search: String,
    fixed_filters: Vec<(String, Value)>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::with_filters(Vec::new())
    }

    /// State constrained by caller-supplied, non-editable filters.
    pub fn with_filters(fixed_filters: Vec<(String, Value)>) -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search: String::new(),
            fixed_filters,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(field, dir)| (field.as_str(), *dir))
    }

    /// Pages needed for `total` rows, at least 1.
    pub fn page_count(&self, total: u32) -> u32 {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Header click: a new field sorts ascending, the active field flips
    /// direction. Once engaged, sorting never returns to "unsorted".
    pub fn cycle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some((active, dir)) if active == field => Some((active, dir.toggled())),
            _ => Some((field.to_string(), SortDirection::Ascending)),
        };
        self.page = 1;
    }

    /// Encode as a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut params = vec![
            format!("_page={}", self.page),
            format!("_limit={}", self.page_size),
        ];
        if !self.search.is_empty() {
            params.push(format!("q={}", encode_value(&self.search)));
        }
        if let Some((field, dir)) = &self.sort {
            params.push(format!("_sort={field}"));
            params.push(format!("_order={}", dir.as_param()));
        }
        for (key, value) in &self.fixed_filters {
            if let Some(param) = filter_param(key, value) {
                params.push(param);
            }
        }
        params.join("&")
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

/// `key=value` pair for one filter. Filter values are scalars; `Null`
/// marks an absent filter and yields nothing.
pub fn filter_param(key: &str, value: &Value) -> Option<String> {
    let scalar = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(format!("{key}={}", encode_value(&scalar)))
}

fn encode_value(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_encode_page_and_limit_only() {
        let query = QueryState::new();
        assert_eq!(query.to_query_string(), "_page=1&_limit=10");
    }

    #[test]
    fn search_is_encoded_and_empty_search_is_omitted() {
        let mut query = QueryState::new();
        query.set_search("john doe");
        assert_eq!(query.to_query_string(), "_page=1&_limit=10&q=john%20doe");

        query.set_search("");
        assert_eq!(query.to_query_string(), "_page=1&_limit=10");
    }

    #[test]
    fn sort_cycles_ascending_descending_ascending() {
        let mut query = QueryState::new();
        query.cycle_sort("name");
        assert_eq!(query.sort(), Some(("name", SortDirection::Ascending)));
        query.cycle_sort("name");
        assert_eq!(query.sort(), Some(("name", SortDirection::Descending)));
        query.cycle_sort("name");
        assert_eq!(query.sort(), Some(("name", SortDirection::Ascending)));
    }

    #[test]
    fn switching_sort_field_starts_ascending() {
        let mut query = QueryState::new();
        query.cycle_sort("name");
        query.cycle_sort("name");
        query.cycle_sort("email");
        assert_eq!(query.sort(), Some(("email", SortDirection::Ascending)));
    }

    #[test]
    fn sort_encodes_normalized_direction() {
        let mut query = QueryState::new();
        query.cycle_sort("name");
        assert_eq!(
            query.to_query_string(),
            "_page=1&_limit=10&_sort=name&_order=asc"
        );
        query.cycle_sort("name");
        assert_eq!(
            query.to_query_string(),
            "_page=1&_limit=10&_sort=name&_order=desc"
        );
    }

    #[test]
    fn non_page_changes_reset_to_page_one() {
        let mut query = QueryState::new();
        query.set_page(4);
        assert_eq!(query.page(), 4);

        query.set_search("x");
        assert_eq!(query.page(), 1);

        query.set_page(4);
        query.cycle_sort("name");
        assert_eq!(query.page(), 1);

        query.set_page(4);
        query.set_page_size(20);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn page_stays_positive() {
        let mut query = QueryState::new();
        query.set_page(0);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn fixed_filters_are_appended_and_null_is_skipped() {
        let mut query = QueryState::with_filters(vec![
            ("billId".to_string(), json!(12)),
            ("draft".to_string(), Value::Null),
        ]);
        query.set_page(2);
        assert_eq!(query.to_query_string(), "_page=2&_limit=10&billId=12");
    }

    #[test]
    fn page_count_rounds_up_and_is_at_least_one() {
        let query = QueryState::new();
        assert_eq!(query.page_count(0), 1);
        assert_eq!(query.page_count(10), 1);
        assert_eq!(query.page_count(23), 3);
    }
}
