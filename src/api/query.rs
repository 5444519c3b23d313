//! List Query Parameters

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// RFC 3986 unreserved characters stay as-is
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Parameters for a list request; `None` fields are omitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Extra equality filters, e.g. `quizId`
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn paged(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// `?key=value&...`, or an empty string when nothing is set
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".into(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".into(), limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".into(), search.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate".into(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate".into(), end.format("%Y-%m-%d").to_string()));
        }
        pairs.extend(self.filters.iter().cloned());

        if pairs.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// Parse the value of an `<input type="date">`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params() {
        assert_eq!(ListParams::default().to_query_string(), "");
    }

    #[test]
    fn test_full_query() {
        let params = ListParams {
            page: Some(2),
            limit: Some(10),
            search: Some("  sara & ali ".to_string()),
            start_date: parse_date_input("2024-01-01"),
            end_date: parse_date_input("2024-01-31"),
            filters: vec![],
        };
        assert_eq!(
            params.to_query_string(),
            "?page=2&limit=10&search=sara%20%26%20ali&startDate=2024-01-01&endDate=2024-01-31"
        );
    }

    #[test]
    fn test_blank_search_omitted_and_filters_appended() {
        let params = ListParams {
            search: Some("   ".to_string()),
            ..ListParams::paged(1, 5)
        }
        .with_filter("quizId", "q-1");
        assert_eq!(params.to_query_string(), "?page=1&limit=5&quizId=q-1");
    }

    #[test]
    fn test_arabic_search_is_encoded() {
        let params = ListParams {
            search: Some("قطة".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "?search=%D9%82%D8%B7%D8%A9");
    }

    #[test]
    fn test_bad_date_input() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("31/01/2024"), None);
    }
}
