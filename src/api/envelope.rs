//! Response Envelope
//!
//! The backend wraps responses as `{success, data, message, pagination?}`, but
//! not every route is consistent about where the list or the pagination
//! lives. These helpers turn any of those shapes into a `Result`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::{Page, Pagination};

/// Keys tried first when `data` is an object wrapping the list
const LIST_KEYS: &[&str] = &["items", "results", "docs", "rows"];

/// Server-provided message, if any
pub fn message_of(body: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Reject non-2xx statuses and `success: false` bodies
pub fn check_envelope(status: u16, body: Value) -> ApiResult<Value> {
    if !(200..300).contains(&status) {
        return Err(ApiError::server(status, message_of(&body)));
    }
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::server(status, message_of(&body)));
    }
    Ok(body)
}

/// Known keys first, then the first array of records. Arrays of plain
/// values (tags, category names) are never taken for the list.
fn find_array(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    LIST_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
        .or_else(|| {
            map.values()
                .filter_map(Value::as_array)
                .find(|items| !items.is_empty() && items.iter().all(Value::is_object))
        })
        .or_else(|| map.values().filter_map(Value::as_array).find(|items| items.is_empty()))
}

fn find_pagination(body: &Value, data: &Value) -> Option<Pagination> {
    body.get("pagination")
        .or_else(|| data.get("pagination"))
        .and_then(|p| serde_json::from_value(p.clone()).ok())
}

/// Skip records that don't decode so one odd row can't blank the page.
/// A list where nothing decodes is a shape mismatch, not bad rows.
fn decode_items<T: DeserializeOwned>(raw_items: &[Value]) -> ApiResult<Vec<T>> {
    let mut items = Vec::with_capacity(raw_items.len());
    let mut last_error = None;
    for (index, raw) in raw_items.iter().enumerate() {
        match serde_json::from_value(raw.clone()) {
            Ok(item) => items.push(item),
            Err(err) => {
                log::warn!("[api] skipping list item {}: {}", index, err);
                last_error = Some(err);
            }
        }
    }
    match last_error {
        Some(err) if items.is_empty() => Err(ApiError::Decode(err.to_string())),
        _ => Ok(items),
    }
}

/// Decode a list response into a page of items
pub fn parse_list<T: DeserializeOwned>(status: u16, body: Value) -> ApiResult<Page<T>> {
    let body = check_envelope(status, body)?;
    let data = body.get("data").unwrap_or(&body);

    let raw_items = match data {
        Value::Array(items) => items,
        Value::Object(map) => find_array(map)
            .ok_or_else(|| ApiError::Decode("response data holds no list".to_string()))?,
        Value::Null => return Ok(Page { items: Vec::new(), pagination: Pagination::single_page(0) }),
        other => return Err(ApiError::Decode(format!("expected a list, got {}", other))),
    };

    let items = decode_items(raw_items)?;

    let pagination = find_pagination(&body, data).unwrap_or_else(|| Pagination::single_page(items.len()));
    Ok(Page { items, pagination })
}

/// Decode a mutation response; yields the server message for the status modal
pub fn parse_ack(status: u16, body: Value) -> ApiResult<Option<String>> {
    let body = check_envelope(status, body)?;
    Ok(message_of(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Banner, PublishStatus, Story};
    use serde_json::json;

    #[test]
    fn test_success_false_becomes_error() {
        let result = parse_list::<Banner>(200, json!({ "success": false, "message": "Not allowed" }));
        assert_eq!(
            result,
            Err(ApiError::Server { status: 200, message: Some("Not allowed".to_string()) })
        );
    }

    #[test]
    fn test_http_error_without_message() {
        let result = parse_ack(500, json!({}));
        assert_eq!(result, Err(ApiError::Server { status: 500, message: None }));
    }

    #[test]
    fn test_data_array_without_pagination() {
        let page = parse_list::<Banner>(
            200,
            json!({ "success": true, "data": [{ "_id": "b1", "title": "Summer" }, { "_id": "b2", "title": "Eid" }] }),
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, "b2");
        assert_eq!(page.pagination, Pagination::single_page(2));
    }

    #[test]
    fn test_data_object_with_nested_list_and_pagination() {
        let page = parse_list::<Banner>(
            200,
            json!({
                "success": true,
                "data": {
                    "attempts": [{ "_id": "b1", "title": "x" }],
                    "pagination": { "page": 3, "limit": 1, "total": 5, "totalPages": 5 }
                }
            }),
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.total_pages, 5);
    }

    #[test]
    fn test_top_level_pagination_and_bare_array() {
        let page = parse_list::<Banner>(
            200,
            json!({ "data": [], "pagination": { "page": 1, "limit": 10, "total": 0, "totalPages": 0 } }),
        )
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);

        let page = parse_list::<Banner>(200, json!([{ "id": "b9", "title": "Bare" }])).unwrap();
        assert_eq!(page.items[0].id, "b9");
    }

    #[test]
    fn test_malformed_item_is_decode_error() {
        let result = parse_list::<Banner>(200, json!({ "data": [{ "title": 42 }] }));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_bad_row_is_skipped_not_fatal() {
        let page = parse_list::<Story>(
            200,
            json!({ "data": [
                { "_id": "s1", "titleEn": "The Olive Tree", "status": "published" },
                { "_id": "s2", "titleEn": 7 },
                { "_id": "s3", "titleEn": "Old Tale", "status": "archived" }
            ] }),
        )
        .unwrap();
        let ids: Vec<&str> = page.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
        assert_eq!(page.items[1].status, PublishStatus::Unknown);
        assert_eq!(page.pagination, Pagination::single_page(2));
    }

    #[test]
    fn test_record_list_wins_over_plain_arrays() {
        let page = parse_list::<Story>(
            200,
            json!({ "data": {
                "categories": ["folk", "history"],
                "stories": [{ "_id": "s1", "titleEn": "x" }]
            } }),
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "s1");

        let page = parse_list::<Story>(200, json!({ "data": { "tags": ["a"], "stories": [] } })).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_ack_message() {
        assert_eq!(
            parse_ack(201, json!({ "success": true, "message": "Banner created" })),
            Ok(Some("Banner created".to_string()))
        );
    }
}
