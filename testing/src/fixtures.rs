//! Backend envelopes as JSON, ready to hand to [`crate::MockReply::json`].

use serde::Serialize;
use serde_json::{json, Value};
use slicekit_resource::Pagination;

/// `{isSuccess: true, data}`
#[must_use]
pub fn success(data: impl Serialize) -> Value {
    json!({
        "isSuccess": true,
        "message": "OK",
        "data": to_json(data),
    })
}

/// `{isSuccess: true}` without data
#[must_use]
pub fn empty_success() -> Value {
    json!({ "isSuccess": true })
}

/// `{isSuccess: false, message}`
#[must_use]
pub fn failure(message: impl Into<String>) -> Value {
    json!({
        "isSuccess": false,
        "message": message.into(),
        "data": null,
    })
}

/// A list envelope with all six pagination fields
#[must_use]
pub fn page(items: impl Serialize, pagination: Pagination) -> Value {
    json!({
        "isSuccess": true,
        "message": "OK",
        "data": to_json(items),
        "totalCount": pagination.total_count,
        "totalPages": pagination.total_pages,
        "currentPage": pagination.current_page,
        "pageSize": pagination.page_size,
        "hasNext": pagination.has_next,
        "hasPrevious": pagination.has_previous,
    })
}

/// Pagination consistent with `total_count` rows at `page_size` per page
#[must_use]
pub fn pagination(total_count: u64, current_page: u32, page_size: u32) -> Pagination {
    let total_pages = u32::try_from(total_count.div_ceil(u64::from(page_size.max(1)))).unwrap_or(u32::MAX);
    Pagination {
        total_count,
        total_pages,
        current_page,
        page_size,
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    }
}

fn to_json(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_fixture_is_consistent() {
        let p = pagination(57, 2, 10);
        assert_eq!(p.total_pages, 6);
        assert!(p.has_next);
        assert!(p.has_previous);

        let envelope = page(Vec::<u32>::new(), p);
        assert_eq!(envelope["totalCount"], json!(57));
        assert_eq!(envelope["hasNext"], json!(true));
    }
}
