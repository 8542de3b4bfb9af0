use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::user_status::{UserStatus, UserStatusWithManager};
use crate::utils::field_validation::ValidationErrors;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_PAGE: i64 = 1;
/// SQL `LIKE` pattern matching every value.
pub const MATCH_ALL: &str = "%";

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Rows per page (default 20)
    #[schema(example = 20)]
    pub page_size: Option<i64>,
    /// 1-indexed page number (default 1)
    #[schema(example = 1)]
    pub page: Option<i64>,
    /// `LIKE` filter on status, HR listing only
    #[schema(example = "Active")]
    pub status: Option<String>,
    /// `LIKE` filter on employee_environment, HR listing only
    #[schema(example = "Internal")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: i64,
    pub page: i64,
}

impl PageRequest {
    pub fn from_query(query: &ListQuery) -> Result<Self, ValidationErrors> {
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let page = query.page.unwrap_or(DEFAULT_PAGE);

        let mut errors = ValidationErrors::default();
        if page_size < 1 {
            errors.add("page_size", "min value is 1");
        }
        if page < 1 {
            errors.add("page", "min value is 1");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self { page_size, page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// `ceil(count / page_size)`, zero rows giving zero pages.
pub fn max_page(count: i64, page_size: i64) -> i64 {
    if count <= 0 || page_size <= 0 {
        return 0;
    }
    count / page_size + i64::from(count % page_size != 0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageCursor {
    #[schema(nullable = true, example = 2)]
    pub page: Option<i64>,
    #[schema(example = 20)]
    pub page_size: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    UserStatusPage = Paginated<UserStatus>,
    UserStatusHrPage = Paginated<UserStatusWithManager>
)]
pub struct Paginated<T> {
    #[schema(example = 42)]
    pub count: i64,
    #[schema(example = 3)]
    pub max_page: i64,
    pub previous: PageCursor,
    pub next: PageCursor,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(count: i64, request: PageRequest, results: Vec<T>) -> Self {
        let max_page = max_page(count, request.page_size);
        let page = request.page;

        let previous = (page > 1 && page <= max_page).then(|| page - 1);
        let next = (page >= 0 && page < max_page).then(|| page + 1);

        Self {
            count,
            max_page,
            previous: PageCursor {
                page: previous,
                page_size: request.page_size,
            },
            next: PageCursor {
                page: next,
                page_size: request.page_size,
            },
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn request(page_size: i64, page: i64) -> PageRequest {
        PageRequest { page_size, page }
    }

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    #[case(45, 10, 5)]
    #[case(7, 1, 7)]
    fn max_page_rounds_up(#[case] count: i64, #[case] page_size: i64, #[case] expected: i64) {
        assert_eq!(max_page(count, page_size), expected);
    }

    #[rstest]
    #[case::first_page(45, 1, None, Some(2))]
    #[case::middle_page(45, 3, Some(2), Some(4))]
    #[case::last_page(45, 5, Some(4), None)]
    #[case::past_the_end(45, 9, None, None)]
    #[case::empty_table(0, 1, None, None)]
    fn cursors(
        #[case] count: i64,
        #[case] page: i64,
        #[case] previous: Option<i64>,
        #[case] next: Option<i64>,
    ) {
        let envelope = Paginated::<()>::new(count, request(10, page), vec![]);

        assert_eq!(envelope.previous, PageCursor { page: previous, page_size: 10 });
        assert_eq!(envelope.next, PageCursor { page: next, page_size: 10 });
    }

    #[test]
    fn envelope_shape() {
        let envelope = Paginated::new(3, request(2, 1), vec!["a", "b"]);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({
                "count": 3,
                "max_page": 2,
                "previous": {"page": null, "page_size": 2},
                "next": {"page": 2, "page_size": 2},
                "results": ["a", "b"]
            })
        );
    }

    #[test]
    fn query_defaults() {
        let request = PageRequest::from_query(&ListQuery::default()).unwrap();

        assert_eq!(request, PageRequest { page_size: 20, page: 1 });
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(request(25, 3).offset(), 50);
    }

    #[rstest]
    #[case(Some(0), None, "page_size")]
    #[case(Some(-5), None, "page_size")]
    #[case(None, Some(0), "page")]
    fn query_rejects_non_positive(
        #[case] page_size: Option<i64>,
        #[case] page: Option<i64>,
        #[case] field: &str,
    ) {
        let query = ListQuery {
            page_size,
            page,
            ..Default::default()
        };

        let errors = PageRequest::from_query(&query).unwrap_err();
        assert_eq!(errors.get(field), Some(&["min value is 1".to_string()][..]));
    }
}
