pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;

pub use comments::*;
pub use dashboard::*;
pub use health::*;
pub use likes::*;
pub use playlists::*;
pub use subscriptions::*;
pub use tweets::*;

use serde::Deserialize;

/// Offset pagination parameters shared by list endpoints.
/// `page` starts at 1; `limit` defaults to 10 and is capped at 100.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let q = PaginationQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_pagination_clamping() {
        let q = PaginationQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);

        let q = PaginationQuery {
            page: Some(-3),
            limit: Some(0),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
    }

    #[test]
    fn test_pagination_offset() {
        let q = PaginationQuery {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(q.offset(), 50);
    }
}
