//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a window of rows, expressed as `limit` rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The maximum number of rows to return.
    pub limit: usize,
    /// The number of rows to skip.
    pub offset: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: usize = 20;
    /// The maximum page size accepted at the HTTP boundary.
    pub const MAX_LIMIT: usize = 100;

    /// Creates a new page request.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }

    /// Returns the next window of the same size.
    ///
    /// The offset saturates at `usize::MAX`.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.limit, self.offset.saturating_add(self.limit))
    }

    /// Returns the inclusive row range `[offset, offset + limit - 1]`.
    ///
    /// `None` when `limit` is zero, since no range selects zero rows. The
    /// end saturates at `usize::MAX`; no table has that many rows.
    #[must_use]
    pub const fn range(&self) -> Option<(usize, usize)> {
        if self.limit == 0 {
            None
        } else {
            Some((self.offset, self.offset.saturating_add(self.limit - 1)))
        }
    }

    /// Returns true if this request can select no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_range() {
        let req = PageRequest::new(10, 20);
        assert_eq!(req.range(), Some((20, 29)));
    }

    #[test]
    fn test_page_request_single_row() {
        assert_eq!(PageRequest::new(1, 0).range(), Some((0, 0)));
    }

    #[test]
    fn test_page_request_zero_limit() {
        let req = PageRequest::new(0, 5);
        assert!(req.is_empty());
        assert_eq!(req.range(), None);
    }

    #[test]
    fn test_page_request_first() {
        let req = PageRequest::first();
        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, PageRequest::DEFAULT_LIMIT);
        assert_eq!(PageRequest::default(), req);
    }

    #[test]
    fn test_page_request_next() {
        let req = PageRequest::new(15, 0).next().next();
        assert_eq!(req, PageRequest::new(15, 30));
    }

    #[test]
    fn test_page_request_range_saturates() {
        let req = PageRequest::new(20, usize::MAX);
        assert_eq!(req.range(), Some((usize::MAX, usize::MAX)));
        assert_eq!(req.next(), PageRequest::new(20, usize::MAX));

        let req = PageRequest::new(usize::MAX, 1);
        assert_eq!(req.range(), Some((1, usize::MAX)));
    }
}
