//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated request for one page of data.
///
/// Pages are numbered from one. There is no upper bound on the page size, and
/// asking for a page past the last one is not an error, it just yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if `page` or `page_size` is zero.
    pub fn new(page: u64, page_size: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::Validation("page must be at least 1".to_owned()));
        }

        if page_size == 0 {
            return Err(Error::Validation("limit must be at least 1".to_owned()));
        }

        Ok(Self { page, page_size })
    }

    /// Build a page request from optional query parameters, filling in the
    /// gaps from `config`.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if the resulting page or page size is zero.
    pub fn from_query(
        page: Option<u64>,
        page_size: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        Self::new(
            page.unwrap_or(config.default_page),
            page_size.unwrap_or(config.default_page_size),
        )
    }

    /// The one-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on the page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// The number of items that come before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// The number of pages needed to show `total_items` at this page size.
    pub fn page_count(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.page_size)
    }
}
