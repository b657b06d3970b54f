//! Pagination query parameters and the page-shaped list response.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Page number used when the client does not send one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers, so
/// the struct can be flattened into larger query types. Values are passed to
/// the question service as-is; range clamping is the service's job.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Requested page, defaulting to 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, defaulting to 20.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a list response.
///
/// `total` is the size of the full matching set, independent of the window
/// that `list` holds.
///
/// ```json
/// { "total": 37, "list": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub total: u64,
    pub list: Vec<T>,
}

impl<T> PageResult<T> {
    /// Converts every item, keeping order and total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            total: self.total,
            list: self.list.into_iter().map(f).collect(),
        }
    }
}

/// Adapts a service-level `(total, items)` pair to the wire page shape.
///
/// Performs no sorting, filtering or bounds checks.
pub fn paginate<T>(total: u64, items: Vec<T>) -> PageResult<T> {
    PageResult { total, list: items }
}
