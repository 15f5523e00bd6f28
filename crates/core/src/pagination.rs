//! Page/limit normalization and the page result shape shared by all listings.

use serde::{Deserialize, Serialize};

/// 1-based page used when the caller supplies none (or a non-positive one).
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller supplies none (or a non-positive one).
///
/// No upper bound is applied here; adapters that need one must clamp.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Effective pagination parameters (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParameters {
    pub page: u32,
    pub limit: u32,
}

impl Default for PaginationParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PaginationParameters {
    /// Normalize raw (possibly absent or non-positive) caller input.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_PAGE_LIMIT),
        }
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Cut a page out of an already ordered result set.
    pub fn paginate<T>(&self, items: impl IntoIterator<Item = T>) -> Page<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let data = items.into_iter().skip(skip).take(take).collect();
        Page::new(*self, data)
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => default,
    }
}

/// A bounded slice of a result set plus the page/limit used to produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub limit: u32,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(params: PaginationParameters, data: Vec<T>) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            limit: self.limit,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
