//! Pagination utilities for service layer
//!
//! `Pagination` comes straight from query strings; `Page` is what list
//! operations hand back.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64` (0-based page index, page size)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of a filtered listing.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// matching rows across all pages
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, opts: Pagination) -> Self {
        let (idx, per) = opts.normalize();
        Self { items, total, page: idx as u32 + 1, per_page: per as u32 }
    }

    pub fn empty(opts: Pagination) -> Self { Self::new(Vec::new(), 0, opts) }

    /// Cut a page out of an already filtered, ordered list.
    pub fn slice(all: Vec<T>, opts: Pagination) -> Self {
        let (idx, per) = opts.normalize();
        let total = all.len() as u64;
        let items = all.into_iter().skip((idx * per) as usize).take(per as usize).collect();
        Self::new(items, total, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn slice_reports_total_and_window() {
        let p = Page::slice((1..=7).collect::<Vec<_>>(), Pagination { page: 2, per_page: 3 });
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total, 7);
        assert_eq!(p.page, 2);
        let last = Page::slice((1..=7).collect::<Vec<_>>(), Pagination { page: 3, per_page: 3 });
        assert_eq!(last.items, vec![7]);
    }
}
