// src/domain/repositories/query.rs
use serde::Serialize;
use std::collections::BTreeSet;

/// Selection for the tag filter listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    /// Bookmarks without any tag
    Untagged,
    /// Bookmarks carrying at least one of these exact titles
    AnyOf(BTreeSet<String>),
}

impl TagFilter {
    /// Build a filter from raw titles; no titles selects untagged bookmarks
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: BTreeSet<String> = titles.into_iter().map(Into::into).collect();
        if titles.is_empty() {
            TagFilter::Untagged
        } else {
            TagFilter::AnyOf(titles)
        }
    }
}

/// One page of a listing, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Rows to skip; saturates for page numbers beyond any real listing
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// A page of results plus what is needed to render paging links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_titles_when_from_titles_then_untagged() {
        assert_eq!(TagFilter::from_titles(Vec::<String>::new()), TagFilter::Untagged);
    }

    #[test]
    fn given_duplicate_titles_when_from_titles_then_set() {
        let filter = TagFilter::from_titles(["x", "y", "x"]);
        assert_eq!(
            filter,
            TagFilter::AnyOf(BTreeSet::from(["x".to_string(), "y".to_string()]))
        );
    }

    #[test]
    fn given_page_zero_when_new_then_first_page() {
        let request = PageRequest::new(0, 20);
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn given_huge_page_when_offset_then_saturates() {
        let request = PageRequest::new(usize::MAX, 20);
        assert_eq!(request.offset(), usize::MAX);
        assert_eq!(PageRequest::new(2, usize::MAX).offset(), usize::MAX);
    }

    #[test]
    fn given_totals_when_page_count_then_rounds_up() {
        let page = Page::<i32> {
            items: vec![],
            page: 2,
            limit: 20,
            total: 41,
        };
        assert_eq!(page.page_count(), 3);
        assert!(page.has_next());
        assert!(page.has_prev());

        let empty = Page::<i32> {
            items: vec![],
            page: 1,
            limit: 20,
            total: 0,
        };
        assert_eq!(empty.page_count(), 1);
        assert!(!empty.has_next());
    }
}
