//! Filtered, paginated listing
//!
//! Pages are 1-indexed with a fixed size. The filter is a case-insensitive
//! substring match on `name` only, and the total count uses the same
//! predicate as the page. Results are ordered by record id.

pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    filter: Option<String>,
    page: u32,
    page_size: u32,
}

impl ListQuery {
    /// Blank filters mean "no filter"; page 0 and page size 0 are raised to 1
    pub fn new(filter: Option<String>, page: u32, page_size: u32) -> Self {
        let filter = filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        Self {
            filter,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.filter {
            Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        }
    }
}

/// One page of results plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size.max(1)))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern
pub fn like_pattern(filter: &str) -> String {
    let mut out = String::with_capacity(filter.len() + 2);
    out.push('%');
    for ch in filter.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total_count: u64, page: u32) -> Page<()> {
        Page {
            items: Vec::new(),
            total_count,
            page,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(page_of(0, 1).total_pages(), 0);
        assert_eq!(page_of(2, 1).total_pages(), 1);
        assert_eq!(page_of(5, 1).total_pages(), 1);
        assert_eq!(page_of(6, 1).total_pages(), 2);
        assert_eq!(page_of(11, 1).total_pages(), 3);
    }

    #[test]
    fn test_prev_next() {
        assert!(!page_of(11, 1).has_prev());
        assert!(page_of(11, 1).has_next());
        assert!(page_of(11, 3).has_prev());
        assert!(!page_of(11, 3).has_next());
        // Out of range
        assert!(!page_of(11, 9).has_next());
    }

    #[test]
    fn test_query_normalization() {
        let q = ListQuery::new(Some("  ".into()), 0, 5);
        assert_eq!(q.filter(), None);
        assert_eq!(q.page(), 1);
        assert_eq!(q.offset(), 0);

        let q = ListQuery::new(Some(" ali ".into()), 3, 5);
        assert_eq!(q.filter(), Some("ali"));
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn test_matches_is_case_insensitive_substring() {
        let q = ListQuery::new(Some("ALI".into()), 1, 5);
        assert!(q.matches("Alice"));
        assert!(q.matches("Natalia"));
        assert!(!q.matches("Bob"));
        assert!(ListQuery::new(None, 1, 5).matches("anything"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }
}
