use super::PageRequestError;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A 1-based offset page over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a page request, validating that both values are at least 1.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::InvalidPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items skipped before this page.
    ///
    /// Fits in `u64` for every `u32` page and size.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Maximum number of items in this page.
    pub fn limit(&self) -> usize {
        self.page_size as usize
    }

    /// Cuts this page out of an already ordered sequence.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let Ok(offset) = usize::try_from(self.offset()) else {
            return Vec::new();
        };
        items.into_iter().skip(offset).take(self.limit()).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_page_construction() {
        let page = PageRequest::new(3, 20).unwrap();

        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_zero_page_is_invalid() {
        assert_eq!(PageRequest::new(0, 20), Err(PageRequestError::InvalidPage));
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        assert_eq!(
            PageRequest::new(1, 0),
            Err(PageRequestError::InvalidPageSize)
        );
    }

    #[test]
    fn test_default_is_first_page_of_one_hundred() {
        let page = PageRequest::default();

        assert_eq!(page.page(), 1);
        assert_eq!(page.page_size(), 100);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_slice_takes_requested_window() {
        let items: Vec<u32> = (1..=10).collect();

        assert_eq!(PageRequest::new(2, 3).unwrap().slice(items.clone()), [4, 5, 6]);
        assert_eq!(PageRequest::new(4, 3).unwrap().slice(items.clone()), [10]);
        assert!(PageRequest::new(5, 3).unwrap().slice(items).is_empty());
    }

    #[test]
    fn test_largest_page_offset_does_not_wrap() {
        let page = PageRequest::new(u32::MAX, u32::MAX).unwrap();

        assert_eq!(page.offset(), (u64::from(u32::MAX) - 1) * u64::from(u32::MAX));
        assert!(page.slice(vec![1, 2, 3]).is_empty());
    }
}
