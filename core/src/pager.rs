use crate::error::FetchError;

/// Items plus total count, as produced by one fetch of the data source
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// A scheduled fetch. The token is monotonically increasing; a response is
/// applied only when its token is still the latest one issued, so a slow
/// response can never overwrite the state of a newer request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest<F> {
    pub page: usize,
    pub page_size: usize,
    pub filter: F,
    pub token: u64,
}

/// Pagination engine for a listing view.
///
/// The engine owns the page window (current page, page size, loaded items,
/// total count, loading/error flags) and decides *when* a fetch is needed;
/// it performs no I/O itself. The owning view pumps it:
///
/// ```
/// use rehome_core::pager::{PageData, Pager};
///
/// let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
/// while let Some(req) = pager.take_request() {
///     // resolve req against the data source, then:
///     pager.apply(req.token, Ok(PageData { items: vec![1, 2, 3], total: 3 }));
/// }
/// assert_eq!(pager.items(), &[1, 2, 3]);
/// ```
///
/// The filter is opaque to the engine; only identity changes matter.
#[derive(Debug)]
pub struct Pager<T, F> {
    items: Vec<T>,
    total: u64,
    current_page: usize,
    page_size: usize,
    filter: F,
    loading: bool,
    error: Option<String>,
    dirty: bool,
    issued: u64,
}

impl<T, F: Clone + PartialEq> Pager<T, F> {
    /// New engine on page 1 with an initial fetch already scheduled
    pub fn new(page_size: usize, filter: F) -> Self {
        Pager {
            items: Vec::new(),
            total: 0,
            current_page: 1,
            page_size: page_size.max(1),
            filter,
            loading: false,
            error: None,
            dirty: true,
            issued: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch, cleared by the next trigger
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last page number: `max(1, ceil(total / page_size))`
    pub fn last_page(&self) -> usize {
        (self.total as usize).div_ceil(self.page_size).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    /// Advance one page. No-op on the last page. Returns whether a refetch
    /// was scheduled.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        self.schedule();
        true
    }

    /// Go back one page. No-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        self.schedule();
        true
    }

    /// Change the page size. The current window loses its meaning, so the
    /// page resets to 1 and a refetch is scheduled.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
        self.schedule();
    }

    /// Jump to a specific page (1-based). A value past the end is clamped
    /// once the next fetch reports the real total.
    pub fn set_page(&mut self, page: usize) {
        let page = page.max(1);
        if page == self.current_page {
            return;
        }
        self.current_page = page;
        self.schedule();
    }

    /// Replace the filter. An identity change resets the page to 1 and
    /// schedules a refetch; setting the same filter again does nothing.
    pub fn set_filter(&mut self, filter: F) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.current_page = 1;
        self.schedule();
    }

    /// Schedule a refetch of the current window
    pub fn refresh(&mut self) {
        self.schedule();
    }

    fn schedule(&mut self) {
        self.dirty = true;
    }

    /// Take the pending fetch, if any. Marks the state as loading and clears
    /// the previous error.
    pub fn take_request(&mut self) -> Option<FetchRequest<F>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.loading = true;
        self.error = None;
        self.issued += 1;
        Some(FetchRequest {
            page: self.current_page,
            page_size: self.page_size,
            filter: self.filter.clone(),
            token: self.issued,
        })
    }

    /// Apply the outcome of a fetch. Returns `false` when the response was
    /// stale and discarded.
    ///
    /// On success the items and total are replaced wholesale and the current
    /// page is clamped into `[1, last_page]`; a clamp that moves the page
    /// schedules a follow-up fetch for the window that actually exists. On
    /// failure the message is stored and the previous items stay untouched.
    pub fn apply(&mut self, token: u64, outcome: Result<PageData<T>, FetchError>) -> bool {
        if token != self.issued {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                let last = self.last_page();
                if self.current_page > last {
                    self.current_page = last;
                    self.schedule();
                }
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Remove items locally without refetching, for optimistic mutations
    /// such as un-favoriting. The total is deliberately left untouched, so
    /// the page display may overstate the count until the next fetch.
    pub fn remove_local<P>(&mut self, mut removed: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !removed(item));
        before - self.items.len()
    }

    /// `"Page {current} of {last}"`
    pub fn page_display(&self) -> String {
        format!("Page {} of {}", self.current_page, self.last_page())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn ok_page(count: usize, total: u64) -> Result<PageData<u32>, FetchError> {
        Ok(PageData {
            items: (0..count as u32).collect(),
            total,
        })
    }

    /// Pump until no fetch is pending, resolving every request with the same
    /// total and a full window of items.
    fn settle(pager: &mut Pager<u32, Option<String>>, total: u64) {
        while let Some(req) = pager.take_request() {
            let remaining = total.saturating_sub(((req.page - 1) * req.page_size) as u64);
            let count = remaining.min(req.page_size as u64) as usize;
            pager.apply(req.token, ok_page(count, total));
        }
    }

    #[test]
    fn test_last_page_is_ceil_with_floor_of_one() {
        let cases = [
            (0u64, 10usize, 1usize),
            (1, 10, 1),
            (10, 10, 1),
            (11, 10, 2),
            (25, 10, 3),
            (25, 5, 5),
            (3, 1, 3),
        ];

        for (total, size, expected) in cases {
            let mut pager: Pager<u32, Option<String>> = Pager::new(size, None);
            settle(&mut pager, total);
            assert_eq!(pager.last_page(), expected, "total={total} size={size}");
        }
    }

    #[test]
    fn test_next_is_noop_on_last_page() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 25);

        assert!(pager.next_page());
        settle(&mut pager, 25);
        assert!(pager.next_page());
        settle(&mut pager, 25);

        assert_eq!(pager.current_page(), 3);
        assert!(!pager.has_next());
        assert!(!pager.next_page());
        assert_eq!(pager.current_page(), 3);
        assert!(pager.take_request().is_none());
    }

    #[test]
    fn test_previous_is_noop_on_first_page() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 25);

        assert!(!pager.previous_page());
        assert_eq!(pager.current_page(), 1);
        assert!(pager.take_request().is_none());
    }

    #[test]
    fn test_set_page_size_resets_to_page_one() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 100);
        pager.next_page();
        settle(&mut pager, 100);
        assert_eq!(pager.current_page(), 2);

        pager.set_page_size(30);

        assert_eq!(pager.current_page(), 1);
        let req = pager.take_request().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 30);
    }

    #[test]
    fn test_failed_fetch_keeps_items_and_reports_error() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 25);
        let before = pager.items().to_vec();

        pager.next_page();
        let req = pager.take_request().unwrap();
        assert!(pager.is_loading());
        pager.apply(
            req.token,
            Err(FetchError::Status {
                status: 500,
                message: "Failed to fetch ads".to_string(),
            }),
        );

        assert_eq!(pager.error(), Some("Failed to fetch ads"));
        assert_eq!(pager.items(), before.as_slice());
        assert!(!pager.is_loading());

        // the next trigger clears the error
        pager.refresh();
        let req = pager.take_request().unwrap();
        assert_eq!(pager.error(), None);
        pager.apply(req.token, ok_page(10, 25));
        assert_eq!(pager.error(), None);
    }

    #[test]
    fn test_filter_change_resets_page_and_refetches() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 100);
        for _ in 0..3 {
            pager.next_page();
            settle(&mut pager, 100);
        }
        assert_eq!(pager.current_page(), 4);

        pager.set_filter(Some("Cat".to_string()));

        assert_eq!(pager.current_page(), 1);
        let req = pager.take_request().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.filter, Some("Cat".to_string()));
    }

    #[test]
    fn test_same_filter_does_not_refetch() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, Some("Cat".to_string()));
        settle(&mut pager, 10);

        pager.set_filter(Some("Cat".to_string()));

        assert!(pager.take_request().is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        let first = pager.take_request().unwrap();

        // a newer fetch is triggered before the first resolves
        pager.refresh();
        let second = pager.take_request().unwrap();

        assert!(!pager.apply(first.token, ok_page(10, 999)));
        assert_eq!(pager.total(), 0);
        assert!(pager.is_loading());

        assert!(pager.apply(second.token, ok_page(10, 25)));
        assert_eq!(pager.total(), 25);
        assert!(!pager.is_loading());
    }

    #[test]
    fn test_shrunk_result_set_clamps_page_and_refetches() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 100);
        for _ in 0..3 {
            pager.next_page();
            settle(&mut pager, 100);
        }
        assert_eq!(pager.current_page(), 4);

        // the server-side result set shrank underneath us
        pager.refresh();
        let req = pager.take_request().unwrap();
        pager.apply(req.token, ok_page(0, 15));

        assert_eq!(pager.current_page(), 2);
        let follow_up = pager.take_request().unwrap();
        assert_eq!(follow_up.page, 2);
    }

    #[test]
    fn test_remove_local_keeps_total_and_schedules_nothing() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        settle(&mut pager, 25);

        let removed = pager.remove_local(|&n| n == 3);

        assert_eq!(removed, 1);
        assert_eq!(pager.items().len(), 9);
        assert_eq!(pager.total(), 25);
        assert!(pager.take_request().is_none());
    }

    #[test]
    fn test_page_display() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(10, None);
        assert_eq!(pager.page_display(), "Page 1 of 1");

        settle(&mut pager, 25);
        assert_eq!(pager.page_display(), "Page 1 of 3");

        pager.next_page();
        settle(&mut pager, 25);
        assert_eq!(pager.page_display(), "Page 2 of 3");
    }

    #[test]
    fn test_page_size_floor_of_one() {
        let mut pager: Pager<u32, Option<String>> = Pager::new(0, None);
        assert_eq!(pager.page_size(), 1);

        pager.set_page_size(0);
        assert_eq!(pager.page_size(), 1);
    }
}
