/// One page of results plus pagination metadata.
///
/// Constructed fresh per request; carries no identity beyond the request
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedResult<T> {
    /// Entries on this page, in the requested order.
    pub data: Vec<T>,
    /// Matching rows across all pages.
    pub total_count: u64,
    /// Echoed 1-based page number.
    pub page_number: u32,
    /// Echoed page size.
    pub page_size: u32,
    /// Total page count, zero when nothing matches.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    /// Assembles the envelope from the count result and the fetched page.
    ///
    /// The metadata derives from `total_count` and the request's page
    /// inputs, never from the fetched slice length. A page number past the
    /// last page is not an error; it yields an empty `data` slice and
    /// `has_next_page = false`.
    #[must_use]
    pub fn assemble(data: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        let total_pages = total_count.div_ceil(u64::from(page_size.max(1)));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

        Self {
            data,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_next_page: page_number < total_pages,
            has_previous_page: page_number > 1,
        }
    }
}
