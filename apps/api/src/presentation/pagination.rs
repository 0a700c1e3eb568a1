use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// One page of a result list. Page numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

/// Slices `items` into the requested page. A page past the end is empty but
/// still reports the real totals. Callers validate `page >= 1` and `page_size >= 1`.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let slice = if start >= total {
        &[][..]
    } else {
        &items[start..(start + page_size).min(total)]
    };

    Page {
        page,
        page_size,
        total,
        total_pages,
        items: slice.to_vec(),
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
