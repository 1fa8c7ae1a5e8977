//! Page windows over the ordered object list.

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Half-open range `[start, end)` of the object list to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub is_last_page: bool,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.start..self.end]
    }
}

/// Computes the window for 1-based `page` of size `limit`.
///
/// A page past the end snaps to the tail: the last `limit` items (or all of
/// them when fewer). `page` and `limit` below 1 are treated as 1.
pub fn window(total: usize, page: usize, limit: usize) -> Window {
    let page = page.max(1);
    let limit = limit.max(1);

    let mut start = (page - 1).saturating_mul(limit);
    if start >= total {
        start = total.saturating_sub(limit);
    }
    let end = start.saturating_add(limit).min(total);

    Window {
        start,
        end,
        is_last_page: end == total,
    }
}

/// Number of pages needed for `total` items, at least 1
pub fn page_count(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1)).max(1)
}

/// Paging parameters taken from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Reads `page` and `limit` from decoded query pairs. The first
    /// occurrence of each key wins; anything missing, non-numeric or not
    /// positive falls back to the default.
    pub fn from_pairs<K, V>(pairs: &[(K, V)], default_limit: usize) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let lookup = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k.as_ref() == key)
                .and_then(|(_, v)| parse_positive(v.as_ref()))
        };
        Self {
            page: lookup("page").unwrap_or(DEFAULT_PAGE),
            limit: lookup("limit").unwrap_or(default_limit.max(1)),
        }
    }

    pub fn window(&self, total: usize) -> Window {
        window(total, self.page, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pages() {
        assert_eq!(
            window(45, 1, 20),
            Window {
                start: 0,
                end: 20,
                is_last_page: false
            }
        );
        assert_eq!(
            window(45, 3, 20),
            Window {
                start: 40,
                end: 45,
                is_last_page: true
            }
        );
    }

    #[test]
    fn test_far_page_snaps_to_tail() {
        assert_eq!(
            window(45, 9999, 20),
            Window {
                start: 25,
                end: 45,
                is_last_page: true
            }
        );
    }

    #[test]
    fn test_empty_list() {
        for page in [1, 2, 50] {
            let w = window(0, page, 20);
            assert_eq!((w.start, w.end, w.is_last_page), (0, 0, true));
        }
    }

    #[test]
    fn test_limit_larger_than_total() {
        assert_eq!(
            window(3, 4, 10),
            Window {
                start: 0,
                end: 3,
                is_last_page: true
            }
        );
    }

    #[test]
    fn test_window_bounds_hold() {
        for total in 0..30 {
            for limit in 1..12 {
                for page in 1..15 {
                    let w = window(total, page, limit);
                    assert!(w.start <= w.end && w.end <= total);
                    assert!(w.len() <= limit);
                    assert_eq!(w.is_last_page, w.end == total);
                }
            }
        }
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let w = window(10, usize::MAX, usize::MAX);
        assert_eq!((w.start, w.end, w.is_last_page), (0, 10, true));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(45, 20), 3);
        assert_eq!(page_count(40, 20), 2);
    }

    #[test]
    fn test_request_defaults() {
        let none: [(&str, &str); 0] = [];
        assert_eq!(PageRequest::from_pairs(&none, 20), PageRequest::default());

        let bad = [("page", "abc"), ("limit", "-5")];
        assert_eq!(PageRequest::from_pairs(&bad, 20), PageRequest::default());

        let zero = [("page", "0"), ("limit", "0")];
        assert_eq!(PageRequest::from_pairs(&zero, 20), PageRequest::default());
    }

    #[test]
    fn test_request_parses_values() {
        let pairs = [("limit", "5"), ("page", "3"), ("page", "9")];
        assert_eq!(
            PageRequest::from_pairs(&pairs, 20),
            PageRequest { page: 3, limit: 5 }
        );
    }

    #[test]
    fn test_request_uses_configured_default_limit() {
        let pairs = [("page", "2")];
        assert_eq!(
            PageRequest::from_pairs(&pairs, 50),
            PageRequest { page: 2, limit: 50 }
        );
    }
}
