//! Page windows over an already filtered and sorted sequence.

use serde::{Deserialize, Serialize};

/// Default page number when none (or zero) is supplied.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when none (or zero) is supplied.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// One page of results plus the size of the full sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// A clamped page window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Clamp arbitrary integers into a valid window: `page >= 1`,
    /// `1 <= page_size <= MAX_PAGE_SIZE`.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1) as u64,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE as i64) as u64,
        }
    }

    /// Build from raw request strings. Missing, unparsable or zero values
    /// fall back to the defaults before clamping.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page
            .and_then(parse_leading_int)
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_PAGE as i64);
        let page_size = page_size
            .and_then(parse_leading_int)
            .filter(|s| *s != 0)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64);
        Self::new(page, page_size)
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        usize::try_from((self.page - 1).saturating_mul(self.page_size)).unwrap_or(usize::MAX)
    }
}

/// Slice `items` to the requested window. `total` is always the full length.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = request.offset().min(total);
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(request.page_size as usize)
        .collect();
    Page { items, total }
}

/// Parse the leading integer of `raw` (optional sign, then digits), ignoring
/// any trailing text: `"3abc"` is 3, `"abc"` is `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_page_of_twenty_five_has_five_items() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(items, PageRequest::new(3, 10));
        assert_eq!(page.total, 25);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn out_of_range_page_is_empty_with_total() {
        let page = paginate((0..7).collect::<Vec<_>>(), PageRequest::new(5, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 7);
    }

    #[test]
    fn page_length_formula_holds() {
        let total = 37_i64;
        for page in 1..=6 {
            for size in [1, 3, 10, 100] {
                let result = paginate((0..total).collect::<Vec<_>>(), PageRequest::new(page, size));
                let expected = size.min((total - (page - 1) * size).max(0));
                assert_eq!(result.items.len() as i64, expected, "page={page} size={size}");
                assert_eq!(result.total as i64, total);
            }
        }
    }

    #[test]
    fn clamps_page_and_size() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, page_size: 1 });
        assert_eq!(PageRequest::new(-4, 500), PageRequest { page: 1, page_size: 100 });
    }

    #[test]
    fn raw_values_default_then_clamp() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_raw(Some("0"), Some("0")),
            PageRequest { page: 1, page_size: 10 }
        );
        assert_eq!(
            PageRequest::from_raw(Some("3abc"), Some("-5")),
            PageRequest { page: 3, page_size: 1 }
        );
        assert_eq!(
            PageRequest::from_raw(Some("x"), Some("250")),
            PageRequest { page: 1, page_size: 100 }
        );
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = paginate(vec![1, 2, 3], PageRequest::from_raw(Some("99999999999999999999"), None));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int(" 7 "), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
