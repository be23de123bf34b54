//! Pagination utilities for service layer
//!
//! `skip`/`limit` as accepted by the search endpoint. A missing or zero
//! limit means "no limit", mirroring the document store.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// records to skip from the start of the result
    pub skip: u64,
    /// maximum number of records, `None` for all
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self { skip: skip.unwrap_or(0), limit }
    }

    /// Normalize into the `(skip, limit)` pair the driver expects.
    pub fn normalize(self) -> (u64, Option<i64>) {
        let limit = match self.limit {
            None | Some(0) => None,
            Some(n) => Some(i64::try_from(n).unwrap_or(i64::MAX)),
        };
        (self.skip, limit)
    }

    /// Apply to an already ordered in-memory sequence.
    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let (skip, limit) = self.normalize();
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let iter = items.into_iter().skip(skip);
        match limit {
            Some(n) => iter.take(usize::try_from(n).unwrap_or(usize::MAX)).collect(),
            None => iter.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn zero_limit_means_unbounded() {
        let (skip, limit) = Pagination { skip: 0, limit: Some(0) }.normalize();
        assert_eq!(skip, 0);
        assert_eq!(limit, None);
    }

    #[test]
    fn huge_limit_is_clamped_to_driver_range() {
        let (_, limit) = Pagination { skip: 3, limit: Some(u64::MAX) }.normalize();
        assert_eq!(limit, Some(i64::MAX));
    }

    #[test]
    fn apply_skips_then_limits() {
        let page = Pagination::new(Some(1), Some(2)).apply(1..=5);
        assert_eq!(page, vec![2, 3]);
        let all = Pagination::default().apply(1..=3);
        assert_eq!(all, vec![1, 2, 3]);
        let none = Pagination::new(Some(10), None).apply(1..=3);
        assert!(none.is_empty());
    }
}
