//! Lazy element-wise conversion.

use std::iter::FusedIterator;

use super::converter::BiConverter;
use crate::error::Result;

/// Iterator returned by [`BiConverter::convert_all`].
///
/// Pulls one item from the source per call to `next`; nothing is converted
/// ahead of time.
pub struct ConvertAll<I, A, B> {
    source: I,
    converter: BiConverter<A, B>,
}

impl<I, A, B> ConvertAll<I, A, B> {
    pub(super) fn new(source: I, converter: BiConverter<A, B>) -> Self {
        Self { source, converter }
    }

    /// Borrow the underlying source iterator.
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Recover the source iterator, e.g. to mutate the collection behind it.
    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<I, A, B> Iterator for ConvertAll<I, A, B>
where
    I: Iterator<Item = A>,
    A: 'static,
    B: 'static,
{
    type Item = Result<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.source.next()?;
        Some(self.converter.convert(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<I, A, B> DoubleEndedIterator for ConvertAll<I, A, B>
where
    I: DoubleEndedIterator<Item = A>,
    A: 'static,
    B: 'static,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.source.next_back()?;
        Some(self.converter.convert(item))
    }
}

impl<I, A, B> ExactSizeIterator for ConvertAll<I, A, B>
where
    I: ExactSizeIterator<Item = A>,
    A: 'static,
    B: 'static,
{
}

impl<I, A, B> FusedIterator for ConvertAll<I, A, B>
where
    I: FusedIterator<Item = A>,
    A: 'static,
    B: 'static,
{
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn to_text() -> BiConverter<i64, String> {
        BiConverter::try_from_fns(|a: i64| Ok(a.to_string()), |s: String| Ok(s.len() as i64))
    }

    #[test]
    fn test_converts_in_order() {
        let out: Result<Vec<_>> = to_text().convert_all([1, 2, 3]).collect();
        assert_eq!(out.unwrap(), ["1", "2", "3"]);
    }

    #[test]
    fn test_is_lazy() {
        let pulled = Cell::new(0);
        let source = (0..).inspect(|_| pulled.set(pulled.get() + 1));
        let mut iter = to_text().convert_all(source);

        assert_eq!(pulled.get(), 0);
        assert_eq!(iter.next().unwrap().unwrap(), "0");
        assert_eq!(iter.next().unwrap().unwrap(), "1");
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_size_and_reverse_order() {
        let iter = to_text().convert_all(vec![7, 8]);
        assert_eq!(iter.len(), 2);
        let back: Vec<_> = iter.rev().map(|r| r.unwrap()).collect();
        assert_eq!(back, ["8", "7"]);
    }

    #[test]
    fn test_into_inner_returns_remaining_source() {
        let mut iter = to_text().convert_all(vec![1, 2, 3]);
        iter.next();
        let rest: Vec<_> = iter.into_inner().collect();
        assert_eq!(rest, [2, 3]);
    }
}
