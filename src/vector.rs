//! Read-only views that broadcast an input sequence to a recycled length.

use core::ops::Range;

use crate::{datefmt_assert, DateFmtError, DateFmtResult};

/// A read-only view over a sequence of possibly missing values, indexed
/// cyclically up to a target recycling length.
///
/// Logical index `i` maps onto physical element `i % len()`.
#[derive(Debug, Clone, Copy)]
pub struct RecycledVector<'a, T> {
    values: &'a [Option<T>],
    vectorize_length: usize,
}

/// Timestamps in seconds since the Unix epoch.
pub type TimestampVector<'a> = RecycledVector<'a, f64>;

/// Text inputs, either date patterns or strings to parse.
pub type TextVector<'a, S> = RecycledVector<'a, S>;

impl<'a, T> RecycledVector<'a, T> {
    /// Creates a view over `values` broadcast to `vectorize_length`.
    pub fn try_new(values: &'a [Option<T>], vectorize_length: usize) -> DateFmtResult<Self> {
        datefmt_assert!(
            !values.is_empty() || vectorize_length == 0,
            "An empty sequence cannot be recycled to a positive length."
        );
        Ok(Self {
            values,
            vectorize_length,
        })
    }

    /// The physical length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The length this view is broadcast to.
    pub fn vectorize_length(&self) -> usize {
        self.vectorize_length
    }

    /// The logical indices of this view, in order.
    pub fn indices(&self) -> Range<usize> {
        0..self.vectorize_length
    }

    #[inline]
    pub fn physical_index(&self, i: usize) -> usize {
        i.checked_rem(self.values.len()).unwrap_or(i)
    }

    /// Returns whether the element at logical index `i` is missing.
    pub fn is_missing(&self, i: usize) -> bool {
        self.values
            .get(self.physical_index(i))
            .map_or(true, Option::is_none)
    }

    /// Returns the element at logical index `i`.
    ///
    /// Reading a missing element is an error; callers are expected to check
    /// [`Self::is_missing`] first.
    pub fn get(&self, i: usize) -> DateFmtResult<&'a T> {
        #[cfg(debug_assertions)]
        if i >= self.vectorize_length {
            return Err(DateFmtError::out_of_bounds()
                .with_message("Index is out of the vectorized range."));
        }
        self.values
            .get(self.physical_index(i))
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                DateFmtError::missing_value().with_message("Attempted to read a missing element.")
            })
    }
}

impl<'a, S: AsRef<str>> RecycledVector<'a, S> {
    /// Returns the text at logical index `i`.
    pub fn get_str(&self, i: usize) -> DateFmtResult<&'a str> {
        self.get(i).map(|text| text.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn modulo_indexing() {
        let values = [Some(1.0), None, Some(3.0)];
        let vector = TimestampVector::try_new(&values, 7).unwrap();
        assert_eq!(vector.len(), 3);
        assert!(!vector.is_empty());
        assert_eq!(vector.vectorize_length(), 7);
        assert_eq!(vector.physical_index(5), 2);
        assert_eq!(vector.get(3), Ok(&1.0));
        assert_eq!(vector.get(6), Ok(&1.0));
        assert!(vector.is_missing(4));
        assert!(!vector.is_missing(5));
    }

    #[test]
    fn missing_read_is_an_error() {
        let values = [None, Some("yyyy")];
        let vector = TextVector::try_new(&values, 2).unwrap();
        assert_eq!(vector.get_str(1), Ok("yyyy"));
        let err = vector.get_str(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn out_of_range_read_is_an_error() {
        let values = [Some(0.0)];
        let vector = TimestampVector::try_new(&values, 2).unwrap();
        let err = vector.get(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn empty_sequence() {
        let values: [Option<f64>; 0] = [];
        let vector = TimestampVector::try_new(&values, 0).unwrap();
        assert!(vector.is_empty());
        assert!(vector.indices().next().is_none());
        assert_eq!(
            TimestampVector::try_new(&values, 1).unwrap_err().kind(),
            ErrorKind::Assert
        );
    }
}
