//! The recycling rule shared by all vectorized operations.

use crate::{options::RecyclingPolicy, DateFmtError, DateFmtResult};

/// Computes the length every input is broadcast to.
///
/// Returns `0` when any input is empty, which short-circuits the operation
/// into an empty result. Otherwise the longest input wins and shorter inputs
/// are repeated cyclically. Whether a length that does not divide the longest
/// one is accepted is decided by `policy`.
pub fn recycling_length(lengths: &[usize], policy: RecyclingPolicy) -> DateFmtResult<usize> {
    if lengths.is_empty() || lengths.contains(&0) {
        return Ok(0);
    }

    let max = lengths.iter().copied().max().unwrap_or(0);
    if lengths.iter().all(|len| max % len == 0) {
        return Ok(max);
    }

    match policy {
        RecyclingPolicy::Permissive => {}
        RecyclingPolicy::Warn => {
            #[cfg(feature = "log")]
            log::warn!("longer object length is not a multiple of shorter object length");
        }
        RecyclingPolicy::Strict => {
            return Err(DateFmtError::range()
                .with_message("longer object length is not a multiple of shorter object length"))
        }
    }
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn longest_length_wins() {
        assert_eq!(recycling_length(&[1, 4], RecyclingPolicy::Strict), Ok(4));
        assert_eq!(recycling_length(&[6, 3, 2], RecyclingPolicy::Strict), Ok(6));
        assert_eq!(recycling_length(&[5], RecyclingPolicy::Strict), Ok(5));
    }

    #[test]
    fn any_empty_input_is_empty() {
        assert_eq!(recycling_length(&[0, 10], RecyclingPolicy::Strict), Ok(0));
        assert_eq!(recycling_length(&[10, 0], RecyclingPolicy::Permissive), Ok(0));
        assert_eq!(recycling_length(&[], RecyclingPolicy::Warn), Ok(0));
    }

    #[test]
    fn non_multiple_lengths() {
        assert_eq!(recycling_length(&[2, 3], RecyclingPolicy::Permissive), Ok(3));
        assert_eq!(recycling_length(&[3, 2], RecyclingPolicy::Warn), Ok(3));
        let err = recycling_length(&[2, 3], RecyclingPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }
}
