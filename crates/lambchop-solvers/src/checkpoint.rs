//! Checkpoint checksum: XOR of every worker ID the guards note down.
//!
//! With a line of `length` workers starting at ID `start`, pass `r` covers
//! the `length - r` IDs beginning at `start + r * length`. Each pass is
//! reduced bit by bit in closed form, so the cost is logarithmic in the IDs
//! rather than linear in the number of workers.
//!
//! Lines whose last worker ID does not fit in a `u64` have no checksum and
//! yield `None`. `Bounds::check_checkpoint` enforces the puzzle's much tighter
//! limit.

use log::debug;

use crate::puzzle::Checkpoint;

/// XOR of bit `bit` over the `count` IDs starting at `start`, left in place.
///
/// Only meaningful for `count < 2^(bit + 1)`: within one period of that bit,
/// ones appear as at most two runs, which are counted directly.
pub fn xor_of_bit(start: u64, count: u64, bit: u32) -> u64 {
    if bit >= u64::BITS {
        return 0;
    }
    // Widened so the run boundaries past u64::MAX stay representable
    let end = u128::from(start) + u128::from(count);
    let start = u128::from(start);
    let mask = 1u128 << bit;
    // Aligned block start below `start`; bit is clear for the first half
    let block_start = start - start % (mask * 2);

    let first_one = start.max(block_start + mask);
    if first_one > end {
        return 0;
    }
    let end_ones = end.min(block_start + 2 * mask);
    let mut ones = end_ones - first_one;

    if end > end_ones + mask {
        ones += end - (block_start + 3 * mask);
    }

    if ones % 2 == 1 {
        1u64 << bit
    } else {
        0
    }
}

/// XOR of the `len` consecutive IDs starting at `start`.
///
/// `None` if the last ID does not fit in a `u64`.
pub fn row_checksum(start: u64, len: u64) -> Option<u64> {
    if len == 0 {
        return Some(0);
    }
    let last = start.checked_add(len - 1)?;
    let bits = u64::BITS - last.leading_zeros();

    let mut checksum = 0;
    for bit in 0..bits {
        if bit == 0 {
            // Low bits of consecutive IDs repeat with period 4
            match (len % 4, start & 1) {
                (1, 1) | (2, _) | (3, 0) => checksum ^= 1,
                _ => {}
            }
        } else {
            // Whole periods of 2^(bit + 1) hold an even number of ones
            let remaining = 1u64.checked_shl(bit + 1).map_or(len, |period| len % period);
            checksum ^= xor_of_bit(start, remaining, bit);
        }
    }
    Some(checksum)
}

/// `true` if every worker ID of the line, checked or not, fits in a `u64`.
fn line_fits(start: u64, length: u64) -> bool {
    length == 0 || Checkpoint::new(start, length).last_worker_id().is_some()
}

/// Fold `row` over the passes of the line.
fn fold_rows(start: u64, length: u64, row: fn(u64, u64) -> Option<u64>) -> Option<u64> {
    if !line_fits(start, length) {
        return None;
    }
    (0..length).try_fold(0, |checksum, pass| {
        let pass_start = pass.checked_mul(length)?.checked_add(start)?;
        Some(checksum ^ row(pass_start, length - pass)?)
    })
}

/// Checksum the guards submit for a line starting at `start`.
///
/// `None` if the queue holds an ID beyond `u64::MAX`.
pub fn checkpoint_checksum(start: u64, length: u64) -> Option<u64> {
    let checksum = fold_rows(start, length, row_checksum);
    debug!("checkpoint start={} length={}: checksum {:?}", start, length, checksum);
    checksum
}

/// Reference row checksum, XORing every ID.
pub fn row_checksum_naive(start: u64, len: u64) -> Option<u64> {
    if len == 0 {
        return Some(0);
    }
    let last = start.checked_add(len - 1)?;
    Some((start..=last).fold(0, |checksum, id| checksum ^ id))
}

/// Reference checkpoint checksum, linear in the number of checked workers.
pub fn checkpoint_checksum_naive(start: u64, length: u64) -> Option<u64> {
    fold_rows(start, length, row_checksum_naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    /// XOR of 0..=n
    fn xor_through(n: u64) -> u64 {
        match n % 4 {
            0 => n,
            1 => 1,
            2 => n + 1,
            _ => 0,
        }
    }

    #[test]
    fn test_reference_checkpoints() {
        assert_eq!(checkpoint_checksum(0, 3), Some(2));
        assert_eq!(checkpoint_checksum(17, 4), Some(14));
        assert_eq!(checkpoint_checksum_naive(17, 4), Some(14));
    }

    #[test]
    fn test_single_worker() {
        assert_eq!(checkpoint_checksum(0, 1), Some(0));
        assert_eq!(checkpoint_checksum(2_000_000_000, 1), Some(2_000_000_000));
        assert_eq!(checkpoint_checksum(5, 0), Some(0));
    }

    #[test]
    fn test_row_checksum() {
        assert_eq!(row_checksum(3, 4), Some(3 ^ 4 ^ 5 ^ 6));
        assert_eq!(row_checksum(0, 0), Some(0));
        assert_eq!(row_checksum(41, 0), Some(0));
        assert_eq!(row_checksum(7, 1), Some(7));
    }

    #[test]
    fn test_xor_of_bit() {
        // 4, 5 and 6 have bit 2 set
        assert_eq!(xor_of_bit(2, 5, 2), 4);
        // 7, 12 and 13 have bit 2 set across two runs
        assert_eq!(xor_of_bit(7, 7, 2), 4);
        // Only 6 and 7 have bit 1 set
        assert_eq!(xor_of_bit(5, 3, 1), 0);
        assert_eq!(xor_of_bit(8, 3, 3), 8);
        assert_eq!(xor_of_bit(0, 3, 2), 0);
    }

    #[test]
    fn test_ids_at_u64_max() {
        assert_eq!(xor_of_bit(u64::MAX, 1, 63), 1 << 63);
        assert_eq!(xor_of_bit(u64::MAX, 1, 64), 0);

        assert_eq!(row_checksum(u64::MAX, 1), Some(u64::MAX));
        assert_eq!(row_checksum(u64::MAX - 5, 6), row_checksum_naive(u64::MAX - 5, 6));
        assert_eq!(row_checksum(u64::MAX, 2), None);

        assert_eq!(checkpoint_checksum(u64::MAX, 1), Some(u64::MAX));
        // (MAX-3) ^ (MAX-2) ^ (MAX-1)
        assert_eq!(checkpoint_checksum(u64::MAX - 3, 2), Some(u64::MAX));
        assert_eq!(checkpoint_checksum_naive(u64::MAX - 3, 2), Some(u64::MAX));
    }

    #[test]
    fn test_overflowing_lines_have_no_checksum() {
        assert_eq!(checkpoint_checksum(u64::MAX, 2), None);
        assert_eq!(checkpoint_checksum(u64::MAX - 2, 2), None);
        assert_eq!(checkpoint_checksum(0, u64::MAX), None);
        assert_eq!(checkpoint_checksum(1, 1 << 32), None);
        assert_eq!(checkpoint_checksum_naive(u64::MAX, 2), None);
    }

    #[test]
    fn test_small_lines_match_naive() {
        for start in 0..200 {
            for length in 1..=12 {
                assert_eq!(
                    checkpoint_checksum(start, length),
                    checkpoint_checksum_naive(start, length),
                    "start={} length={}",
                    start,
                    length
                );
            }
        }
    }

    #[test]
    fn test_longest_line_is_fast() {
        // Longest line whose IDs stay within 2e9. Rows up to 4e9 long are
        // covered without iteration by `row_matches_prefix_xor` below.
        let length = 44_721;
        let start = 2_000_000_000 - length * length + 1;

        let started = Instant::now();
        let checksum = checkpoint_checksum(start, length);
        assert!(started.elapsed() < Duration::from_secs(1));

        let expected = (0..length).fold(0, |acc, row| {
            let first = start + row * length;
            let len = length - row;
            acc ^ xor_through(first + len - 1) ^ first.checked_sub(1).map_or(0, xor_through)
        });
        assert_eq!(checksum, Some(expected));
    }

    proptest! {
        #[test]
        fn matches_naive_for_short_lines(start in 0u64..=2_000_000_000, length in 1u64..=12) {
            prop_assert_eq!(checkpoint_checksum(start, length), checkpoint_checksum_naive(start, length));
        }

        #[test]
        fn matches_naive_near_u64_max(offset in 0u64..=200, length in 1u64..=12) {
            let start = u64::MAX - offset;
            prop_assert_eq!(checkpoint_checksum(start, length), checkpoint_checksum_naive(start, length));
        }

        #[test]
        fn row_matches_prefix_xor(start in 0u64..=4_000_000_000, len in 0u64..=4_000_000_000) {
            let expected = if len == 0 {
                0
            } else {
                xor_through(start + len - 1) ^ start.checked_sub(1).map_or(0, xor_through)
            };
            prop_assert_eq!(row_checksum(start, len), Some(expected));
        }
    }
}
