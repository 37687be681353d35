//! Lucky triple counting for the access-code lists.
//!
//! A lucky triple is `(l[i], l[j], l[k])` with `i < j < k` where `l[i]`
//! divides `l[j]` and `l[j]` divides `l[k]`.

use log::debug;

/// `true` if `divisor` divides `value`. Zero divides nothing.
fn divides(divisor: u32, value: u32) -> bool {
    divisor != 0 && value % divisor == 0
}

/// Count lucky triples in O(n²) time and O(n) space.
///
/// The first pass records, for every index, how many earlier codes divide it.
/// The second pass walks every dividing pair `(j, i)` with `j < i` and adds the
/// number of divisors recorded for `j`, since each of them closes a triple.
pub fn count_lucky_triples(codes: &[u32]) -> u64 {
    let divisor_counts: Vec<u64> = codes
        .iter()
        .enumerate()
        .map(|(j, &code)| {
            codes[..j]
                .iter()
                .filter(|&&earlier| divides(earlier, code))
                .count() as u64
        })
        .collect();

    let mut triples = 0;
    for (i, &code) in codes.iter().enumerate() {
        for (j, &earlier) in codes[..i].iter().enumerate() {
            if divides(earlier, code) {
                triples += divisor_counts[j];
            }
        }
    }

    debug!("{} codes, {} lucky triples", codes.len(), triples);
    triples
}

/// Reference O(n³) count, only usable on short lists.
pub fn count_lucky_triples_naive(codes: &[u32]) -> u64 {
    let mut triples = 0;
    for i in 0..codes.len() {
        for j in 0..i {
            // No triple can have l[j] in the middle
            if !divides(codes[j], codes[i]) {
                continue;
            }
            for k in 0..j {
                if divides(codes[k], codes[j]) {
                    triples += 1;
                }
            }
        }
    }
    triples
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_lists() {
        assert_eq!(count_lucky_triples(&[1, 1, 1]), 1);
        assert_eq!(count_lucky_triples(&[1, 2, 3, 4, 5, 6]), 3);
        assert_eq!(count_lucky_triples_naive(&[1, 2, 3, 4, 5, 6]), 3);
    }

    #[test]
    fn test_pairs_have_no_triples() {
        assert_eq!(count_lucky_triples(&[1, 1]), 0);
        assert_eq!(count_lucky_triples(&[2, 4]), 0);
        assert_eq!(count_lucky_triples(&[7, 3]), 0);
    }

    #[test]
    fn test_order_matters() {
        // 4, 2, 1 has no dividing chain left to right
        assert_eq!(count_lucky_triples(&[4, 2, 1]), 0);
        assert_eq!(count_lucky_triples(&[1, 2, 4, 8]), 4);
    }

    #[test]
    fn test_all_equal_is_binomial() {
        // Every index triple counts: C(2000, 3)
        let codes = vec![1; 2000];
        assert_eq!(count_lucky_triples(&codes), 2000 * 1999 * 1998 / 6);
    }

    #[test]
    fn test_zero_divides_nothing() {
        assert_eq!(count_lucky_triples(&[0, 0, 0]), 0);
        assert_eq!(count_lucky_triples(&[1, 0, 0]), 0);
    }

    proptest! {
        #[test]
        fn matches_naive_count(codes in prop::collection::vec(1u32..=64, 0..=50)) {
            prop_assert_eq!(count_lucky_triples(&codes), count_lucky_triples_naive(&codes));
        }
    }
}
