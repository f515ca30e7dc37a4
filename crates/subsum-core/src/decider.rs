//! Recursive subset-sum decider.
//!
//! The recurrence walks the sequence from the last element to the first.
//! Each step looks at the state `(n, remaining)`: the first `n` elements are
//! still eligible and `remaining` is the sum left to match.
//!
//! No memoization: the general step branches twice, so the worst case is
//! exponential in `sequence.len()`. See [`crate::memo`] for the table-driven
//! variant.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SubsetSumError;

/// Returns `true` iff some subset of `sequence` (possibly empty) sums to `target`.
pub fn can_form_sum(sequence: &[u64], target: u64) -> bool {
    log::trace!("can_form_sum: len={} target={}", sequence.len(), target);
    can_form_sum_prefix(sequence, sequence.len(), target)
}

/// Decides the recurrence for the first `n` elements of `sequence`.
///
/// # Panics
/// Panics if `n > sequence.len()`.
pub fn can_form_sum_prefix(sequence: &[u64], n: usize, remaining: u64) -> bool {
    // remaining == 0 は要素が残っていなくても true（空集合で成立）
    if remaining == 0 {
        return true;
    }
    if n == 0 {
        return false;
    }

    let last = sequence[n - 1];
    if last > remaining {
        return can_form_sum_prefix(sequence, n - 1, remaining);
    }

    // last <= remaining なので減算はアンダーフローしない
    let include = can_form_sum_prefix(sequence, n - 1, remaining - last);
    include || can_form_sum_prefix(sequence, n - 1, remaining)
}

/// Same recurrence as [`can_form_sum_prefix`], but every call first checks
/// `cancel` and unwinds with [`SubsetSumError::Cancelled`] once it is raised.
///
/// # Panics
/// Panics if `n > sequence.len()`.
pub fn can_form_sum_prefix_cancellable(
    sequence: &[u64],
    n: usize,
    remaining: u64,
    cancel: &AtomicBool,
) -> Result<bool, SubsetSumError> {
    if cancel.load(Ordering::Relaxed) {
        return Err(SubsetSumError::Cancelled);
    }
    if remaining == 0 {
        return Ok(true);
    }
    if n == 0 {
        return Ok(false);
    }

    let last = sequence[n - 1];
    if last > remaining {
        return can_form_sum_prefix_cancellable(sequence, n - 1, remaining, cancel);
    }

    let include = can_form_sum_prefix_cancellable(sequence, n - 1, remaining - last, cancel)?;
    Ok(include || can_form_sum_prefix_cancellable(sequence, n - 1, remaining, cancel)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    /// Exhaustive check over every subset mask. Only for short sequences.
    pub(crate) fn brute_force(sequence: &[u64], target: u64) -> bool {
        assert!(sequence.len() < 20);
        (0u32..(1 << sequence.len())).any(|mask| {
            let sum: u64 = sequence
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, v)| *v)
                .sum();
            sum == target
        })
    }

    pub(crate) fn random_sequence(rng: &mut StdRng) -> Vec<u64> {
        let len = rng.gen_range(0..12);
        (0..len).map(|_| rng.gen_range(0..25)).collect()
    }

    #[rstest]
    #[case::example_target_30(&[3, 34, 4, 12, 5, 2], 30, false)]
    #[case::example_target_9(&[3, 34, 4, 12, 5, 2], 9, true)]
    #[case::example_whole_sequence(&[3, 34, 4, 12, 5, 2], 60, true)]
    #[case::example_single_large(&[3, 34, 4, 12, 5, 2], 34, true)]
    #[case::single_hit(&[5], 5, true)]
    #[case::single_miss(&[5], 6, false)]
    #[case::empty_nonzero(&[], 1, false)]
    #[case::duplicates(&[7, 7, 7], 14, true)]
    #[case::zeros_only(&[0, 0], 3, false)]
    fn decides_known_cases(#[case] sequence: &[u64], #[case] target: u64, #[case] expected: bool) {
        assert_eq!(can_form_sum(sequence, target), expected);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::single(&[5])]
    #[case::example(&[3, 34, 4, 12, 5, 2])]
    fn zero_target_is_always_reachable(#[case] sequence: &[u64]) {
        assert!(can_form_sum(sequence, 0));
    }

    #[test]
    fn zero_remaining_wins_over_exhausted_prefix() {
        assert!(can_form_sum_prefix(&[], 0, 0));
        assert!(can_form_sum_prefix(&[9, 9], 0, 0));
    }

    #[test]
    fn prefix_ignores_trailing_elements() {
        let sequence = [1, 2, 40];
        assert!(!can_form_sum_prefix(&sequence, 2, 40));
        assert!(can_form_sum_prefix(&sequence, 3, 40));
    }

    #[test]
    fn repeated_calls_give_same_answer() {
        let sequence = [3, 34, 4, 12, 5, 2];
        let first = can_form_sum(&sequence, 17);
        let second = can_form_sum(&sequence, 17);
        assert_eq!(first, second);
        assert_eq!(sequence, [3, 34, 4, 12, 5, 2]);
    }

    #[test]
    fn cancellable_variant_matches_plain_recursion() {
        let cancel = AtomicBool::new(false);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let sequence = random_sequence(&mut rng);
            let target = rng.gen_range(0..60);
            let decided = can_form_sum_prefix_cancellable(&sequence, sequence.len(), target, &cancel)
                .expect("flag never raised");
            assert_eq!(decided, can_form_sum(&sequence, target));
        }
    }

    #[test]
    fn raised_flag_stops_recursion() {
        // 2^40 通りの探索になる入力でも即座に返る
        let sequence = vec![1u64; 40];
        let cancel = AtomicBool::new(true);
        let result = can_form_sum_prefix_cancellable(&sequence, sequence.len(), 41, &cancel);
        assert!(matches!(result, Err(SubsetSumError::Cancelled)));
    }

    #[test]
    fn agrees_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..300 {
            let sequence = random_sequence(&mut rng);
            let target = rng.gen_range(0..80);
            assert_eq!(
                can_form_sum(&sequence, target),
                brute_force(&sequence, target),
                "sequence={sequence:?} target={target}"
            );
        }
    }

    #[test]
    fn shuffling_does_not_change_the_answer() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut sequence = random_sequence(&mut rng);
            let target = rng.gen_range(0..60);
            let expected = can_form_sum(&sequence, target);

            sequence.shuffle(&mut rng);
            assert_eq!(
                can_form_sum(&sequence, target),
                expected,
                "sequence={sequence:?} target={target}"
            );
        }
    }

    #[test]
    fn appending_keeps_a_reachable_target_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let mut sequence = random_sequence(&mut rng);
            let target = rng.gen_range(0..60);
            if !can_form_sum(&sequence, target) {
                continue;
            }

            sequence.push(rng.gen_range(0..100));
            assert!(
                can_form_sum(&sequence, target),
                "sequence={sequence:?} target={target}"
            );
        }
    }
}
