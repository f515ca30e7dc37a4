//! Witness search: which elements make up the sum.

use crate::memo::MemoizedDecider;

/// Returns ascending indices of one subset of `sequence` summing to `target`,
/// or `None` if no subset does.
///
/// The walk prefers including the last eligible element whenever that still
/// leaves a solvable remainder, the same order the recursive decider tries
/// its branches in. `target == 0` yields `Some(vec![])`.
pub fn find_subset(sequence: &[u64], target: u64) -> Option<Vec<usize>> {
    let mut decider = MemoizedDecider::new(sequence);
    if !decider.decide(target) {
        return None;
    }

    let mut picked = Vec::new();
    let mut remaining = target;
    let mut n = sequence.len();
    while remaining > 0 && n > 0 {
        let element = sequence[n - 1];
        if element <= remaining && decider.decide_prefix(n - 1, remaining - element) {
            picked.push(n - 1);
            remaining -= element;
        }
        n -= 1;
    }

    picked.reverse();
    log::debug!("witness: target={} indices={:?}", target, picked);
    Some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decider::can_form_sum;
    use crate::decider::tests::random_sequence;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sum_of(sequence: &[u64], indices: &[usize]) -> u64 {
        indices.iter().map(|&i| sequence[i]).sum()
    }

    #[test]
    fn finds_subset_for_reachable_target() {
        let sequence = [3, 34, 4, 12, 5, 2];
        let indices = find_subset(&sequence, 9).expect("9 is reachable");
        assert_eq!(sum_of(&sequence, &indices), 9);
        // include 優先: 末尾の 2 を先に採用し、4 + 5 ではなく 3 + 4 + 2 になる
        assert_eq!(indices, vec![0, 2, 5]);
    }

    #[test]
    fn unreachable_target_has_no_witness() {
        assert_eq!(find_subset(&[3, 34, 4, 12, 5, 2], 30), None);
        assert_eq!(find_subset(&[], 1), None);
    }

    #[test]
    fn zero_target_has_empty_witness() {
        assert_eq!(find_subset(&[3, 4], 0), Some(vec![]));
        assert_eq!(find_subset(&[], 0), Some(vec![]));
    }

    #[test]
    fn witness_exists_exactly_when_decider_says_so() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..300 {
            let sequence = random_sequence(&mut rng);
            let target = rng.gen_range(0..80);
            match find_subset(&sequence, target) {
                Some(indices) => {
                    assert!(can_form_sum(&sequence, target));
                    assert!(indices.windows(2).all(|w| w[0] < w[1]));
                    assert_eq!(sum_of(&sequence, &indices), target);
                }
                None => assert!(!can_form_sum(&sequence, target)),
            }
        }
    }
}
