//! Memoized subset-sum decider.
//!
//! Evaluates the same recurrence as [`crate::decider`] but without host
//! recursion: pending states live on an explicit stack, and every resolved
//! `(prefix_len, remaining)` pair is stored so it is never evaluated twice.
//!
//! Stack depth is bounded by `sequence.len() + 1` frames, so long sequences do
//! not hit the thread stack limit.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SubsetSumError;

/// Cancel flag is polled once every this many steps.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Recursion state: `(prefix_len, remaining)`.
type State = (usize, u64);

/// What a frame is waiting for.
#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Not evaluated yet.
    Start,
    /// Waiting for `(n - 1, remaining)` after the pruning step.
    AwaitSkip,
    /// Waiting for the `include` branch.
    AwaitInclude,
    /// Waiting for the `exclude` branch (include was false).
    AwaitExclude,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    state: State,
    phase: Phase,
}

/// Table-driven decider over one borrowed sequence.
///
/// The memo table survives across calls, so asking several targets against
/// the same sequence reuses earlier work. It only grows: a long-lived decider
/// asked many distinct targets holds up to `len * target` entries until
/// [`Self::clear`] is called.
#[derive(Debug)]
pub struct MemoizedDecider<'a> {
    sequence: &'a [u64],
    memo: HashMap<State, bool>,
}

impl<'a> MemoizedDecider<'a> {
    pub fn new(sequence: &'a [u64]) -> Self {
        Self {
            sequence,
            memo: HashMap::new(),
        }
    }

    /// Number of resolved states currently cached.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Drops every cached state. Later calls recompute from scratch.
    pub fn clear(&mut self) {
        self.memo.clear();
    }

    /// Returns `true` iff some subset of the whole sequence sums to `target`.
    pub fn decide(&mut self, target: u64) -> bool {
        self.decide_prefix(self.sequence.len(), target)
    }

    /// Decides the recurrence for the first `n` elements.
    ///
    /// # Panics
    /// Panics if `n` exceeds the sequence length.
    pub fn decide_prefix(&mut self, n: usize, remaining: u64) -> bool {
        match self.evaluate((n, remaining), |_| Ok::<(), Infallible>(())) {
            Ok(found) => found,
            Err(never) => match never {},
        }
    }

    /// Like [`Self::decide`], but gives up with [`SubsetSumError::Cancelled`]
    /// once `cancel` is raised.
    ///
    /// States resolved before cancellation stay in the table.
    pub fn decide_cancellable(
        &mut self,
        target: u64,
        cancel: &AtomicBool,
    ) -> Result<bool, SubsetSumError> {
        self.evaluate((self.sequence.len(), target), |steps| {
            if steps % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                Err(SubsetSumError::Cancelled)
            } else {
                Ok(())
            }
        })
    }

    /// Runs the explicit-stack evaluation.
    ///
    /// `check` is called before every step with the running step count; an
    /// `Err` aborts the evaluation.
    fn evaluate<E>(
        &mut self,
        root: State,
        mut check: impl FnMut(u64) -> Result<(), E>,
    ) -> Result<bool, E> {
        assert!(
            root.0 <= self.sequence.len(),
            "prefix length {} exceeds sequence length {}",
            root.0,
            self.sequence.len()
        );

        let mut stack = vec![Frame {
            state: root,
            phase: Phase::Start,
        }];
        // 直前に解決した子の結果
        let mut last = false;
        let mut steps: u64 = 0;

        while let Some(frame) = stack.pop() {
            check(steps)?;
            steps += 1;

            let (n, remaining) = frame.state;
            match frame.phase {
                Phase::Start => {
                    if remaining == 0 {
                        last = true;
                        continue;
                    }
                    if n == 0 {
                        last = false;
                        continue;
                    }
                    if let Some(&cached) = self.memo.get(&frame.state) {
                        last = cached;
                        continue;
                    }

                    let element = self.sequence[n - 1];
                    if element > remaining {
                        stack.push(Frame {
                            state: frame.state,
                            phase: Phase::AwaitSkip,
                        });
                        stack.push(Frame {
                            state: (n - 1, remaining),
                            phase: Phase::Start,
                        });
                    } else {
                        stack.push(Frame {
                            state: frame.state,
                            phase: Phase::AwaitInclude,
                        });
                        stack.push(Frame {
                            state: (n - 1, remaining - element),
                            phase: Phase::Start,
                        });
                    }
                }
                Phase::AwaitSkip | Phase::AwaitExclude => {
                    self.memo.insert(frame.state, last);
                }
                Phase::AwaitInclude => {
                    if last {
                        self.memo.insert(frame.state, true);
                    } else {
                        stack.push(Frame {
                            state: frame.state,
                            phase: Phase::AwaitExclude,
                        });
                        stack.push(Frame {
                            state: (n - 1, remaining),
                            phase: Phase::Start,
                        });
                    }
                }
            }
        }

        log::trace!(
            "memoized evaluation: root={:?} result={} steps={} memo_len={}",
            root,
            last,
            steps,
            self.memo.len()
        );
        Ok(last)
    }
}

/// One-shot convenience wrapper around [`MemoizedDecider`].
pub fn can_form_sum_memoized(sequence: &[u64], target: u64) -> bool {
    MemoizedDecider::new(sequence).decide(target)
}
