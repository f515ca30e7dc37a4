//! Query model: validated input + JSON-facing spec.
//!
//! Raw input arrives as signed integers (`QuerySpec`, usually from JSON).
//! Negative values have no defined meaning for subset sum, so they are
//! rejected when converting into a [`Query`]; everything downstream works on
//! `u64` and can never underflow.

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::decider::{can_form_sum, can_form_sum_prefix_cancellable};
use crate::error::SubsetSumError;
use crate::memo::MemoizedDecider;
use crate::witness::find_subset;

/// Which evaluation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Plain recursion, exponential worst case.
    Recursive,

    /// Explicit stack + memo table.
    #[default]
    Memoized,
}

/// A validated subset-sum query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    elements: Vec<u64>,
    target: u64,
}

impl Query {
    /// Validates signed input. The first negative element is reported before
    /// a negative target.
    pub fn new(elements: Vec<i64>, target: i64) -> Result<Self, SubsetSumError> {
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                u64::try_from(value).map_err(|_| SubsetSumError::NegativeElement { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let target = u64::try_from(target).map_err(|_| SubsetSumError::NegativeTarget(target))?;

        Ok(Self { elements, target })
    }

    /// Already-unsigned input needs no validation.
    pub fn from_unsigned(elements: Vec<u64>, target: u64) -> Self {
        Self { elements, target }
    }

    pub fn elements(&self) -> &[u64] {
        &self.elements
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn decide(&self, strategy: Strategy) -> bool {
        log::debug!(
            "decide: len={} target={} strategy={:?}",
            self.elements.len(),
            self.target,
            strategy
        );
        match strategy {
            Strategy::Recursive => can_form_sum(&self.elements, self.target),
            Strategy::Memoized => MemoizedDecider::new(&self.elements).decide(self.target),
        }
    }

    /// Like [`Self::decide`], but stops with [`SubsetSumError::Cancelled`] once
    /// `cancel` is raised.
    pub fn decide_cancellable(
        &self,
        strategy: Strategy,
        cancel: &AtomicBool,
    ) -> Result<bool, SubsetSumError> {
        match strategy {
            Strategy::Recursive => can_form_sum_prefix_cancellable(
                &self.elements,
                self.elements.len(),
                self.target,
                cancel,
            ),
            Strategy::Memoized => {
                MemoizedDecider::new(&self.elements).decide_cancellable(self.target, cancel)
            }
        }
    }

    /// Indices of one subset reaching the target; see [`find_subset`].
    pub fn witness(&self) -> Option<Vec<usize>> {
        find_subset(&self.elements, self.target)
    }
}

/// Raw, unvalidated query as it appears in JSON.
///
/// ```json
/// { "elements": [3, 34, 4, 12, 5, 2], "target": 9, "strategy": "recursive" }
/// ```
///
/// `strategy` is optional and defaults to [`Strategy::Memoized`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySpec {
    pub elements: Vec<i64>,
    pub target: i64,

    #[serde(default)]
    pub strategy: Strategy,
}

impl QuerySpec {
    pub fn from_json(json: &str) -> Result<Self, SubsetSumError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates into a [`Query`] plus the requested strategy.
    pub fn into_query(self) -> Result<(Query, Strategy), SubsetSumError> {
        let query = Query::new(self.elements, self.target)?;
        Ok((query, self.strategy))
    }
}
