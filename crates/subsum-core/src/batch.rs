//! Batch evaluation of independent queries.
//!
//! Queries share nothing, so each one runs on tokio's blocking pool. The only
//! shared piece is the cancel flag raised when the deadline passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, timeout_at};

use crate::error::SubsetSumError;
use crate::query::{Query, Strategy};

#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Wall-clock budget for the whole batch. `None` waits forever.
    pub deadline: Option<Duration>,

    pub strategy: Strategy,
}

/// Decides every query; results keep the input order.
///
/// When the deadline passes, queries that have not finished resolve to
/// [`SubsetSumError::DeadlineExceeded`]. Both strategies poll the shared
/// cancel flag, so their blocking workers stop soon after the deadline.
pub async fn decide_batch(
    queries: Vec<Query>,
    config: BatchConfig,
) -> Vec<Result<bool, SubsetSumError>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let strategy = config.strategy;

    log::debug!(
        "decide_batch: queries={} strategy={:?} deadline={:?}",
        queries.len(),
        strategy,
        config.deadline
    );

    let joins: Vec<JoinHandle<Result<bool, SubsetSumError>>> = queries
        .into_iter()
        .map(|query| {
            let cancel = Arc::clone(&cancel);
            tokio::task::spawn_blocking(move || query.decide_cancellable(strategy, &cancel))
        })
        .collect();

    let deadline = config.deadline.map(|budget| (Instant::now() + budget, budget));
    let mut expired = false;
    let mut results = Vec::with_capacity(joins.len());

    for (index, mut join) in joins.into_iter().enumerate() {
        let joined = match deadline {
            None => Some(join.await),
            Some((at, _)) if !expired => match timeout_at(at, &mut join).await {
                Ok(joined) => Some(joined),
                Err(_) => {
                    log::warn!("decide_batch: deadline passed at query index={index}");
                    expired = true;
                    cancel.store(true, Ordering::Relaxed);
                    None
                }
            },
            // 期限切れ後は、すでに終わっているものだけ拾う
            Some(_) => {
                if join.is_finished() {
                    Some(join.await)
                } else {
                    None
                }
            }
        };

        let budget = deadline.map(|(_, budget)| budget).unwrap_or_default();
        results.push(settle(joined, budget));
    }

    results
}

/// Maps one worker's outcome to the query result.
///
/// `None` means the worker was still running when the deadline passed.
fn settle(
    joined: Option<Result<Result<bool, SubsetSumError>, JoinError>>,
    budget: Duration,
) -> Result<bool, SubsetSumError> {
    match joined {
        None | Some(Ok(Err(SubsetSumError::Cancelled))) => {
            Err(SubsetSumError::DeadlineExceeded(budget))
        }
        Some(Ok(decided)) => decided,
        Some(Err(join_err)) => Err(SubsetSumError::Worker(join_err.to_string())),
    }
}
