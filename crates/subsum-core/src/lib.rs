//! subsum-core
//!
//! Subset-sum decision procedures.
//!
//! # モジュール構成
//! - **decider**: 再帰による判定（`can_form_sum`）
//! - **memo**: 明示スタック + メモ化による判定（`MemoizedDecider`）
//! - **witness**: 和が target になる部分集合の index を 1 つ返す
//! - **query**: 入力検証済みの `Query` と JSON 入力の `QuerySpec`
//! - **batch**: 独立した複数クエリを並列に評価（deadline 付き）
//! - **error**: エラー型

pub mod batch;
pub mod decider;
pub mod error;
pub mod memo;
pub mod query;
pub mod witness;

pub use batch::{BatchConfig, decide_batch};
pub use decider::{can_form_sum, can_form_sum_prefix, can_form_sum_prefix_cancellable};
pub use error::SubsetSumError;
pub use memo::{MemoizedDecider, can_form_sum_memoized};
pub use query::{Query, QuerySpec, Strategy};
pub use witness::find_subset;
