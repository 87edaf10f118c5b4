//! # Aggregation Module / 聚合模块
//!
//! Reduces a closed [`CellResults`] to one [`AggregateStat`].
//!
//! With at least [`TRIM_THRESHOLD`] samples, one minimum and one maximum sample
//! are discarded and the rest are averaged. Fewer samples are averaged as-is.
//! A cell that does not hold exactly `runs` successful samples never yields a
//! number.
//!
//! 将已关闭的 `CellResults` 归约为一个 `AggregateStat`。
//! 样本数不少于 `TRIM_THRESHOLD` 时，去掉一个最小值和一个最大值后求平均；
//! 样本较少时直接求平均。未恰好包含 `runs` 个成功样本的单元格永远不会产生数值。

use crate::core::models::{AggregateStat, CellResults};

/// Smallest sample count at which the extremes are trimmed.
/// 开始截尾的最小样本数。
pub const TRIM_THRESHOLD: usize = 4;

/// Computes the statistic for one cell.
///
/// # Arguments
/// * `results` - The cell's run outcomes in invocation order
/// * `runs` - The configured run count
///
/// # Returns
/// `AggregateStat::Value` in seconds when all `runs` runs succeeded,
/// `AggregateStat::NotCompleted` otherwise
pub fn aggregate(results: &CellResults, runs: usize) -> AggregateStat {
    if runs == 0 || results.len() != runs || results.failures() > 0 {
        return AggregateStat::NotCompleted;
    }
    match trimmed_mean(&results.durations_secs()) {
        Some(mean) => AggregateStat::Value(mean),
        None => AggregateStat::NotCompleted,
    }
}

/// Mean of `samples` after removing one instance of the minimum and one of the
/// maximum, or the plain mean when there are fewer than [`TRIM_THRESHOLD`] samples.
/// Returns `None` for an empty slice.
///
/// 去掉一个最小值实例和一个最大值实例后的 `samples` 均值；
/// 样本少于 `TRIM_THRESHOLD` 时为普通均值。空切片返回 `None`。
pub fn trimmed_mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    if samples.len() < TRIM_THRESHOLD {
        return Some(samples.iter().sum::<f64>() / samples.len() as f64);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let kept = &sorted[1..sorted.len() - 1];
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}
