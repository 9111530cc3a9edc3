use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::paths::PathSet;

/// 连通率：`0..n` 中至少有一条路径的无序节点对占全部 `n(n-1)/2` 对的比例。
///
/// 只看路径集合的 key，不看路径内容；节点自身总是可达，但不计入分母。
pub fn connectivity(n: usize, ecmp_paths: &PathSet) -> Result<f64> {
    if n < 2 {
        return Err(AnalysisError::TooFewNodes(n));
    }
    let total = n
        .checked_mul(n - 1)
        .ok_or(AnalysisError::SizeOverflow { what: "n * (n - 1)" })?
        / 2;
    let connected = ecmp_paths
        .pairs()
        .filter(|(a, b)| a < b && b.0 < n)
        .count();

    debug!(connected, total, "计算连通率");
    Ok(connected as f64 / total as f64)
}
