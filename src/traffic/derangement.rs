use rand::Rng;
use tracing::trace;

use crate::error::{AnalysisError, Result};

/// 均匀随机错排（没有任何 `v[i] == i`）。
///
/// 从后往前做 Sattolo 风格的随机交换：位置 `j` 与 `[0, j]` 中随机位置交换。
/// 若将要放到位置 `j` 的元素恰好就是 `j`，本次尝试作废重新开始；
/// 整轮走完后还要求 `v[0] != 0`。被拒绝的尝试不会对外暴露。
pub fn random_derangement<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n < 2 {
        return Err(AnalysisError::DerangementTooSmall(n));
    }

    let mut v: Vec<usize> = Vec::with_capacity(n);
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        v.clear();
        v.extend(0..n);

        let mut rejected = false;
        for j in (0..n).rev() {
            let p = rng.gen_range(0..=j);
            if v[p] == j {
                rejected = true;
                break;
            }
            v.swap(j, p);
        }

        if !rejected && v[0] != 0 {
            trace!(n, attempts, "生成错排");
            return Ok(v);
        }
    }
}
