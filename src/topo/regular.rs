//! 随机 d-regular 拓扑（Jellyfish 风格）构建
//!
//! 采用配对模型：把每个节点复制 d 份 "stub"，随机打乱后两两配对。
//! 配成自环或重边的 stub 留到下一轮重新配对；若剩余 stub 已经
//! 不可能再配出合法边，则整体重来。

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::graph::Topology;
use crate::error::{AnalysisError, Result};

/// 整体重来的次数上限
pub const MAX_ATTEMPTS: usize = 1_000;

/// 生成 `n` 个节点、每个节点度为 `d` 的随机简单图。
#[tracing::instrument(skip(rng))]
pub fn random_regular_graph<R: Rng + ?Sized>(d: usize, n: usize, rng: &mut R) -> Result<Topology> {
    let stubs = n.checked_mul(d).ok_or(AnalysisError::InvalidRegularParams {
        degree: d,
        nodes: n,
        reason: "n * d overflows usize",
    })?;
    if stubs % 2 != 0 {
        return Err(AnalysisError::InvalidRegularParams {
            degree: d,
            nodes: n,
            reason: "n * d must be even",
        });
    }
    if d >= n && n > 0 {
        return Err(AnalysisError::InvalidRegularParams {
            degree: d,
            nodes: n,
            reason: "degree must be smaller than the node count",
        });
    }

    for attempt in 1..=MAX_ATTEMPTS {
        if let Some(edges) = try_pairing(d, n, rng) {
            info!(attempt, edges = edges.len(), "🎲 生成随机正则拓扑");
            return Topology::from_edges(n, edges);
        }
        debug!(attempt, "配对失败，重新开始");
    }

    Err(AnalysisError::RegularGraphGeneration(MAX_ATTEMPTS))
}

fn try_pairing<R: Rng + ?Sized>(d: usize, n: usize, rng: &mut R) -> Option<BTreeSet<(usize, usize)>> {
    let mut edges = BTreeSet::new();
    let mut stubs: Vec<usize> = (0..n).flat_map(|v| iter::repeat_n(v, d)).collect();

    while !stubs.is_empty() {
        // 本轮没配上的 stub：节点 -> 剩余 stub 数
        let mut leftover: BTreeMap<usize, usize> = BTreeMap::new();
        stubs.shuffle(rng);

        for pair in stubs.chunks_exact(2) {
            let (s1, s2) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            if s1 == s2 || !edges.insert((s1, s2)) {
                *leftover.entry(s1).or_default() += 1;
                *leftover.entry(s2).or_default() += 1;
            }
        }

        if !can_still_pair(&edges, &leftover) {
            return None;
        }

        stubs = leftover
            .iter()
            .flat_map(|(&v, &count)| iter::repeat_n(v, count))
            .collect();
    }

    Some(edges)
}

/// 剩余 stub 中是否还存在至少一对能连成新边的节点
fn can_still_pair(edges: &BTreeSet<(usize, usize)>, leftover: &BTreeMap<usize, usize>) -> bool {
    if leftover.is_empty() {
        return true;
    }
    for &s1 in leftover.keys() {
        for &s2 in leftover.keys() {
            if s1 == s2 {
                break;
            }
            if !edges.contains(&(s2.min(s1), s2.max(s1))) {
                return true;
            }
        }
    }
    false
}
