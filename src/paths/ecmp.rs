//! ECMP 路径集合
//!
//! 对每个源节点做一次 BFS 得到最短跳数 `dist[*]`，然后从目的节点
//! 沿 `dist[pred] = dist[v] - 1` 的前驱反向回溯，枚举全部等价最短路径。

use std::collections::VecDeque;

use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::path_set::{Path, PathSet};
use crate::topo::{NodeId, Topology};

/// 计算 `0..n` 内所有 `a < b` 节点对的 ECMP 路径集合。
///
/// 不连通的节点对不会出现在结果里。按源节点并行计算，每个源节点
/// 只产出 `(a, b > a)` 这些互不重叠的 key，合并后与串行结果一致。
#[tracing::instrument(skip(topo), fields(edges = topo.edge_count()))]
pub fn compute_ecmp_paths(topo: &Topology, n: usize) -> PathSet {
    let limit = n.min(topo.node_count());

    let per_source: Vec<Vec<((NodeId, NodeId), Vec<Path>)>> = (0..limit)
        .into_par_iter()
        .map(|a| {
            let src = NodeId(a);
            let dist = bfs_distances(topo, src);
            ((a + 1)..limit)
                .filter_map(|b| {
                    let dst = NodeId(b);
                    let paths = collect_shortest_paths(topo, &dist, src, dst);
                    if paths.is_empty() {
                        trace!(?src, ?dst, "无路径");
                        None
                    } else {
                        Some(((src, dst), paths))
                    }
                })
                .collect()
        })
        .collect();

    let mut out = PathSet::new();
    out.extend(per_source.into_iter().flatten());

    info!(
        pairs = out.len(),
        paths = out.path_count(),
        "🧭 ECMP 路径计算完成"
    );
    out
}

/// 单个节点对的全部最短路径；不连通时返回空列表。
pub fn all_shortest_paths(topo: &Topology, src: NodeId, dst: NodeId) -> Vec<Path> {
    if src.0 >= topo.node_count() || dst.0 >= topo.node_count() {
        return Vec::new();
    }
    let dist = bfs_distances(topo, src);
    collect_shortest_paths(topo, &dist, src, dst)
}

fn bfs_distances(topo: &Topology, src: NodeId) -> Vec<Option<usize>> {
    let mut dist = vec![None; topo.node_count()];
    let mut q = VecDeque::new();
    dist[src.0] = Some(0);
    q.push_back(src);

    while let Some(v) = q.pop_front() {
        let dv = dist[v.0].unwrap_or_default();
        for nbr in topo.neighbors(v) {
            if dist[nbr.0].is_none() {
                dist[nbr.0] = Some(dv + 1);
                q.push_back(nbr);
            }
        }
    }
    dist
}

fn collect_shortest_paths(
    topo: &Topology,
    dist: &[Option<usize>],
    src: NodeId,
    dst: NodeId,
) -> Vec<Path> {
    if dist[dst.0].is_none() {
        return Vec::new();
    }

    let mut out = Vec::new();
    // 栈中保存从 dst 反向走出的部分路径
    let mut stack: Vec<Path> = vec![vec![dst]];

    while let Some(partial) = stack.pop() {
        let Some(&last) = partial.last() else {
            continue;
        };
        if last == src {
            let mut path = partial;
            path.reverse();
            out.push(path);
            continue;
        }

        let Some(d_last) = dist[last.0] else {
            continue;
        };
        let preds: Vec<NodeId> = topo
            .neighbors(last)
            .filter(|p| dist[p.0].is_some_and(|dp| dp + 1 == d_last))
            .collect();
        // 逆序压栈，出栈时按邻居升序展开
        for &pred in preds.iter().rev() {
            let mut next = partial.clone();
            next.push(pred);
            stack.push(next);
        }
    }

    debug!(?src, ?dst, count = out.len(), "枚举等价最短路径");
    out
}
