//! k 条最短简单路径（Yen 算法）
//!
//! 偏离点（spur）处的最短路用 Dijkstra 求解，因此支持非负整数权重；
//! 拓扑本身无权时使用单位权重。

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashSet};

use rayon::prelude::*;
use tracing::{info, trace};

use super::path_set::{Path, PathSet};
use crate::error::{AnalysisError, Result};
use crate::topo::{Link, NodeId, Topology};

/// 单位权重下的 KSP 路径集合
#[tracing::instrument(skip(topo), fields(edges = topo.edge_count()))]
pub fn compute_k_shortest_paths(topo: &Topology, n: usize, k: usize) -> Result<PathSet> {
    compute_k_shortest_paths_weighted(topo, n, k, |_, _| 1)
}

/// 带权 KSP 路径集合；`weight(u, v)` 为链路 u-v 的非负代价。
pub fn compute_k_shortest_paths_weighted<W>(
    topo: &Topology,
    n: usize,
    k: usize,
    weight: W,
) -> Result<PathSet>
where
    W: Fn(NodeId, NodeId) -> u64 + Sync,
{
    if k == 0 {
        return Err(AnalysisError::InvalidK);
    }
    let limit = n.min(topo.node_count());

    let per_source: Vec<Vec<((NodeId, NodeId), Vec<Path>)>> = (0..limit)
        .into_par_iter()
        .map(|a| {
            ((a + 1)..limit)
                .map(|b| {
                    let (src, dst) = (NodeId(a), NodeId(b));
                    ((src, dst), yen(topo, src, dst, k, &weight))
                })
                .collect()
        })
        .collect();

    let mut out = PathSet::new();
    out.extend(per_source.into_iter().flatten());

    info!(
        k,
        pairs = out.len(),
        paths = out.path_count(),
        "🧭 KSP 路径计算完成"
    );
    Ok(out)
}

/// 单个节点对的前 `k` 条最短简单路径（单位权重）。
pub fn k_shortest_paths(topo: &Topology, src: NodeId, dst: NodeId, k: usize) -> Result<Vec<Path>> {
    if k == 0 {
        return Err(AnalysisError::InvalidK);
    }
    if src.0 >= topo.node_count() || dst.0 >= topo.node_count() {
        return Ok(Vec::new());
    }
    Ok(yen(topo, src, dst, k, &|_: NodeId, _: NodeId| 1u64))
}

fn yen<W>(topo: &Topology, src: NodeId, dst: NodeId, k: usize, weight: &W) -> Vec<Path>
where
    W: Fn(NodeId, NodeId) -> u64,
{
    let mut blocked_nodes = vec![false; topo.node_count()];
    let mut blocked_edges: HashSet<Link> = HashSet::new();

    let Some(first) = dijkstra(topo, src, dst, &blocked_nodes, &blocked_edges, weight) else {
        return Vec::new();
    };

    let mut accepted: Vec<(u64, Path)> = vec![first];
    // (代价, 节点数, 路径)：同代价时短路径优先，再按节点序打破平局
    let mut candidates: BTreeSet<(u64, usize, Path)> = BTreeSet::new();

    while accepted.len() < k {
        let prev = accepted[accepted.len() - 1].1.clone();

        for i in 0..prev.len().saturating_sub(1) {
            let spur = prev[i];
            let root = &prev[..=i];

            blocked_edges.clear();
            for (_, p) in &accepted {
                if p.len() > i + 1 && p[..=i] == *root {
                    blocked_edges.insert(Link::new(p[i], p[i + 1]));
                }
            }
            blocked_nodes.fill(false);
            for v in &root[..i] {
                blocked_nodes[v.0] = true;
            }

            let Some((spur_cost, spur_path)) =
                dijkstra(topo, spur, dst, &blocked_nodes, &blocked_edges, weight)
            else {
                continue;
            };

            let root_cost = path_cost(&root[..=i], weight);
            let mut total = root[..i].to_vec();
            total.extend(spur_path);

            if !accepted.iter().any(|(_, p)| *p == total) {
                candidates.insert((root_cost.saturating_add(spur_cost), total.len(), total));
            }
        }

        let Some((cost, _, best)) = candidates.pop_first() else {
            break;
        };
        accepted.push((cost, best));
    }

    trace!(?src, ?dst, found = accepted.len(), "Yen 搜索结束");
    accepted.into_iter().map(|(_, p)| p).collect()
}

fn path_cost<W>(path: &[NodeId], weight: &W) -> u64
where
    W: Fn(NodeId, NodeId) -> u64,
{
    path.windows(2)
        .map(|hop| weight(hop[0], hop[1]))
        .fold(0u64, u64::saturating_add)
}

fn dijkstra<W>(
    topo: &Topology,
    src: NodeId,
    dst: NodeId,
    blocked_nodes: &[bool],
    blocked_edges: &HashSet<Link>,
    weight: &W,
) -> Option<(u64, Path)>
where
    W: Fn(NodeId, NodeId) -> u64,
{
    let n = topo.node_count();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[src.0] = Some(0);
    heap.push(Reverse((0u64, src)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if dist[u.0].is_some_and(|du| d > du) {
            continue;
        }
        if u == dst {
            break;
        }
        for v in topo.neighbors(u) {
            if blocked_nodes[v.0] || blocked_edges.contains(&Link::new(u, v)) {
                continue;
            }
            let nd = d.saturating_add(weight(u, v));
            if dist[v.0].is_none_or(|dv| nd < dv) {
                dist[v.0] = Some(nd);
                prev[v.0] = Some(u);
                heap.push(Reverse((nd, v)));
            }
        }
    }

    let cost = dist[dst.0]?;
    let mut path = vec![dst];
    let mut cur = dst;
    while cur != src {
        cur = prev[cur.0]?;
        path.push(cur);
    }
    path.reverse();
    Some((cost, path))
}
