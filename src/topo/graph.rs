//! 网络拓扑
//!
//! 无向、无权、无自环、无重边的简单图。邻接表用有序集合保存，
//! 这样 BFS/路径枚举的遍历顺序在每次运行中都一致。

use std::collections::BTreeSet;

use super::id::{Link, NodeId};
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    adj: Vec<BTreeSet<NodeId>>,
    edge_count: usize,
}

impl Topology {
    /// 创建 `n` 个孤立节点
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![BTreeSet::new(); n],
            edge_count: 0,
        }
    }

    /// 由边列表构建拓扑；自环、重边和越界节点都会被拒绝。
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let mut topo = Self::new(n);
        for (a, b) in edges {
            topo.add_edge(NodeId(a), NodeId(b))?;
        }
        Ok(topo)
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adj.len()).map(NodeId)
    }

    /// 添加一条无向边
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(AnalysisError::SelfLoop(a.0));
        }
        if !self.adj[a.0].insert(b) {
            return Err(AnalysisError::DuplicateEdge(a.0, b.0));
        }
        self.adj[b.0].insert(a);
        self.edge_count += 1;
        Ok(())
    }

    /// 删除一条无向边，返回边是否存在
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a.0 >= self.adj.len() || b.0 >= self.adj.len() {
            return false;
        }
        let removed = self.adj[a.0].remove(&b);
        if removed {
            self.adj[b.0].remove(&a);
            self.edge_count -= 1;
        }
        removed
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adj.get(a.0).is_some_and(|nbrs| nbrs.contains(&b))
    }

    /// 邻居（升序）；越界节点没有邻居
    pub fn neighbors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj.get(v.0).into_iter().flat_map(|nbrs| nbrs.iter().copied())
    }

    pub fn degree(&self, v: NodeId) -> usize {
        self.adj.get(v.0).map_or(0, BTreeSet::len)
    }

    /// 所有节点度数都为 `d` 时返回 true
    pub fn is_regular(&self, d: usize) -> bool {
        self.adj.iter().all(|nbrs| nbrs.len() == d)
    }

    /// 所有边，按 `(lo, hi)` 升序
    pub fn edges(&self) -> Vec<Link> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (lo, nbrs) in self.adj.iter().enumerate() {
            for &hi in nbrs.range(NodeId(lo + 1)..) {
                out.push(Link::new(NodeId(lo), hi));
            }
        }
        out
    }

    fn check_node(&self, v: NodeId) -> Result<()> {
        if v.0 >= self.adj.len() {
            return Err(AnalysisError::NodeOutOfRange {
                node: v.0,
                nodes: self.adj.len(),
            });
        }
        Ok(())
    }
}
