use rand::Rng;
use serde::{Deserialize, Serialize};

use super::derangement::random_derangement;
use crate::error::{AnalysisError, Result};
use crate::topo::NodeId;

/// 每个拓扑节点下挂的主机数
pub const DEFAULT_HOSTS_PER_NODE: usize = 3;

/// 主机到拓扑节点的映射：主机 `h` 属于节点 `h / hosts_per_node`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLayout {
    hosts_per_node: usize,
}

impl HostLayout {
    pub fn new(hosts_per_node: usize) -> Result<Self> {
        if hosts_per_node == 0 {
            return Err(AnalysisError::InvalidHostsPerNode);
        }
        Ok(Self { hosts_per_node })
    }

    pub fn hosts_per_node(&self) -> usize {
        self.hosts_per_node
    }

    pub fn node_of(&self, host: usize) -> NodeId {
        NodeId(host / self.hosts_per_node)
    }

    /// `nodes` 个节点下的主机总数
    pub fn host_count(&self, nodes: usize) -> Result<usize> {
        nodes
            .checked_mul(self.hosts_per_node)
            .ok_or(AnalysisError::SizeOverflow {
                what: "nodes * hosts_per_node",
            })
    }
}

impl Default for HostLayout {
    fn default() -> Self {
        Self {
            hosts_per_node: DEFAULT_HOSTS_PER_NODE,
        }
    }
}

/// 流量矩阵：`dest[src_host]` 为该主机的唯一接收方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct TrafficMatrix {
    dest: Vec<usize>,
}

impl TrafficMatrix {
    /// 为 `host_count` 台主机随机生成一个错排流量矩阵
    pub fn random<R: Rng + ?Sized>(host_count: usize, rng: &mut R) -> Result<Self> {
        Ok(Self {
            dest: random_derangement(host_count, rng)?,
        })
    }

    /// 直接使用给定的目的主机列表；列表必须是 `0..len` 上的错排
    pub fn from_dests(dest: Vec<usize>) -> Result<Self> {
        if dest.len() < 2 {
            return Err(AnalysisError::DerangementTooSmall(dest.len()));
        }
        let mut seen = vec![false; dest.len()];
        for (host, &d) in dest.iter().enumerate() {
            let reason = if d == host {
                "points back to itself"
            } else if d >= dest.len() {
                "is out of range"
            } else if std::mem::replace(&mut seen[d], true) {
                "repeats an earlier destination"
            } else {
                continue;
            };
            return Err(AnalysisError::NotADerangement { host, reason });
        }
        Ok(Self { dest })
    }

    pub fn len(&self) -> usize {
        self.dest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dest.is_empty()
    }

    pub fn dest(&self, src_host: usize) -> Option<usize> {
        self.dest.get(src_host).copied()
    }

    /// `(源主机, 目的主机)` 序列
    pub fn flows(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dest.iter().copied().enumerate()
    }
}

impl TryFrom<Vec<usize>> for TrafficMatrix {
    type Error = AnalysisError;

    fn try_from(dest: Vec<usize>) -> Result<Self> {
        Self::from_dests(dest)
    }
}

impl From<TrafficMatrix> for Vec<usize> {
    fn from(tm: TrafficMatrix) -> Self {
        tm.dest
    }
}
