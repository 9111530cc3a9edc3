//! 链路使用统计
//!
//! 把主机级流量矩阵映射成节点对需求，再按三种路由策略统计每条
//! **有向**链路被多少条路径经过，同时累计各策略的平均路径长度。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::paths::{Path, PathSet};
use crate::topo::{Link, NodeId};
use crate::traffic::{HostLayout, TrafficMatrix};

/// 8 路 ECMP 组的表项上限
pub const ECMP_NARROW_WAYS: usize = 8;
/// 64 路 ECMP 组的表项上限
pub const ECMP_WIDE_WAYS: usize = 64;

/// 参与比较的路由策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "8-ksp")]
    Ksp8,
    #[serde(rename = "8-ecmp")]
    Ecmp8,
    #[serde(rename = "64-ecmp")]
    Ecmp64,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Ksp8, Policy::Ecmp8, Policy::Ecmp64];

    pub fn label(&self) -> &'static str {
        match self {
            Policy::Ksp8 => "8-ksp",
            Policy::Ecmp8 => "8-ecmp",
            Policy::Ecmp64 => "64-ecmp",
        }
    }
}

/// 单条有向链路在三种策略下被经过的次数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCounts {
    #[serde(rename = "8-ksp")]
    pub ksp_8: u64,
    #[serde(rename = "8-ecmp")]
    pub ecmp_8: u64,
    #[serde(rename = "64-ecmp")]
    pub ecmp_64: u64,
}

impl PolicyCounts {
    pub fn get(&self, policy: Policy) -> u64 {
        match policy {
            Policy::Ksp8 => self.ksp_8,
            Policy::Ecmp8 => self.ecmp_8,
            Policy::Ecmp64 => self.ecmp_64,
        }
    }

    fn get_mut(&mut self, policy: Policy) -> &mut u64 {
        match policy {
            Policy::Ksp8 => &mut self.ksp_8,
            Policy::Ecmp8 => &mut self.ecmp_8,
            Policy::Ecmp64 => &mut self.ecmp_64,
        }
    }
}

/// 有向链路 `(from, to)` -> 各策略计数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkUsage {
    counts: BTreeMap<(NodeId, NodeId), PolicyCounts>,
}

impl LinkUsage {
    /// 每条链路的两个方向都初始化为 0
    pub fn zeroed(links: &[Link]) -> Self {
        let mut counts = BTreeMap::new();
        for link in links {
            for dir in link.directions() {
                counts.insert(dir, PolicyCounts::default());
            }
        }
        Self { counts }
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Option<&PolicyCounts> {
        self.counts.get(&(from, to))
    }

    /// 有向链路数量（= 2 × 无向链路数）
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(NodeId, NodeId), &PolicyCounts)> {
        self.counts.iter()
    }

    /// 某策略在所有有向链路上的计数之和
    pub fn total(&self, policy: Policy) -> u64 {
        self.counts.values().map(|c| c.get(policy)).sum()
    }

    /// 按 `(计数, 链路)` 升序排列的单策略计数，即"经过路径数 vs 链路排名"曲线
    pub fn ranked(&self, policy: Policy) -> Vec<((NodeId, NodeId), u64)> {
        let mut series: Vec<_> = self
            .counts
            .iter()
            .map(|(&link, c)| (link, c.get(policy)))
            .collect();
        series.sort_by_key(|&(link, count)| (count, link));
        series
    }

    fn bump(&mut self, path: &Path, policy: Policy) -> Result<()> {
        for hop in path.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let rec = self
                .counts
                .get_mut(&(from, to))
                .ok_or(AnalysisError::UnknownLink {
                    from: from.0,
                    to: to.0,
                })?;
            *rec.get_mut(policy) += 1;
        }
        Ok(())
    }
}

/// 各策略平均路径长度（以节点数计）；某策略一条路径都没统计到时为 `None`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AvgPathLengths {
    #[serde(rename = "8-ksp")]
    pub ksp_8: Option<f64>,
    #[serde(rename = "8-ecmp")]
    pub ecmp_8: Option<f64>,
    #[serde(rename = "64-ecmp")]
    pub ecmp_64: Option<f64>,
}

impl AvgPathLengths {
    pub fn get(&self, policy: Policy) -> Option<f64> {
        match policy {
            Policy::Ksp8 => self.ksp_8,
            Policy::Ecmp8 => self.ecmp_8,
            Policy::Ecmp64 => self.ecmp_64,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct LengthTotals {
    total_len: u64,
    paths: u64,
}

impl LengthTotals {
    fn add(&mut self, path: &Path) {
        self.total_len += path.len() as u64;
        self.paths += 1;
    }

    fn average(&self) -> Option<f64> {
        (self.paths > 0).then(|| self.total_len as f64 / self.paths as f64)
    }
}

/// 统计三种策略下每条有向链路的使用次数与平均路径长度。
///
/// - 同一节点下的主机之间的流量不经过拓扑，直接跳过；
/// - ECMP 路径截断到前 64 条，其中前 8 条同时计入 8 路 ECMP；
/// - KSP 路径在枚举时已被 k 限制，全部计入；
/// - 节点对不在路径集合中表示不连通，不贡献任何计数。
#[tracing::instrument(skip_all, fields(hosts = traffic.len(), links = links.len()))]
pub fn count_paths(
    ecmp_paths: &PathSet,
    ksp_paths: &PathSet,
    traffic: &TrafficMatrix,
    links: &[Link],
    layout: HostLayout,
) -> Result<(LinkUsage, AvgPathLengths)> {
    let mut usage = LinkUsage::zeroed(links);
    let mut ecmp_8 = LengthTotals::default();
    let mut ecmp_64 = LengthTotals::default();
    let mut ksp_8 = LengthTotals::default();
    let mut skipped_local = 0usize;

    for (start_host, dest_host) in traffic.flows() {
        let start_node = layout.node_of(start_host);
        let dest_node = layout.node_of(dest_host);
        if start_node == dest_node {
            skipped_local += 1;
            continue;
        }
        let (lo, hi) = (start_node.min(dest_node), start_node.max(dest_node));

        if let Some(paths) = ecmp_paths.get(lo, hi) {
            for (i, path) in paths.iter().take(ECMP_WIDE_WAYS).enumerate() {
                if i < ECMP_NARROW_WAYS {
                    ecmp_8.add(path);
                    usage.bump(path, Policy::Ecmp8)?;
                }
                ecmp_64.add(path);
                usage.bump(path, Policy::Ecmp64)?;
            }
        }

        if let Some(paths) = ksp_paths.get(lo, hi) {
            for path in paths {
                ksp_8.add(path);
                usage.bump(path, Policy::Ksp8)?;
            }
        }
    }

    let avg = AvgPathLengths {
        ksp_8: ksp_8.average(),
        ecmp_8: ecmp_8.average(),
        ecmp_64: ecmp_64.average(),
    };

    debug!(skipped_local, "同节点流量不经过拓扑");
    info!(
        ecmp_8_paths = ecmp_8.paths,
        ecmp_64_paths = ecmp_64.paths,
        ksp_paths = ksp_8.paths,
        avg_ecmp_8 = ?avg.ecmp_8,
        avg_ecmp_64 = ?avg.ecmp_64,
        avg_ksp_8 = ?avg.ksp_8,
        "📊 链路使用统计完成"
    );
    Ok((usage, avg))
}
