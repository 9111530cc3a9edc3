//! 实验配置
//!
//! 可以从 JSON 文件加载，缺省字段取默认值；命令行参数再逐项覆盖。
//!
//! ```json
//! { "nodes": 20, "degree": 4, "fail_prob": 0.05, "trials": 50, "seed": 7 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::check_fail_prob;
use crate::error::{AnalysisError, Result};
use crate::paths::DEFAULT_K;
use crate::traffic::{DEFAULT_HOSTS_PER_NODE, HostLayout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// 拓扑节点数
    pub nodes: usize,
    /// 每个节点的度
    pub degree: usize,
    pub hosts_per_node: usize,
    /// KSP 条数
    pub k: usize,
    /// 每条链路独立失效的概率
    pub fail_prob: f64,
    /// 故障试验次数
    pub trials: usize,
    /// 随机种子；缺省时随机选取
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            nodes: 10,
            degree: 3,
            hosts_per_node: DEFAULT_HOSTS_PER_NODE,
            k: DEFAULT_K,
            fail_prob: 0.1,
            trials: 10,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes < 2 {
            return Err(AnalysisError::TooFewNodes(self.nodes));
        }
        if self.k == 0 {
            return Err(AnalysisError::InvalidK);
        }
        if self.trials == 0 {
            return Err(AnalysisError::InvalidTrials);
        }
        // 后续的 stub 数、主机数和节点对数都不能溢出
        self.nodes
            .checked_mul(self.degree)
            .ok_or(AnalysisError::SizeOverflow {
                what: "nodes * degree",
            })?;
        self.nodes
            .checked_mul(self.nodes - 1)
            .ok_or(AnalysisError::SizeOverflow {
                what: "nodes * (nodes - 1)",
            })?;
        self.layout()?.host_count(self.nodes)?;
        check_fail_prob(self.fail_prob)
    }

    pub fn layout(&self) -> Result<HostLayout> {
        HostLayout::new(self.hosts_per_node)
    }

    /// 与原始工具一致的结果名，例如 `d_3_n_10`
    pub fn topology_name(&self) -> String {
        format!("d_{}_n_{}", self.degree, self.nodes)
    }
}
