//! 结果输出
//!
//! 核心计算只产出结构化数据，通过 [`ResultSink`] 交给下游；
//! [`JsonReport`] 是一个把结果收集成 JSON 的实现，供绘图脚本离线使用。

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::{AvgPathLengths, LinkUsage, Policy, PolicyCounts, TrialSummary};
use crate::config::ExperimentConfig;
use crate::error::Result;

/// 结果接收方。`label` 区分同一次运行中的不同快照（如故障前/后）。
pub trait ResultSink {
    fn record_link_usage(&mut self, label: &str, usage: &LinkUsage);

    fn record_avg_path_lengths(&mut self, label: &str, avg: &AvgPathLengths);

    fn record_connectivity(&mut self, label: &str, ratio: f64);

    fn record_failure_trials(&mut self, _fail_prob: f64, _summary: &TrialSummary) {}
}

/// 单条有向链路的计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from: usize,
    pub to: usize,
    #[serde(flatten)]
    pub counts: PolicyCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    /// 策略名 -> 升序排列的链路计数
    #[serde(default)]
    pub ranked: BTreeMap<String, Vec<u64>>,
    #[serde(default)]
    pub avg_path_len: Option<AvgPathLengths>,
    #[serde(default)]
    pub connectivity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub fail_prob: f64,
    pub trials: usize,
    pub ratios: Vec<f64>,
    pub mean_connectivity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    #[serde(default)]
    pub config: Option<ExperimentConfig>,
    #[serde(default)]
    pub snapshots: BTreeMap<String, Snapshot>,
    #[serde(default)]
    pub failure: Option<FailureReport>,
}

impl JsonReport {
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    fn snapshot(&mut self, label: &str) -> &mut Snapshot {
        self.snapshots.entry(label.to_string()).or_default()
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}

impl ResultSink for JsonReport {
    fn record_link_usage(&mut self, label: &str, usage: &LinkUsage) {
        let snap = self.snapshot(label);
        snap.links = usage
            .iter()
            .map(|(&(from, to), &counts)| LinkRecord {
                from: from.0,
                to: to.0,
                counts,
            })
            .collect();
        snap.ranked = Policy::ALL
            .iter()
            .map(|&policy| {
                let series = usage.ranked(policy).into_iter().map(|(_, c)| c).collect();
                (policy.label().to_string(), series)
            })
            .collect();
    }

    fn record_avg_path_lengths(&mut self, label: &str, avg: &AvgPathLengths) {
        self.snapshot(label).avg_path_len = Some(*avg);
    }

    fn record_connectivity(&mut self, label: &str, ratio: f64) {
        self.snapshot(label).connectivity = Some(ratio);
    }

    fn record_failure_trials(&mut self, fail_prob: f64, summary: &TrialSummary) {
        self.failure = Some(FailureReport {
            fail_prob,
            trials: summary.ratios.len(),
            ratios: summary.ratios.clone(),
            mean_connectivity: summary.mean,
        });
    }
}
