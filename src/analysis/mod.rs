//! 分析模块
//!
//! 链路使用统计、连通率以及随机链路故障下的连通率试验。

// 子模块声明
mod connectivity;
mod failure;
mod link_usage;

// 重新导出公共接口
pub use connectivity::connectivity;
pub use failure::{
    FailureTrial, TrialSummary, aggregate, average_connectivity, check_fail_prob, fail_links,
    failure_trials, run_trial,
};
pub use link_usage::{
    AvgPathLengths, ECMP_NARROW_WAYS, ECMP_WIDE_WAYS, LinkUsage, Policy, PolicyCounts, count_paths,
};
