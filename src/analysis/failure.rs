//! 随机链路故障仿真
//!
//! 每条边独立地以 `fail_prob` 概率失效，在副本上重新计算路径与连通率；
//! 调用方的拓扑不会被修改。多次试验互相独立，可并行执行后取算术平均。

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::connectivity::connectivity;
use crate::error::{AnalysisError, Result};
use crate::paths::{DEFAULT_K, PathSet, compute_ecmp_paths, compute_k_shortest_paths};
use crate::topo::{Link, Topology};

/// 单次故障试验的结果
#[derive(Debug, Clone)]
pub struct FailureTrial {
    /// 删除失效链路后的拓扑副本
    pub topology: Topology,
    pub failed_links: Vec<Link>,
    pub ecmp_paths: PathSet,
    pub ksp_paths: PathSet,
    pub connectivity: f64,
}

/// 多次试验的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    /// 每次试验使用的种子，按试验编号排列；用同一种子可复现该次试验
    pub seeds: Vec<u64>,
    pub ratios: Vec<f64>,
    pub mean: f64,
}

pub fn check_fail_prob(fail_prob: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&fail_prob) {
        return Err(AnalysisError::InvalidFailProb(fail_prob));
    }
    Ok(())
}

/// 按边的规范顺序逐条抽样，返回删边后的副本和失效链路列表。
pub fn fail_links<R: Rng + ?Sized>(
    topo: &Topology,
    fail_prob: f64,
    rng: &mut R,
) -> Result<(Topology, Vec<Link>)> {
    check_fail_prob(fail_prob)?;

    let mut reduced = topo.clone();
    let mut failed = Vec::new();
    for link in topo.edges() {
        if rng.gen_bool(fail_prob) {
            reduced.remove_edge(link.lo(), link.hi());
            failed.push(link);
        }
    }
    debug!(
        failed = failed.len(),
        remaining = reduced.edge_count(),
        "💥 随机链路故障"
    );
    Ok((reduced, failed))
}

/// 执行一次完整试验：删边、重新计算 ECMP/KSP、计算连通率。
#[tracing::instrument(skip(topo, rng), fields(edges = topo.edge_count()))]
pub fn run_trial<R: Rng + ?Sized>(
    topo: &Topology,
    n: usize,
    fail_prob: f64,
    k: usize,
    rng: &mut R,
) -> Result<FailureTrial> {
    if n < 2 {
        return Err(AnalysisError::TooFewNodes(n));
    }
    if k == 0 {
        return Err(AnalysisError::InvalidK);
    }
    let (topology, failed_links) = fail_links(topo, fail_prob, rng)?;
    let ecmp_paths = compute_ecmp_paths(&topology, n);
    let ksp_paths = compute_k_shortest_paths(&topology, n, k)?;
    let connectivity = connectivity(n, &ecmp_paths)?;

    Ok(FailureTrial {
        topology,
        failed_links,
        ecmp_paths,
        ksp_paths,
        connectivity,
    })
}

/// 单次试验后的连通率（k 取默认值 8）
pub fn aggregate<R: Rng + ?Sized>(
    topo: &Topology,
    n: usize,
    fail_prob: f64,
    rng: &mut R,
) -> Result<f64> {
    run_trial(topo, n, fail_prob, DEFAULT_K, rng).map(|trial| trial.connectivity)
}

/// 并行执行 `trials` 次独立试验。
///
/// 每次试验的种子先由 `seed` 派生的主生成器依次抽出，再各自构造 `StdRng`，
/// 所以结果与线程调度无关。
#[tracing::instrument(skip(topo), fields(edges = topo.edge_count()))]
pub fn failure_trials(
    topo: &Topology,
    n: usize,
    fail_prob: f64,
    k: usize,
    trials: usize,
    seed: u64,
) -> Result<TrialSummary> {
    if trials == 0 {
        return Err(AnalysisError::InvalidTrials);
    }
    if n < 2 {
        return Err(AnalysisError::TooFewNodes(n));
    }
    if k == 0 {
        return Err(AnalysisError::InvalidK);
    }
    check_fail_prob(fail_prob)?;

    let mut master = StdRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..trials).map(|_| master.next_u64()).collect();

    let ratios = seeds
        .par_iter()
        .map(|&trial_seed| {
            let mut rng = StdRng::seed_from_u64(trial_seed);
            run_trial(topo, n, fail_prob, k, &mut rng).map(|trial| trial.connectivity)
        })
        .collect::<Result<Vec<f64>>>()?;

    let mean = ratios.iter().sum::<f64>() / trials as f64;
    info!(trials, fail_prob, mean, "🔁 故障试验完成");

    Ok(TrialSummary {
        seeds,
        ratios,
        mean,
    })
}

/// 多次试验的平均连通率
pub fn average_connectivity(
    topo: &Topology,
    n: usize,
    fail_prob: f64,
    k: usize,
    trials: usize,
    seed: u64,
) -> Result<f64> {
    failure_trials(topo, n, fail_prob, k, trials, seed).map(|summary| summary.mean)
}
