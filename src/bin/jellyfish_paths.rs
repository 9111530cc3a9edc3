use clap::Parser;
use jellyfish_rs::analysis::{
    AvgPathLengths, Policy, connectivity, count_paths, failure_trials, run_trial,
};
use jellyfish_rs::config::ExperimentConfig;
use jellyfish_rs::error::Result;
use jellyfish_rs::paths::{PathSet, compute_ecmp_paths, compute_k_shortest_paths};
use jellyfish_rs::report::{JsonReport, ResultSink};
use jellyfish_rs::topo::{Topology, random_regular_graph, read_adjlist, write_adjlist};
use jellyfish_rs::traffic::{HostLayout, TrafficMatrix};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "jellyfish-paths",
    about = "随机正则拓扑上 8 路 ECMP / 64 路 ECMP / 8-KSP 的路径多样性与故障连通率评估"
)]
struct Args {
    /// JSON 配置文件；下列参数会覆盖其中的同名字段
    #[arg(long)]
    config: Option<PathBuf>,

    /// 拓扑节点数
    #[arg(long)]
    nodes: Option<usize>,

    /// 每个节点的度
    #[arg(long)]
    degree: Option<usize>,

    /// 每个节点下挂的主机数
    #[arg(long)]
    hosts_per_node: Option<usize>,

    /// KSP 条数
    #[arg(long)]
    k: Option<usize>,

    /// 每条链路的失效概率
    #[arg(long)]
    fail_prob: Option<f64>,

    /// 故障试验次数
    #[arg(long)]
    trials: Option<usize>,

    /// 随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 从邻接表文件读取拓扑，而不是随机生成；节点数和度取自文件
    #[arg(long, conflicts_with_all = ["nodes", "degree"])]
    topology: Option<PathBuf>,

    /// 把使用的拓扑写成邻接表文件
    #[arg(long)]
    save_topology: Option<PathBuf>,

    /// 输出 JSON 结果文件
    #[arg(long)]
    out_json: Option<PathBuf>,
}

impl Args {
    fn resolve_config(&self) -> Result<ExperimentConfig> {
        let mut cfg = match &self.config {
            Some(path) => ExperimentConfig::from_json_file(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(v) = self.nodes {
            cfg.nodes = v;
        }
        if let Some(v) = self.degree {
            cfg.degree = v;
        }
        if let Some(v) = self.hosts_per_node {
            cfg.hosts_per_node = v;
        }
        if let Some(v) = self.k {
            cfg.k = v;
        }
        if let Some(v) = self.fail_prob {
            cfg.fail_prob = v;
        }
        if let Some(v) = self.trials {
            cfg.trials = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        Ok(cfg)
    }
}

fn fmt_avg(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.3}"))
}

fn print_snapshot(label: &str, ratio: f64, avg: &AvgPathLengths) {
    let lens = Policy::ALL
        .iter()
        .map(|&p| format!("{}={}", p.label(), fmt_avg(avg.get(p))))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{label} connectivity={:.2}% avg_path_len {lens}",
        ratio * 100.0
    );
}

/// 在给定拓扑上生成新的流量矩阵并统计链路使用，结果写入 sink
#[allow(clippy::too_many_arguments)]
fn measure(
    label: &str,
    topo: &Topology,
    n: usize,
    ecmp: &PathSet,
    ksp: &PathSet,
    layout: HostLayout,
    rng: &mut StdRng,
    sink: &mut impl ResultSink,
) -> Result<()> {
    let traffic = TrafficMatrix::random(layout.host_count(n)?, rng)?;
    let links = topo.edges();
    let (usage, avg) = count_paths(ecmp, ksp, &traffic, &links, layout)?;
    let ratio = connectivity(n, ecmp)?;

    sink.record_link_usage(label, &usage);
    sink.record_avg_path_lengths(label, &avg);
    sink.record_connectivity(label, ratio);
    print_snapshot(label, ratio, &avg);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut cfg = args.resolve_config()?;

    let seed = cfg.seed.unwrap_or_else(rand::random);
    cfg.seed = Some(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let loaded = match &args.topology {
        Some(path) => {
            let topo = read_adjlist(BufReader::new(File::open(path)?))?;
            cfg.nodes = topo.node_count();
            let degree = topo.nodes().next().map_or(0, |v| topo.degree(v));
            if topo.is_regular(degree) {
                cfg.degree = degree;
            } else {
                warn!(path = %path.display(), "⚠️ 拓扑不是正则图，结果名中的度仅供参考");
            }
            info!(path = %path.display(), nodes = cfg.nodes, edges = topo.edge_count(), "📂 读取拓扑");
            Some(topo)
        }
        None => None,
    };
    cfg.validate()?;
    let topo = match loaded {
        Some(topo) => topo,
        None => random_regular_graph(cfg.degree, cfg.nodes, &mut rng)?,
    };
    let layout = cfg.layout()?;
    let n = cfg.nodes;

    info!(seed, name = %cfg.topology_name(), ?cfg, "🚀 开始评估");
    println!("seed={seed} nodes={n} edges={}", topo.edge_count());

    if let Some(path) = &args.save_topology {
        write_adjlist(&topo, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), "💾 写出拓扑");
    }

    let mut sink = JsonReport::new(cfg.clone());

    let ecmp = compute_ecmp_paths(&topo, n);
    let ksp = compute_k_shortest_paths(&topo, n, cfg.k)?;
    measure("baseline", &topo, n, &ecmp, &ksp, layout, &mut rng, &mut sink)?;

    let summary = failure_trials(&topo, n, cfg.fail_prob, cfg.k, cfg.trials, rng.next_u64())?;
    sink.record_failure_trials(cfg.fail_prob, &summary);
    println!(
        "failure fail_prob={} trials={} mean_connectivity={:.2}%",
        cfg.fail_prob,
        cfg.trials,
        summary.mean * 100.0
    );

    // 用最后一次试验的种子复现其故障拓扑，统计故障后的链路使用
    if let Some(&last_seed) = summary.seeds.last() {
        let trial = run_trial(
            &topo,
            n,
            cfg.fail_prob,
            cfg.k,
            &mut StdRng::seed_from_u64(last_seed),
        )?;
        info!(failed_links = trial.failed_links.len(), "复现最后一次故障试验");
        measure(
            "failed",
            &trial.topology,
            n,
            &trial.ecmp_paths,
            &trial.ksp_paths,
            layout,
            &mut rng,
            &mut sink,
        )?;
    }

    if let Some(path) = &args.out_json {
        sink.write_to(BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), "💾 写出 JSON 结果");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "评估失败");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
