//! 错误类型
//!
//! 只有输入本身不合法时才报错；节点对之间不连通不是错误，
//! 而是路径集合中缺少对应的 key。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failure probability must be within [0, 1], got {0}")]
    InvalidFailProb(f64),

    #[error("k must be positive")]
    InvalidK,

    #[error("trial count must be positive")]
    InvalidTrials,

    #[error("hosts_per_node must be positive")]
    InvalidHostsPerNode,

    #[error("connectivity needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("a derangement needs at least 2 elements, got {0}")]
    DerangementTooSmall(usize),

    #[error("node {node} out of range for a topology with {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    #[error("self-loop on node {0}")]
    SelfLoop(usize),

    #[error("duplicate edge {0}-{1}")]
    DuplicateEdge(usize, usize),

    #[error("path traverses link {from}->{to}, which is not in the link set")]
    UnknownLink { from: usize, to: usize },

    #[error("no {degree}-regular graph on {nodes} nodes: {reason}")]
    InvalidRegularParams {
        degree: usize,
        nodes: usize,
        reason: &'static str,
    },

    #[error("failed to generate a random regular graph after {0} attempts")]
    RegularGraphGeneration(usize),

    #[error("adjlist line {line}: {reason}")]
    AdjlistParse { line: usize, reason: String },

    #[error("adjlist never mentions node {0}; labels must cover 0..n without gaps")]
    AdjlistMissingNode(usize),

    #[error("traffic matrix entry for host {host} {reason}")]
    NotADerangement { host: usize, reason: &'static str },

    #[error("{what} overflows usize")]
    SizeOverflow { what: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
