//! 单行邻接表（adjlist）读写
//!
//! 格式：每行 `源 邻居 邻居 ...`，`#` 之后为注释。
//! 写出时每条边只在先出现的端点那一行列出一次，例如边 0-1、0-2、3-4：
//!
//! ```text
//! 0 1 2
//! 1
//! 2
//! 3 4
//! 4
//! ```

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use super::graph::Topology;
use super::id::NodeId;
use crate::error::{AnalysisError, Result};

pub fn write_adjlist<W: Write>(topo: &Topology, mut out: W) -> Result<()> {
    for v in topo.nodes() {
        write!(out, "{}", v.0)?;
        for nbr in topo.neighbors(v).filter(|nbr| *nbr > v) {
            write!(out, " {}", nbr.0)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// 读取邻接表。同一条边在两端重复列出时只保留一次。
///
/// 标签必须恰好覆盖 `0..n`：中间缺号的节点会凭空成为孤立点并拉低连通率，
/// 因此直接报错。
pub fn read_adjlist<R: BufRead>(input: R) -> Result<Topology> {
    let mut labels_seen: BTreeSet<usize> = BTreeSet::new();
    let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let content = line.split('#').next().unwrap_or_default();
        let mut labels = content.split_whitespace().map(|tok| {
            tok.parse::<usize>().map_err(|_| AnalysisError::AdjlistParse {
                line: line_no,
                reason: format!("node label {tok:?} is not a non-negative integer"),
            })
        });

        let Some(src) = labels.next().transpose()? else {
            continue;
        };
        labels_seen.insert(src);

        for dst in labels {
            let dst = dst?;
            if dst == src {
                return Err(AnalysisError::AdjlistParse {
                    line: line_no,
                    reason: format!("self-loop on node {src}"),
                });
            }
            labels_seen.insert(dst);
            edges.insert((src.min(dst), src.max(dst)));
        }
    }

    let n = labels_seen.last().map_or(0, |&m| m + 1);
    if let Some(missing) = (0..n).zip(&labels_seen).find(|(v, l)| v != *l) {
        return Err(AnalysisError::AdjlistMissingNode(missing.0));
    }
    let mut topo = Topology::new(n);
    for (a, b) in edges {
        topo.add_edge(NodeId(a), NodeId(b))?;
    }
    Ok(topo)
}
