//! 标识符类型
//!
//! 定义节点标识符与无向链路。

use serde::{Deserialize, Serialize};

/// 节点标识符（0..n-1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// 无向链路，始终以 `(lo, hi)` 规范形式保存
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    lo: NodeId,
    hi: NodeId,
}

impl Link {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(&self) -> NodeId {
        self.lo
    }

    pub fn hi(&self) -> NodeId {
        self.hi
    }

    /// 两个方向：`lo -> hi` 与 `hi -> lo`
    pub fn directions(&self) -> [(NodeId, NodeId); 2] {
        [(self.lo, self.hi), (self.hi, self.lo)]
    }
}
