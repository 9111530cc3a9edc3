//! 路径枚举模块
//!
//! 为拓扑中每一对节点计算：
//! - ECMP：所有最短（最少跳数）简单路径；
//! - KSP：按长度非降序排列的前 k 条简单路径。
//!
//! 不连通的节点对在 [`PathSet`] 中没有对应的 key。

// 子模块声明
mod ecmp;
mod ksp;
mod path_set;

// 重新导出公共接口
pub use ecmp::{all_shortest_paths, compute_ecmp_paths};
pub use ksp::{compute_k_shortest_paths, compute_k_shortest_paths_weighted, k_shortest_paths};
pub use path_set::{Path, PathSet};

/// 论文中使用的 KSP 条数
pub const DEFAULT_K: usize = 8;
