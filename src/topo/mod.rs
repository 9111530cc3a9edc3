//! 拓扑模块
//!
//! 此模块包含拓扑图本身、随机正则图生成以及邻接表读写。

// 子模块声明
mod adjlist;
mod graph;
mod id;
mod regular;

// 重新导出公共接口
pub use adjlist::{read_adjlist, write_adjlist};
pub use graph::Topology;
pub use id::{Link, NodeId};
pub use regular::{MAX_ATTEMPTS, random_regular_graph};
