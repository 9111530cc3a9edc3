//! 流量矩阵模块
//!
//! 随机置换流量矩阵：每台主机以满速发送给唯一一台其他主机，
//! 同时也只接收来自唯一一台其他主机的流量，置换在所有错排中均匀选取。

// 子模块声明
mod derangement;
mod matrix;

// 重新导出公共接口
pub use derangement::random_derangement;
pub use matrix::{DEFAULT_HOSTS_PER_NODE, HostLayout, TrafficMatrix};
