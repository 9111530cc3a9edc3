use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::topo::NodeId;

/// 节点序列，首元素为源、末元素为目的，不含重复节点
pub type Path = Vec<NodeId>;

/// 无序节点对 `(a, b)`（`a < b`）到路径列表的映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    pairs: BTreeMap<(NodeId, NodeId), Vec<Path>>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        (a.min(b), a.max(b))
    }

    /// 写入一对节点的路径；空列表视为"无路径"，不会写入。
    pub fn insert(&mut self, a: NodeId, b: NodeId, paths: Vec<Path>) {
        if paths.is_empty() {
            return;
        }
        self.pairs.insert(Self::key(a, b), paths);
    }

    /// 查询 `(a, b)` 的路径，参数顺序无关
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<&[Path]> {
        self.pairs.get(&Self::key(a, b)).map(Vec::as_slice)
    }

    /// 有路径的节点对数量
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, (NodeId, NodeId), Vec<Path>> {
        self.pairs.iter()
    }

    /// 所有节点对上的路径总数
    pub fn path_count(&self) -> usize {
        self.pairs.values().map(Vec::len).sum()
    }
}

impl Extend<((NodeId, NodeId), Vec<Path>)> for PathSet {
    fn extend<T: IntoIterator<Item = ((NodeId, NodeId), Vec<Path>)>>(&mut self, iter: T) {
        for ((a, b), paths) in iter {
            self.insert(a, b, paths);
        }
    }
}
