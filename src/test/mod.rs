mod derangement;

use crate::topo::{NodeId, Topology, random_regular_graph};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Triangle 0-1-2.
fn ring3() -> Topology {
    Topology::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap()
}

/// Two disjoint triangles {0,1,2} and {3,4,5}.
fn two_triangles() -> Topology {
    Topology::from_edges(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap()
}

fn seeded_regular(d: usize, n: usize, seed: u64) -> Topology {
    let mut rng = StdRng::seed_from_u64(seed);
    random_regular_graph(d, n, &mut rng).unwrap()
}

/// Reference hop distances from `src`, independent of the code under test.
fn hop_distances(topo: &Topology, src: NodeId) -> Vec<Option<usize>> {
    let mut dist = vec![None; topo.node_count()];
    dist[src.0] = Some(0);
    let mut q = VecDeque::from([src]);
    while let Some(v) = q.pop_front() {
        for nbr in topo.neighbors(v) {
            if dist[nbr.0].is_none() {
                dist[nbr.0] = Some(dist[v.0].unwrap() + 1);
                q.push_back(nbr);
            }
        }
    }
    dist
}

/// Path is simple, starts at `src`, ends at `dst`, and every hop is an edge.
fn assert_valid_path(topo: &Topology, path: &[NodeId], src: NodeId, dst: NodeId) {
    assert_eq!(path.first().copied(), Some(src), "bad start: {path:?}");
    assert_eq!(path.last().copied(), Some(dst), "bad end: {path:?}");
    for hop in path.windows(2) {
        assert!(topo.has_edge(hop[0], hop[1]), "missing edge in {path:?}");
    }
    let mut seen = path.to_vec();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), path.len(), "repeated node in {path:?}");
}

fn ids(raw: &[usize]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}
