use crate::error::AnalysisError;
use crate::topo::NodeId;
use crate::traffic::{HostLayout, TrafficMatrix, random_derangement};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use test_case::test_case;

#[test_case(2)]
#[test_case(3)]
#[test_case(30)]
fn derangement_never_has_fixed_points(n: usize) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    for _ in 0..10_000 {
        let v = random_derangement(n, &mut rng).unwrap();
        assert_eq!(v.len(), n);
        for (i, &x) in v.iter().enumerate() {
            assert_ne!(i, x, "fixed point in {v:?}");
        }
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>(), "not a permutation: {v:?}");
    }
}

#[test]
fn derangement_of_two_is_the_swap() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(random_derangement(2, &mut rng).unwrap(), vec![1, 0]);
}

#[test]
fn derangement_is_uniform_over_all_derangements() {
    // n = 4 has exactly 9 derangements.
    let mut rng = StdRng::seed_from_u64(2024);
    let samples = 18_000;
    let mut hist: HashMap<Vec<usize>, usize> = HashMap::new();
    for _ in 0..samples {
        *hist.entry(random_derangement(4, &mut rng).unwrap()).or_default() += 1;
    }

    assert_eq!(hist.len(), 9, "expected all 9 derangements: {hist:?}");
    let expected = samples as f64 / 9.0;
    let chi2: f64 = hist
        .values()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    // 8 degrees of freedom; 26.1 is the 0.1% critical value.
    assert!(chi2 < 26.1, "chi-square {chi2} too large: {hist:?}");
}

#[test_case(0)]
#[test_case(1)]
fn derangement_rejects_tiny_inputs(n: usize) {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        random_derangement(n, &mut rng),
        Err(AnalysisError::DerangementTooSmall(m)) if m == n
    ));
}

#[test]
fn traffic_matrix_maps_hosts_to_nodes() {
    let layout = HostLayout::default();
    assert_eq!(layout.hosts_per_node(), 3);
    assert_eq!(layout.host_count(10).unwrap(), 30);
    assert_eq!(layout.node_of(0), NodeId(0));
    assert_eq!(layout.node_of(2), NodeId(0));
    assert_eq!(layout.node_of(3), NodeId(1));

    let wide = HostLayout::new(4).unwrap();
    assert_eq!(wide.node_of(7), NodeId(1));
    assert!(matches!(
        HostLayout::new(0),
        Err(AnalysisError::InvalidHostsPerNode)
    ));

    let mut rng = StdRng::seed_from_u64(1);
    let tm = TrafficMatrix::random(layout.host_count(10).unwrap(), &mut rng).unwrap();
    assert_eq!(tm.len(), 30);
    assert!(tm.flows().all(|(src, dst)| src != dst));
    assert_eq!(tm.dest(30), None);
}

#[test_case(vec![1, 1, 0], 1, "repeats an earlier destination" ; "duplicate")]
#[test_case(vec![1, 0, 2], 2, "points back to itself" ; "fixed point")]
#[test_case(vec![1, 2, 99], 2, "is out of range" ; "out of range")]
fn traffic_matrix_rejects_lists_that_are_not_derangements(
    dest: Vec<usize>,
    bad_host: usize,
    why: &str,
) {
    match TrafficMatrix::from_dests(dest) {
        Err(AnalysisError::NotADerangement { host, reason }) => {
            assert_eq!(host, bad_host);
            assert_eq!(reason, why);
        }
        other => panic!("expected NotADerangement, got {other:?}"),
    }
}

#[test]
fn traffic_matrix_from_dests_checks_size_and_deserialization() {
    assert!(matches!(
        TrafficMatrix::from_dests(vec![0]),
        Err(AnalysisError::DerangementTooSmall(1))
    ));
    assert!(matches!(
        TrafficMatrix::from_dests(Vec::new()),
        Err(AnalysisError::DerangementTooSmall(0))
    ));

    let tm = TrafficMatrix::from_dests(vec![2, 0, 1]).unwrap();
    assert_eq!(tm.dest(0), Some(2));
    let text = serde_json::to_string(&tm).unwrap();
    assert_eq!(text, "[2,0,1]");
    assert_eq!(serde_json::from_str::<TrafficMatrix>(&text).unwrap(), tm);
    assert!(serde_json::from_str::<TrafficMatrix>("[1,1,1,99]").is_err());
}

#[test]
fn host_count_overflow_is_an_error() {
    assert!(matches!(
        HostLayout::default().host_count(usize::MAX),
        Err(AnalysisError::SizeOverflow { .. })
    ));
}
