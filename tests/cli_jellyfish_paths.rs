use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "jellyfish-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jellyfish_paths"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run jellyfish_paths")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "jellyfish_paths failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn jellyfish_paths_prints_summary_and_writes_json() {
    let dir = unique_temp_dir("summary");
    let json = dir.join("out.json");
    let adj = dir.join("topo.adjlist");

    let output = run(&[
        "--nodes",
        "10",
        "--degree",
        "3",
        "--trials",
        "3",
        "--seed",
        "42",
        "--out-json",
        json.to_str().unwrap(),
        "--save-topology",
        adj.to_str().unwrap(),
    ]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("seed=42 nodes=10 edges=15"), "{stdout}");
    assert!(
        stdout.lines().any(|l| l.starts_with("baseline connectivity=")),
        "{stdout}"
    );
    assert!(
        stdout.lines().any(|l| l.starts_with("failure fail_prob=0.1 trials=3")),
        "{stdout}"
    );
    assert!(
        stdout.lines().any(|l| l.starts_with("failed connectivity=")),
        "{stdout}"
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("read json")).expect("parse json");
    let baseline = &report["snapshots"]["baseline"];
    assert_eq!(baseline["links"].as_array().unwrap().len(), 30);
    assert_eq!(baseline["ranked"]["8-ksp"].as_array().unwrap().len(), 30);
    assert!(baseline["avg_path_len"]["8-ecmp"].as_f64().unwrap() >= 2.0);
    assert_eq!(report["failure"]["trials"], 3);
    assert_eq!(report["config"]["seed"], 42);

    let adjlist = fs::read_to_string(&adj).expect("read adjlist");
    assert_eq!(adjlist.lines().count(), 10);
}

#[test]
fn jellyfish_paths_is_deterministic_for_a_seed() {
    let args = ["--nodes", "12", "--trials", "4", "--seed", "7"];
    let a = stdout_of(&run(&args));
    let b = stdout_of(&run(&args));
    assert_eq!(a, b);
}

#[test]
fn jellyfish_paths_reads_topology_and_config_files() {
    let dir = unique_temp_dir("inputs");
    let adj = dir.join("ring.adjlist");
    fs::write(&adj, "0 1 3\n1 2\n2 3\n3\n").expect("write adjlist");
    let cfg = dir.join("cfg.json");
    fs::write(&cfg, r#"{ "hosts_per_node": 2, "fail_prob": 1.0, "trials": 2 }"#)
        .expect("write config");

    let json = dir.join("out.json");

    let stdout = stdout_of(&run(&[
        "--config",
        cfg.to_str().unwrap(),
        "--topology",
        adj.to_str().unwrap(),
        "--seed",
        "1",
        "--out-json",
        json.to_str().unwrap(),
    ]));

    assert!(stdout.contains("nodes=4 edges=4"), "{stdout}");
    assert!(stdout.contains("baseline connectivity=100.00%"), "{stdout}");
    assert!(stdout.contains("mean_connectivity=0.00%"), "{stdout}");
    assert!(
        stdout.contains("failed connectivity=0.00% avg_path_len 8-ksp=n/a 8-ecmp=n/a 64-ecmp=n/a"),
        "{stdout}"
    );

    // Node count and degree come from the file, not from the defaults.
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("read json")).expect("parse json");
    assert_eq!(report["config"]["nodes"], 4);
    assert_eq!(report["config"]["degree"], 2);
}

#[test]
fn jellyfish_paths_rejects_topology_file_with_explicit_size() {
    let output = run(&["--topology", "missing.adjlist", "--nodes", "12"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"), "{stderr}");
}

#[test]
fn jellyfish_paths_rejects_sizes_that_overflow() {
    let output = run(&["--nodes", "9223372036854775807", "--degree", "4", "--seed", "1"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: nodes * degree overflows usize"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}

#[test]
fn jellyfish_paths_rejects_invalid_failure_probability() {
    let output = run(&["--fail-prob", "1.5", "--seed", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failure probability"), "{stderr}");
}
