use std::process::Command;

#[test]
fn sweep_writes_one_row_and_field_per_case() {
    let dir = std::env::temp_dir().join(format!("heat-sweep-{}", std::process::id()));
    let out = Command::new(env!("CARGO_BIN_EXE_heat-sweep"))
        .args(["--out", dir.to_str().unwrap()])
        .args(["--cases", "6", "--n-max", "12", "--eps-min", "0.001", "--seed", "7"])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run heat-sweep");
    assert!(out.status.success());

    let rows = std::fs::read_to_string(dir.join("cases.jsonl")).unwrap();
    let rows: Vec<serde_json::Value> = rows
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 6);

    let mut expected_bytes = 0;
    for row in &rows {
        assert_eq!(row["termination"], "converged");
        assert_eq!(row["base_seed"], 7);
        let n = row["params"]["n"].as_u64().unwrap() as usize;
        assert!((3..=12).contains(&n));
        let eps = row["params"]["epsilon"].as_f64().unwrap();
        assert!(row["residual"].as_f64().unwrap() <= eps);
        expected_bytes += 4 + n * n * 8;
    }
    let fields = std::fs::read(dir.join("fields.bin")).unwrap();
    assert_eq!(fields.len(), expected_bytes);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn sweep_is_reproducible_for_a_seed() {
    let run = |tag: &str| {
        let dir = std::env::temp_dir().join(format!("heat-sweep-{tag}-{}", std::process::id()));
        let out = Command::new(env!("CARGO_BIN_EXE_heat-sweep"))
            .args(["--out", dir.to_str().unwrap()])
            .args(["--cases", "3", "--n-max", "10", "--threads", "0"])
            .output()
            .expect("failed to run heat-sweep");
        assert!(out.status.success());
        let fields = std::fs::read(dir.join("fields.bin")).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        fields
    };
    assert_eq!(run("a"), run("b"));
}
