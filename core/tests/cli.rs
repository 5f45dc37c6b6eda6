use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

const INPUT: &str = "\
4 4
0 1 1000
0 2 1000
1 3 1000
2 3 1000
4 3
0 1 5
1 2 2
2 3 5
3 1
0 1 10
";

fn stdout_of(command: &mut Command) -> String {
    let output = command.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn cli_prints_one_result_per_graph() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graphs.txt");
    fs::write(&input, INPUT).expect("write input");

    let exe = assert_cmd::cargo_bin!("maxflow");
    let stdout = stdout_of(Command::new(exe).arg(&input));

    assert_eq!(
        stdout,
        "Graph with 4 vertices and 4 edges:\n\
         Maximum flow: 2000\n\
         Graph with 4 vertices and 3 edges:\n\
         Maximum flow: 2\n\
         Graph with 3 vertices and 1 edges:\n\
         Maximum flow: 0\n"
    );
}

#[test]
fn cli_reads_input_txt_by_default() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("input.txt"), "2 1\n0 1 9\n").expect("write input");

    let exe = assert_cmd::cargo_bin!("maxflow");
    let stdout = stdout_of(Command::new(exe).current_dir(tmp.path()));

    assert!(stdout.ends_with("Maximum flow: 9\n"), "unexpected output: {stdout}");
}

#[test]
fn cli_accepts_explicit_terminals() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.txt");
    fs::write(&input, "3 2\n2 1 4\n1 0 3\n").expect("write input");

    let exe = assert_cmd::cargo_bin!("maxflow");
    let stdout = stdout_of(
        Command::new(exe)
            .args(["--source", "2", "--sink", "0"])
            .arg(&input),
    );

    assert!(stdout.contains("Maximum flow: 3"), "unexpected output: {stdout}");
}

#[test]
fn cli_reports_invalid_graphs_inline() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.txt");
    fs::write(&input, "2 1\n0 7 1\n2 1\n0 1 4\n").expect("write input");

    let exe = assert_cmd::cargo_bin!("maxflow");
    let stdout = stdout_of(Command::new(exe).arg(&input));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Error: Invalid argument"), "unexpected output: {stdout}");
    assert_eq!(lines[3], "Maximum flow: 4");
}

#[test]
fn cli_emits_json_reports() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graphs.txt");
    fs::write(&input, INPUT).expect("write input");

    let exe = assert_cmd::cargo_bin!("maxflow");
    let stdout = stdout_of(Command::new(exe).arg("--json").arg(&input));

    let reports: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    let reports = reports.as_array().expect("array of reports");
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0]["outcome"]["Ok"]["max_flow"], 2000);
    assert_eq!(reports[1]["outcome"]["Ok"]["min_cut"]["capacity"], 2);
}

#[test]
fn cli_fails_on_missing_or_malformed_input() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let exe = assert_cmd::cargo_bin!("maxflow");
    Command::new(&exe)
        .arg(tmp.path().join("missing.txt"))
        .assert()
        .failure();

    let truncated = tmp.path().join("truncated.txt");
    fs::write(&truncated, "3 2\n0 1 4\n").expect("write input");
    Command::new(&exe).arg(&truncated).assert().failure();

    Command::new(&exe)
        .args(["--source", "0"])
        .assert()
        .failure();
}
