use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("kira-qpcr").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn run_requires_control() {
    let mut cmd = Command::cargo_bin("kira-qpcr").unwrap();
    cmd.args(["run", "--input", "x.tsv", "--out", "out"]);
    cmd.assert().failure();
}
