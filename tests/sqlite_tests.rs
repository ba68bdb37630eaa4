mod common;
use common::Sandbox;
use predicates::str::contains;

#[test]
fn test_sqlite_ring_list_and_audit() {
    let sb = Sandbox::new("sqlite_flow", "sqlite");

    sb.cmd().arg("init").assert().success();

    sb.cmd()
        .args(["ring", "--name", "Dana", "--badge", "98765"])
        .assert()
        .success();

    sb.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Dana"))
        .stdout(contains("98765"));

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"));
}

#[test]
fn test_sqlite_clear_is_audited() {
    let sb = Sandbox::new("sqlite_clear", "sqlite");

    sb.cmd()
        .args(["ring", "--username", "eve"])
        .assert()
        .success();

    sb.cmd()
        .args(["clear", "--yes", "--user", "admin", "--password", "doorbell"])
        .assert()
        .success();

    sb.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No rings found"));

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("backup"))
        .stdout(contains("Ring log reset"));
}

#[test]
fn test_sqlite_kiosk_scan() {
    let sb = Sandbox::new("sqlite_kiosk", "sqlite");

    sb.cmd()
        .arg("kiosk")
        .write_stdin(":scan 55555\n:quit\n")
        .assert()
        .success();

    sb.cmd()
        .args(["list", "--search", "55555"])
        .assert()
        .success()
        .stdout(contains("Showing 1 of 1"));
}

#[test]
fn test_csv_backend_has_no_audit() {
    let sb = Sandbox::new("csv_no_audit", "csv");

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("only by the SQLite backend"));
}
