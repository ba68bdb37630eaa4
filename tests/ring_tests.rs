mod common;
use common::Sandbox;
use predicates::str::contains;
use std::fs;

#[test]
fn test_ring_then_list() {
    let sb = Sandbox::new("ring_then_list", "csv");

    sb.cmd()
        .args(["ring", "--name", "Jane Doe", "--badge", "00042"])
        .assert()
        .success()
        .stdout(contains("Ring sent to the"));

    let text = sb.log_text();
    assert!(text.starts_with("timestamp,name,username,badge,note,shift,photo_ref"));
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("00042"));

    sb.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Jane Doe"))
        .stdout(contains("00042"));
}

#[test]
fn test_ring_without_identity_is_rejected() {
    let sb = Sandbox::new("ring_rejected", "csv");

    sb.cmd()
        .args(["ring", "--note", "just a note"])
        .assert()
        .failure()
        .stderr(contains("Ring rejected"));

    assert!(sb.log_text().is_empty());
}

#[test]
fn test_pinned_shift_needs_admin() {
    let sb = Sandbox::new("ring_pinned", "csv");

    sb.cmd()
        .args([
            "ring", "--name", "ann", "--shift", "Night", "--user", "admin", "--password", "nope",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials"));

    sb.cmd()
        .args([
            "ring",
            "--name",
            "ann",
            "--shift",
            "Night",
            "--user",
            "admin",
            "--password",
            "doorbell",
        ])
        .assert()
        .success()
        .stdout(contains("Night shift"));

    assert!(sb.log_text().contains(",Night,"));
}

#[test]
fn test_unknown_pinned_shift() {
    let sb = Sandbox::new("ring_unknown_shift", "csv");

    sb.cmd()
        .args([
            "ring",
            "--name",
            "ann",
            "--shift",
            "Swing",
            "--user",
            "admin",
            "--password",
            "doorbell",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown shift"));
}

#[test]
fn test_ring_with_photo_stores_snapshot() {
    let sb = Sandbox::new("ring_photo", "csv");
    let snap = sb.out("snap.jpg");
    fs::write(&snap, b"\xFF\xD8\xFFfake-jpeg").unwrap();

    sb.cmd()
        .args(["ring", "--username", "j.doe", "--photo", &snap])
        .assert()
        .success();

    let photos: Vec<_> = fs::read_dir(sb.dir.join("photos"))
        .expect("photos dir")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(photos.len(), 1);
    let name = photos[0].file_name().to_string_lossy().to_string();
    assert!(name.ends_with("_j.doe.jpg") || name.ends_with("_jdoe.jpg"));
    assert!(sb.log_text().contains(".jpg"));
}

#[test]
fn test_required_photo_is_enforced() {
    let sb = Sandbox::with_config("ring_require_photo", "csv", "require_photo: true\n");

    sb.cmd()
        .args(["ring", "--name", "ann"])
        .assert()
        .failure()
        .stdout(contains("Please take a photo"));
}

#[test]
fn test_shift_detection_at_given_times() {
    let sb = Sandbox::new("shift_at", "csv");

    for (at, expected) in [
        ("12:00", "Shift: Day"),
        ("23:00", "Shift: Night"),
        ("02:30", "Shift: Night"),
        ("05:00", "Shift: Unscheduled"),
        ("2025-01-02T17:15", "Shift: Unscheduled"),
    ] {
        sb.cmd()
            .args(["shift", "--at", at])
            .assert()
            .success()
            .stdout(contains(expected));
    }

    sb.cmd()
        .args(["shift", "--at", "later"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_tone_writes_wav() {
    let sb = Sandbox::new("tone", "csv");
    let out = sb.out("chime.wav");

    sb.cmd().args(["tone", "--file", &out]).assert().success();

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
}

#[test]
fn test_init_creates_config_and_log() {
    let sb = Sandbox::new("init", "csv");
    let cfg = sb.out("fresh.conf");

    door_init(&sb, &cfg);

    assert!(std::path::Path::new(&cfg).exists());
    assert_eq!(
        sb.log_text().trim(),
        "timestamp,name,username,badge,note,shift,photo_ref"
    );
}

fn door_init(sb: &Sandbox, cfg: &str) {
    common::door()
        .args(["--config", cfg, "--log", &sb.log, "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));
}
