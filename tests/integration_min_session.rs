// PTY smoke test for the compiled binary: real event loop, real crossterm
// input handling.
//
// Requires a TTY; expectrl allocates a pseudo terminal. Unix only and ignored
// by default. Run with `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn one_card_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let bin = assert_cmd::cargo::cargo_bin("flipquiz");
    let cmd = format!(
        "{} --no-auth --no-timer -c 1 -r single-step --config {} --log-file {}",
        bin.display(),
        dir.path().join("config.json").display(),
        dir.path().join("flipquiz.log").display(),
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // open the only card, then show its answer which finishes the deck
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("q")?;
    p.expect(Eof)?;

    let log = std::fs::read_to_string(dir.path().join("flipquiz.log"))?;
    assert!(log.contains("all cards answered"));
    Ok(())
}

#[test]
#[ignore]
fn password_gate_quits_on_escape() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let bin = assert_cmd::cargo::cargo_bin("flipquiz");
    let cmd = format!(
        "{} --password chalk --config {} --log-file {}",
        bin.display(),
        dir.path().join("config.json").display(),
        dir.path().join("flipquiz.log").display(),
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));
    p.send("\x1b")?; // ESC
    p.expect(Eof)?;
    Ok(())
}
