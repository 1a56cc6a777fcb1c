use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;

use rs3calc::server::app;
use rs3calc::server::log_cache::LogCache;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_rs3calc")
}

/// Serves the reference backend on a background thread; returns its origin.
fn spawn_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind backend");
    listener
        .set_nonblocking(true)
        .expect("nonblocking listener");
    let addr = listener.local_addr().expect("backend addr");
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            let _ = axum::serve(listener, app(Arc::new(LogCache::default()))).await;
        });
    });
    format!("http://{addr}")
}

fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("rs3calc should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: rs3calc"));

    let output = Command::new(bin())
        .arg("teleport")
        .output()
        .expect("rs3calc should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn derive_command_prints_percentage() {
    let output = Command::new(bin())
        .args(["derive", "1000", "50", "1200"])
        .output()
        .expect("derive should run");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "15.00%");

    let output = Command::new(bin())
        .args(["derive", "0", "50", "1200"])
        .output()
        .expect("derive should run");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0.00%");
}

#[test]
fn derive_command_returns_usage_without_all_values() {
    let output = Command::new(bin())
        .args(["derive", "1000"])
        .output()
        .expect("derive should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: rs3calc derive"));
}

#[test]
fn help_action_lists_usage_lines() {
    let output = Command::new(bin())
        .arg("help")
        .output()
        .expect("help should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("calc <base_xp>"));
    assert!(stdout.contains("cart-add <n> [qty]"));
}

#[test]
fn calc_action_reports_total_boost_and_steps() {
    let origin = spawn_backend();
    let output = Command::new(bin())
        .args(["calc", "1000", "add=5", "dxp"])
        .env("RS3CALC_BASE_URL", &origin)
        .output()
        .expect("calc should run");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total XP: 2100.00"));
    assert!(stdout.contains("Boost: 105.00%"));
    assert!(stdout.contains("Double XP: +1050.00"));
}

#[test]
fn calc_action_fails_when_backend_is_unreachable() {
    let output = Command::new(bin())
        .args(["calc", "1000"])
        .env("RS3CALC_BASE_URL", closed_origin())
        .output()
        .expect("calc should run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("transport error"));
}

#[test]
fn receipt_action_rejects_empty_cart() {
    let output = Command::new(bin())
        .arg("receipt")
        .env("RS3CALC_BASE_URL", closed_origin())
        .output()
        .expect("receipt should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cart is empty."));
}

#[test]
fn shell_keeps_running_after_a_failed_action() {
    let origin = spawn_backend();
    let mut child = Command::new(bin())
        .arg("shell")
        .env("RS3CALC_BASE_URL", &origin)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("shell should start");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"receipt\ncalc 200 dxp\nquit\ncalc 999\n")
        .expect("write commands");
    let output = child.wait_with_output().expect("shell should exit");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cart is empty."));
    assert!(stdout.contains("Total XP: 400.00"));
    assert!(stdout.contains("Boost: 100.00%"));
    assert!(!stdout.contains("Total XP: 999.00"), "input after quit is ignored");
}
