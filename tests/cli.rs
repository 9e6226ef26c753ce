// tests/cli.rs
// =============================================================================
// End-to-end tests: run the real word-spider binary against a local mock
// server and check what it prints and how it exits.
// =============================================================================

use assert_cmd::cargo;
use httpmock::prelude::*;

fn serve_html(server: &MockServer, path: &str, body: &str) {
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("content-type", "text/html")
            .body(body);
    });
}

#[test]
fn test_word_found_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_html(&server, "/", "<p>hello spider</p>");
    let seed = server.url("/");

    let mut cmd = cargo::cargo_bin_cmd!("word-spider");
    let assert = cmd.arg(&seed).arg("spider").assert();
    assert.success().code(0).stdout(format!(
        "1 visiting: {}\n**success**\nThe word \"spider\" was found at {}\n",
        seed, seed
    ));

    Ok(())
}

#[test]
fn test_word_not_found_still_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_html(&server, "/", "<p>nothing to see</p>");
    let seed = server.url("/");

    let mut cmd = cargo::cargo_bin_cmd!("word-spider");
    let assert = cmd.arg(&seed).arg("spider").assert();
    assert.success().code(0).stdout(format!(
        "1 visiting: {}\n**success**\nword never found\n",
        seed
    ));

    Ok(())
}

#[test]
fn test_failed_seed_still_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo::cargo_bin_cmd!("word-spider");
    let assert = cmd
        .arg("http://127.0.0.1:1/")
        .arg("spider")
        .arg("--timeout")
        .arg("2")
        .assert();
    assert.success().code(0);

    Ok(())
}

#[test]
fn test_json_report_not_found_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_html(&server, "/", "<p>nothing</p>");

    let mut cmd = cargo::cargo_bin_cmd!("word-spider");
    let output = cmd.arg(server.url("/")).arg("spider").arg("--json").output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["outcome"], "not_found");
    assert_eq!(report["pages_visited"], 1);

    Ok(())
}

#[test]
fn test_empty_word_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo::cargo_bin_cmd!("word-spider");
    let assert = cmd.arg("http://127.0.0.1:1/").arg("").assert();
    assert.failure().code(2);

    Ok(())
}
