use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_template(base: &Path, name: &str) {
    let dir = base.join(name);
    fs::create_dir_all(&dir).expect("create template dir");
    fs::write(dir.join("data.yml"), format!("name: {name}\n")).expect("write data.yml");
    fs::write(dir.join("docker-compose.yml"), "services: {}\n").expect("write compose");
}

fn cmd_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("template-import").expect("Binary exists");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_api_key_fails_before_scanning() {
    let tmp = tempdir().unwrap();
    write_template(tmp.path(), "nginx");

    cmd_in(tmp.path())
        .env_remove("API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_KEY"))
        .stdout(predicate::str::contains("Loaded template").not());
}

#[test]
fn unreadable_base_dir_fails() {
    let tmp = tempdir().unwrap();

    cmd_in(tmp.path())
        .env("API_KEY", "k")
        .arg("--dir")
        .arg(tmp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn empty_directory_reports_no_templates_and_succeeds() {
    let tmp = tempdir().unwrap();
    // Missing compose manifest: loaded nowhere.
    let dir = tmp.path().join("broken");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("data.yml"), "name: Broken\n").unwrap();

    cmd_in(tmp.path())
        .env("API_KEY", "k")
        // Any request would fail to connect and show up in stdout.
        .arg("--api-url")
        .arg("http://127.0.0.1:1/template/import")
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found"))
        .stdout(predicate::str::contains("Sending batch").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn imports_templates_in_batches_and_exits_zero_on_failures() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-API-KEY", "cli-key"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let tmp = tempdir().unwrap();
    for i in 0..12 {
        write_template(tmp.path(), &format!("app-{i:02}"));
    }

    let base = tmp.path().to_path_buf();
    let api_url = format!("{}/template/import", mock_server.uri());
    let output = tokio::task::spawn_blocking(move || {
        cmd_in(&base)
            .env("API_KEY", "cli-key")
            .arg("--api-url")
            .arg(api_url)
            .output()
            .expect("run binary")
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("Loaded template: app-00"), "stdout: {stdout}");
    assert!(stdout.contains("Total templates loaded: 12"), "stdout: {stdout}");
    assert!(stdout.contains("Sending batch 1/2 (10 templates)..."), "stdout: {stdout}");
    assert!(stdout.contains("Sending batch 2/2 (2 templates)..."), "stdout: {stdout}");
    assert!(
        stdout.contains("Batch 1 failed (status: 500): server error"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Import completed!"), "stdout: {stdout}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn successful_import_reports_each_batch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tmp = tempdir().unwrap();
    write_template(tmp.path(), "gitea");
    write_template(tmp.path(), "nginx");

    let base = tmp.path().to_path_buf();
    let api_url = mock_server.uri();
    let output = tokio::task::spawn_blocking(move || {
        cmd_in(&base)
            .env("API_KEY", "k")
            .arg("--api-url")
            .arg(api_url)
            .output()
            .expect("run binary")
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(
        stdout.contains("Batch 1 sent successfully (status: 200)"),
        "stdout: {stdout}"
    );
}
