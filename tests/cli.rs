//! End to end runs of the binary against a mock inference server

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("ollama-describe").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn image_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 42])
        .unwrap();
    file
}

#[test]
fn missing_image_flag() {
    bin()
        .assert()
        .code(1)
        .stdout("Image path is required\n");

    bin()
        .args(["-image", "", "-baseurl", "http://127.0.0.1:1"])
        .assert()
        .code(1)
        .stdout("Image path is required\n");
}

#[test]
fn nonexistent_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    bin()
        .args(["-image", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Failed to open image file:"));
}

#[test]
fn detailed_output() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/generate")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "llava",
            "stream": false,
            "images": ["iVBORw0KGgoq"],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"model":"llava","created_at":"2024-05-01T10:00:00Z","response":"An IDE window.","done":true,"done_reason":"stop","context":[1,2],"total_duration":2500000000,"load_duration":500000000,"prompt_eval_count":20,"prompt_eval_duration":1200000000,"eval_count":64,"eval_duration":3000000001}"#,
        )
        .create();

    let image = image_file();
    bin()
        .args(["-image", image.path().to_str().unwrap(), "-baseurl", server.url().as_str()])
        .assert()
        .success()
        .stdout(
            "\
Model: llava
Created At: 2024-05-01T10:00:00Z
Response: An IDE window.
Done: true
Done Reason: stop
Total Duration: 2.0 s
Load Duration: 0.0 s
Prompt Evaluation Count: 20
Prompt Evaluation Duration: 1.0 s
Evaluation Count: 64
Evaluation Duration: 3.0 s
",
        );

    mock.assert();
}

#[test]
fn non_json_response() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("upstream hiccup")
        .expect(2)
        .create();

    let image = image_file();
    let path = image.path().to_str().unwrap();
    let url = server.url();

    bin()
        .args(["-image", path, "-baseurl", url.as_str()])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Failed to parse response JSON:"));

    bin()
        .args(["-image", path, "-baseurl", url.as_str(), "-raw"])
        .assert()
        .success()
        .stdout("upstream hiccup\n");
}

#[test]
fn unreachable_server() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let image = image_file();
    let url = format!("http://127.0.0.1:{port}");
    bin()
        .args(["-image", image.path().to_str().unwrap(), "-baseurl", url.as_str()])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Failed to send request:"));
}
