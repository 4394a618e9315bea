//! Contract tests for the CLI's JSON output.
//!
//! Scripts consume `idoit ... --json`; these tests pin the fields they rely
//! on. The binary talks to a mock JSON-RPC endpoint, so the runtime must be
//! multi-threaded to keep the mock serving while the child process blocks.
//!
//! Note: offline and error behavior is covered in cli_test.rs.

use serde_json::{Value, json};
use std::process::Command;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to run the CLI against `server` and return parsed stdout JSON
fn run_cli_json(server: &MockServer, args: &[&str]) -> (Value, bool) {
    let url = format!("{}/src/jsonrpc.php", server.uri());
    let output = Command::new(env!("CARGO_BIN_EXE_idoit"))
        .env_remove("IDOIT_USERNAME")
        .env_remove("IDOIT_PASSWORD")
        .env_remove("IDOIT_LANGUAGE")
        .env_remove("IDOIT_PORT")
        .env_remove("IDOIT_TIMEOUT_SECS")
        .env_remove("IDOIT_BYPASS_SECURE_CONNECTION")
        .env("IDOIT_URL", &url)
        .env("IDOIT_KEY", "c1ia5q")
        .args(args)
        .arg("--json")
        .output()
        .expect("Failed to execute idoit CLI");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (json, output.status.success())
}

async fn mock_command(server: &MockServer, command: &str, lines: &[&str]) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": command})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"success": true, "output": lines}
        })))
        .mount(server)
        .await;
}

// =============================================================================
// SEARCH
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn contract_search_query_json_schema() {
    let server = MockServer::start().await;
    mock_command(&server, "console.search.query", &["SERVER-01 (Server)"]).await;

    let (json, success) = run_cli_json(&server, &["search", "query", "SERVER-01"]);

    assert!(success, "Search query must succeed");
    assert_eq!(json["ok"], true, "Must have ok: true on success");
    assert_eq!(json["type"], "search", "Must have type: 'search'");
    assert_eq!(json["operation"], "query");
    assert_eq!(json["query"], "SERVER-01");
    assert_eq!(json["output"], json!(["SERVER-01 (Server)"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn contract_search_index_json_schema() {
    let server = MockServer::start().await;
    mock_command(&server, "console.search.index", &["Done"]).await;

    for operation in ["create-index", "update-index"] {
        let (json, success) = run_cli_json(&server, &["search", operation]);

        assert!(success, "{} must succeed", operation);
        assert_eq!(json["type"], "search");
        assert_eq!(json["operation"], operation);
        assert!(json.get("query").is_none(), "Index operations carry no query");
        assert!(json["output"].is_array());
    }
}

// =============================================================================
// EXECUTE
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn contract_execute_json_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "console.search.query",
            "params": {"searchString": "demo", "limit": 5}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"success": true, "output": ["demo"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (json, success) = run_cli_json(
        &server,
        &[
            "execute",
            "console.search.query",
            "--param",
            "searchString=demo",
            "--param",
            "limit=5",
        ],
    );

    assert!(success, "Execute must succeed");
    assert_eq!(json["ok"], true);
    assert_eq!(json["type"], "execute");
    assert_eq!(json["command"], "console.search.query");
    assert_eq!(json["output"], json!(["demo"]));
}

// =============================================================================
// INFO
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn contract_info_json_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "idoit.version"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {
                "login": {"userid": "9", "username": "admin", "tenant": "Demo", "language": "en"},
                "version": "1.18",
                "step": "",
                "type": "PRO"
            }
        })))
        .mount(&server)
        .await;

    let (json, success) = run_cli_json(&server, &["info"]);

    assert!(success);
    assert_eq!(json["type"], "info");
    assert_eq!(json["client"]["name"], "idoit-client");
    assert!(json["config"]["url"].is_string());
    assert_eq!(json["server"]["version"], "1.18");
    assert_eq!(json["server"]["type"], "PRO");
    assert_eq!(json["server"]["login"]["tenant"], "Demo");
    assert!(json.get("server_error").is_none());
}
