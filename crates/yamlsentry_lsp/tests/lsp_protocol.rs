//! Protocol-level tests driving the server over an in-memory stream.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::io::{DuplexStream, ReadHalf, WriteHalf};
use tower_lsp::lsp_types::Url;
use tower_lsp::{LspService, Server};
use yamlsentry_lsp::Backend;

use common::{recv_notification, recv_response, send_msg};

struct TestClient {
    reader: ReadHalf<DuplexStream>,
    writer: WriteHalf<DuplexStream>,
}

impl TestClient {
    fn start() -> Self {
        let (client, server) = tokio::io::duplex(1 << 16);
        let (server_read, server_write) = tokio::io::split(server);
        let (service, socket) = LspService::new(Backend::new);
        tokio::spawn(Server::new(server_read, server_write, socket).serve(service));

        let (reader, writer) = tokio::io::split(client);
        Self { reader, writer }
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        send_msg(
            &mut self.writer,
            &json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}),
        )
        .await;
        recv_response(&mut self.reader, id).await
    }

    async fn notify(&mut self, method: &str, params: Value) {
        send_msg(
            &mut self.writer,
            &json!({"jsonrpc": "2.0", "method": method, "params": params}),
        )
        .await;
    }

    async fn initialize(&mut self, root: &Path) -> Value {
        let root_uri = Url::from_directory_path(root).unwrap();
        let response = self
            .request(1, "initialize", json!({"rootUri": root_uri, "capabilities": {}}))
            .await;
        self.notify("initialized", json!({})).await;
        response
    }
}

#[tokio::test]
async fn test_initialize_advertises_capabilities() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = TestClient::start();

    let response = client.initialize(dir.path()).await;
    let capabilities = &response["result"]["capabilities"];

    assert_eq!(capabilities["hoverProvider"], true);
    assert_eq!(
        capabilities["executeCommandProvider"]["commands"],
        json!(["yamlsentry.ignoreRule", "yamlsentry.fix"])
    );
    assert_eq!(response["result"]["serverInfo"]["name"], "yamlsentry-lsp");

    let shutdown = client.request(2, "shutdown", Value::Null).await;
    assert_eq!(shutdown["result"], Value::Null);
}

#[tokio::test]
async fn test_unsupported_command_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = TestClient::start();
    client.initialize(dir.path()).await;

    let response = client
        .request(
            2,
            "workspace/executeCommand",
            json!({"command": "yamlsentry.unknown", "arguments": []}),
        )
        .await;

    assert!(response.get("error").is_some());
}

#[cfg(unix)]
mod with_fake_linter {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    const FAKE_YAMLLINT: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "yamllint 1.35.1"
  exit 0
fi
for last; do :; done
echo "$last:2:10: [warning] truthy value should be one of [false, true] (truthy)"
exit 1
"#;

    fn project() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();

        let program = root.join("yamllint");
        fs::write(&program, FAKE_YAMLLINT).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        let config = json!({
            "tools": {
                "yamllint": { "path": program.to_string_lossy() },
                "ansible-lint": { "enabled": false },
                "pre-commit": { "enabled": false }
            },
            "cache": false
        });
        fs::write(root.join(".yamlsentry.json"), config.to_string()).unwrap();
        fs::write(root.join("site.yml"), "---\nenabled: yes\n").unwrap();

        (dir, root)
    }

    #[tokio::test]
    async fn test_open_publishes_diagnostics() {
        let (_dir, root) = project();
        let uri = Url::from_file_path(root.join("site.yml")).unwrap();
        let mut client = TestClient::start();
        client.initialize(&root).await;

        client
            .notify(
                "textDocument/didOpen",
                json!({"textDocument": {
                    "uri": uri, "languageId": "yaml", "version": 1,
                    "text": "---\nenabled: yes\n"
                }}),
            )
            .await;
        let published =
            recv_notification(&mut client.reader, "textDocument/publishDiagnostics").await;

        let diagnostics = published["params"]["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0]["code"], "truthy");
        assert_eq!(diagnostics[0]["source"], "yamllint");
        assert_eq!(diagnostics[0]["severity"], 2);
        assert_eq!(
            diagnostics[0]["range"],
            json!({"start": {"line": 1, "character": 9}, "end": {"line": 1, "character": 12}})
        );
        assert_eq!(diagnostics[0]["data"]["fixable"], true);

        let hover = client
            .request(
                2,
                "textDocument/hover",
                json!({"textDocument": {"uri": uri}, "position": {"line": 1, "character": 10}}),
            )
            .await;
        let markdown = hover["result"]["contents"]["value"].as_str().unwrap();
        assert!(markdown.starts_with("**truthy** (yamllint)"));

        let actions = client
            .request(
                3,
                "textDocument/codeAction",
                json!({
                    "textDocument": {"uri": uri},
                    "range": {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 0}},
                    "context": {"diagnostics": []}
                }),
            )
            .await;
        assert_eq!(actions["result"][0]["title"], "Suppress `truthy` on this line");

        client
            .notify("textDocument/didClose", json!({"textDocument": {"uri": uri}}))
            .await;
        let cleared =
            recv_notification(&mut client.reader, "textDocument/publishDiagnostics").await;
        assert_eq!(cleared["params"]["diagnostics"], json!([]));
    }
}
