//! Unit tests for CLI commands.

use super::*;

use clap::Parser;
use npmc_registry::{ClientOptions, PackageRecord, RegistryStatus, SearchObject, VersionRecord};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::output::colors::ColorSupport;
use crate::Cli;

/// Create a test command context talking to `server`
fn create_test_context(server: &MockServer, json: bool) -> CommandContext {
    let options = ClientOptions::new()
        .with_registry_url(server.uri())
        .with_downloads_url(server.uri());
    CommandContext {
        client: RegistryClient::with_options(options).unwrap(),
        output: OutputHandler::with_colors(ColorSupport::disabled()),
        json,
    }
}

fn record(value: serde_json::Value) -> PackageRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["npmc", "show", "lodash"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Show {
            package: "lodash".to_string(),
            version_or_tag: "latest".to_string(),
        }
    );

    let cli = Cli::try_parse_from(["npmc", "search", "react", "--limit", "-3"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Search {
            query: "react".to_string(),
            limit: -3,
        }
    );

    let cli = Cli::try_parse_from(["npmc", "downloads", "lodash", "--daily"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Downloads {
            package: "lodash".to_string(),
            period: "last-week".to_string(),
            daily: true,
        }
    );

    assert!(Cli::try_parse_from(["npmc", "info"]).is_err());
    assert!(Cli::try_parse_from(["npmc", "publish"]).is_err());
}

#[test]
fn test_global_flags_become_overrides() {
    let cli = Cli::try_parse_from([
        "npmc",
        "status",
        "--mirror",
        "taobao",
        "--proxy",
        "http://proxy.example.com:8080",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    let overrides = cli.config_overrides();
    assert_eq!(overrides.get("mirror").map(String::as_str), Some("taobao"));
    assert_eq!(
        overrides.get("proxy").map(String::as_str),
        Some("http://proxy.example.com:8080")
    );
    assert!(!overrides.contains_key("registry"));
}

#[test]
fn test_group_digits() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(1_000), "1,000");
    assert_eq!(group_digits(45_123_456), "45,123,456");
}

#[test]
fn test_summary_fields() {
    let record = record(json!({
        "name": "lodash",
        "description": "Lodash modular utilities.",
        "dist-tags": { "latest": "4.17.21", "beta": "5.0.0-beta.1" },
        "versions": { "4.17.21": { "name": "lodash", "version": "4.17.21" } },
        "time": { "4.17.21": "2021-02-20T15:42:16.891Z" },
        "license": "MIT",
        "maintainers": [{ "name": "jdalton", "email": "john.david.dalton@gmail.com" }]
    }));

    let fields = info::summary_fields(&record);
    let get = |label: &str| {
        fields
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| value.as_str())
    };

    assert_eq!(get("latest"), Some("4.17.21 (published 2021-02-20)"));
    assert_eq!(get("dist-tags"), Some("beta: 5.0.0-beta.1"));
    assert_eq!(get("versions"), Some("1"));
    assert_eq!(get("license"), Some("MIT"));
    assert!(get("maintainers").unwrap().starts_with("jdalton"));
    assert_eq!(get("homepage"), None);
}

#[test]
fn test_version_fields() {
    let version: VersionRecord = serde_json::from_value(json!({
        "name": "left-pad",
        "version": "1.3.0",
        "dependencies": { "b": "^1.0.0", "a": "~2.0.0" },
        "dist": {
            "shasum": "5b8a3a7765dfe001261dde915589e782f8c94d1e",
            "tarball": "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz"
        }
    }))
    .unwrap();

    let fields = show::version_fields(&version);
    assert!(fields.contains(&("dependencies", "a@~2.0.0, b@^1.0.0".to_string())));
    assert!(fields.contains(&(
        "shasum",
        "5b8a3a7765dfe001261dde915589e782f8c94d1e".to_string()
    )));
}

#[test]
fn test_status_fields_and_alignment() {
    let status: RegistryStatus = serde_json::from_value(json!({
        "db_name": "registry",
        "doc_count": 3_000_000
    }))
    .unwrap();

    let fields = status::status_fields(&status);
    let output = OutputHandler::with_colors(ColorSupport::disabled());
    let lines = output.format_fields(&fields);

    assert_eq!(lines[0], "database    registry");
    assert_eq!(lines[1], "documents   3,000,000");
}

#[test]
fn test_format_hit() {
    let object: SearchObject = serde_json::from_value(json!({
        "package": { "name": "lodash", "version": "4.17.21" },
        "score": { "final": 0.8765, "detail": {} }
    }))
    .unwrap();

    assert_eq!(search::format_hit(&object), "lodash@4.17.21  score 0.88");
}

#[tokio::test]
async fn test_info_unknown_package_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/no-such-package"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server, false);
    match info::execute("no-such-package", &ctx).await {
        Err(NpmcError::PackageNotFound { name }) => assert_eq!(name, "no-such-package"),
        other => panic!("Expected PackageNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dispatch_commands_against_registry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "db_name": "registry" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lodash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "lodash",
            "dist-tags": { "latest": "4.17.21" },
            "versions": { "4.17.21": { "name": "lodash", "version": "4.17.21" } }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/lodash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "start": "2024-01-01",
            "end": "2024-01-31",
            "package": "lodash",
            "downloads": [{ "day": "2024-01-01", "downloads": 10 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server, true);

    dispatch_command(Commands::Status, &ctx).await.unwrap();
    dispatch_command(
        Commands::Info {
            package: "lodash".to_string(),
        },
        &ctx,
    )
    .await
    .unwrap();
    dispatch_command(
        Commands::Show {
            package: "lodash".to_string(),
            version_or_tag: "latest".to_string(),
        },
        &ctx,
    )
    .await
    .unwrap();
    dispatch_command(
        Commands::Downloads {
            package: "lodash".to_string(),
            period: "last-month".to_string(),
            daily: true,
        },
        &ctx,
    )
    .await
    .unwrap();
    dispatch_command(Commands::Mirrors, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_invalid_period_is_reported() {
    let mock_server = MockServer::start().await;
    let ctx = create_test_context(&mock_server, false);

    let result = downloads::execute("lodash", "fortnight", false, &ctx).await;
    assert!(matches!(result, Err(NpmcError::InvalidPeriod { .. })));
}
