//! End-to-end tests of the hue-cli binary against mocked bridges.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly.
#![allow(deprecated)]

use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const DESCRIPTION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
<URLBase>http://127.0.0.1:80/</URLBase>
<device>
<deviceType>urn:schemas-upnp-org:device:Basic:1</deviceType>
<friendlyName>Philips hue (127.0.0.1)</friendlyName>
<manufacturer>Signify</manufacturer>
<manufacturerURL>http://www.philips-hue.com</manufacturerURL>
<modelDescription>Philips hue Personal Wireless Lighting</modelDescription>
<modelName>Philips hue bridge 2015</modelName>
<modelNumber>BSB002</modelNumber>
<modelURL>http://www.philips-hue.com</modelURL>
<serialNumber>001788a1b2c3</serialNumber>
<UDN>uuid:2f402f80-da50-11e1-9b23-001788a1b2c3</UDN>
</device>
</root>
"#;

fn hue_cli() -> Command {
    let mut cmd = Command::new(cargo_bin("hue-cli"));
    cmd.env_remove("HUE_DISCOVERY_URL").env_remove("RUST_LOG");
    cmd
}

fn mock_description(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/description.xml");
        then.status(200).body(DESCRIPTION_XML);
    });
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    hue_cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("create-user"));
    Ok(())
}

#[test]
fn discover_unreachable_bridge_fails() -> Result<(), Box<dyn std::error::Error>> {
    hue_cli()
        .args(["discover", "--bridge=127.0.0.1:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to find bridge 127.0.0.1:1"));
    Ok(())
}

#[test]
fn discover_bridge_prints_device_information() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    mock_description(&server);
    let address = server.address().to_string();

    hue_cli()
        .args(["discover", &format!("--bridge={address}")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "Found 1 bridges\nBridge:\n\tIP-address: {address}\n\tDevice Information:\n"
        )))
        .stdout(predicate::str::contains("\t\tModelNumber: BSB002\n"));
    Ok(())
}

#[test]
fn discover_uses_discovery_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let discovery = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).json_body(json!([]));
    });

    hue_cli()
        .args(["discover", &format!("--discovery-url={}", server.url("/"))])
        .assert()
        .success()
        .stdout("Found 0 bridges\n");
    discovery.assert();
    Ok(())
}

#[test]
fn verbose_logs_requests_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).json_body(json!([]));
    });
    let url = server.url("/");

    hue_cli()
        .args(["-v", "discover", &format!("--discovery-url={url}")])
        .assert()
        .success()
        .stdout("Found 0 bridges\n")
        .stderr(predicate::str::contains(format!("GET {url}")));

    hue_cli()
        .args(["discover", &format!("--discovery-url={url}")])
        .assert()
        .success()
        .stderr("");
    Ok(())
}

#[test]
fn create_user_prints_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    mock_description(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api")
            .json_body(json!({"devicetype": "hue-cli#myhost"}));
        then.status(200)
            .json_body(json!([{"success": {"username": "s3cr3t"}}]));
    });
    let address = server.address().to_string();

    hue_cli()
        .args([
            "create-user",
            &format!("--bridge={address}"),
            "--device=myhost",
        ])
        .assert()
        .success()
        .stdout(format!("bridges:\n- ipaddress: {address}\n  user: s3cr3t\n"));
    create.assert();
    Ok(())
}

#[test]
fn create_user_without_link_button_fails() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    mock_description(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200).json_body(json!([{
            "error": {"type": 101, "address": "", "description": "link button not pressed"}
        }]));
    });

    hue_cli()
        .args([
            "create-user",
            &format!("--bridge={}", server.address()),
            "--device=myhost",
        ])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("link button not pressed"));
    Ok(())
}

#[test]
fn create_user_with_several_bridges_fails() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).json_body(json!([
            {"id": "001788fffea1b2c3", "internalipaddress": "192.0.2.10"},
            {"id": "001788fffed4e5f6", "internalipaddress": "192.0.2.11"}
        ]));
    });

    hue_cli()
        .args([
            &format!("--discovery-url={}", server.url("/")),
            "create-user",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "2 bridges found, use --bridge=<ip-address>",
        ));
    Ok(())
}

#[test]
fn scenes_reads_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/s3cr3t/scenes");
        then.status(200).json_body(json!({
            "a1": {"name": "Bright", "lights": ["1", "2"]}
        }));
    });

    let temp = TempDir::new()?;
    let config = temp.path().join("hue.yaml");
    fs::write(
        &config,
        format!("bridges:\n- ipaddress: {}\n  user: s3cr3t\n", server.address()),
    )?;

    hue_cli()
        .args([&format!("--config={}", config.display()), "scenes"])
        .assert()
        .success()
        .stdout("Found 1 scenes\na1\tBright\t2 lights\n");
    Ok(())
}
