//! Integration tests for the hwprops CLI public API
//!
//! These run without a server. Tests that need a live `hwpropsd` are ignored;
//! start it with `cargo run --bin hwpropsd -- --mock` and run them with
//! `cargo test --test cli_integration_tests -- --ignored`.

use anyhow::Result;
use clap::Parser;
use hwprops_core::{TemperatureSource, TemperatureType};
use hwpropsctl::cli::{Cli, Commands, ConfigCommands};
use hwpropsctl::client::HwPropsClient;
use hwpropsctl::config::{CliConfig, ConfigBuilder};
use std::time::Duration;
use tempfile::TempDir;

/// A local URL with nothing listening behind it
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[test]
fn test_parse_config_subcommands() {
    let cli = Cli::parse_from(["hwpropsctl", "config", "set", "timeout", "30"]);
    match cli.command {
        Commands::Config {
            command: ConfigCommands::Set { key, value },
        } => {
            assert_eq!(key, "timeout");
            assert_eq!(value, "30");
        }
        other => panic!("unexpected command: {:?}", other),
    }

    let cli = Cli::parse_from(["hwpropsctl", "--config", "/tmp/x.toml", "config", "path"]);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
    assert!(matches!(
        cli.command,
        Commands::Config {
            command: ConfigCommands::Path
        }
    ));
}

#[test]
fn test_parse_temps_named_source() {
    let cli = Cli::parse_from([
        "hwpropsctl",
        "temps",
        "--type",
        "battery",
        "--source",
        "throttling-below-vr-min",
    ]);
    match cli.command {
        Commands::Temps { kind, source } => {
            assert_eq!(kind, TemperatureType::Battery);
            assert_eq!(source, TemperatureSource::ThrottlingBelowVrMin);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_temps_requires_type() {
    assert!(Cli::try_parse_from(["hwpropsctl", "temps"]).is_err());
}

#[test]
fn test_builder_file_then_cli_override() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("cli.toml");

    let file_config = CliConfig {
        server_url: "http://from-file:3000".to_string(),
        output_format: "json".to_string(),
        verbose: false,
        timeout: 25,
    };
    file_config.save_to(&path)?;

    let config = ConfigBuilder::new()
        .with_config_file(Some(path.as_path()))?
        .with_server_url("http://from-cli:4000")?
        .build()?;

    assert_eq!(config.server_url, "http://from-cli:4000");
    assert_eq!(config.output_format, "json");
    assert_eq!(config.timeout, 25);
    Ok(())
}

#[test]
fn test_load_creates_default_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("cli.toml");

    let config = CliConfig::load_from(&path)?;
    assert_eq!(config, CliConfig::default());
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_builder_rejects_invalid_values() {
    assert!(ConfigBuilder::new().with_server_url("ftp://box").is_err());
    assert!(ConfigBuilder::new().with_output_format("xml").is_err());
    assert!(ConfigBuilder::new().with_timeout(0).is_err());
}

#[tokio::test]
async fn test_client_unreachable_server_fails() -> Result<()> {
    let client = HwPropsClient::with_config(unreachable_url(), 2, 1, Duration::from_millis(10))?;

    let err = client.get_fan_speeds().await.unwrap_err();
    assert!(err.to_string().contains("after 2 attempts"));
    assert!(!client.ping().await?);
    Ok(())
}

#[tokio::test]
async fn test_health_check_unreachable_server() -> Result<()> {
    let client = HwPropsClient::with_config(unreachable_url(), 2, 0, Duration::from_millis(10))?;

    let health = client.health_check().await?;
    assert_eq!(health["connected"], serde_json::Value::Bool(false));
    assert!(!health.contains_key("api_working"));
    Ok(())
}

#[tokio::test]
#[ignore] // Requires running server
async fn test_live_server_demo_data() -> Result<()> {
    let client = HwPropsClient::with_config(
        "http://localhost:3000".to_string(),
        10,
        3,
        Duration::from_millis(500),
    )?;

    let info = client.get_info().await?;
    assert!(info.hal_connected);

    let temps = client
        .get_device_temperatures(TemperatureType::Cpu, TemperatureSource::Current)
        .await?;
    assert_eq!(temps.kind, TemperatureType::Cpu);

    let usages = client.get_cpu_usages().await?;
    assert!(!usages.usages.is_empty());
    Ok(())
}
