//! Command execution handlers

use anyhow::Result;
use hwprops_core::{TemperatureSource, TemperatureType};
use std::path::Path;

use crate::client::HwPropsClient;
use crate::config::{CliConfig, ConfigBuilder};
use crate::format::{self, format_success};

use super::commands::*;

/// Handle info command
pub async fn handle_info(client: &HwPropsClient, output: &OutputFormat) -> Result<()> {
    let info = client.get_info().await?;
    println!("{}", format::format_info(&info, &output.into())?);
    Ok(())
}

/// Handle health command
pub async fn handle_health(client: &HwPropsClient, output: &OutputFormat) -> Result<()> {
    let health = client.health_check().await?;
    println!("{}", format::format_health(&health, &output.into())?);
    Ok(())
}

/// Handle fans command
pub async fn handle_fans(client: &HwPropsClient, output: &OutputFormat) -> Result<()> {
    let speeds = client.get_fan_speeds().await?;
    println!("{}", format::format_fan_speeds(&speeds, &output.into())?);
    Ok(())
}

/// Handle temps command
pub async fn handle_temps(
    client: &HwPropsClient,
    kind: TemperatureType,
    source: TemperatureSource,
    output: &OutputFormat,
) -> Result<()> {
    let temperatures = client.get_device_temperatures(kind, source).await?;
    println!(
        "{}",
        format::format_temperatures(&temperatures, &output.into())?
    );
    Ok(())
}

/// Handle cpu command
pub async fn handle_cpu(client: &HwPropsClient, output: &OutputFormat) -> Result<()> {
    let usages = client.get_cpu_usages().await?;
    println!("{}", format::format_cpu_usages(&usages, &output.into())?);
    Ok(())
}

/// Handle config commands
///
/// `set` and `reset` write the file at `config_path`; `current_config` is the
/// effective configuration after all overrides.
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
    output: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(current_config)?);
            }
            OutputFormat::Table => {
                println!("CLI Configuration:");
                println!("{:<20} Value", "Setting");
                println!("{}", "-".repeat(40));
                println!("{:<20} {}", "Server URL", current_config.server_url);
                println!("{:<20} {}", "Output Format", current_config.output_format);
                println!("{:<20} {}", "Verbose", current_config.verbose);
                println!("{:<20} {}s", "Timeout", current_config.timeout);
            }
        },
        ConfigCommands::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = CliConfig::load_from(config_path)?;
            apply_setting(&mut config, &key, &value)?;
            config.save_to(config_path)?;
            println!("{}", format_success(&format!("Set {} = {}", key, value)));
        }
        ConfigCommands::Reset => {
            CliConfig::default().save_to(config_path)?;
            println!("{}", format_success("Configuration reset to defaults"));
        }
    }

    Ok(())
}

/// Apply one `key = value` setting with validation
fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "server_url" => {
            ConfigBuilder::validate_url(value)?;
            config.server_url = value.to_string();
        }
        "output_format" => {
            ConfigBuilder::validate_output_format(value)?;
            config.output_format = value.to_string();
        }
        "verbose" => {
            config.verbose = value.to_lowercase() == "true" || value == "1";
        }
        "timeout" => {
            let timeout: u64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
            ConfigBuilder::validate_timeout(timeout)?;
            config.timeout = timeout;
        }
        _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
    }
    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
