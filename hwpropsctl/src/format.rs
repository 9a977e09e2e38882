//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use hwprops_core::api::{
    CpuUsagesResponse, DeviceTemperaturesResponse, FanSpeedsResponse, InfoResponse,
};
use std::collections::BTreeMap;

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Format info response
pub fn format_info(info: &InfoResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"hwprops Server Information".bold().to_string());
            output.push('\n');
            output.push_str(&format!("Version: {}", info.version.cyan()));
            output.push('\n');
            output.push_str(&format!("Thermal Service: {}", info.service_name.cyan()));
            output.push('\n');
            output.push_str(&format!(
                "HAL Connected: {}",
                if info.hal_connected {
                    "Yes".green()
                } else {
                    "No".red()
                }
            ));
            if info.mock_mode {
                output.push_str(&format!(" {}", "(mock)".yellow()));
            }
            output.push('\n');
            output.push_str(&format!(
                "Uptime: {} seconds",
                info.uptime.to_string().yellow()
            ));
            output.push('\n');
            output.push_str(&format!("Software: {}", info.software.cyan()));

            Ok(output)
        }
    }
}

/// Format fan speeds response
///
/// Speeds the HAL cannot read print as `n/a`.
pub fn format_fan_speeds(speeds: &FanSpeedsResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(speeds)?),
        OutputFormat::Table => {
            if speeds.speeds.is_empty() {
                return Ok(format!("{}", "No fan speeds reported".dimmed()));
            }

            #[derive(Tabled)]
            struct FanRow {
                #[tabled(rename = "Fan")]
                index: String,
                #[tabled(rename = "RPM")]
                rpm: String,
            }

            let rows: Vec<FanRow> = speeds
                .speeds
                .iter()
                .enumerate()
                .map(|(index, rpm)| FanRow {
                    index: index.to_string(),
                    rpm: match rpm {
                        Some(rpm) if *rpm > 0.0 => format!("{:.0}", rpm).green().to_string(),
                        Some(_) => "0".red().to_string(),
                        None => "n/a".dimmed().to_string(),
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Fan Speeds:".bold(), table))
        }
    }
}

/// Format device temperatures response
///
/// Values the HAL does not know print as `n/a`.
pub fn format_temperatures(
    temperatures: &DeviceTemperaturesResponse,
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(temperatures)?),
        OutputFormat::Table => {
            let title = format!(
                "Temperatures ({}, {}):",
                temperatures.kind, temperatures.source
            );

            if temperatures.values.is_empty() {
                return Ok(format!(
                    "{}\n{}",
                    title.bold(),
                    "No matching sensors".dimmed()
                ));
            }

            #[derive(Tabled)]
            struct TemperatureRow {
                #[tabled(rename = "Sensor")]
                index: String,
                #[tabled(rename = "°C")]
                value: String,
            }

            let rows: Vec<TemperatureRow> = temperatures
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| TemperatureRow {
                    index: index.to_string(),
                    value: match value {
                        Some(celsius) => format!("{:.1}", celsius).cyan().to_string(),
                        None => "n/a".dimmed().to_string(),
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", title.bold(), table))
        }
    }
}

/// Format CPU usages response
///
/// Offline CPUs keep their row and print as `offline`.
pub fn format_cpu_usages(usages: &CpuUsagesResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(usages)?),
        OutputFormat::Table => {
            if usages.usages.is_empty() {
                return Ok(format!("{}", "No CPU usages reported".dimmed()));
            }

            #[derive(Tabled)]
            struct CpuRow {
                #[tabled(rename = "CPU")]
                index: String,
                #[tabled(rename = "Active")]
                active: String,
                #[tabled(rename = "Total")]
                total: String,
                #[tabled(rename = "Usage %")]
                usage: String,
            }

            let rows: Vec<CpuRow> = usages
                .usages
                .iter()
                .enumerate()
                .map(|(index, usage)| match usage {
                    Some(info) => CpuRow {
                        index: index.to_string(),
                        active: info.active.to_string(),
                        total: info.total.to_string(),
                        usage: if info.total > 0 {
                            let percent = info.active as f64 * 100.0 / info.total as f64;
                            format!("{:.1}", percent).green().to_string()
                        } else {
                            "n/a".dimmed().to_string()
                        },
                    },
                    None => CpuRow {
                        index: index.to_string(),
                        active: "-".to_string(),
                        total: "-".to_string(),
                        usage: "offline".red().to_string(),
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "CPU Usages:".bold(), table))
        }
    }
}

/// Format health check results
pub fn format_health(
    health: &BTreeMap<String, serde_json::Value>,
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(health)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"Server Health Check:".bold().to_string());
            output.push('\n');
            output.push_str(&format!("{:<20} Value\n", "Status"));
            output.push_str(&"-".repeat(40));

            for (key, value) in health {
                let value_str = match value {
                    serde_json::Value::Bool(true) => "✓".green().to_string(),
                    serde_json::Value::Bool(false) => "✗".red().to_string(),
                    serde_json::Value::String(s) => s.clone(),
                    _ => value.to_string(),
                };
                output.push('\n');
                output.push_str(&format!("{:<20} {}", key, value_str));
            }

            Ok(output)
        }
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
