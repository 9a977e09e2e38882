//! hwprops CLI
//!
//! Command-line interface for querying the hwprops server.

use anyhow::Result;
use clap::Parser;
use hwpropsctl::cli::{
    generate_completion, handle_config, handle_cpu, handle_fans, handle_health, handle_info,
    handle_temps, Cli, Commands, OutputFormat,
};
use hwpropsctl::client::HwPropsClient;
use hwpropsctl::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);

    // Build configuration using priority chain: defaults → file → env → CLI args
    let mut builder = CliConfig::builder();

    // Load config file (unless --no-config is specified)
    if !cli.no_config {
        builder = builder.with_config_file(Some(config_path.as_path()))?;
    }

    builder = builder.with_env_overrides();

    if let Some(ref server) = cli.server {
        builder = builder.with_server_url(server)?;
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            if cli.verbose.unwrap_or(false) {
                eprintln!("Error details: {:?}", e);
            }
            std::process::exit(1);
        }
    };

    let server_url = &config.server_url;
    let output_format = match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };
    let verbose = config.verbose;

    if verbose {
        eprintln!("Verbose mode enabled");
        eprintln!("Server URL: {}", server_url);
        eprintln!("Output format: {:?}", output_format);
    }

    let client = HwPropsClient::with_config(
        server_url.clone(),
        config.timeout,
        3,
        std::time::Duration::from_millis(500),
    )?;

    let result = match cli.command {
        Commands::Info => handle_info(&client, &output_format).await,
        Commands::Health => handle_health(&client, &output_format).await,
        Commands::Fans => handle_fans(&client, &output_format).await,
        Commands::Temps { kind, source } => {
            handle_temps(&client, kind, source, &output_format).await
        }
        Commands::Cpu => handle_cpu(&client, &output_format).await,
        Commands::Config { command } => {
            handle_config(command, &config, &config_path, &output_format)
        }
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
