use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fseq::{
    map_files, ChannelGroup, SequenceFile, SequenceSource, UploadResponse, Validator,
    ValidatorConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "FSEQ validator - Check light-show sequences against the limits of the show controller"
)]
struct Cli {
    /// JSON config with controller limits and server settings
    #[arg(short, long, global = true, env = "FSEQ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sequence files or http(s) URLs
    Validate {
        /// Files or URLs to validate
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the header of a sequence file
    Info {
        /// Sequence file
        path: PathBuf,
    },
    /// Run the upload validation server
    #[cfg(feature = "http")]
    Serve {
        /// Host address to bind to
        #[arg(short = 'H', long, env = "FSEQ_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "FSEQ_PORT")]
        port: Option<u16>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = ValidatorConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Validate { inputs, json } => run_validate(&config, &inputs, json),
        Commands::Info { path } => run_info(&config, &path).map(|()| ExitCode::SUCCESS),
        #[cfg(feature = "http")]
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            run_serve(config).map(|()| ExitCode::SUCCESS)
        }
    }
}

/// One validated input, in the order given on the command line
struct Entry<'a> {
    input: &'a str,
    result: Result<UploadResponse>,
}

fn run_validate(config: &ValidatorConfig, inputs: &[String], json: bool) -> Result<ExitCode> {
    let validator = config.validator();

    let local: Vec<&str> = inputs
        .iter()
        .map(String::as_str)
        .filter(|input| !is_url(input))
        .collect();
    let mut local_outcomes = map_files(&local, |file| Ok(describe(file, &validator))).into_iter();

    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = if is_url(input) {
            validate_remote(input, &validator)
        } else {
            let outcome = local_outcomes
                .next()
                .context("batch returned fewer results than files")?;
            outcome.result.map_err(anyhow::Error::from)
        };
        entries.push(Entry {
            input: input.as_str(),
            result,
        });
    }

    let all_valid = entries
        .iter()
        .all(|entry| matches!(&entry.result, Ok(response) if response.valid));

    if json {
        let values = entries
            .iter()
            .map(|entry| match &entry.result {
                Ok(response) => serde_json::to_value(response),
                Err(error) => Ok(serde_json::json!({
                    "valid": false,
                    "input": entry.input,
                    "error": format!("{error:#}"),
                })),
            })
            .collect::<serde_json::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for entry in &entries {
            print_entry(entry);
        }
    }

    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe(file: &SequenceFile, validator: &Validator) -> UploadResponse {
    UploadResponse::from_outcome(file.name(), file.as_bytes(), &file.validate(validator))
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

#[cfg(feature = "http")]
fn validate_remote(url: &str, validator: &Validator) -> Result<UploadResponse> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime
        .block_on(fseq::http_backend::validate_url(url, validator))
        .with_context(|| format!("Failed to fetch {url}"))
}

#[cfg(not(feature = "http"))]
fn validate_remote(url: &str, _validator: &Validator) -> Result<UploadResponse> {
    anyhow::bail!("Cannot fetch {url}: built without the \"http\" feature")
}

fn print_entry(entry: &Entry<'_>) {
    match &entry.result {
        Ok(UploadResponse {
            file,
            validation: Some(summary),
            ..
        }) => println!(
            "valid    {}: {} frames x {} ms ({:.3} s), {} commands ({:.2}% of memory)",
            file.name,
            summary.frame_count,
            summary.step_time_ms,
            summary.duration_secs,
            summary.command_count,
            summary.memory_usage_ratio * 100.0
        ),
        Ok(response) => println!(
            "invalid  {}: {}",
            response.file.name,
            response.error.as_deref().unwrap_or("Unknown error")
        ),
        Err(error) => println!("error    {}: {error:#}", entry.input),
    }
}

fn run_info(config: &ValidatorConfig, path: &Path) -> Result<()> {
    let file =
        SequenceFile::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let header = file
        .header()
        .with_context(|| format!("Failed to read header of {}", path.display()))?;

    println!("File:          {}", file.path().display());
    println!("Size:          {} bytes", file.size());
    println!("Magic:         {}", String::from_utf8_lossy(&header.magic));
    println!(
        "Version:       {}.{}",
        header.version_major, header.version_minor
    );
    println!("Data offset:   {}", header.data_offset);
    println!("Channels:      {}", header.channel_count);
    println!("Frames:        {}", header.frame_count);
    println!("Step time:     {} ms", header.step_time_ms);
    println!("Duration:      {}", header.duration());
    println!("Compression:   {}", header.compression());
    println!("Expected size: {} bytes", header.required_len());

    match file.validate(&config.validator()) {
        Ok(report) => {
            println!(
                "Status:        valid, {} of {} commands ({})",
                report.command_count,
                report.command_capacity,
                report.memory_usage_percentage()
            );
            for group in ChannelGroup::ALL {
                println!(
                    "  {:<12} {} commands",
                    format!("{group}:"),
                    report.group_commands.get(group)
                );
            }
        }
        Err(error) => println!("Status:        invalid, {error}"),
    }
    Ok(())
}

#[cfg(feature = "http")]
fn run_serve(config: ValidatorConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(fseq::http_backend::serve(config))
        .context("Server error")
}
