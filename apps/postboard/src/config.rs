//! Application configuration from command-line flags and environment variables.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::telemetry::TelemetryConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Interactive client for a posts backend.
#[derive(Debug, Parser)]
#[command(name = "postboard", version, about)]
pub struct Cli {
    /// Base URL of the posts API.
    #[arg(
        long,
        env = "POSTBOARD_API_URL",
        default_value = "http://localhost:3000/fakeApi"
    )]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "POSTBOARD_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Use a seeded in-memory backend instead of the HTTP API.
    #[arg(long, env = "POSTBOARD_IN_MEMORY")]
    pub in_memory: bool,

    /// Log output format.
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty,
        ignore_case = true
    )]
    pub log_format: LogFormat,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub in_memory: bool,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url,
            timeout: Duration::from_secs(cli.timeout_secs),
            // Without an HTTP backend compiled in, memory is the only backend.
            in_memory: cli.in_memory || cfg!(not(feature = "http")),
            telemetry: TelemetryConfig {
                json_logs: cli.log_format == LogFormat::Json,
                ..TelemetryConfig::default()
            },
        }
    }
}
