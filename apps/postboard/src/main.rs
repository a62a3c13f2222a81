//! # Postboard
//!
//! Interactive client: keeps a normalized post store in memory and syncs
//! it with a posts backend on request.

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use postboard_core::PostsSession;
use postboard_core::ports::PostsApi;
use postboard_infra::InMemoryPostsApi;

mod commands;
mod config;
mod error;
mod shell;
mod telemetry;

use config::{AppConfig, Cli};
use error::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_cli(Cli::parse());
    telemetry::init_telemetry(&config.telemetry);

    let api = build_api(&config)?;
    let mut session = PostsSession::new(api);

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(&mut session, stdin, std::io::stdout()).await
}

fn build_api(config: &AppConfig) -> AppResult<Arc<dyn PostsApi>> {
    if config.in_memory {
        tracing::info!("Using the in-memory demo backend");
        return Ok(Arc::new(InMemoryPostsApi::demo()));
    }

    #[cfg(feature = "http")]
    let api: Arc<dyn PostsApi> = {
        use postboard_infra::{HttpApiConfig, HttpPostsApi};

        Arc::new(HttpPostsApi::new(&HttpApiConfig {
            base_url: config.api_url.clone(),
            timeout: config.timeout,
        })?)
    };

    #[cfg(not(feature = "http"))]
    let api: Arc<dyn PostsApi> = {
        tracing::warn!(
            api_url = %config.api_url,
            "Built without http feature, using in-memory backend"
        );
        Arc::new(InMemoryPostsApi::demo())
    };

    Ok(api)
}
