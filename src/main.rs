// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use local_summarizer::utils::constants::DEFAULT_LOG_LEVEL;
use local_summarizer::{AppConfig, CandleProvider, SummarizationService, catch_all};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

// stdout 只用于输出 JSON 响应，日志写到 stderr
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    init_tracing(&log_level);

    match &config {
        Ok(config) => tracing::debug!("Configuration loaded: {:?}", config),
        Err(e) => tracing::warn!("Configuration not loaded: {}", e),
    }
    let provider = CandleProvider::from_loaded(config.map(|c| c.model));

    let response = catch_all(|| {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read request from stdin")?;

        let mut service = SummarizationService::new(provider);
        service
            .handle_json(&input)
            .context("failed to handle summarization request")
    });

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response.to_json_line())?;
    stdout.flush()?;
    Ok(())
}
