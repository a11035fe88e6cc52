//! # checkout
//!
//! ```text
//! checkout [--config checkout.toml] [request.json]
//!
//! request.json / stdin ──► Settings ──► Checkout ──► receipt JSON on stdout
//!                                                     logs on stderr
//! ```

use std::process::ExitCode;

use anyhow::Context;
use checkout_cli::{exit_code, process, read_request, CliArgs, Settings};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries only the receipt
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = exit_code(&err);
            debug!(exit_code = code, "Checkout failed");
            eprintln!("error: {:#}", err);
            ExitCode::from(code)
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<String> {
    let settings = Settings::load(args.config.as_deref())?;
    let checkout = settings.checkout();
    info!(
        currency = %checkout.config().default_currency,
        tax_rate = %checkout.config().tax_rate,
        coupons = checkout.coupons().len(),
        "Configuration loaded"
    );

    let input = read_request(args.request.as_deref())?;
    let receipt = process(&checkout, &input)?;
    debug!(order_id = %receipt.order_id, "Checkout complete");

    let json = serde_json::to_string_pretty(&receipt).context("failed to encode receipt")?;
    Ok(json)
}
