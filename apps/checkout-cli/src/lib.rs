//! # checkout-cli
//!
//! Marshalling around [`checkout_core`]: read a JSON request, price it,
//! return the receipt, and map failures to process exit codes.
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0  receipt printed                                                     │
//! │  2  request rejected (CheckoutError: validation, unknown coupon, ...)   │
//! │  1  anything else (unreadable input, malformed JSON, bad config)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use checkout_core::{Checkout, CheckoutError, OrderReceipt};
use clap::Parser;
use serde_json::Value;

pub use crate::config::{ConfigError, Settings};

/// Exit code for a rejected request.
pub const EXIT_REQUEST_ERROR: u8 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// `checkout` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "checkout",
    about = "Price an order request and print the receipt as JSON",
    version
)]
pub struct CliArgs {
    /// Settings file (TOML). Defaults to `checkout.toml` when present.
    #[arg(short, long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Request JSON file. Reads stdin when omitted.
    #[arg(value_name = "request")]
    pub request: Option<PathBuf>,
}

/// Reads the raw request text from a file or stdin.
pub fn read_request(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read request from stdin")?;
            Ok(input)
        }
    }
}

/// Parses request text and runs the checkout.
pub fn process(checkout: &Checkout, input: &str) -> anyhow::Result<OrderReceipt> {
    let request: Value = serde_json::from_str(input).context("request is not valid JSON")?;
    let receipt = checkout.process_checkout(&request)?;
    Ok(receipt)
}

/// Picks the exit code for a failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<CheckoutError>().is_some() {
        EXIT_REQUEST_ERROR
    } else {
        EXIT_FAILURE
    }
}
