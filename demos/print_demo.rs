//! Print a text label and follow the job to completion.
//!
//! Demonstrates:
//! - Listing attached printers
//! - Printing one text label on the first device
//! - Polling status until completed/aborted (State 4/3)
//! - Stopping the job when it does not finish in time
//!
//! The local print service must be running.
//!
//! Usage:
//!   cargo run --example print_demo
//!   cargo run --example print_demo -- --debug
//!   cargo run --example print_demo -- --url ws://127.0.0.1:15268

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use supvan_printer::{Align, Error, PrintSettings, PrinterClient, Result, TextLabel};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_URL: &str = "ws://127.0.0.1:15268";
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const JOB_DEADLINE: Duration = Duration::from_secs(60);

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    debug: bool,
    url: String,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let url = args
            .iter()
            .position(|a| a == "--url")
            .and_then(|i| args.get(i + 1))
            .cloned()
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        Self {
            debug: args.iter().any(|a| a == "--debug"),
            url,
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "supvan_printer=debug"
    } else {
        "supvan_printer=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== Print Demo ===\n");

    let client = PrinterClient::builder().url(&args.url).connect().await?;
    let result = print_and_follow(&client).await;
    client.close().await;
    result
}

async fn print_and_follow(client: &PrinterClient) -> Result<()> {
    // ========================================================================
    // Devices
    // ========================================================================

    println!("[1] Listing devices...");

    let devices = client.list_devices(None).await?;
    let Some(device_path) = devices.first().and_then(|d| d.device_path()) else {
        println!("    No device found. Check the printer and the print service.");
        return Ok(());
    };

    println!("    ✓ Using device: {device_path}\n");

    // ========================================================================
    // Print
    // ========================================================================

    println!("[2] Sending print job...");

    let label = TextLabel::new("HelloWorld").with_font("黑体", 4).with_align(Align::Center);
    let settings = PrintSettings::new().with_label_size(30, 30).with_threshold(240);
    client
        .print_text_label(&label, Some(&settings), Some(device_path))
        .await?;

    println!("    ✓ Job sent\n");

    // ========================================================================
    // Status
    // ========================================================================

    println!("[3] Waiting for the job to finish...");

    match client
        .wait_for_completion(Some(device_path), POLL_INTERVAL, JOB_DEADLINE)
        .await
    {
        Ok(status) => {
            println!(
                "    ✓ Finished: state={:?} description={} error={}",
                status.state_code(),
                status.description(),
                status.error_message()
            );
        }
        Err(Error::JobDeadline { .. }) => {
            println!("    Job did not finish in time, stopping it...");
            client.stop_print(Some(device_path), None).await?;
            println!("    ✓ Stop requested");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
