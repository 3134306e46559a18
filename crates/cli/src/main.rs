use std::sync::Arc;

use clap::Parser;
use linkpeek_core::{
    DetailsService, FetchOptions, Fetcher, ReqwestTransport, validate_url,
};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Look up the title of a remote web page
#[derive(Parser, Debug)]
#[command(name = "linkpeek")]
#[command(author = "Linkpeek Contributors")]
#[command(version = VERSION)]
#[command(about = "Look up remote URL metadata", long_about = None)]
struct Args {
    /// URL to look up (absolute, http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Response-size cap in bytes
    #[arg(long, default_value = "153600", value_name = "BYTES")]
    max_bytes: usize,

    /// Extra request header (name:value), repeatable
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Print the full metadata record as JSON
    #[arg(long)]
    json: bool,

    /// Print progress information
    #[arg(short, long)]
    verbose: bool,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("invalid header {raw:?} (expected name:value)")),
    }
}

/// Print an info message
fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a success message
fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        eprintln!("{} {}{}", "Linkpeek".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    }

    let url = validate_url(&args.url)?;

    if args.verbose {
        print_info(&format!("fetching {} (timeout {}s, cap {} bytes)", url, args.timeout, args.max_bytes));
    }

    let fetcher = Fetcher::new(Arc::new(ReqwestTransport::default())).with_defaults(FetchOptions {
        timeout: args.timeout,
        max_body_bytes: args.max_bytes,
        headers: args.headers.clone(),
    });
    let service = DetailsService::new(fetcher);

    let details = service.lookup_url(&url).await?;

    if args.verbose {
        print_success("response received");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", details.title);
    }

    Ok(())
}
