use anyhow::Result;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use tracing_subscriber::EnvFilter;

mod app;
mod bounded_vec;
mod server;
mod socket;
mod version;

use app::{App, DEFAULT_CAPACITY};

fn parse_capacity(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid capacity '{}': {}", s, e)),
    }
}

#[derive(Parser)]
#[command(name = "linkedlist-service")]
#[command(about = "An HTTP service holding a bounded list of strings")]
#[command(version = version::get_version())]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = socket::DEFAULT_PORT)]
    port: u16,

    /// Maximum number of values kept before the oldest is evicted
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    capacity: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Parser)]
pub enum Commands {
    /// Show detailed version information
    VersionInfo,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = cli.command {
        match command {
            Commands::VersionInfo => {
                version::print_header_info();
                return Ok(());
            }
        }
    }

    init_logging(cli.debug);

    let listener = socket::create(cli.host, cli.port)?;
    let app = App::new(cli.capacity);

    tracing::info!(
        addr = %listener.local_addr()?,
        capacity = app.capacity(),
        version = version::get_version(),
        "Linked list service running"
    );

    server::serve(listener, app).await?;

    Ok(())
}
