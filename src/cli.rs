use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "volwatch")]
#[command(about = "Volatility anomaly detection service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one volatility scan and print the JSON reply
    Scan {
        /// Ticker symbol, e.g. AAPL
        #[arg(short, long)]
        symbol: String,
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date, exclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Standard deviations above mean volatility (default: 2.0)
        #[arg(short, long)]
        threshold: Option<String>,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Scan {
            symbol,
            start,
            end,
            threshold,
        } => {
            commands::scan::run(symbol, start, end, threshold).await;
        }
    }
}
