use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tradelog",
    about = "Trade journal with risk-based position sizing and charge breakdown"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a new trade
    Log {
        /// JSON with symbol, direction, entry_price, stop_loss, and either
        /// quantity or capital + risk_percent; optionally target_price,
        /// exit_price, status, setup_type, market_condition, psychology, notes
        json: String,
        /// Owner the trade is journaled under
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Edit a trade; economics are recomputed, derived fields are not patchable
    Edit {
        /// Trade ID
        id: String,
        /// JSON patch of input fields
        json: String,
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Close a trade at an exit price
    Close {
        /// Trade ID
        id: String,
        exit_price: f64,
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Delete a trade permanently
    Delete {
        /// Trade ID
        id: String,
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Show one trade
    Get {
        /// Trade ID
        id: String,
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// List trades
    List {
        #[arg(long, default_value = "default")]
        owner: String,
        /// Case-insensitive symbol substring
        #[arg(long)]
        symbol: Option<String>,
        /// Status filter (open, closed)
        #[arg(long)]
        status: Option<String>,
        /// Inclusive start of date range (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive end of date range (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export all matching trades as JSON
    Export {
        #[arg(long, default_value = "default")]
        owner: String,
        #[arg(long)]
        symbol: Option<String>,
        /// Status filter (open, closed)
        #[arg(long)]
        status: Option<String>,
        /// Inclusive start of date range (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive end of date range (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show journal statistics
    Stats {
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Show the equity curve over closed trades
    Equity {
        #[arg(long, default_value = "default")]
        owner: String,
    },
    /// Preview position size and reward:risk for a planned trade
    Size {
        #[arg(long)]
        capital: f64,
        #[arg(long)]
        risk_percent: f64,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        target: Option<f64>,
        /// long, short, call, or put
        #[arg(long, default_value = "long")]
        direction: String,
    },
    /// Attach entry/exit screenshots to a trade
    Attach {
        /// Trade ID
        id: String,
        #[arg(long)]
        entry_image: Option<PathBuf>,
        #[arg(long)]
        exit_image: Option<PathBuf>,
        #[arg(long, default_value = "default")]
        owner: String,
    },
}
