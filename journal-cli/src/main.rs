//! Trade journal CLI — position summaries, performance stats, PnL curves.
//!
//! Commands:
//! - `position`: summarize one position, optionally marked at a live price
//! - `stats`: performance statistics over the journal's closed trades
//! - `curve`: realized PnL by date, printed or exported as CSV

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use journal_core::{summarize, PositionSummary};
use journal_stats::{closed_trades, realized_pnl_series, EquityPoint, JournalConfig, JournalFile, PerformanceStats};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tradejournal",
    about = "Trade journal — position accounting and performance statistics"
)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary of one position as JSON.
    Position {
        /// Journal file (JSON).
        #[arg(long)]
        journal: PathBuf,

        /// Trade id.
        #[arg(long)]
        id: String,

        /// Live price. Overrides the journal's price for the symbol.
        #[arg(long)]
        price: Option<f64>,
    },
    /// Print performance statistics over closed trades as JSON.
    Stats {
        /// Journal file (JSON).
        #[arg(long)]
        journal: PathBuf,
    },
    /// Print the realized PnL curve, or export it as CSV.
    Curve {
        /// Journal file (JSON).
        #[arg(long)]
        journal: PathBuf,

        /// Write CSV to this path instead of printing a table.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Position { journal, id, price } => run_position(&journal, &id, price, &config),
        Commands::Stats { journal } => run_stats(&journal, &config),
        Commands::Curve { journal, csv } => run_curve(&journal, csv.as_deref(), &config),
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "tradejournal=debug,journal_core=debug,journal_stats=debug" } else { "tradejournal=info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<JournalConfig> {
    match path {
        Some(path) => {
            let config = JournalConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(JournalConfig::default()),
    }
}

fn load_journal(path: &Path, config: &JournalConfig) -> Result<JournalFile> {
    let journal = JournalFile::load(path, config)?;
    info!(trades = journal.trades.len(), path = %path.display(), "loaded journal");
    Ok(journal)
}

fn run_position(path: &Path, id: &str, price: Option<f64>, config: &JournalConfig) -> Result<()> {
    if let Some(p) = price {
        if !p.is_finite() || p <= 0.0 {
            bail!("--price must be a positive number, got {p}");
        }
    }

    let journal = load_journal(path, config)?;
    let Some(trade) = journal.find(id) else {
        bail!("no trade with id '{id}' in {}", path.display());
    };

    let current_price = price.or_else(|| journal.price_of(&trade.symbol));
    let summary = summarize(trade, current_price);
    print_position(&summary);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_stats(path: &Path, config: &JournalConfig) -> Result<()> {
    let journal = load_journal(path, config)?;
    let closed = closed_trades(&journal.trades);
    info!(closed = closed.len(), excluded = journal.trades.len() - closed.len(), "computing stats");

    let stats = PerformanceStats::compute_with(&closed, &config.stats);
    print_stats(&stats);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn run_curve(path: &Path, csv_out: Option<&Path>, config: &JournalConfig) -> Result<()> {
    let journal = load_journal(path, config)?;
    let curve = realized_pnl_series(&journal.trades);

    match csv_out {
        Some(out) => {
            let data = export_curve_csv(&curve)?;
            std::fs::write(out, data).with_context(|| format!("failed to write {}", out.display()))?;
            info!(points = curve.len(), path = %out.display(), "wrote realized pnl curve");
        }
        None => {
            if curve.is_empty() {
                println!("No realized PnL yet.");
                return Ok(());
            }
            println!("{:<12} {:>14} {:>14}", "Date", "PnL", "Cumulative");
            println!("{}", "-".repeat(42));
            for point in &curve {
                println!("{:<12} {:>14.2} {:>14.2}", point.date, point.pnl, point.cumulative_pnl);
            }
        }
    }
    Ok(())
}

/// CSV with date, pnl, and cumulative_pnl columns.
fn export_curve_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "pnl", "cumulative_pnl"])?;
    for point in curve {
        wtr.write_record([
            &point.date.to_string(),
            &format!("{:.2}", point.pnl),
            &format!("{:.2}", point.cumulative_pnl),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.precision$}"))
}

fn print_position(s: &PositionSummary) {
    eprintln!();
    eprintln!("=== {} ({}) — {:?} ===", s.symbol, s.trade_id, s.status);
    eprintln!("Avg Entry:      {:.4}", s.cost_basis.avg_entry_price);
    eprintln!("Holding:        {}", s.cost_basis.current_quantity);
    eprintln!("Realized PnL:   {:.2}", s.realized.realized_pnl);
    eprintln!("Commission:     {:.2}", s.realized.total_commission);
    if let Some(u) = s.unrealized {
        eprintln!("Unrealized PnL: {:.2} @ {:.4}", u.unrealized_pnl, u.current_price);
    }
    eprintln!("Total PnL:      {:.2}", s.total_pnl);
    eprintln!("R-Multiple:     {}", fmt_opt(s.r_multiple, 3));
    eprintln!();
}

fn print_stats(s: &PerformanceStats) {
    eprintln!();
    eprintln!("=== Performance ===");
    eprintln!("Trades:         {} ({}W / {}L / {}BE)", s.total_trades, s.winning_trades, s.losing_trades, s.breakeven_trades);
    eprintln!("Win Rate:       {:.1}%", s.win_rate);
    eprintln!("Total PnL:      {:.2}", s.total_pnl);
    eprintln!("Profit Factor:  {}", fmt_opt(s.profit_factor, 2));
    eprintln!("Expectancy:     {}", fmt_opt(s.expectancy, 2));
    eprintln!("Avg R:          {}", fmt_opt(s.avg_r_multiple, 3));
    eprintln!("Avg Hold Days:  {}", fmt_opt(s.avg_holding_days, 1));
    eprintln!("Max Win Streak: {}", s.max_win_streak);
    eprintln!("Max Lose Streak:{}", s.max_lose_streak);
    eprintln!();
}
