use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use btc_positions::models::{PositionInput, Side};
use btc_positions::tracker::feed::BINANCE_WS_URL;
use btc_positions::tracker::{run_ticker_feed, ApiClient, FeedEvent, FeedNotice, Portfolio, TrackerConfig};

const SYMBOL: &str = "BTCUSDT";
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "tracker", about = "Bitcoin position tracker with live P&L")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the API endpoint (and optional API key) used by all other commands
    Configure {
        #[arg(long)]
        api_url: String,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// List tracked positions
    List,
    /// Open a new position (symbol fixed to BTCUSDT, dated now)
    Add {
        #[arg(long)]
        entry: Decimal,
        #[arg(long)]
        quantity: Decimal,
        #[arg(long, value_parser = parse_side)]
        side: Side,
    },
    /// Replace an existing position's fields (the open date is preserved)
    Update {
        id: String,
        #[arg(long)]
        entry: Decimal,
        #[arg(long)]
        quantity: Decimal,
        #[arg(long, value_parser = parse_side)]
        side: Side,
    },
    /// Delete a position
    Delete { id: String },
    /// Live view: ticker feed plus periodic position refresh
    Watch,
}

fn parse_side(s: &str) -> Result<Side, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Configure { api_url, api_key } => {
            let config = TrackerConfig { api_url, api_key };
            config.save()?;
            println!("Configuration saved to {}", TrackerConfig::default_path()?.display());
            Ok(())
        }
        command => {
            // Everything else is blocked until a configuration exists.
            let Some(config) = TrackerConfig::load()? else {
                anyhow::bail!("No configuration found. Run `tracker configure --api-url <URL>` first.");
            };
            run(command, ApiClient::new(&config)).await
        }
    }
}

async fn run(command: Command, client: ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Configure { .. } => unreachable!("handled in main"),
        Command::List => {
            let positions = client.list_positions().await?;
            if positions.is_empty() {
                println!("No positions yet");
            }
            for pos in positions {
                println!(
                    "{}  {:<4} qty {:<12} entry {:<12} {}  ({})",
                    pos.id, pos.side, pos.quantity, pos.entry, pos.symbol, pos.date
                );
            }
        }
        Command::Add { entry, quantity, side } => {
            let input = PositionInput {
                symbol: Some(SYMBOL.into()),
                quantity: Some(quantity),
                side: Some(side),
                entry: Some(entry),
                date: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            };
            let created = client.create_position(&input).await?;
            println!("Position added: {}", created.id);
        }
        Command::Update { id, entry, quantity, side } => {
            // Full replace: the API requires every field, so carry the
            // original open date over.
            let positions = client.list_positions().await?;
            let Some(existing) = positions.into_iter().find(|p| p.id == id) else {
                anyhow::bail!("Position not found: {id}");
            };
            let input = PositionInput {
                symbol: Some(existing.symbol),
                quantity: Some(quantity),
                side: Some(side),
                entry: Some(entry),
                date: Some(existing.date),
            };
            let updated = client.update_position(&id, &input).await?;
            println!("Position updated: {}", updated.id);
        }
        Command::Delete { id } => {
            let deleted = client.delete_position(&id).await?;
            println!("Position deleted: {deleted}");
        }
        Command::Watch => watch(client).await?,
    }

    Ok(())
}

/// Event loop: ticker frames re-render, the position list refreshes
/// immediately and then every 30 seconds, and a failed refresh keeps the
/// previous list on screen.
async fn watch(client: ApiClient) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<FeedEvent>(64);
    tokio::spawn(run_ticker_feed(BINANCE_WS_URL.to_string(), tx));

    let mut portfolio = Portfolio::new();
    let mut refresh = interval(REFRESH_INTERVAL);
    let mut feed_done = false;

    loop {
        tokio::select! {
            event = rx.recv(), if !feed_done => {
                match event {
                    Some(FeedEvent::Connected) => eprintln!("● price feed connected"),
                    Some(FeedEvent::Ticker(update)) => {
                        portfolio.set_ticker(update);
                        render(&portfolio);
                    }
                    Some(FeedEvent::Notice(FeedNotice::Reconnecting)) => {
                        eprintln!("! lost price feed connection, reconnecting...");
                    }
                    Some(FeedEvent::Notice(FeedNotice::Exhausted)) => {
                        eprintln!("! price feed unavailable, restart to retry (positions still refresh)");
                    }
                    None => feed_done = true,
                }
            }
            _ = refresh.tick() => {
                if let Err(e) = portfolio.apply_refresh(client.list_positions().await) {
                    eprintln!("! position refresh failed: {e:#}");
                } else {
                    render(&portfolio);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn render(portfolio: &Portfolio) {
    // Redraw in place.
    print!("\x1b[2J\x1b[H");

    if let Some(ticker) = portfolio.ticker() {
        println!(
            "BTC/USDT  {:.2}  ({:+.2}% 24h)  high {:.2}  low {:.2}  vol {:.0}",
            ticker.last_price, ticker.change_pct, ticker.high, ticker.low, ticker.volume
        );
    } else {
        println!("BTC/USDT  waiting for price feed...");
    }
    println!();

    let valuations = portfolio.valuations();
    if valuations.is_empty() {
        println!("No positions yet");
        return;
    }

    println!(
        "{:<38} {:<5} {:>12} {:>12} {:>14} {:>12} {:>9}",
        "id", "type", "quantity", "entry", "value", "p&l", "p&l %"
    );
    for (pos, val) in &valuations {
        println!(
            "{:<38} {:<5} {:>12} {:>12.2} {:>14.2} {:>+12.2} {:>+8.2}%",
            pos.id,
            pos.side,
            pos.quantity,
            pos.entry,
            val.current_value,
            val.pnl_absolute,
            val.pnl_percent,
        );
    }
    println!();
    println!(
        "{} position(s)   total P&L {:+.2}",
        valuations.len(),
        portfolio.total_pnl()
    );
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
