use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use common::{validate_candles, Candle, Config, Error, MarketFeed, Result, Signal};
use paper::{CandleSimulator, ReplayFeed};
use strategy::{compute_signals, SignalConfig, SignalRegistry, WARMUP_CANDLES};

/// Intra-candle updates per simulated candle in live mode.
const LIVE_TICKS_PER_CANDLE: usize = 4;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    // Logs go to stderr so stdout carries only JSON lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run().await {
        error!(error = %e, "signalbot failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    let signal_cfg = match &cfg.signal_config_path {
        Some(path) => SignalConfig::load(path)?,
        None => SignalConfig::default(),
    };
    info!(
        pair = %cfg.pair,
        strategy = %signal_cfg.strategy,
        sensitivity = signal_cfg.sensitivity,
        live = cfg.live,
        "signalbot starting"
    );

    let (candles, signals) = if cfg.live {
        run_live(&cfg, &signal_cfg).await?
    } else {
        run_batch(&cfg, &signal_cfg)?
    };

    // ── Outcome summary ───────────────────────────────────────────────────────
    let summary = risk::summarize(&signals, &candles);
    info!(
        candles = candles.len(),
        signals = summary.total(),
        wins = summary.wins,
        losses = summary.losses,
        open = summary.open,
        win_rate = ?summary.win_rate(),
        "Run complete"
    );
    Ok(())
}

/// One `compute_signals` pass over the full candle set.
fn run_batch(cfg: &Config, signal_cfg: &SignalConfig) -> Result<(Vec<Candle>, Vec<Signal>)> {
    let candles = match &cfg.candles_path {
        Some(path) => load_candles(path)?,
        None => simulator(cfg).history(cfg.sim_candles),
    };
    validate_candles(&candles)?;

    let signals = compute_signals(&candles, signal_cfg);
    for signal in &signals {
        emit(signal, signal_cfg)?;
    }
    Ok((candles, signals))
}

/// Warm the registry with history, then stream the remaining candles through
/// broadcast/mpsc channels the way a live exchange feed would arrive.
async fn run_live(cfg: &Config, signal_cfg: &SignalConfig) -> Result<(Vec<Candle>, Vec<Signal>)> {
    let (history, feed): (Vec<Candle>, Box<dyn MarketFeed>) = match &cfg.candles_path {
        Some(path) => {
            let mut candles = load_candles(path)?;
            validate_candles(&candles)?;
            let rest = candles.split_off(WARMUP_CANDLES.min(candles.len()));
            let feed: Box<dyn MarketFeed> = Box::new(ReplayFeed::new(cfg.pair.clone(), rest));
            (candles, feed)
        }
        None => {
            let warmup = WARMUP_CANDLES.min(cfg.sim_candles);
            let mut sim = simulator(cfg)
                .with_ticks_per_candle(LIVE_TICKS_PER_CANDLE)
                .with_limit(cfg.sim_candles - warmup);
            let history = sim.history(warmup);
            let feed: Box<dyn MarketFeed> = Box::new(sim);
            (history, feed)
        }
    };

    let mut registry = SignalRegistry::new(signal_cfg.clone()).closed_only(true);
    let mut signals = registry.load_history(&cfg.pair, history.clone())?;
    for signal in &signals {
        emit(signal, signal_cfg)?;
    }

    // ── Channels ──────────────────────────────────────────────────────────────
    let (market_tx, market_rx) = broadcast::channel(4096);
    let (signal_tx, mut signal_rx) = mpsc::channel::<Signal>(128);

    tokio::spawn(registry.run(market_rx, signal_tx));
    let pump = tokio::spawn(pump_feed(feed, market_tx));

    while let Some(signal) = signal_rx.recv().await {
        emit(&signal, signal_cfg)?;
        signals.push(signal);
    }

    let streamed = pump.await.map_err(|e| Error::Feed(format!("feed task failed: {e}")))??;
    let mut candles = history;
    candles.extend(streamed);
    Ok((candles, signals))
}

/// Forward feed events to the broadcast channel until the feed ends.
/// Returns the closed candles that were streamed.
async fn pump_feed(
    mut feed: Box<dyn MarketFeed>,
    market_tx: broadcast::Sender<common::MarketEvent>,
) -> Result<Vec<Candle>> {
    let mut closed = Vec::new();
    while let Some(event) = feed.next_event().await? {
        if event.is_candle_closed {
            closed.push(event.candle);
        }
        if market_tx.send(event).is_err() {
            warn!("No market subscribers left, stopping feed");
            break;
        }
        // let the registry keep up with the broadcast buffer
        tokio::task::yield_now().await;
    }
    info!(candles = closed.len(), "Feed exhausted");
    Ok(closed)
}

fn simulator(cfg: &Config) -> CandleSimulator {
    CandleSimulator::new(cfg.pair.clone(), cfg.sim_seed)
        .with_interval_ms(cfg.sim_interval_ms)
        .with_start_price(cfg.sim_start_price)
}

fn load_candles(path: &str) -> Result<Vec<Candle>> {
    let content = std::fs::read_to_string(path)?;
    let candles: Vec<Candle> = serde_json::from_str(&content)?;
    info!(path, candles = candles.len(), "Candles loaded");
    Ok(candles)
}

/// JSON line on stdout plus a readable log line honouring `showTP`/`showSL`.
fn emit(signal: &Signal, cfg: &SignalConfig) -> Result<()> {
    println!("{}", serde_json::to_string(signal)?);

    let mut line = format!(
        "{} @ {:.4} [{}%] {}",
        signal.signal_type, signal.entry_price, signal.confidence, signal.reason
    );
    if cfg.show_sl {
        line.push_str(&format!(" SL {:.4}", signal.stop_loss));
    }
    if cfg.show_tp {
        line.push_str(&format!(" TP {:.4}", signal.take_profit));
    }
    match signal.candle_timestamp() {
        Some(ts) => info!(time = %ts.to_rfc3339(), id = %signal.id, "{line}"),
        None => info!(time = signal.candle_time, id = %signal.id, "{line}"),
    }
    Ok(())
}
