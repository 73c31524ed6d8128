//! Run the simulation.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use arena_config::load_config;
use arena_core::traits::{ModelStore, SnapshotSink};
use arena_core::types::{Asset, ModelState};
use arena_engine::{BroadcastSink, Executor, MemoryStore, ModelRuntime, Simulation};
use arena_feed::{CoinStatsProvider, PriceFeed};
use arena_strategies::StrategyRegistry;

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path).context("loading configuration")?;
    if let Some(tick_interval_ms) = args.tick_interval_ms {
        config.engine.tick_interval_ms = tick_interval_ms;
    }
    if let Some(capital) = args.capital {
        config.engine.initial_capital = capital;
    }
    config.validate()?;

    let api_key = std::env::var(&config.feed.api_key_env)
        .with_context(|| format!("{} not set", config.feed.api_key_env))?;
    let provider = Arc::new(CoinStatsProvider::new(config.feed.base_url.clone(), &api_key)?);

    let feed = Arc::new(PriceFeed::new(provider, Asset::ALL.to_vec()));
    feed.start(Duration::from_secs(config.feed.interval_secs));

    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(BroadcastSink::new());

    // Forward every observed quote into the store, best-effort.
    {
        let store = Arc::clone(&store);
        let mut samples = feed.subscribe();
        tokio::spawn(async move {
            while let Ok(sample) = samples.recv().await {
                if let Err(e) = store.append_price_sample(&sample).await {
                    warn!(error = %e, "Price sample persistence failed");
                }
            }
        });
    }

    let registry = match args.seed {
        Some(seed) => StrategyRegistry::with_seed(seed),
        None => StrategyRegistry::new(),
    };

    let mut models = Vec::with_capacity(config.models.len());
    for spec in &config.models {
        let state = ModelState::new(&spec.name, spec.strategy, config.engine.initial_capital);
        store.upsert_model(&state).await?;
        let policy = registry.create_default(spec.strategy);
        info!(model = %spec.name, strategy = %spec.strategy, "Model registered");
        models.push(ModelRuntime::with_history_capacity(
            state,
            policy,
            config.engine.history_capacity,
        ));
    }

    let executor = match args.seed {
        Some(seed) => Executor::seeded(seed),
        None => Executor::new(),
    };
    let simulation = Arc::new(Simulation::with_executor(
        models,
        executor,
        Arc::clone(&store) as Arc<dyn ModelStore>,
        Arc::clone(&sink) as Arc<dyn SnapshotSink>,
    ));

    // Standings log, one line per tick.
    {
        let mut snapshots = sink.subscribe();
        tokio::spawn(async move {
            while let Ok(snapshot) = snapshots.recv().await {
                let leader = snapshot
                    .models
                    .iter()
                    .max_by(|a, b| a.equity.total_cmp(&b.equity))
                    .map(|m| format!("{} (${:.2})", m.name, m.equity))
                    .unwrap_or_else(|| "none".to_string());
                info!(tick = snapshot.tick, leader = %leader, "Tick complete");
            }
        });
    }

    {
        let feed = Arc::clone(&feed);
        simulation.start(
            Duration::from_millis(config.engine.tick_interval_ms),
            move || feed.all_prices(),
        );
    }

    info!(
        models = config.models.len(),
        tick_interval_ms = config.engine.tick_interval_ms,
        "Arena running; press Ctrl-C to stop"
    );
    tokio::signal::ctrl_c().await?;

    simulation.stop();
    feed.close();

    let prices = feed.all_prices();
    let stats = feed.stats();
    println!();
    println!("Final standings after {} ticks", simulation.tick_count());
    println!("───────────────────────────────────────────────────────────");
    let mut states = simulation.model_states();
    states.sort_by(|a, b| b.equity(&prices).total_cmp(&a.equity(&prices)));
    for state in &states {
        println!(
            "  {:<22} ${:>10.2}  {:>+7.2}%  trades: {:>3}  win rate: {:>5.1}%",
            state.name,
            state.equity(&prices),
            state.pnl_percent(&prices),
            state.trade_count,
            state.win_rate_percent(),
        );
    }
    println!();
    println!(
        "Feed: {} calls, {} ok, {} failed",
        stats.calls, stats.successes, stats.errors
    );

    Ok(())
}
