//! The tick scheduler driving all models in lockstep.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use arena_core::traits::{ModelStore, Policy, PolicyContext, SnapshotSink};
use arena_core::types::{
    Asset, ModelState, ModelSummary, PriceHistory, TickSnapshot,
};

use crate::execution::Executor;

/// Lifecycle of a [`Simulation`]. `Stopped` is terminal; a stopped
/// simulation is never restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Idle,
    Running,
    Stopped,
}

/// One model's mutable world: its portfolio, its decision rule and its own
/// price history.
pub struct ModelRuntime {
    state: ModelState,
    policy: Box<dyn Policy>,
    history: PriceHistory,
}

impl ModelRuntime {
    pub fn new(state: ModelState, policy: Box<dyn Policy>) -> Self {
        Self {
            state,
            policy,
            history: PriceHistory::new(),
        }
    }

    pub fn with_history_capacity(
        state: ModelState,
        policy: Box<dyn Policy>,
        capacity: usize,
    ) -> Self {
        Self {
            state,
            policy,
            history: PriceHistory::with_capacity(capacity),
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }
}

struct Inner {
    models: Vec<ModelRuntime>,
    executor: Executor,
    tick_count: u64,
    latest: Option<TickSnapshot>,
    status: SimulationStatus,
}

/// Drives one evaluation pass over every model per tick.
///
/// Models are evaluated sequentially in registration order against the same
/// immutable price snapshot; ticks never overlap. Persistence is
/// best-effort: a failing store is logged and the run continues.
pub struct Simulation {
    inner: Mutex<Inner>,
    store: Arc<dyn ModelStore>,
    sink: Arc<dyn SnapshotSink>,
    shutdown: watch::Sender<bool>,
}

impl Simulation {
    pub fn new(
        models: Vec<ModelRuntime>,
        store: Arc<dyn ModelStore>,
        sink: Arc<dyn SnapshotSink>,
    ) -> Self {
        Self::with_executor(models, Executor::new(), store, sink)
    }

    /// Variant with an explicit executor, used by tests for seeded
    /// randomness.
    pub fn with_executor(
        models: Vec<ModelRuntime>,
        executor: Executor,
        store: Arc<dyn ModelStore>,
        sink: Arc<dyn SnapshotSink>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inner: Mutex::new(Inner {
                models,
                executor,
                tick_count: 0,
                latest: None,
                status: SimulationStatus::Idle,
            }),
            store,
            sink,
            shutdown,
        }
    }

    /// Spawn the tick loop. `quotes` is pulled once per tick for the price
    /// snapshot. No-op unless the simulation is idle.
    pub fn start<F>(self: &Arc<Self>, interval: Duration, quotes: F)
    where
        F: Fn() -> HashMap<Asset, f64> + Send + 'static,
    {
        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.status != SimulationStatus::Idle {
                debug!(status = ?inner.status, "Start ignored");
                return;
            }
            inner.status = SimulationStatus::Running;
        }
        info!(interval_ms = interval.as_millis() as u64, "Simulation started");

        let sim = Arc::clone(self);
        let mut shutdown = self.shutdown.subscribe();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    // Shutdown wins when both arms are ready; a tick deadline
                    // that races the stop signal must not start a new round.
                    biased;
                    _ = shutdown.changed() => break,
                    _ = ticker.tick() => {
                        if *shutdown.borrow() {
                            break;
                        }
                        sim.tick(quotes()).await;
                    }
                }
            }
            info!("Simulation loop exited");
        });
    }

    /// Stop the tick loop. Idempotent; the status becomes `Stopped` even if
    /// the simulation never ran.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.status != SimulationStatus::Stopped {
            inner.status = SimulationStatus::Stopped;
            info!(ticks = inner.tick_count, "Simulation stopped");
        }
        let _ = self.shutdown.send(true);
    }

    /// Run a single tick against the given price snapshot.
    ///
    /// A no-op once the simulation is stopped: `stop()` flips the status
    /// under the same lock this takes, so no new round can begin after it
    /// returns. An empty snapshot advances the tick counter but mutates
    /// nothing and emits nothing. Returns the snapshot that was emitted, if
    /// any.
    pub async fn tick(&self, prices: HashMap<Asset, f64>) -> Option<TickSnapshot> {
        let now = Utc::now();

        let (snapshot, persisted_states, trades) = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.status == SimulationStatus::Stopped {
                debug!("Tick ignored after stop");
                return None;
            }
            inner.tick_count += 1;
            let tick = inner.tick_count;

            if prices.is_empty() {
                warn!(tick, "No prices available; skipping tick");
                return None;
            }

            let Inner {
                models,
                executor,
                latest,
                ..
            } = &mut *inner;

            let mut summaries = Vec::with_capacity(models.len());
            let mut persisted_states = Vec::with_capacity(models.len());
            let mut all_trades = Vec::new();

            for runtime in models.iter_mut() {
                runtime.history.record(&prices);

                let signals = {
                    let ctx = PolicyContext {
                        history: &runtime.history,
                        prices: &prices,
                        positions: &runtime.state.positions,
                        cash: runtime.state.cash,
                        equity: runtime.state.equity(&prices),
                        trade_count: runtime.state.trade_count,
                    };
                    runtime.policy.evaluate(&ctx)
                };

                let executed = executor.execute(&mut runtime.state, &signals, now);
                if !executed.is_empty() {
                    debug!(
                        model = %runtime.state.name,
                        trades = executed.len(),
                        "Executed signals"
                    );
                    all_trades.extend(executed);
                }
                // Every model's state goes to the store each round, traded
                // or not.
                persisted_states.push(runtime.state.clone());

                summaries.push(ModelSummary {
                    name: runtime.state.name.clone(),
                    equity: runtime.state.equity(&prices),
                    pnl_percent: runtime.state.pnl_percent(&prices),
                    trade_count: runtime.state.trade_count,
                    win_rate_percent: runtime.state.win_rate_percent(),
                });
            }

            let snapshot = TickSnapshot {
                timestamp: now,
                tick,
                prices,
                models: summaries,
            };
            *latest = Some(snapshot.clone());
            (snapshot, persisted_states, all_trades)
        };

        for state in &persisted_states {
            if let Err(e) = self.store.upsert_model(state).await {
                warn!(model = %state.name, error = %e, "Model persistence failed");
            }
        }
        for trade in &trades {
            if let Err(e) = self.store.append_trade(trade).await {
                warn!(error = %e, "Trade persistence failed");
            }
        }

        self.sink.emit(&snapshot);
        Some(snapshot)
    }

    pub fn status(&self) -> SimulationStatus {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).status
    }

    pub fn tick_count(&self) -> u64 {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .tick_count
    }

    /// The most recently emitted snapshot.
    pub fn latest_snapshot(&self) -> Option<TickSnapshot> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .latest
            .clone()
    }

    /// Current state of every model, in registration order.
    pub fn model_states(&self) -> Vec<ModelState> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .models
            .iter()
            .map(|m| m.state.clone())
            .collect()
    }
}
