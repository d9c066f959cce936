use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use common::models::GenerationResult;
use common::settings::Settings;
use market_data::MarketData;

use crate::signal_builder::build_signal;

/// Candle interval and history depth fed to the indicators.
const CANDLE_INTERVAL_MIN: u32 = 1;
const CANDLE_LIMIT: u32 = 60;
/// Pause between per-symbol fetches to stay polite with the provider.
const REQUEST_DELAY_MS: u64 = 100;
/// Automatic regeneration period.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

const DEGRADED_NOTICE: &str = "network error fetching market data; some symbols were skipped";

/// Fans market-data fetches out across the configured symbols, builds
/// one recommendation per symbol, ranks them and publishes the top N.
pub struct SignalService {
    market: Arc<dyn MarketData>,
    settings: Settings,
    top_n: usize,
    result_tx: watch::Sender<GenerationResult>,
    busy_tx: watch::Sender<bool>,
    trigger_rx: mpsc::Receiver<()>,
}

/// Consumer handle: latest ranked list, in-progress flag and a manual
/// regeneration trigger. The service loop stops once every handle is
/// dropped.
#[derive(Clone)]
pub struct SignalFeed {
    results: watch::Receiver<GenerationResult>,
    busy: watch::Receiver<bool>,
    trigger: mpsc::Sender<()>,
}

impl SignalFeed {
    /// The last published generation. Persists across later failing
    /// cycles until the next one completes.
    pub fn latest(&self) -> GenerationResult {
        self.results.borrow().clone()
    }

    /// A receiver to await new generations on.
    pub fn results(&self) -> watch::Receiver<GenerationResult> {
        self.results.clone()
    }

    pub fn is_generating(&self) -> bool {
        *self.busy.borrow()
    }

    /// Requests an immediate cycle. While one is already running, at
    /// most one follow-up stays queued; extra triggers coalesce into it.
    pub fn generate_now(&self) {
        let _ = self.trigger.try_send(());
    }
}

impl SignalService {
    pub fn new(market: Arc<dyn MarketData>, settings: Settings) -> (Self, SignalFeed) {
        let (result_tx, result_rx) = watch::channel(GenerationResult::default());
        let (busy_tx, busy_rx) = watch::channel(false);
        let (trigger_tx, trigger_rx) = mpsc::channel(1);

        let service = Self {
            market,
            settings,
            top_n: 5,
            result_tx,
            busy_tx,
            trigger_rx,
        };
        let feed = SignalFeed {
            results: result_rx,
            busy: busy_rx,
            trigger: trigger_tx,
        };
        (service, feed)
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Runs one cycle immediately, then again every five minutes or
    /// whenever the feed asks. Cycles are awaited in place, so
    /// publications are serialized and never overlap. Returns once the
    /// last feed handle is gone.
    pub async fn run(mut self) {
        info!(
            "Starting signal service for {} symbols",
            self.settings.symbols.len()
        );
        let mut interval = time::interval(REFRESH_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => self.run_cycle().await,
                cmd = self.trigger_rx.recv() => match cmd {
                    Some(()) => self.run_cycle().await,
                    None => break,
                },
            }
        }
        info!("Signal service stopped.");
    }

    /// One complete fetch, build, rank, publish pass. Each cycle works
    /// on the settings captured at construction; a failed symbol is
    /// dropped from this cycle only.
    async fn run_cycle(&self) {
        let _ = self.busy_tx.send(true);

        let mut signals = Vec::with_capacity(self.settings.symbols.len());
        let mut notice = None;

        for (i, symbol) in self.settings.symbols.iter().enumerate() {
            if i > 0 {
                time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;
            }

            let fetched = tokio::try_join!(
                self.market.ticker(symbol),
                self.market
                    .recent_closes(symbol, CANDLE_INTERVAL_MIN, CANDLE_LIMIT),
            );

            match fetched {
                Ok((quote, closes)) => {
                    signals.push(build_signal(
                        symbol,
                        quote.last_price,
                        self.settings.risk,
                        &closes,
                    ));
                }
                Err(e) => {
                    warn!("Skipping {} this cycle: {}", symbol, e);
                    notice.get_or_insert_with(|| DEGRADED_NOTICE.to_string());
                }
            }
        }

        // Stable sort keeps input order on equal scores.
        signals.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        signals.truncate(self.top_n);

        debug!("Cycle produced {} ranked signals", signals.len());

        let _ = self.result_tx.send(GenerationResult {
            signals,
            notice,
            completed_at: Some(Utc::now()),
        });
        let _ = self.busy_tx.send(false);
    }
}
