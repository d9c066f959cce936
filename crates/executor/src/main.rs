use std::{env, sync::Arc};

use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};

use common::logger;
use common::settings::Settings;
use market_data::remote::BybitClient;
use strategy::services::SignalService;

const DEFAULT_SYMBOLS: &[&str] = &["BTCUSDT", "ETHUSDT", "SOLUSDT", "XRPUSDT", "DOGEUSDT"];
const DEFAULT_CAPITAL_USDT: f64 = 20.0;
const DEFAULT_RISK_USDT: f64 = 5.0;

fn settings_from_env() -> anyhow::Result<Settings> {
    let capital = match env::var("CAPITAL_USDT") {
        Ok(v) => v.parse::<f64>()?,
        Err(_) => DEFAULT_CAPITAL_USDT,
    };
    let risk = match env::var("RISK_USDT") {
        Ok(v) => v.parse::<f64>()?,
        Err(_) => DEFAULT_RISK_USDT,
    };
    let symbols: Vec<String> = match env::var("SYMBOLS") {
        Ok(v) => v
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
    };
    Ok(Settings::new(capital, risk, symbols)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_logger();
    dotenv().ok();

    let settings = settings_from_env()?;
    info!("Generating signals for {:?}", settings.symbols);

    let market = Arc::new(BybitClient::new());
    let (service, feed) = SignalService::new(market, settings);
    let engine = tokio::spawn(service.run());

    let mut results = feed.results();
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                let result = results.borrow_and_update().clone();
                if let Some(notice) = &result.notice {
                    warn!("{}", notice);
                }
                for (rank, s) in result.signals.iter().enumerate() {
                    info!(
                        "#{} {} {} @ {:.4} | tp {:.4} sl {:.4} | {}x on {} USDT | score {:.2} | {}",
                        rank + 1,
                        s.side,
                        s.symbol,
                        s.entry,
                        s.take_profit,
                        s.stop_loss,
                        s.leverage,
                        s.amount_usdt,
                        s.score,
                        s.reason
                    );
                }
            }
        }
    }

    engine.abort();
    Ok(())
}
