use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::models::TickerUpdate;

pub const BINANCE_WS_URL: &str = "wss://stream.binance.com:9443/ws/btcusdt@ticker";

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const BASE_RECONNECT_DELAY_MS: u64 = 1_000;
const MAX_RECONNECT_DELAY_MS: u64 = 30_000;

/// Events the feed task emits to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Connected,
    Ticker(TickerUpdate),
    Notice(FeedNotice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedNotice {
    /// First failure of an episode; retries are in progress.
    Reconnecting,
    /// All retries spent; no further attempt will be scheduled.
    Exhausted,
}

/// Reconnect policy: at most five retries per failure episode, exponential
/// delay capped at 30 seconds, counter reset on every successful connect.
#[derive(Debug, Default)]
pub struct Backoff {
    attempts: u32,
}

impl Backoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first retry of the current episode has been scheduled.
    pub fn first_failure(&self) -> bool {
        self.attempts == 0
    }

    /// Delay before the next attempt, or `None` once the retry budget is
    /// spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= MAX_RECONNECT_ATTEMPTS {
            return None;
        }
        self.attempts += 1;
        let millis = BASE_RECONNECT_DELAY_MS
            .saturating_mul(1u64 << self.attempts)
            .min(MAX_RECONNECT_DELAY_MS);
        Some(Duration::from_millis(millis))
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

/// Run the ticker feed until the retry budget of a failure episode is spent.
/// Each parsed ticker frame is forwarded as `FeedEvent::Ticker`; the receiver
/// side owns all rendering.
pub async fn run_ticker_feed(ws_url: String, tx: mpsc::Sender<FeedEvent>) {
    let mut backoff = Backoff::new();

    loop {
        tracing::info!(url = %ws_url, "Connecting to price feed...");

        match connect_async(&ws_url).await {
            Ok((ws_stream, _response)) => {
                tracing::info!("Price feed connected");
                backoff.reset();
                if tx.send(FeedEvent::Connected).await.is_err() {
                    return;
                }

                let (mut write, mut read) = ws_stream.split();

                while let Some(msg) = read.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if let Some(update) = TickerUpdate::from_frame(text.as_str()) {
                                if tx.send(FeedEvent::Ticker(update)).await.is_err() {
                                    return;
                                }
                            } else {
                                tracing::trace!(raw = %text, "Non-ticker frame");
                            }
                        }
                        Ok(Message::Ping(data)) => {
                            if let Err(e) = write.send(Message::Pong(data)).await {
                                tracing::warn!(error = %e, "Failed to send pong");
                                break;
                            }
                        }
                        Ok(Message::Close(_)) => {
                            tracing::warn!("Price feed sent close frame");
                            break;
                        }
                        Ok(_) => {} // Binary, Pong, Frame — ignore
                        Err(e) => {
                            tracing::error!(error = %e, "Price feed read error");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Price feed connection failed");
            }
        }

        // One transient notice per failure episode.
        if backoff.first_failure() && tx.send(FeedEvent::Notice(FeedNotice::Reconnecting)).await.is_err()
        {
            return;
        }

        match backoff.next_delay() {
            Some(delay) => {
                tracing::info!(delay_ms = delay.as_millis() as u64, "Reconnecting...");
                sleep(delay).await;
            }
            None => {
                tracing::error!("Price feed retries exhausted");
                let _ = tx.send(FeedEvent::Notice(FeedNotice::Exhausted)).await;
                return;
            }
        }
    }
}
