//! Realtime channel — one push connection per venue
//!
//! 1. Connect WebSocket to the platform's event endpoint
//! 2. Emit `Connected` so the engine resyncs before trusting live events
//! 3. Parse frames into typed events, keepalive ping, staleness watchdog
//! 4. Reconnect with exponential backoff on disconnect
//!
//! A venue must never hold two simultaneous connections — both would
//! drive a resync and double-apply corrective calls — so connections are
//! guarded through a [`VenueRegistry`].

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use shared::event::{PlatformEvent, RealtimeSignal};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::MaybeTlsStream;
use tokio_util::sync::CancellationToken;

use crate::error::{GatewayError, GatewayResult};

pub type WsStream = tokio_tungstenite::WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Initial reconnect delay
const INITIAL_RECONNECT_DELAY_SECS: u64 = 5;
/// Max reconnect delay
const MAX_RECONNECT_DELAY_SECS: u64 = 120;
/// WebSocket keepalive ping interval
const WS_PING_INTERVAL_SECS: u64 = 30;
/// Staleness threshold before the watchdog fires
const WATCHDOG_TIMEOUT_SECS: u64 = 90;

/// Realtime channel configuration
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Platform push endpoint (`wss://...`)
    pub ws_url: String,
    pub venue: String,
    pub token: String,
    pub ping_interval: Duration,
    pub watchdog_timeout: Duration,
    pub initial_reconnect_delay: Duration,
    pub max_reconnect_delay: Duration,
}

impl ChannelConfig {
    pub fn new(
        ws_url: impl Into<String>,
        venue: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            ws_url: ws_url.into(),
            venue: venue.into(),
            token: token.into(),
            ping_interval: Duration::from_secs(WS_PING_INTERVAL_SECS),
            watchdog_timeout: Duration::from_secs(WATCHDOG_TIMEOUT_SECS),
            initial_reconnect_delay: Duration::from_secs(INITIAL_RECONNECT_DELAY_SECS),
            max_reconnect_delay: Duration::from_secs(MAX_RECONNECT_DELAY_SECS),
        }
    }
}

/// Guard table ensuring at most one live connection per venue.
#[derive(Clone, Default)]
pub struct VenueRegistry {
    active: Arc<DashMap<String, ()>>,
}

impl VenueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self, venue: &str) -> Option<VenueGuard> {
        use dashmap::mapref::entry::Entry;
        match self.active.entry(venue.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(vacant) => {
                vacant.insert(());
                Some(VenueGuard {
                    active: self.active.clone(),
                    venue: venue.to_string(),
                })
            }
        }
    }
}

struct VenueGuard {
    active: Arc<DashMap<String, ()>>,
    venue: String,
}

impl Drop for VenueGuard {
    fn drop(&mut self) {
        self.active.remove(&self.venue);
    }
}

/// Long-lived push connection for a single venue
pub struct RealtimeChannel {
    config: ChannelConfig,
    registry: VenueRegistry,
    signals: mpsc::Sender<RealtimeSignal>,
    shutdown: CancellationToken,
}

impl RealtimeChannel {
    pub fn new(
        config: ChannelConfig,
        registry: VenueRegistry,
        signals: mpsc::Sender<RealtimeSignal>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            registry,
            signals,
            shutdown,
        }
    }

    /// Main run loop — connect, pump one session, reconnect on failure.
    pub async fn run(self) {
        let Some(_guard) = self.registry.acquire(&self.config.venue) else {
            tracing::error!(
                venue = %self.config.venue,
                "venue already has a live realtime connection, refusing a second one"
            );
            return;
        };

        let mut reconnect_delay = self.config.initial_reconnect_delay;

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            match self.connect().await {
                Ok(ws) => {
                    reconnect_delay = self.config.initial_reconnect_delay;
                    let epoch = shared::util::connection_epoch();
                    tracing::info!(venue = %self.config.venue, %epoch, "realtime channel connected");
                    if self
                        .signals
                        .send(RealtimeSignal::Connected {
                            epoch: epoch.clone(),
                        })
                        .await
                        .is_err()
                    {
                        return;
                    }
                    self.run_session(ws, &epoch).await;
                    if self.signals.send(RealtimeSignal::Disconnected).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        delay_secs = reconnect_delay.as_secs(),
                        "realtime connect failed, will retry: {e}"
                    );
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(reconnect_delay) => {},
            }
            reconnect_delay = (reconnect_delay * 2).min(self.config.max_reconnect_delay);
        }

        tracing::info!(venue = %self.config.venue, "realtime channel stopped");
    }

    /// Connect the venue's WebSocket with bearer auth.
    async fn connect(&self) -> GatewayResult<WsStream> {
        let url = format!("{}/venues/{}/events", self.config.ws_url, self.config.venue);

        // Extract host from URL for the Host header (required by WebSocket protocol)
        let host = url
            .split("://")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .unwrap_or("localhost");

        let request = tungstenite::http::Request::builder()
            .uri(&url)
            .header("Host", host)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Connection", "Upgrade")
            .header("Upgrade", "websocket")
            .header("Sec-WebSocket-Version", "13")
            .header(
                "Sec-WebSocket-Key",
                tungstenite::handshake::client::generate_key(),
            )
            .body(())
            .map_err(|e| GatewayError::Server {
                status: 0,
                message: format!("failed to build WS request: {e}"),
            })?;

        let (ws_stream, _response) =
            tokio_tungstenite::connect_async(request)
                .await
                .map_err(|e| {
                    if let tungstenite::Error::Http(ref resp) = e {
                        let status = resp.status().as_u16();
                        if status == 401 || status == 403 {
                            return GatewayError::Unauthorized(format!(
                                "platform rejected realtime connection (HTTP {status})"
                            ));
                        }
                    }
                    GatewayError::Server {
                        status: 0,
                        message: format!("WebSocket connection failed: {e}"),
                    }
                })?;

        Ok(ws_stream)
    }

    /// Pump one WebSocket session until disconnect, staleness or shutdown.
    async fn run_session(&self, ws: WsStream, epoch: &str) {
        let (mut ws_sink, mut ws_stream) = ws.split();

        let mut ping_interval = tokio::time::interval(self.config.ping_interval);
        ping_interval.tick().await; // skip immediate tick

        // Check staleness at a quarter of the threshold
        let check_period = self.config.watchdog_timeout / 4;
        let mut watchdog = tokio::time::interval(check_period.max(Duration::from_secs(1)));
        watchdog.tick().await; // skip immediate tick

        // Time of the last successfully processed inbound exchange; the
        // keepalive pings below prompt pongs that keep a live connection
        // fresh even when no events flow.
        let mut last_exchange = Instant::now();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = ws_sink.close().await;
                    return;
                }

                _ = ping_interval.tick() => {
                    if ws_sink.send(Message::Ping(vec![].into())).await.is_err() {
                        tracing::warn!(%epoch, "WS ping failed, disconnecting");
                        return;
                    }
                }

                _ = watchdog.tick() => {
                    if last_exchange.elapsed() >= self.config.watchdog_timeout {
                        tracing::warn!(
                            %epoch,
                            stale_secs = last_exchange.elapsed().as_secs(),
                            "realtime connection went stale, signalling timeout"
                        );
                        let _ = self.signals.send(RealtimeSignal::Timeout).await;
                        return;
                    }
                }

                frame = ws_stream.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            last_exchange = Instant::now();
                            if let Some(event) = parse_frame(&text) {
                                tracing::debug!(%epoch, kind = event.kind(), "platform event");
                                if self.signals.send(RealtimeSignal::Event(event)).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            last_exchange = Instant::now();
                            let _ = ws_sink.send(Message::Pong(data)).await;
                        }
                        Some(Ok(Message::Pong(_))) => {
                            last_exchange = Instant::now();
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!(%epoch, "realtime connection closed by platform");
                            return;
                        }
                        Some(Err(e)) => {
                            tracing::warn!(%epoch, "realtime connection error: {e}");
                            return;
                        }
                        None => {
                            tracing::info!(%epoch, "realtime stream ended");
                            return;
                        }
                        _ => {} // Binary — ignore
                    }
                }
            }
        }
    }
}

/// Parse a text frame into a typed event.
///
/// An unrecognized frame means the two sides disagree on the contract:
/// it is logged as an error and the event dropped, never mapped onto a
/// catch-all.
fn parse_frame(text: &str) -> Option<PlatformEvent> {
    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!(frame = text, "unrecognized platform frame, dropping event: {e}");
            None
        }
    }
}
