//! Bridge configuration
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | PLATFORM_BASE_URL | https://localhost:3000 | 平台 REST 地址 |
//! | PLATFORM_WS_URL | wss://localhost:3000 | 平台推送地址 |
//! | PLATFORM_TOKEN | (empty) | 平台访问令牌 |
//! | VENUE_ID | (empty) | 门店标识 |
//! | CAPTURE_MODE | restaurant | bistro \| restaurant |
//! | WATCHDOG_TIMEOUT_SECS | 90 | 推送连接失活阈值(秒) |
//! | PING_INTERVAL_SECS | 30 | 保活间隔(秒) |

use std::str::FromStr;
use std::time::Duration;

use platform_client::{ChannelConfig, GatewayResult, HttpGateway};

/// Payment-capture mode for the venue.
///
/// Bistro captures at the moment of acceptance (single pass, no later
/// confirmation round); restaurant separates acceptance from capture,
/// the latter triggered by a ready-to-pay push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Bistro,
    Restaurant,
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bistro" => Ok(Self::Bistro),
            "restaurant" => Ok(Self::Restaurant),
            other => Err(format!("unknown capture mode: {other}")),
        }
    }
}

/// Bridge configuration — all knobs of the reconciliation engine
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Platform REST base URL
    pub platform_base_url: String,
    /// Platform push endpoint base URL
    pub platform_ws_url: String,
    /// Platform access token
    pub platform_token: String,
    /// Venue identifier (one realtime connection per venue)
    pub venue_id: String,
    /// Payment-capture mode
    pub capture_mode: CaptureMode,
    /// Staleness threshold for the connection watchdog (seconds)
    pub watchdog_timeout_secs: u64,
    /// Keepalive ping interval (seconds)
    pub ping_interval_secs: u64,
}

impl BridgeConfig {
    /// Load `.env` (when present) and read the configuration from the
    /// environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            platform_base_url: std::env::var("PLATFORM_BASE_URL")
                .unwrap_or_else(|_| "https://localhost:3000".into()),
            platform_ws_url: std::env::var("PLATFORM_WS_URL")
                .unwrap_or_else(|_| "wss://localhost:3000".into()),
            platform_token: std::env::var("PLATFORM_TOKEN").unwrap_or_default(),
            venue_id: std::env::var("VENUE_ID").unwrap_or_default(),
            capture_mode: std::env::var("CAPTURE_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(CaptureMode::Restaurant),
            watchdog_timeout_secs: std::env::var("WATCHDOG_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(90),
            ping_interval_secs: std::env::var("PING_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        venue_id: impl Into<String>,
        capture_mode: CaptureMode,
    ) -> Self {
        let mut config = Self::from_env();
        config.venue_id = venue_id.into();
        config.capture_mode = capture_mode;
        config
    }

    /// Build the realtime channel configuration for this venue.
    pub fn channel_config(&self) -> ChannelConfig {
        let mut config = ChannelConfig::new(
            self.platform_ws_url.as_str(),
            self.venue_id.as_str(),
            self.platform_token.as_str(),
        );
        config.watchdog_timeout = Duration::from_secs(self.watchdog_timeout_secs);
        config.ping_interval = Duration::from_secs(self.ping_interval_secs);
        config
    }

    /// Build the HTTP gateway for this venue.
    pub fn http_gateway(&self) -> GatewayResult<HttpGateway> {
        HttpGateway::new(
            self.platform_base_url.as_str(),
            self.venue_id.as_str(),
            self.platform_token.as_str(),
        )
    }
}
