/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque correlation id for a realtime connection epoch.
///
/// A new epoch is minted on every (re)connect; it tags every log line of
/// that session so interleaved reconnects can be told apart.
pub fn connection_epoch() -> String {
    uuid::Uuid::new_v4().to_string()
}
