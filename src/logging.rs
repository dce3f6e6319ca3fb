//! Logging
//!
//! `log` 파사드 + `env_logger` 초기화. 기본 레벨은 info, `RUST_LOG`로 변경 가능.

/// 로거 초기화 (여러 번 호출해도 안전)
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
