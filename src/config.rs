//! App Configuration
//!
//! `.env.local` / `.env` 및 환경변수에서 Supabase 스토리지, 번역 엔드포인트 설정을 읽습니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BUCKET: &str = "isl-assets";
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_DATABASE_FILE: &str = "insync.db";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// 런타임 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub bucket: String,
    pub signed_url_ttl_secs: u64,
    pub cache_ttl_secs: u64,
    pub translate_endpoint: String,
    pub database_file: String,
    /// 네트워크 요청 하나의 최대 대기 시간
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            bucket: DEFAULT_BUCKET.to_string(),
            signed_url_ttl_secs: DEFAULT_SIGNED_URL_TTL_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// `.env.local`을 찾아 로드한 뒤 환경변수에서 설정 구성
    pub fn load() -> Self {
        load_env_files();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 구성 (테스트에서 환경변수 대신 사용)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // 우선순위: SUPABASE_* > VITE_SUPABASE_*
        let first = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .filter_map(|k| lookup(*k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let config = Self {
            supabase_url: first(&["SUPABASE_URL", "VITE_SUPABASE_URL"])
                .map(|u| u.trim_end_matches('/').to_string()),
            supabase_anon_key: first(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]),
            bucket: first(&["INSYNC_BUCKET"]).unwrap_or(defaults.bucket),
            signed_url_ttl_secs: first(&["INSYNC_SIGNED_URL_TTL_SECS"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.signed_url_ttl_secs),
            cache_ttl_secs: first(&["INSYNC_CACHE_TTL_SECS"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            translate_endpoint: first(&["INSYNC_TRANSLATE_ENDPOINT"])
                .unwrap_or(defaults.translate_endpoint),
            database_file: first(&["INSYNC_DATABASE_FILE"]).unwrap_or(defaults.database_file),
            request_timeout_secs: first(&["INSYNC_REQUEST_TIMEOUT_SECS"])
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        };

        if !config.has_storage_credentials() {
            log::warn!(
                "[Config] Supabase configuration not found. Set SUPABASE_URL and SUPABASE_ANON_KEY (or VITE_ equivalents)."
            );
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn has_storage_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

fn is_valid_env_key(key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    // 관례적으로 ENV 키는 A-Z0-9_ 로 제한 (VITE_*, SUPABASE_* 등)
    key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// `KEY=VALUE` 라인을 파싱 (주석, 코드펜스, 형식에 맞지 않는 라인은 None)
fn parse_env_line(raw_line: &str) -> Option<(String, String)> {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with("```") {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line).trim();
    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if !is_valid_env_key(key) {
        return None;
    }

    let mut value = v.trim().to_string();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = value[1..value.len() - 1].to_string();
    }

    Some((key.to_string(), value))
}

fn try_load_env_lenient(path: &Path) -> std::io::Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let mut loaded = 0usize;

    for (key, value) in text.lines().filter_map(parse_env_line) {
        // 이미 설정된 값이 "비어있지 않으면" 덮어쓰지 않음.
        if let Ok(existing) = std::env::var(&key) {
            if !existing.trim().is_empty() {
                continue;
            }
        }
        std::env::set_var(&key, value);
        loaded += 1;
    }

    Ok(loaded)
}

fn find_upwards(start: PathBuf, filename: &str, max_hops: usize) -> Option<PathBuf> {
    let mut cur = start;
    for _ in 0..=max_hops {
        let candidate = cur.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        if !cur.pop() {
            break;
        }
    }
    None
}

/// `.env.local` → `.env` 순으로 로드 (없으면 무시)
pub fn load_env_files() {
    if dotenvy::from_filename(".env.local").is_ok() {
        let _ = dotenvy::dotenv();
        return;
    }

    // CWD가 프로젝트 루트가 아닐 수 있으니, 상위로 올라가며 탐색
    let mut candidates: Vec<PathBuf> = vec![];
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_upwards(cwd, ".env.local", 6) {
            candidates.push(p);
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_upwards(dir.to_path_buf(), ".env.local", 8) {
                candidates.push(p);
            }
        }
    }

    for p in candidates {
        if dotenvy::from_path(&p).is_ok() {
            log::debug!("[Config] Loaded {}", p.display());
            break;
        }
        // strict 파서가 실패하면(예: markdown 포함), lenient 로더로 보강
        match try_load_env_lenient(&p) {
            Ok(loaded) if loaded > 0 => {
                log::debug!("[Config] Loaded {} keys leniently from {}", loaded, p.display());
                break;
            }
            Ok(_) => {}
            Err(e) => log::warn!("[Config] Failed to read {}: {}", p.display(), e),
        }
    }

    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert!(!config.has_storage_credentials());
        assert_eq!(config.bucket, "isl-assets");
        assert_eq!(config.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_plain_names_win_over_vite_names() {
        let config = AppConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://vite.supabase.co"),
            ("SUPABASE_URL", "https://plain.supabase.co/"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
            ("INSYNC_CACHE_TTL_SECS", "60"),
            ("INSYNC_SIGNED_URL_TTL_SECS", "not-a-number"),
        ]));
        assert_eq!(config.supabase_url.as_deref(), Some("https://plain.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("anon"));
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.signed_url_ttl_secs, 3600);
    }

    #[test]
    fn test_request_timeout_override() {
        let config = AppConfig::from_lookup(lookup(&[("INSYNC_REQUEST_TIMEOUT_SECS", "5")]));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        // 0초는 무한 대기와 같으므로 기본값 유지
        let config = AppConfig::from_lookup(lookup(&[("INSYNC_REQUEST_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_env_line() {
        assert_eq!(
            parse_env_line("export VITE_SUPABASE_URL=\"https://x.supabase.co\""),
            Some(("VITE_SUPABASE_URL".to_string(), "https://x.supabase.co".to_string()))
        );
        assert_eq!(parse_env_line("# comment"), None);
        assert_eq!(parse_env_line("```bash"), None);
        assert_eq!(parse_env_line("lower_case=1"), None);
        assert_eq!(parse_env_line("Some prose without equals"), None);
    }
}
