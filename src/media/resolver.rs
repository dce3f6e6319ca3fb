//! Media Reference Resolver
//!
//! 논리 키(`alphabets/A.png`, `gifs/Tree.mp4`)를 서명 URL로 변환합니다.
//! - 캐시: 키별 URL + 발급 시각, TTL(기본 1시간)이 지나면 없는 것으로 취급
//! - 진행 중 요청 공유: 같은 키에 대해 동시에 하나의 백엔드 호출만 존재
//! - 실패는 `MediaRef.error`로 돌려주며 캐시하지 않음
//! - 백엔드 호출은 `request_timeout` 안에 끝나지 않으면 실패로 정리

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;

use crate::config::AppConfig;
use crate::media::backend::AssetBackend;
use crate::models::{MediaRef, ResolvedAsset};

/// 캐시 만료 판단용 시계
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    url: String,
    fetched_at: i64,
}

type PendingRef = Shared<BoxFuture<'static, MediaRef>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 리졸버 설정
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub bucket: String,
    pub signed_url_ttl_secs: u64,
    pub cache_ttl_secs: u64,
    pub request_timeout: Duration,
}

impl From<&AppConfig> for ResolverOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            signed_url_ttl_secs: config.signed_url_ttl_secs,
            cache_ttl_secs: config.cache_ttl_secs,
            request_timeout: config.request_timeout(),
        }
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// 앱 인스턴스당 하나 생성해서 공유
pub struct MediaResolver {
    backend: Arc<dyn AssetBackend>,
    clock: Arc<dyn Clock>,
    options: ResolverOptions,
    cache: Arc<Mutex<HashMap<String, CacheEntry>>>,
    in_flight: Arc<Mutex<HashMap<String, PendingRef>>>,
}

impl MediaResolver {
    pub fn new(backend: Arc<dyn AssetBackend>, options: ResolverOptions) -> Self {
        Self::with_clock(backend, options, Arc::new(SystemClock))
    }

    pub fn with_clock(
        backend: Arc<dyn AssetBackend>,
        options: ResolverOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            clock,
            options,
            cache: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 키 하나를 URL로 변환. 실패해도 panic/Err 없이 `MediaRef`로 반환.
    pub async fn resolve(&self, key: &str) -> MediaRef {
        if key.is_empty() {
            return MediaRef::failed("File name is required");
        }

        let pending = {
            let mut in_flight = lock(&self.in_flight);
            if let Some(url) = self.cached_url(key) {
                return MediaRef::resolved(url);
            }
            match in_flight.get(key) {
                Some(pending) => pending.clone(),
                None => {
                    let pending = self.lookup(key);
                    in_flight.insert(key.to_string(), pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// 여러 키를 동시에 변환. 입력 순서 유지, 개별 실패는 항목의 error로.
    pub async fn resolve_many(&self, keys: &[String]) -> Vec<ResolvedAsset> {
        join_all(keys.iter().map(|key| async move {
            let media = self.resolve(key).await;
            ResolvedAsset {
                key: key.clone(),
                url: media.url,
                error: media.error,
            }
        }))
        .await
    }

    /// 만료되지 않은 캐시 URL
    fn cached_url(&self, key: &str) -> Option<String> {
        let ttl_millis = i64::try_from(self.options.cache_ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        let now = self.clock.now_millis();
        let mut cache = lock(&self.cache);
        match cache.get(key) {
            Some(entry) if now.saturating_sub(entry.fetched_at) < ttl_millis => Some(entry.url.clone()),
            Some(_) => {
                cache.remove(key);
                None
            }
            None => None,
        }
    }

    fn lookup(&self, key: &str) -> PendingRef {
        let request = self.backend.create_signed_url(
            &self.options.bucket,
            key,
            self.options.signed_url_ttl_secs,
        );
        let timeout = self.options.request_timeout;
        let clock = Arc::clone(&self.clock);
        let cache = Arc::clone(&self.cache);
        // 맵이 이 future를 보관하므로 강한 참조를 잡으면 순환이 생김
        let in_flight: Weak<Mutex<HashMap<String, PendingRef>>> = Arc::downgrade(&self.in_flight);
        let key = key.to_string();

        async move {
            let media = match tokio::time::timeout(timeout, request).await {
                Ok(Ok(url)) => {
                    lock(&cache).insert(
                        key.clone(),
                        CacheEntry {
                            url: url.clone(),
                            fetched_at: clock.now_millis(),
                        },
                    );
                    MediaRef::resolved(url)
                }
                Ok(Err(e)) => {
                    log::error!("[MediaResolver] Error getting URL for {}: {}", key, e);
                    MediaRef::failed(e.to_string())
                }
                Err(_) => {
                    log::error!("[MediaResolver] Timed out getting URL for {} after {:?}", key, timeout);
                    MediaRef::failed(format!("Request timed out after {:?}", timeout))
                }
            };
            if let Some(in_flight) = in_flight.upgrade() {
                lock(&in_flight).remove(&key);
            }
            media
        }
        .boxed()
        .shared()
    }
}
