//! Media Preloader
//!
//! 이미지(전체, 디코딩까지 확인)와 비디오(앞부분 메타데이터 범위만)를 미리 받아 캐시를 데웁니다.
//! 모든 URL을 동시에 처리하고, 하나가 실패해도 나머지는 계속 진행합니다.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use reqwest::header::{CONTENT_TYPE, RANGE};

use crate::config::AppConfig;
use crate::error::InsyncError;
use crate::models::{PreloadReport, PreloadResult};

const IMAGE_LOAD_ERROR: &str = "Failed to load image";
const VIDEO_LOAD_ERROR: &str = "Failed to load video";

/// 비디오 메타데이터 요청 범위 (moov/헤더 박스가 보통 이 안에 있음)
const VIDEO_METADATA_RANGE: &str = "bytes=0-65535";

/// 미디어 로드 확인 수단
pub trait MediaProbe: Send + Sync {
    fn load_image(&self, url: &str) -> BoxFuture<'static, Result<(), InsyncError>>;

    fn load_video_metadata(&self, url: &str) -> BoxFuture<'static, Result<(), InsyncError>>;
}

fn is_image_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) => ct.trim().to_ascii_lowercase().starts_with("image/"),
        None => true,
    }
}

fn is_video_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) => {
            let ct = ct.trim().to_ascii_lowercase();
            ct.starts_with("video/") || ct.starts_with("application/octet-stream")
        }
        None => true,
    }
}

/// 받은 바이트가 실제로 디코딩되는 이미지인지 확인
fn decode_image(bytes: &[u8]) -> Result<(), InsyncError> {
    image::load_from_memory(bytes)?;
    Ok(())
}

/// HTTP 기반 기본 구현
#[derive(Clone)]
pub struct HttpMediaProbe {
    http: reqwest::Client,
}

impl HttpMediaProbe {
    pub fn new(timeout: Duration) -> Result<Self, InsyncError> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, InsyncError> {
        Self::new(config.request_timeout())
    }
}

impl MediaProbe for HttpMediaProbe {
    fn load_image(&self, url: &str) -> BoxFuture<'static, Result<(), InsyncError>> {
        let http = self.http.clone();
        let url = url.to_string();
        async move {
            let response = http.get(&url).send().await?.error_for_status()?;
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            if !is_image_content_type(content_type.as_deref()) {
                return Err(InsyncError::InvalidOperation(format!(
                    "unexpected content type {:?} for image {}",
                    content_type, url
                )));
            }
            let bytes = response.bytes().await?;
            tokio::task::spawn_blocking(move || decode_image(&bytes))
                .await
                .map_err(|e| InsyncError::InvalidOperation(format!("image decode task failed: {}", e)))?
        }
        .boxed()
    }

    fn load_video_metadata(&self, url: &str) -> BoxFuture<'static, Result<(), InsyncError>> {
        let http = self.http.clone();
        let url = url.to_string();
        async move {
            let response = http
                .get(&url)
                .header(RANGE, VIDEO_METADATA_RANGE)
                .send()
                .await?
                .error_for_status()?;
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            if !is_video_content_type(content_type.as_deref()) {
                return Err(InsyncError::InvalidOperation(format!(
                    "unexpected content type {:?} for video {}",
                    content_type, url
                )));
            }
            response.bytes().await?;
            Ok(())
        }
        .boxed()
    }
}

pub struct MediaPreloader {
    probe: Arc<dyn MediaProbe>,
}

impl MediaPreloader {
    pub fn new(probe: Arc<dyn MediaProbe>) -> Self {
        Self { probe }
    }

    pub async fn preload_images(&self, urls: &[String]) -> Vec<PreloadResult> {
        join_all(urls.iter().map(|url| {
            let probe = self.probe.load_image(url);
            settle(url.clone(), probe, IMAGE_LOAD_ERROR)
        }))
        .await
    }

    pub async fn preload_videos(&self, urls: &[String]) -> Vec<PreloadResult> {
        join_all(urls.iter().map(|url| {
            let probe = self.probe.load_video_metadata(url);
            settle(url.clone(), probe, VIDEO_LOAD_ERROR)
        }))
        .await
    }

    /// 이미지/비디오를 모두 처리한 뒤 결과 반환
    pub async fn preload(&self, images: &[String], videos: &[String]) -> PreloadReport {
        let (images, videos) = futures::join!(self.preload_images(images), self.preload_videos(videos));
        log::debug!(
            "[Preloader] images {}/{} loaded, videos {}/{} loaded",
            images.iter().filter(|r| r.loaded).count(),
            images.len(),
            videos.iter().filter(|r| r.loaded).count(),
            videos.len()
        );
        PreloadReport { images, videos }
    }
}

async fn settle(
    url: String,
    probe: BoxFuture<'static, Result<(), InsyncError>>,
    error_tag: &'static str,
) -> PreloadResult {
    match probe.await {
        Ok(()) => PreloadResult { url, loaded: true, error: None },
        Err(e) => {
            log::debug!("[Preloader] {} ({}): {}", error_tag, url, e);
            PreloadResult {
                url,
                loaded: false,
                error: Some(error_tag.to_string()),
            }
        }
    }
}
