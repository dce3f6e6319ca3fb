//! Asset Backend
//!
//! 스토리지 버킷의 객체에 대한 서명 URL 발급. 기본 구현은 Supabase Storage REST API
//! (`POST /storage/v1/object/sign/{bucket}/{path}`)를 직접 호출합니다.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AppConfig;
use crate::error::InsyncError;

/// 서명 URL 발급 백엔드
pub trait AssetBackend: Send + Sync {
    fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in_secs: u64,
    ) -> BoxFuture<'static, Result<String, InsyncError>>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

#[derive(Debug, Deserialize)]
struct StorageError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Supabase Storage 클라이언트
#[derive(Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    /// `https://<project>.supabase.co/` (끝 슬래시 포함)
    base_url: Option<Url>,
    anon_key: Option<String>,
}

impl SupabaseStorage {
    /// `timeout`은 연결부터 응답 본문까지 요청 하나 전체에 적용
    pub fn new(base_url: Option<&str>, anon_key: Option<String>, timeout: Duration) -> Result<Self, InsyncError> {
        let base_url = base_url
            .map(|u| {
                Url::parse(&format!("{}/", u.trim_end_matches('/')))
                    .map_err(|e| InsyncError::Config(format!("Invalid Supabase URL {}: {}", u, e)))
            })
            .transpose()?;

        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url,
            anon_key,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, InsyncError> {
        Self::new(
            config.supabase_url.as_deref(),
            config.supabase_anon_key.clone(),
            config.request_timeout(),
        )
    }
}

/// 경로 세그먼트별 퍼센트 인코딩 (`/`는 유지)
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn sign_endpoint(base: &Url, bucket: &str, path: &str) -> Result<Url, InsyncError> {
    base.join(&format!(
        "storage/v1/object/sign/{}/{}",
        encode_path(bucket),
        encode_path(path.trim_start_matches('/'))
    ))
    .map_err(|e| InsyncError::Config(format!("Invalid storage path {}: {}", path, e)))
}

/// 응답의 상대 경로(`/object/sign/...?token=`)를 절대 URL로
fn absolute_signed_url(base: &Url, body: &str) -> Result<String, InsyncError> {
    let parsed: SignResponse = serde_json::from_str(body)?;
    let relative = parsed.signed_url.trim_start_matches('/');
    let url = base
        .join(&format!("storage/v1/{}", relative))
        .map_err(|e| InsyncError::AssetBackend(format!("Invalid signed URL: {}", e)))?;
    Ok(url.to_string())
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<StorageError>(body) {
        Ok(StorageError { message: Some(message), .. }) => message,
        Ok(StorageError { error: Some(error), .. }) => error,
        _ => format!("Request failed with status {}: {}", status, body),
    }
}

impl AssetBackend for SupabaseStorage {
    fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in_secs: u64,
    ) -> BoxFuture<'static, Result<String, InsyncError>> {
        let http = self.http.clone();
        let base_url = self.base_url.clone();
        let anon_key = self.anon_key.clone();
        let bucket = bucket.to_string();
        let path = path.to_string();

        async move {
            let (Some(base_url), Some(anon_key)) = (base_url, anon_key) else {
                return Err(InsyncError::Config(
                    "Supabase configuration not found".to_string(),
                ));
            };

            let endpoint = sign_endpoint(&base_url, &bucket, &path)?;
            log::debug!("[Storage] Signing {}/{}", bucket, path);

            let response = http
                .post(endpoint)
                .header("apikey", anon_key.as_str())
                .header("Authorization", format!("Bearer {}", anon_key))
                .json(&SignRequest { expires_in: expires_in_secs })
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(InsyncError::AssetBackend(error_message(status, &body)));
            }

            absolute_signed_url(&base_url, &body)
        }
        .boxed()
    }
}
