//! Translation
//!
//! 교사 음성 받아쓰기 결과를 영어/힌디어/타밀어로 번역합니다.
//! 공개 번역 엔드포인트(`translate_a/single?client=gtx`)를 사용합니다.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::InsyncError;

/// 번역 대상 언어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    En,
    Hi,
    Ta,
}

impl TargetLanguage {
    /// `ta`, `ta-IN`, `EN-us` 등에서 언어 부분만 사용
    pub fn parse(code: &str) -> Option<Self> {
        let lang = code.trim().split('-').next()?.to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            "ta" => Some(Self::Ta),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Ta => "ta",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Ta => "Tamil",
        }
    }
}

/// 음성 인식 언어 선택지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub static RECOGNITION_LANGUAGES: [LanguageOption; 5] = [
    LanguageOption { code: "auto", name: "Auto Detect", flag: "🌐" },
    LanguageOption { code: "en-US", name: "English (US)", flag: "🇺🇸" },
    LanguageOption { code: "en-IN", name: "English (India)", flag: "🇮🇳" },
    LanguageOption { code: "hi-IN", name: "Hindi", flag: "🇮🇳" },
    LanguageOption { code: "ta-IN", name: "Tamil", flag: "🇮🇳" },
];

/// 응답 `[[["번역","원문",...], ...], ...]`에서 번역 조각을 이어붙임
fn parse_translation(data: &serde_json::Value) -> Result<String, InsyncError> {
    let sentences = data
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| InsyncError::Translation("Unexpected translation response format".to_string()))?;

    let parts: Vec<&str> = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
        .collect();

    if parts.is_empty() {
        return Err(InsyncError::Translation("Empty translation response".to_string()));
    }
    Ok(parts.join(" "))
}

#[derive(Clone)]
pub struct Translator {
    http: reqwest::Client,
    endpoint: String,
}

impl Translator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, InsyncError> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, InsyncError> {
        Self::new(config.translate_endpoint.clone(), config.request_timeout())
    }

    /// 빈 텍스트는 요청 없이 None
    pub async fn translate(&self, text: &str, target: TargetLanguage) -> Result<Option<String>, InsyncError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        log::debug!("[Translate] Translating {} chars to {}", text.len(), target.name());

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsyncError::Translation(format!("Translation failed: {}", status)));
        }

        let data: serde_json::Value = response.json().await?;
        parse_translation(&data).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_target_language() {
        assert_eq!(TargetLanguage::parse("ta-IN"), Some(TargetLanguage::Ta));
        assert_eq!(TargetLanguage::parse("EN"), Some(TargetLanguage::En));
        assert_eq!(TargetLanguage::parse("hi"), Some(TargetLanguage::Hi));
        assert_eq!(TargetLanguage::parse(""), None);
        assert_eq!(TargetLanguage::parse("fr-FR"), None);
    }

    #[test]
    fn test_parse_translation_joins_sentences() {
        let data = json!([
            [["வணக்கம்.", "Hello.", null, null, 1], ["உட்காருங்கள்", "Please sit", null, null, 1]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&data).unwrap(), "வணக்கம். உட்காருங்கள்");
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shape() {
        assert!(parse_translation(&json!({"error": "quota"})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn test_empty_text_skips_request() {
        let translator = Translator::new("http://127.0.0.1:9/unused", Duration::from_secs(1)).unwrap();
        assert_eq!(translator.translate("   ", TargetLanguage::Ta).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unresponsive_endpoint_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let translator = Translator::new(format!("http://{}/translate_a/single", addr), Duration::from_millis(200)).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(3), translator.translate("Hello", TargetLanguage::Ta))
            .await
            .expect("translation settles");
        assert!(matches!(result, Err(InsyncError::Http(e)) if e.is_timeout()));
    }
}
