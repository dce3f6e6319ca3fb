//! InSync Error Types
//!
//! 애플리케이션 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

/// InSync 애플리케이션 에러
#[derive(Error, Debug)]
pub enum InsyncError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Asset backend error: {0}")]
    AssetBackend(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Level not found: {0}")]
    LevelNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Tauri 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl CommandError {
    /// 뮤텍스 poisoning 등 잠금 실패
    pub fn lock(what: &str, e: impl std::fmt::Display) -> Self {
        CommandError {
            code: "LOCK_ERROR".to_string(),
            message: format!("Failed to acquire {} lock: {}", what, e),
            details: None,
        }
    }
}

impl From<InsyncError> for CommandError {
    fn from(error: InsyncError) -> Self {
        let code = match &error {
            InsyncError::Database(_) => "DB_ERROR",
            InsyncError::Io(_) => "IO_ERROR",
            InsyncError::Serialization(_) => "SERIALIZATION_ERROR",
            InsyncError::Http(_) => "HTTP_ERROR",
            InsyncError::Image(_) => "IMAGE_ERROR",
            InsyncError::Config(_) => "CONFIG_ERROR",
            InsyncError::AssetBackend(_) => "ASSET_BACKEND_ERROR",
            InsyncError::Translation(_) => "TRANSLATION_ERROR",
            InsyncError::LevelNotFound(_) => "LEVEL_NOT_FOUND",
            InsyncError::InvalidOperation(_) => "INVALID_OPERATION",
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

/// Tauri 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
