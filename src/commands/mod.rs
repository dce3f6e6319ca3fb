//! Tauri Commands Module
//!
//! 프론트엔드에서 호출 가능한 Tauri 명령어와 앱 상태 정의

pub mod gesture;
pub mod media;
pub mod quiz;
pub mod text;

use std::sync::{Arc, Mutex};

use crate::gesture::{DemoGestureSource, GestureSource};
use crate::media::{MediaLibrary, MediaPreloader, MediaResolver};
use crate::progress::SqliteProgressStore;
use crate::quiz::QuizEngine;
use crate::translate::Translator;

/// 퀴즈 엔진 상태 (진행 상황은 SQLite에 저장)
pub struct QuizSession(pub Mutex<QuizEngine<SqliteProgressStore>>);

/// 미디어 해석/프리로드 서비스
pub struct MediaServices {
    pub resolver: Arc<MediaResolver>,
    pub preloader: MediaPreloader,
    /// 첫 `load_media_library` 호출 전에는 None
    pub library: tokio::sync::RwLock<Option<MediaLibrary>>,
}

impl MediaServices {
    pub fn new(resolver: Arc<MediaResolver>, preloader: MediaPreloader) -> Self {
        Self {
            resolver,
            preloader,
            library: tokio::sync::RwLock::new(None),
        }
    }
}

pub struct TextServices {
    pub translator: Translator,
}

/// 학생→교사 패널 제스처 공급원
pub struct GestureSession(pub Mutex<Box<dyn GestureSource + Send>>);

impl GestureSession {
    pub fn demo() -> Self {
        Self(Mutex::new(Box::new(DemoGestureSource::new())))
    }
}
