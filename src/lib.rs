//! InSync - ISL 학습 앱 백엔드 라이브러리
//!
//! 퀴즈 진행/저장, Supabase Storage 미디어 해석, 교사 패널 번역을 담당합니다.
//! Tauri 데스크톱 셸은 `desktop` feature로 분리되어 있습니다.

pub mod config;
pub mod db;
pub mod error;
pub mod fingerspell;
pub mod gesture;
pub mod logging;
pub mod media;
pub mod models;
pub mod progress;
pub mod quiz;
pub mod translate;

#[cfg(feature = "desktop")]
pub mod commands;

#[cfg(feature = "desktop")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "desktop")]
use tauri::Manager;

/// Tauri 앱 실행
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();

    tauri::Builder::default()
        .setup(|app| {
            // .env.local / .env 로드 후 환경 변수에서 설정 구성
            let config = config::AppConfig::load();

            let db_path = app.path().app_data_dir()?.join(&config.database_file);
            log::info!("[App] Database: {}", db_path.display());

            let store = progress::SqliteProgressStore::new(db::Database::new(&db_path)?)?;
            app.manage(commands::QuizSession(Mutex::new(quiz::QuizEngine::new(store))));

            let backend = Arc::new(media::SupabaseStorage::from_config(&config)?);
            let resolver = Arc::new(media::MediaResolver::new(
                backend,
                media::ResolverOptions::from(&config),
            ));
            let preloader = media::MediaPreloader::new(Arc::new(media::HttpMediaProbe::from_config(&config)?));
            app.manage(commands::MediaServices::new(resolver, preloader));

            app.manage(commands::TextServices {
                translator: translate::Translator::from_config(&config)?,
            });
            app.manage(commands::GestureSession::demo());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::quiz::quiz_levels,
            commands::quiz::quiz_state,
            commands::quiz::quiz_start_level,
            commands::quiz::quiz_select_answer,
            commands::quiz::quiz_advance,
            commands::quiz::quiz_retry,
            commands::quiz::quiz_exit,
            commands::quiz::quiz_reset_progress,
            commands::quiz::quiz_media_keys,
            commands::media::resolve_media,
            commands::media::resolve_media_many,
            commands::media::preload_media,
            commands::media::load_media_library,
            commands::text::recognition_languages,
            commands::text::translate_text,
            commands::text::fingerspell_last_word,
            commands::gesture::poll_gesture,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
