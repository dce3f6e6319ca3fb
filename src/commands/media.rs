//! Media Commands
//!
//! Supabase Storage 서명 URL 해석과 미디어 프리로드

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::commands::MediaServices;
use crate::error::CommandResult;
use crate::media::library::{AlphabetEntry, WordEntry};
use crate::media::MediaLibrary;
use crate::models::{MediaRef, PreloadReport, ResolvedAsset};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloadArgs {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaLibraryView {
    pub alphabet: Vec<AlphabetEntry>,
    pub vocabulary: Vec<WordEntry>,
    pub preload: PreloadReport,
}

/// 단일 키 해석 (실패는 `error` 필드로 전달)
#[tauri::command]
pub async fn resolve_media(file_name: String, state: State<'_, MediaServices>) -> CommandResult<MediaRef> {
    Ok(state.resolver.resolve(&file_name).await)
}

#[tauri::command]
pub async fn resolve_media_many(
    file_names: Vec<String>,
    state: State<'_, MediaServices>,
) -> CommandResult<Vec<ResolvedAsset>> {
    Ok(state.resolver.resolve_many(&file_names).await)
}

#[tauri::command]
pub async fn preload_media(args: PreloadArgs, state: State<'_, MediaServices>) -> CommandResult<PreloadReport> {
    Ok(state.preloader.preload(&args.images, &args.videos).await)
}

/// 알파벳/어휘 갤러리를 해석하고 프리로드까지 수행
///
/// 결과 라이브러리는 지문자(fingerspelling) 명령에서 재사용합니다.
#[tauri::command]
pub async fn load_media_library(state: State<'_, MediaServices>) -> CommandResult<MediaLibraryView> {
    let library = MediaLibrary::load(&state.resolver).await;
    let preload = state
        .preloader
        .preload(&library.image_urls(), &library.video_urls())
        .await;

    let view = MediaLibraryView {
        alphabet: library.alphabet(),
        vocabulary: library.vocabulary(),
        preload,
    };
    *state.library.write().await = Some(library);
    Ok(view)
}
