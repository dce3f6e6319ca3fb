//! Text Commands
//!
//! 교사 패널: 받아쓰기 번역과 마지막 단어 지문자 변환

use serde::Deserialize;
use tauri::State;

use crate::commands::{MediaServices, TextServices};
use crate::error::{CommandError, CommandResult};
use crate::fingerspell::fingerspell_urls;
use crate::media::MediaLibrary;
use crate::translate::{LanguageOption, TargetLanguage, RECOGNITION_LANGUAGES};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateArgs {
    pub text: String,
    /// 비어 있으면 번역하지 않음
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerspellArgs {
    #[serde(default)]
    pub final_text: String,
    #[serde(default)]
    pub interim_text: String,
}

#[tauri::command]
pub fn recognition_languages() -> Vec<LanguageOption> {
    RECOGNITION_LANGUAGES.to_vec()
}

#[tauri::command]
pub async fn translate_text(args: TranslateArgs, state: State<'_, TextServices>) -> CommandResult<Option<String>> {
    let Some(code) = args.target.as_deref().filter(|c| !c.trim().is_empty()) else {
        return Ok(None);
    };
    let target = TargetLanguage::parse(code).ok_or_else(|| CommandError {
        code: "INVALID_OPERATION".to_string(),
        message: format!("Unsupported target language: {}", code),
        details: None,
    })?;

    state
        .translator
        .translate(&args.text, target)
        .await
        .map_err(CommandError::from)
}

/// 마지막 단어의 알파벳 이미지 URL 목록
#[tauri::command]
pub async fn fingerspell_last_word(
    args: FingerspellArgs,
    state: State<'_, MediaServices>,
) -> CommandResult<Vec<String>> {
    {
        let library = state.library.read().await;
        if let Some(library) = library.as_ref() {
            return Ok(fingerspell_urls(&args.final_text, &args.interim_text, library.letters()));
        }
    }

    let library = MediaLibrary::load(&state.resolver).await;
    let urls = fingerspell_urls(&args.final_text, &args.interim_text, library.letters());
    *state.library.write().await = Some(library);
    Ok(urls)
}
