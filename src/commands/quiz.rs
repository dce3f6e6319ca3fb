//! Quiz Commands
//!
//! 레벨 선택, 문제 풀이, 결과 화면 전이를 프론트엔드에 노출

use std::sync::MutexGuard;

use serde::Deserialize;
use tauri::State;

use crate::commands::QuizSession;
use crate::error::{CommandError, CommandResult};
use crate::models::QuizLevel;
use crate::progress::SqliteProgressStore;
use crate::quiz::catalog;
use crate::quiz::{Advance, QuizEngine, QuizState};

type Engine = QuizEngine<SqliteProgressStore>;

fn engine<'a>(state: &'a State<QuizSession>) -> CommandResult<MutexGuard<'a, Engine>> {
    state.0.lock().map_err(|e| CommandError::lock("quiz engine", e))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLevelArgs {
    pub level_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAnswerArgs {
    pub option_index: usize,
}

/// 레벨 목록 (잠금/완료/최고 점수 포함)
#[tauri::command]
pub fn quiz_levels(state: State<QuizSession>) -> CommandResult<Vec<QuizLevel>> {
    Ok(engine(&state)?.levels().to_vec())
}

#[tauri::command]
pub fn quiz_state(state: State<QuizSession>) -> CommandResult<QuizState> {
    Ok(engine(&state)?.state().clone())
}

/// 없는 레벨은 `LEVEL_NOT_FOUND`, 잠긴 레벨은 상태를 바꾸지 않고 현재 상태를 돌려줌
#[tauri::command]
pub fn quiz_start_level(args: StartLevelArgs, state: State<QuizSession>) -> CommandResult<QuizState> {
    let mut engine = engine(&state)?;
    engine.level(&args.level_id)?;
    if !engine.start_level(&args.level_id) {
        log::debug!("[Quiz] start_level ignored: {}", args.level_id);
    }
    Ok(engine.state().clone())
}

#[tauri::command]
pub fn quiz_select_answer(args: SelectAnswerArgs, state: State<QuizSession>) -> CommandResult<QuizState> {
    let mut engine = engine(&state)?;
    engine.select_answer(args.option_index);
    Ok(engine.state().clone())
}

/// 답을 고르기 전에는 None
#[tauri::command]
pub fn quiz_advance(state: State<QuizSession>) -> CommandResult<Option<Advance>> {
    Ok(engine(&state)?.advance())
}

#[tauri::command]
pub fn quiz_retry(state: State<QuizSession>) -> CommandResult<QuizState> {
    let mut engine = engine(&state)?;
    engine.retry();
    Ok(engine.state().clone())
}

#[tauri::command]
pub fn quiz_exit(state: State<QuizSession>) -> CommandResult<()> {
    engine(&state)?.exit_to_levels();
    Ok(())
}

/// 모든 진행 상황 초기화 후 레벨 목록 반환
#[tauri::command]
pub fn quiz_reset_progress(state: State<QuizSession>) -> CommandResult<Vec<QuizLevel>> {
    let mut engine = engine(&state)?;
    engine.reset_all_progress();
    Ok(engine.levels().to_vec())
}

/// 퀴즈 화면이 해석해야 할 미디어 키
#[tauri::command]
pub fn quiz_media_keys(state: State<QuizSession>) -> CommandResult<Vec<String>> {
    Ok(catalog::quiz_media_keys(engine(&state)?.levels()))
}
