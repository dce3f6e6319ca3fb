//! Gesture Commands
//!
//! 학생 카메라 프레임마다 호출되는 제스처 폴링

use tauri::State;

use crate::commands::GestureSession;
use crate::error::{CommandError, CommandResult};
use crate::gesture::GestureResult;

#[tauri::command]
pub fn poll_gesture(state: State<GestureSession>) -> CommandResult<Option<GestureResult>> {
    let mut source = state.0.lock().map_err(|e| CommandError::lock("gesture source", e))?;
    Ok(source.poll(chrono::Utc::now().timestamp_millis()))
}
