//! Session Progress Store
//!
//! 퀴즈 레벨 진행 상황(unlocked/completed/bestScore)을 `insync-quiz-progress` 키 아래
//! JSON 배열로 저장합니다. 저장된 값이 손상되었으면 없는 것으로 간주하고 기본값을 돌려줍니다.

use std::sync::Mutex;

use crate::db::Database;
use crate::error::InsyncError;
use crate::models::ProgressSnapshot;
use crate::quiz::catalog;

/// 진행 상황 저장 키
pub const PROGRESS_KEY: &str = "insync-quiz-progress";

/// 진행 상황 저장소
pub trait ProgressStore {
    /// 저장된 원본 JSON
    fn read_raw(&self) -> Result<Option<String>, InsyncError>;

    fn write_raw(&self, json: &str) -> Result<(), InsyncError>;

    fn remove_raw(&self) -> Result<(), InsyncError>;

    /// 저장된 스냅샷 로드. 없거나 손상되었으면 기본 스냅샷.
    fn load(&self) -> ProgressSnapshot {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return catalog::default_snapshot(),
            Err(e) => {
                log::warn!("[Progress] Failed to read saved progress: {}", e);
                return catalog::default_snapshot();
            }
        };

        match parse_snapshot(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("[Progress] Ignoring malformed saved progress: {}", e);
                catalog::default_snapshot()
            }
        }
    }

    /// 스냅샷 전체 덮어쓰기 (부분 병합 없음)
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), InsyncError> {
        let json = serde_json::to_string(snapshot)?;
        self.write_raw(&json)
    }

    fn clear(&self) -> Result<(), InsyncError> {
        self.remove_raw()
    }
}

fn parse_snapshot(raw: &str) -> Result<ProgressSnapshot, InsyncError> {
    let snapshot: ProgressSnapshot = serde_json::from_str(raw)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// SQLite `kv_store` 기반 저장소 (앱 재시작 후에도 유지)
pub struct SqliteProgressStore {
    db: Database,
}

impl SqliteProgressStore {
    pub fn new(db: Database) -> Result<Self, InsyncError> {
        db.initialize()?;
        Ok(Self { db })
    }
}

impl ProgressStore for SqliteProgressStore {
    fn read_raw(&self) -> Result<Option<String>, InsyncError> {
        self.db.kv_get(PROGRESS_KEY)
    }

    fn write_raw(&self, json: &str) -> Result<(), InsyncError> {
        self.db.kv_set(PROGRESS_KEY, json)
    }

    fn remove_raw(&self) -> Result<(), InsyncError> {
        self.db.kv_delete(PROGRESS_KEY)
    }
}

/// 메모리 저장소 (테스트, 임시 세션)
#[derive(Default)]
pub struct MemoryProgressStore {
    value: Mutex<Option<String>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 원본 JSON을 그대로 심어둠
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { value: Mutex::new(Some(raw.into())) }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, InsyncError> {
        self.value
            .lock()
            .map_err(|e| InsyncError::InvalidOperation(format!("progress store lock poisoned: {}", e)))
    }
}

impl ProgressStore for MemoryProgressStore {
    fn read_raw(&self) -> Result<Option<String>, InsyncError> {
        Ok(self.slot()?.clone())
    }

    fn write_raw(&self, json: &str) -> Result<(), InsyncError> {
        *self.slot()? = Some(json.to_string());
        Ok(())
    }

    fn remove_raw(&self) -> Result<(), InsyncError> {
        *self.slot()? = None;
        Ok(())
    }
}

impl<S: ProgressStore + ?Sized> ProgressStore for &S {
    fn read_raw(&self) -> Result<Option<String>, InsyncError> {
        (**self).read_raw()
    }

    fn write_raw(&self, json: &str) -> Result<(), InsyncError> {
        (**self).write_raw(json)
    }

    fn remove_raw(&self) -> Result<(), InsyncError> {
        (**self).remove_raw()
    }
}
