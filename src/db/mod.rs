//! Database Module
//!
//! SQLite 데이터베이스 관리

mod schema;

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::InsyncError;

/// 데이터베이스 래퍼
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 새 데이터베이스 연결 생성 (상위 디렉토리가 없으면 생성)
    pub fn new(path: &Path) -> Result<Self, InsyncError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// 메모리 DB (테스트/임시 세션용)
    pub fn open_in_memory() -> Result<Self, InsyncError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// 데이터베이스 스키마 초기화
    pub fn initialize(&self) -> Result<(), InsyncError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA)?;
        Ok(())
    }

    /// 키 조회
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, InsyncError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// 키 저장 (기존 값 전체 덮어쓰기)
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), InsyncError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            (key, value, now),
        )?;
        Ok(())
    }

    /// 키 삭제
    pub fn kv_delete(&self, key: &str) -> Result<(), InsyncError> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }
}
