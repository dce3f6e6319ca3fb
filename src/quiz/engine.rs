//! Quiz Engine
//!
//! `Idle → InProgress → Result` 상태 머신. 레벨 시작 시 문항마다 독립적으로 선택지를 섞고,
//! 마지막 문항에서 합격 여부/최고 점수/다음 레벨 잠금 해제를 계산해 저장소에 기록합니다.
//! 모든 변경 연산은 `&mut self`라 호출이 직렬화됩니다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::InsyncError;
use crate::models::{ProgressSnapshot, QuizLevel, ShuffledQuestion};
use crate::progress::ProgressStore;
use crate::quiz::catalog;
use crate::quiz::shuffle::shuffle_question;

/// 진행 중인 퀴즈 세션
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveQuiz {
    pub level_id: String,
    pub questions: Vec<ShuffledQuestion>,
    pub question_index: usize,
    pub score: u32,
    pub selected_answer: Option<usize>,
}

impl ActiveQuiz {
    pub fn current(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.question_index)
    }
}

/// 레벨 종료 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub level_id: String,
    pub passed: bool,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub best_score: u32,
    /// 이번 합격으로 열린 다음 레벨
    pub next_level_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QuizState {
    Idle,
    InProgress(ActiveQuiz),
    Result(QuizOutcome),
}

/// `advance()` 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advance {
    #[serde(rename_all = "camelCase")]
    Next { question_index: usize, was_correct: bool },
    Finished(QuizOutcome),
}

pub struct QuizEngine<S, R = StdRng> {
    store: S,
    snapshot: ProgressSnapshot,
    state: QuizState,
    rng: R,
}

impl<S: ProgressStore> QuizEngine<S, StdRng> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }
}

impl<S: ProgressStore, R: Rng> QuizEngine<S, R> {
    /// 저장소에서 진행 상황을 읽어 엔진 생성
    pub fn with_rng(store: S, rng: R) -> Self {
        let snapshot = store.load();
        Self {
            store,
            snapshot,
            state: QuizState::Idle,
            rng,
        }
    }

    pub fn levels(&self) -> &[QuizLevel] {
        &self.snapshot.levels
    }

    /// id로 레벨 조회
    pub fn level(&self, level_id: &str) -> Result<&QuizLevel, InsyncError> {
        self.snapshot
            .level(level_id)
            .ok_or_else(|| InsyncError::LevelNotFound(level_id.to_string()))
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        match &self.state {
            QuizState::InProgress(active) => active.current(),
            _ => None,
        }
    }

    /// 잠금 해제된 레벨 시작. 없는 레벨/잠긴 레벨이면 아무것도 하지 않고 false.
    pub fn start_level(&mut self, level_id: &str) -> bool {
        let Some(level) = self.snapshot.level(level_id) else {
            log::debug!("[Quiz] Unknown level: {}", level_id);
            return false;
        };
        if !level.unlocked {
            log::debug!("[Quiz] Level is locked: {}", level_id);
            return false;
        }

        let rng = &mut self.rng;
        let questions: Vec<ShuffledQuestion> = level
            .questions
            .iter()
            .map(|q| shuffle_question(q, rng))
            .collect();

        log::info!("[Quiz] Starting level {} ({} questions)", level_id, questions.len());
        self.state = QuizState::InProgress(ActiveQuiz {
            level_id: level_id.to_string(),
            questions,
            question_index: 0,
            score: 0,
            selected_answer: None,
        });
        true
    }

    /// 현재 문항의 답 선택 (마지막 선택 우선, 진행하지 않음)
    pub fn select_answer(&mut self, option_index: usize) -> bool {
        let QuizState::InProgress(active) = &mut self.state else {
            return false;
        };
        let Some(current) = active.current() else {
            return false;
        };
        if option_index >= current.shuffled_options.len() {
            return false;
        }
        active.selected_answer = Some(option_index);
        true
    }

    /// 선택한 답을 채점하고 다음 문항으로 이동. 마지막 문항이면 결과를 저장하고 Result 상태로.
    pub fn advance(&mut self) -> Option<Advance> {
        let QuizState::InProgress(active) = &mut self.state else {
            return None;
        };
        let selected = active.selected_answer?;
        let was_correct = selected == active.current()?.correct_answer_index;
        if was_correct {
            active.score += 1;
        }

        if active.question_index + 1 < active.questions.len() {
            active.question_index += 1;
            active.selected_answer = None;
            return Some(Advance::Next {
                question_index: active.question_index,
                was_correct,
            });
        }

        let level_id = active.level_id.clone();
        let score = active.score;
        let total = active.questions.len() as u32;
        let outcome = self.finish_level(&level_id, score, total)?;
        self.state = QuizState::Result(outcome.clone());
        Some(Advance::Finished(outcome))
    }

    /// Result 상태에서 같은 레벨을 새로 섞어 다시 시작
    pub fn retry(&mut self) -> bool {
        let QuizState::Result(outcome) = &self.state else {
            return false;
        };
        let level_id = outcome.level_id.clone();
        self.start_level(&level_id)
    }

    /// 레벨 목록으로 돌아감 (저장되지 않은 답안은 버림)
    pub fn exit_to_levels(&mut self) {
        self.state = QuizState::Idle;
    }

    /// 저장된 진행 상황 삭제 후 기본값으로 복귀
    pub fn reset_all_progress(&mut self) {
        if let Err(e) = self.store.clear() {
            log::error!("[Quiz] Failed to clear saved progress: {}", e);
        }
        self.snapshot = catalog::default_snapshot();
        self.state = QuizState::Idle;
        log::info!("[Quiz] Progress reset");
    }

    fn finish_level(&mut self, level_id: &str, score: u32, total: u32) -> Option<QuizOutcome> {
        let index = self.snapshot.level_index(level_id)?;
        let level = &mut self.snapshot.levels[index];

        // score/total*100 >= passMark 를 정수 연산으로
        let passed = total > 0 && score * 100 >= level.pass_mark * total;
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(score) / f64::from(total) * 100.0
        };

        level.best_score = level.best_score.max(score);
        level.completed = level.completed || passed;
        let best_score = level.best_score;

        let mut next_level_id = None;
        if passed {
            if let Some(next) = self.snapshot.levels.get_mut(index + 1) {
                next.unlocked = true;
                next_level_id = Some(next.id.clone());
            }
        }

        if let Err(e) = self.store.save(&self.snapshot) {
            log::error!("[Quiz] Failed to save progress: {}", e);
        }

        log::info!(
            "[Quiz] Level {} finished: {}/{} ({:.0}%), passed={}",
            level_id,
            score,
            total,
            percentage,
            passed
        );

        Some(QuizOutcome {
            level_id: level_id.to_string(),
            passed,
            score,
            total,
            percentage,
            best_score,
            next_level_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryProgressStore;

    fn engine(store: &MemoryProgressStore) -> QuizEngine<&MemoryProgressStore> {
        QuizEngine::with_rng(store, StdRng::seed_from_u64(1))
    }

    /// 현재 레벨을 `correct`개만 맞히며 끝까지 진행
    fn play<S: ProgressStore, R: Rng>(engine: &mut QuizEngine<S, R>, correct: usize) -> QuizOutcome {
        let mut answered = 0;
        loop {
            let current = engine.current_question().expect("question in progress");
            let right = current.correct_answer_index;
            let wrong = (right + 1) % current.shuffled_options.len();
            let pick = if answered < correct { right } else { wrong };
            answered += 1;
            assert!(engine.select_answer(pick));
            match engine.advance().expect("advance with selection") {
                Advance::Next { .. } => continue,
                Advance::Finished(outcome) => return outcome,
            }
        }
    }

    #[test]
    fn test_start_locked_level_is_noop() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(!engine.start_level("normal"));
        assert!(!engine.start_level("missing"));
        assert_eq!(engine.state(), &QuizState::Idle);
        assert_eq!(engine.snapshot(), &catalog::default_snapshot());
        assert_eq!(store.read_raw().unwrap(), None);
    }

    #[test]
    fn test_level_lookup_reports_unknown_id() {
        let store = MemoryProgressStore::new();
        let engine = engine(&store);

        assert_eq!(engine.level("hard").unwrap().pass_mark, 80);
        assert!(matches!(engine.level("expert"), Err(InsyncError::LevelNotFound(id)) if id == "expert"));
    }

    #[test]
    fn test_passing_unlocks_next_level() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(engine.start_level("easy"));
        let outcome = play(&mut engine, 4);

        assert!(outcome.passed);
        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.total, 5);
        assert_eq!(outcome.percentage, 80.0);
        assert_eq!(outcome.next_level_id.as_deref(), Some("normal"));
        assert!(matches!(engine.state(), QuizState::Result(o) if o.passed));

        let easy = &engine.levels()[0];
        assert!(easy.completed);
        assert_eq!(easy.best_score, 4);
        assert!(engine.levels()[1].unlocked);
        assert!(!engine.levels()[2].unlocked);

        // 저장소에도 반영
        assert_eq!(store.load(), *engine.snapshot());
    }

    #[test]
    fn test_failing_does_not_unlock() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(engine.start_level("easy"));
        let outcome = play(&mut engine, 3);

        assert!(!outcome.passed);
        assert_eq!(outcome.next_level_id, None);
        assert!(!engine.levels()[0].completed);
        assert_eq!(engine.levels()[0].best_score, 3);
        assert!(!engine.levels()[1].unlocked);
    }

    #[test]
    fn test_best_score_and_completed_never_regress() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(engine.start_level("easy"));
        play(&mut engine, 5);
        assert_eq!(engine.levels()[0].best_score, 5);

        assert!(engine.retry());
        let outcome = play(&mut engine, 1);
        assert!(!outcome.passed);
        assert_eq!(outcome.best_score, 5);
        assert!(engine.levels()[0].completed);
        assert_eq!(store.load().levels[0].best_score, 5);
    }

    #[test]
    fn test_last_level_pass_has_no_next() {
        let mut snapshot = catalog::default_snapshot();
        for level in &mut snapshot.levels {
            level.unlocked = true;
        }
        let store = MemoryProgressStore::with_raw(serde_json::to_string(&snapshot).unwrap());
        let mut engine = engine(&store);

        assert!(engine.start_level("hard"));
        // hard 합격선 80%: 4/5 = 80% 합격
        let outcome = play(&mut engine, 4);
        assert!(outcome.passed);
        assert_eq!(outcome.next_level_id, None);
    }

    #[test]
    fn test_advance_requires_selection() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert_eq!(engine.advance(), None);
        assert!(engine.start_level("easy"));
        assert_eq!(engine.advance(), None);
        assert!(!engine.select_answer(4));
        assert_eq!(engine.advance(), None);

        assert!(engine.select_answer(0));
        assert!(engine.select_answer(3));
        let QuizState::InProgress(active) = engine.state() else {
            panic!("expected in progress");
        };
        assert_eq!(active.selected_answer, Some(3));

        assert!(matches!(engine.advance(), Some(Advance::Next { question_index: 1, .. })));
        let QuizState::InProgress(active) = engine.state() else {
            panic!("expected in progress");
        };
        assert_eq!(active.selected_answer, None);
    }

    #[test]
    fn test_retry_only_from_result() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(!engine.retry());
        assert!(engine.start_level("easy"));
        assert!(!engine.retry());

        play(&mut engine, 0);
        assert!(engine.retry());
        let QuizState::InProgress(active) = engine.state() else {
            panic!("expected in progress");
        };
        assert_eq!(active.level_id, "easy");
        assert_eq!(active.question_index, 0);
        assert_eq!(active.score, 0);
    }

    #[test]
    fn test_exit_discards_unsaved_answers() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(engine.start_level("easy"));
        let right = engine.current_question().unwrap().correct_answer_index;
        engine.select_answer(right);
        engine.advance();
        engine.exit_to_levels();

        assert_eq!(engine.state(), &QuizState::Idle);
        assert_eq!(engine.levels()[0].best_score, 0);
        assert_eq!(store.read_raw().unwrap(), None);
    }

    #[test]
    fn test_reset_all_progress_restores_defaults() {
        let store = MemoryProgressStore::new();
        let mut engine = engine(&store);

        assert!(engine.start_level("easy"));
        play(&mut engine, 5);
        assert!(engine.levels()[1].unlocked);

        engine.reset_all_progress();
        assert_eq!(engine.state(), &QuizState::Idle);
        assert_eq!(engine.snapshot(), &catalog::default_snapshot());
        assert_eq!(store.read_raw().unwrap(), None);
        assert_eq!(store.load(), catalog::default_snapshot());
    }

    #[test]
    fn test_engine_restores_saved_progress() {
        let store = MemoryProgressStore::new();
        {
            let mut engine = engine(&store);
            assert!(engine.start_level("easy"));
            play(&mut engine, 5);
        }

        let mut engine = engine(&store);
        assert!(engine.levels()[0].completed);
        assert!(engine.start_level("normal"));
    }
}
