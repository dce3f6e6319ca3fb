//! Quiz Module
//!
//! 레벨별 ISL 퀴즈: 기본 콘텐츠, 선택지 섞기, 상태 머신

pub mod catalog;
pub mod engine;
pub mod shuffle;

pub use engine::{ActiveQuiz, Advance, QuizEngine, QuizOutcome, QuizState};
pub use shuffle::shuffle_question;
