//! InSync Data Models
//!
//! TypeScript 타입과 매핑되는 Rust 데이터 모델

use serde::{Deserialize, Serialize};

use crate::error::InsyncError;

/// 퀴즈 문항 (불변 콘텐츠)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    #[serde(rename = "questionTamil")]
    pub question_tamil: String,
    /// 스토리지 논리 키 (예: `gifs/Tree.mp4`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<String>,
    #[serde(rename = "optionsTamil")]
    pub options_tamil: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(rename = "explanationTamil", default, skip_serializing_if = "Option::is_none")]
    pub explanation_tamil: Option<String>,
}

impl QuizQuestion {
    /// 선택지 개수/정렬/정답 인덱스 불변식 검증
    pub fn validate(&self) -> Result<(), InsyncError> {
        if self.options.len() < 2 {
            return Err(InsyncError::InvalidOperation(format!(
                "question {} has fewer than 2 options",
                self.id
            )));
        }
        if self.options.len() != self.options_tamil.len() {
            return Err(InsyncError::InvalidOperation(format!(
                "question {} has {} options but {} Tamil options",
                self.id,
                self.options.len(),
                self.options_tamil.len()
            )));
        }
        if self.correct_answer >= self.options.len() {
            return Err(InsyncError::InvalidOperation(format!(
                "question {} correct answer {} out of range",
                self.id, self.correct_answer
            )));
        }
        Ok(())
    }
}

/// 선택지 순서를 섞은 문항 (문항을 보여줄 때마다 새로 생성)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShuffledQuestion {
    pub question: QuizQuestion,
    #[serde(rename = "shuffledOptions")]
    pub shuffled_options: Vec<String>,
    #[serde(rename = "shuffledOptionsTamil")]
    pub shuffled_options_tamil: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer_index: usize,
}

/// 난이도 레벨
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizLevel {
    pub id: String,
    pub name: String,
    #[serde(rename = "nameTamil")]
    pub name_tamil: String,
    pub description: String,
    #[serde(rename = "descriptionTamil")]
    pub description_tamil: String,
    #[serde(rename = "passMark")]
    pub pass_mark: u32,
    pub questions: Vec<QuizQuestion>,
    pub unlocked: bool,
    pub completed: bool,
    #[serde(rename = "bestScore")]
    pub best_score: u32,
}

impl QuizLevel {
    pub fn validate(&self) -> Result<(), InsyncError> {
        if self.pass_mark > 100 {
            return Err(InsyncError::InvalidOperation(format!(
                "level {} pass mark {} above 100",
                self.id, self.pass_mark
            )));
        }
        if self.questions.is_empty() {
            return Err(InsyncError::InvalidOperation(format!(
                "level {} has no questions",
                self.id
            )));
        }
        if self.best_score as usize > self.questions.len() {
            return Err(InsyncError::InvalidOperation(format!(
                "level {} best score {} above question count",
                self.id, self.best_score
            )));
        }
        for question in &self.questions {
            question.validate()?;
        }
        Ok(())
    }
}

/// 진행 상황 스냅샷 (영속화 단위)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSnapshot {
    pub levels: Vec<QuizLevel>,
}

impl ProgressSnapshot {
    pub fn new(levels: Vec<QuizLevel>) -> Self {
        Self { levels }
    }

    /// 첫 레벨만 열려 있고 점수/완료 상태가 초기화된 스냅샷
    pub fn with_defaults(levels: Vec<QuizLevel>) -> Self {
        let levels = levels
            .into_iter()
            .enumerate()
            .map(|(i, level)| QuizLevel {
                unlocked: i == 0,
                completed: false,
                best_score: 0,
                ..level
            })
            .collect();
        Self { levels }
    }

    pub fn level(&self, level_id: &str) -> Option<&QuizLevel> {
        self.levels.iter().find(|l| l.id == level_id)
    }

    pub fn level_index(&self, level_id: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.id == level_id)
    }

    pub fn validate(&self) -> Result<(), InsyncError> {
        if self.levels.is_empty() {
            return Err(InsyncError::InvalidOperation("snapshot has no levels".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for level in &self.levels {
            if !seen.insert(level.id.as_str()) {
                return Err(InsyncError::InvalidOperation(format!(
                    "duplicate level id {}",
                    level.id
                )));
            }
            level.validate()?;
        }
        Ok(())
    }
}

/// 미디어 URL 조회 결과 (url/error 중 하나만 채워짐)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    pub url: Option<String>,
    pub error: Option<String>,
}

impl MediaRef {
    pub fn resolved(url: String) -> Self {
        Self { url: Some(url), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { url: None, error: Some(error.into()) }
    }
}

/// 배치 조회 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAsset {
    #[serde(rename = "fileName")]
    pub key: String,
    pub url: Option<String>,
    pub error: Option<String>,
}

/// 프리로드 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreloadResult {
    pub url: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 이미지/비디오 프리로드 결과 묶음
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreloadReport {
    pub images: Vec<PreloadResult>,
    pub videos: Vec<PreloadResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion {
            id: 1,
            question: "What does this ISL gesture represent?".to_string(),
            question_tamil: "இந்த ISL சைகை எதைக் குறிக்கிறது?".to_string(),
            image: Some("gifs/Tree.mp4".to_string()),
            options: vec!["Tree".to_string(), "Flower".to_string()],
            options_tamil: vec!["மரம்".to_string(), "மலர்".to_string()],
            correct_answer: 0,
            explanation: None,
            explanation_tamil: None,
        }
    }

    #[test]
    fn test_question_validation() {
        assert!(question().validate().is_ok());

        let mut q = question();
        q.options_tamil.pop();
        assert!(q.validate().is_err());

        let mut q = question();
        q.correct_answer = 2;
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_question_uses_camel_case_json() {
        let json = serde_json::to_value(question()).unwrap();
        assert_eq!(json["correctAnswer"], 0);
        assert_eq!(json["optionsTamil"][1], "மலர்");
        assert!(json.get("explanation").is_none());
    }
}
