//! Gesture Source
//!
//! 학생→교사 패널이 소비하는 제스처 인식 인터페이스.
//! `DemoGestureSource`는 실제 인식기가 아닌 데모용 대역으로, 고정 문구 목록에서 무작위로 고릅니다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// 인식 결과 (confidence는 0-100 정수 퍼센트)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GestureResult {
    pub gesture: String,
    pub confidence: u8,
    pub text: String,
}

/// 프레임마다 호출되는 제스처 공급원
pub trait GestureSource {
    fn poll(&mut self, now_millis: i64) -> Option<GestureResult>;
}

struct DemoPhrase {
    name: &'static str,
    text: &'static str,
    confidence: f64,
}

const DEMO_PHRASES: [DemoPhrase; 12] = [
    DemoPhrase { name: "Hello", text: "Hello", confidence: 0.9 },
    DemoPhrase { name: "Thank You", text: "Thank you", confidence: 0.85 },
    DemoPhrase { name: "Yes", text: "Yes", confidence: 0.9 },
    DemoPhrase { name: "No", text: "No", confidence: 0.88 },
    DemoPhrase { name: "Help", text: "Help me", confidence: 0.82 },
    DemoPhrase { name: "Water", text: "Water", confidence: 0.87 },
    DemoPhrase { name: "Food", text: "Food", confidence: 0.89 },
    DemoPhrase { name: "Good", text: "Good", confidence: 0.91 },
    DemoPhrase { name: "Bad", text: "Bad", confidence: 0.88 },
    DemoPhrase { name: "Please", text: "Please", confidence: 0.86 },
    DemoPhrase { name: "Sorry", text: "Sorry", confidence: 0.84 },
    DemoPhrase { name: "Excuse Me", text: "Excuse me", confidence: 0.83 },
];

const DETECTION_COOLDOWN_MS: i64 = 2000;
const CONFIDENCE_THRESHOLD: f64 = 0.8;
const CONFIDENCE_JITTER: f64 = 0.1;

/// 데모용 무작위 제스처 공급원
pub struct DemoGestureSource<R = StdRng> {
    rng: R,
    last_detection: Option<i64>,
}

impl DemoGestureSource<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for DemoGestureSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DemoGestureSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, last_detection: None }
    }
}

impl<R: Rng> GestureSource for DemoGestureSource<R> {
    fn poll(&mut self, now_millis: i64) -> Option<GestureResult> {
        if let Some(last) = self.last_detection {
            if now_millis - last < DETECTION_COOLDOWN_MS {
                return None;
            }
        }

        let phrase = &DEMO_PHRASES[self.rng.gen_range(0..DEMO_PHRASES.len())];
        let confidence = phrase.confidence + (self.rng.gen::<f64>() - 0.5) * CONFIDENCE_JITTER;
        if confidence <= CONFIDENCE_THRESHOLD {
            return None;
        }

        self.last_detection = Some(now_millis);
        Some(GestureResult {
            gesture: phrase.name.to_string(),
            confidence: (confidence * 100.0).round().clamp(0.0, 100.0) as u8,
            text: phrase.text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_detection(source: &mut DemoGestureSource, now: i64) -> GestureResult {
        (0..1000)
            .find_map(|_| source.poll(now))
            .expect("a detection within 1000 polls")
    }

    #[test]
    fn test_cooldown_between_detections() {
        let mut source = DemoGestureSource::with_rng(StdRng::seed_from_u64(3));
        let result = first_detection(&mut source, 10_000);

        assert!(result.confidence >= 80 && result.confidence <= 96);
        assert!(DEMO_PHRASES.iter().any(|p| p.name == result.gesture && p.text == result.text));

        for t in [10_000, 11_000, 11_999] {
            assert!((0..100).all(|_| source.poll(t).is_none()));
        }
        first_detection(&mut source, 12_000);
    }
}
