//! 선택지 섞기
//!
//! 인덱스 배열을 Fisher-Yates(`SliceRandom::shuffle`)로 섞은 뒤 영어/타밀어 선택지에
//! 같은 순열을 적용합니다. 원본 문항은 변경하지 않습니다.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{QuizQuestion, ShuffledQuestion};

pub fn shuffle_question<R: Rng + ?Sized>(question: &QuizQuestion, rng: &mut R) -> ShuffledQuestion {
    let mut order: Vec<usize> = (0..question.options.len()).collect();
    order.shuffle(rng);

    let shuffled_options = order.iter().map(|&i| question.options[i].clone()).collect();
    let shuffled_options_tamil = order
        .iter()
        .map(|&i| question.options_tamil.get(i).cloned().unwrap_or_default())
        .collect();
    let correct_answer_index = order
        .iter()
        .position(|&i| i == question.correct_answer)
        .unwrap_or(0);

    ShuffledQuestion {
        question: question.clone(),
        shuffled_options,
        shuffled_options_tamil,
        correct_answer_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    use crate::quiz::catalog;

    fn pairs(options: &[String], tamil: &[String]) -> Vec<(String, String)> {
        let mut v: Vec<(String, String)> = options.iter().cloned().zip(tamil.iter().cloned()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_correct_answer_follows_the_option() {
        let mut rng = StdRng::seed_from_u64(42);
        for level in catalog::default_levels() {
            for question in &level.questions {
                for _ in 0..50 {
                    let shuffled = shuffle_question(question, &mut rng);
                    assert_eq!(
                        shuffled.shuffled_options[shuffled.correct_answer_index],
                        question.options[question.correct_answer]
                    );
                    assert_eq!(
                        shuffled.shuffled_options_tamil[shuffled.correct_answer_index],
                        question.options_tamil[question.correct_answer]
                    );
                }
            }
        }
    }

    #[test]
    fn test_shuffle_preserves_option_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = &catalog::default_levels()[0].questions[0];
        let before = pairs(&question.options, &question.options_tamil);

        for _ in 0..100 {
            let shuffled = shuffle_question(question, &mut rng);
            assert_eq!(pairs(&shuffled.shuffled_options, &shuffled.shuffled_options_tamil), before);
            assert_eq!(&shuffled.question, question);
        }
    }

    #[test]
    fn test_permutations_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let question = &catalog::default_levels()[1].questions[0];
        let trials = 24_000;

        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        for _ in 0..trials {
            let shuffled = shuffle_question(question, &mut rng);
            *counts.entry(shuffled.shuffled_options).or_default() += 1;
        }

        // 4! = 24 순열, 각 기대값 1000 (표준편차 약 31)
        assert_eq!(counts.len(), 24);
        for (perm, count) in counts {
            assert!((850..=1150).contains(&count), "{:?} appeared {} times", perm, count);
        }
    }
}
