//! Fingerspelling
//!
//! 받아쓰기 텍스트의 마지막 단어를 ISL 알파벳 이미지 순서로 변환합니다.

use crate::media::catalog::{Letter, MediaMap};

/// 확정 텍스트 + 중간 텍스트에서 마지막 단어의 글자들 (A-Z 외 문자는 제외)
pub fn last_word_letters(final_text: &str, interim_text: &str) -> Vec<Letter> {
    let last_word = interim_text
        .split_whitespace()
        .last()
        .or_else(|| final_text.split_whitespace().last())
        .unwrap_or_default();

    last_word.chars().filter_map(Letter::new).collect()
}

/// 마지막 단어의 글자 이미지 URL (이미지가 없는 글자는 건너뜀)
pub fn fingerspell_urls(final_text: &str, interim_text: &str, letters: &MediaMap<Letter>) -> Vec<String> {
    last_word_letters(final_text, interim_text)
        .into_iter()
        .filter_map(|l| letters.get(&l).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolvedAsset;

    fn chars(v: Vec<Letter>) -> String {
        v.into_iter().map(Letter::as_char).collect()
    }

    #[test]
    fn test_last_word_prefers_interim_text() {
        assert_eq!(chars(last_word_letters("good morning", "")), "MORNING");
        assert_eq!(chars(last_word_letters("good morning", "class")), "CLASS");
        assert_eq!(chars(last_word_letters("", "  ")), "");
        assert_eq!(chars(last_word_letters("it's 5 o'clock!", "")), "OCLOCK");
    }

    #[test]
    fn test_fingerspell_skips_letters_without_image() {
        let all: Vec<Letter> = Letter::all().collect();
        let resolved: Vec<ResolvedAsset> = ["alphabets/H.png", "alphabets/I.png"]
            .iter()
            .map(|k| ResolvedAsset {
                key: k.to_string(),
                url: Some(format!("https://cdn.test/{}", k)),
                error: None,
            })
            .collect();
        let map = MediaMap::from_resolved(&all, &resolved);

        assert_eq!(
            fingerspell_urls("say", "hi!", &map),
            vec!["https://cdn.test/alphabets/H.png", "https://cdn.test/alphabets/I.png"]
        );
        assert_eq!(fingerspell_urls("say hey", "", &map), vec!["https://cdn.test/alphabets/H.png"]);
    }
}
