//! Learning Media Catalog
//!
//! 알파벳(A-Z) 이미지와 기본 어휘 제스처 영상의 키 도메인.
//! 허용되지 않은 글자/단어는 생성 시점에 걸러지고 조회는 `Option`으로 돌려줍니다.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::models::ResolvedAsset;

/// 스토리지 논리 키를 가진 학습 자료
pub trait AssetKey {
    fn storage_key(&self) -> String;
}

/// ISL 알파벳 글자 (항상 대문자 A-Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Letter(char);

impl Letter {
    /// 영문자만 허용 (소문자는 대문자로)
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn lowercase(self) -> char {
        self.0.to_ascii_lowercase()
    }

    /// A부터 Z까지
    pub fn all() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }
}

impl AssetKey for Letter {
    fn storage_key(&self) -> String {
        format!("alphabets/{}.png", self.0)
    }
}

/// 어휘 갤러리 단어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VocabWord {
    pub word: &'static str,
    pub tamil: &'static str,
    pub emoji: &'static str,
}

impl VocabWord {
    /// 대소문자 무시 조회
    pub fn find(word: &str) -> Option<&'static VocabWord> {
        let word = word.trim();
        VOCABULARY.iter().find(|w| w.word.eq_ignore_ascii_case(word))
    }
}

impl AssetKey for VocabWord {
    fn storage_key(&self) -> String {
        format!("gifs/{}.mp4", self.word)
    }
}

impl<T: AssetKey + ?Sized> AssetKey for &T {
    fn storage_key(&self) -> String {
        (**self).storage_key()
    }
}

pub static VOCABULARY: [VocabWord; 22] = [
    VocabWord { word: "Tree", tamil: "மரம்", emoji: "🌳" },
    VocabWord { word: "Flower", tamil: "மலர்", emoji: "🌺" },
    VocabWord { word: "House", tamil: "வீடு", emoji: "🏠" },
    VocabWord { word: "Apartment", tamil: "அபார்ட்மெண்டு", emoji: "🏢" },
    VocabWord { word: "Car", tamil: "கார்", emoji: "🚙" },
    VocabWord { word: "Chair", tamil: "நாற்காலி", emoji: "🪑" },
    VocabWord { word: "Table", tamil: "பட்டாங்காலி", emoji: "🛋" },
    VocabWord { word: "Happy", tamil: "மகிழ்ச்சி", emoji: "😊" },
    VocabWord { word: "Beautiful", tamil: "அழகான", emoji: "🥰" },
    VocabWord { word: "Fat", tamil: "பெருத்த", emoji: "🫃" },
    VocabWord { word: "Tail", tamil: "வால்", emoji: "🐒" },
    VocabWord { word: "Short", tamil: "குறுகிய", emoji: "🤏" },
    VocabWord { word: "Generous", tamil: "அதிகமான", emoji: "🤲" },
    VocabWord { word: "Greedy", tamil: "பேராசை கொண்ட", emoji: "🤑" },
    VocabWord { word: "Clever", tamil: "புத்திசாலி", emoji: "👨\u{200d}🎓" },
    VocabWord { word: "Sweet", tamil: "இனிய", emoji: "🍬" },
    VocabWord { word: "Bright", tamil: "பிரகாசமான", emoji: "🔆" },
    VocabWord { word: "Dark", tamil: "இருண்ட", emoji: "🌑" },
    VocabWord { word: "Paper", tamil: "காகிதம்", emoji: "📄" },
    VocabWord { word: "Camera", tamil: "பகைப்படக்கருவி", emoji: "📸" },
    VocabWord { word: "Photo", tamil: "புகைப்படம்", emoji: "🖼" },
    VocabWord { word: "Work", tamil: "வேலை", emoji: "💼" },
];

/// 키 → 해석된 URL (해석 실패한 키는 없음)
#[derive(Debug, Clone)]
pub struct MediaMap<K> {
    urls: HashMap<K, String>,
}

impl<K> Default for MediaMap<K> {
    fn default() -> Self {
        Self { urls: HashMap::new() }
    }
}

impl<K: AssetKey + Eq + Hash + Clone> MediaMap<K> {
    /// 배치 해석 결과를 키에 맞춰 연결
    pub fn from_resolved(keys: &[K], resolved: &[ResolvedAsset]) -> Self {
        let by_storage_key: HashMap<&str, &str> = resolved
            .iter()
            .filter_map(|r| r.url.as_deref().map(|url| (r.key.as_str(), url)))
            .collect();

        let urls = keys
            .iter()
            .filter_map(|k| {
                by_storage_key
                    .get(k.storage_key().as_str())
                    .map(|url| (k.clone(), url.to_string()))
            })
            .collect();

        Self { urls }
    }

    pub fn get(&self, key: &K) -> Option<&str> {
        self.urls.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_domain() {
        assert_eq!(Letter::new('a').map(Letter::as_char), Some('A'));
        assert_eq!(Letter::new('Z').map(|l| l.storage_key()), Some("alphabets/Z.png".to_string()));
        assert_eq!(Letter::new('1'), None);
        assert_eq!(Letter::new('அ'), None);
        assert_eq!(Letter::all().count(), 26);
    }

    #[test]
    fn test_vocabulary_lookup() {
        let tree = VocabWord::find("tree").unwrap();
        assert_eq!(tree.word, "Tree");
        assert_eq!(tree.storage_key(), "gifs/Tree.mp4");
        assert!(VocabWord::find("Spaceship").is_none());
    }

    #[test]
    fn test_media_map_skips_failed_keys() {
        let letters: Vec<Letter> = "ABC".chars().filter_map(Letter::new).collect();
        let resolved = vec![
            ResolvedAsset { key: "alphabets/A.png".into(), url: Some("https://cdn/A".into()), error: None },
            ResolvedAsset { key: "alphabets/B.png".into(), url: None, error: Some("not found".into()) },
        ];
        let map = MediaMap::from_resolved(&letters, &resolved);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&letters[0]), Some("https://cdn/A"));
        assert_eq!(map.get(&letters[1]), None);
        assert_eq!(map.get(&letters[2]), None);
    }
}
