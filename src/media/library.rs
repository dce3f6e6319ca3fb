//! Media Library
//!
//! 알파벳 갤러리와 어휘 갤러리의 URL을 한 번에 해석해 두고, 프리로드 대상 목록을 제공합니다.

use serde::Serialize;

use crate::media::catalog::{AssetKey, Letter, MediaMap, VocabWord, VOCABULARY};
use crate::media::resolver::MediaResolver;

/// 알파벳 갤러리 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlphabetEntry {
    pub letter: char,
    pub lowercase: char,
    pub image: Option<String>,
}

/// 어휘 갤러리 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub word: &'static str,
    pub tamil: &'static str,
    pub emoji: &'static str,
    pub video: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    letters: MediaMap<Letter>,
    words: MediaMap<&'static VocabWord>,
}

impl MediaLibrary {
    /// 알파벳/어휘를 동시에 해석 (실패한 항목은 URL 없음)
    pub async fn load(resolver: &MediaResolver) -> Self {
        let letters: Vec<Letter> = Letter::all().collect();
        let words: Vec<&'static VocabWord> = VOCABULARY.iter().collect();

        let letter_keys: Vec<String> = letters.iter().map(AssetKey::storage_key).collect();
        let word_keys: Vec<String> = words.iter().map(AssetKey::storage_key).collect();

        let (letter_results, word_results) = futures::join!(
            resolver.resolve_many(&letter_keys),
            resolver.resolve_many(&word_keys)
        );

        let library = Self {
            letters: MediaMap::from_resolved(&letters, &letter_results),
            words: MediaMap::from_resolved(&words, &word_results),
        };
        log::info!(
            "[MediaLibrary] Resolved {}/{} letters, {}/{} words",
            library.letters.len(),
            letters.len(),
            library.words.len(),
            words.len()
        );
        library
    }

    pub fn letters(&self) -> &MediaMap<Letter> {
        &self.letters
    }

    pub fn letter_url(&self, letter: Letter) -> Option<&str> {
        self.letters.get(&letter)
    }

    /// 어휘에 없는 단어는 None
    pub fn word_url(&self, word: &str) -> Option<&str> {
        VocabWord::find(word).and_then(|w| self.words.get(&w))
    }

    pub fn alphabet(&self) -> Vec<AlphabetEntry> {
        Letter::all()
            .map(|letter| AlphabetEntry {
                letter: letter.as_char(),
                lowercase: letter.lowercase(),
                image: self.letter_url(letter).map(str::to_string),
            })
            .collect()
    }

    pub fn vocabulary(&self) -> Vec<WordEntry> {
        VOCABULARY
            .iter()
            .map(|w| WordEntry {
                word: w.word,
                tamil: w.tamil,
                emoji: w.emoji,
                video: self.words.get(&w).map(str::to_string),
            })
            .collect()
    }

    /// 프리로드할 이미지 URL (알파벳)
    pub fn image_urls(&self) -> Vec<String> {
        Letter::all()
            .filter_map(|l| self.letter_url(l).map(str::to_string))
            .collect()
    }

    /// 프리로드할 비디오 URL (어휘)
    pub fn video_urls(&self) -> Vec<String> {
        VOCABULARY
            .iter()
            .filter_map(|w| self.words.get(&w).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsyncError;
    use crate::media::backend::AssetBackend;
    use crate::media::resolver::ResolverOptions;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::Arc;

    /// `Q`와 `Fat`만 없는 버킷
    struct Bucket;

    impl AssetBackend for Bucket {
        fn create_signed_url(
            &self,
            _bucket: &str,
            path: &str,
            _expires_in_secs: u64,
        ) -> BoxFuture<'static, Result<String, InsyncError>> {
            let path = path.to_string();
            async move {
                if path == "alphabets/Q.png" || path == "gifs/Fat.mp4" {
                    Err(InsyncError::AssetBackend("Object not found".to_string()))
                } else {
                    Ok(format!("https://cdn.test/{}", path))
                }
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_library_maps_letters_and_words() {
        let resolver = MediaResolver::new(Arc::new(Bucket), ResolverOptions::default());
        let library = MediaLibrary::load(&resolver).await;

        assert_eq!(
            library.letter_url(Letter::new('a').unwrap()),
            Some("https://cdn.test/alphabets/A.png")
        );
        assert_eq!(library.letter_url(Letter::new('Q').unwrap()), None);
        assert_eq!(library.word_url("tree"), Some("https://cdn.test/gifs/Tree.mp4"));
        assert_eq!(library.word_url("Fat"), None);
        assert_eq!(library.word_url("Unknown"), None);

        assert_eq!(library.image_urls().len(), 25);
        assert_eq!(library.video_urls().len(), 21);

        let alphabet = library.alphabet();
        assert_eq!(alphabet.len(), 26);
        assert_eq!(alphabet[16].letter, 'Q');
        assert_eq!(alphabet[16].image, None);

        let vocabulary = library.vocabulary();
        assert_eq!(vocabulary.len(), 22);
        assert_eq!(vocabulary[0].tamil, "மரம்");
    }
}
