//! Quiz Catalog
//!
//! 기본 제공 퀴즈 레벨(easy / normal / hard)과 문항 데이터

use once_cell::sync::Lazy;

use crate::models::{ProgressSnapshot, QuizLevel, QuizQuestion};

const PROMPT: &str = "What does this ISL gesture represent?";
const PROMPT_TAMIL: &str = "இந்த ISL சைகை எதைக் குறிக்கிறது?";

static LEVELS: Lazy<Vec<QuizLevel>> = Lazy::new(build_levels);

/// 제스처 영상 문항 (영상 키: `gifs/<word>.mp4`)
fn gesture_question(
    id: u32,
    word: &str,
    options: [&str; 4],
    options_tamil: [&str; 4],
    correct_answer: usize,
    explanation: &str,
    explanation_tamil: &str,
) -> QuizQuestion {
    QuizQuestion {
        id,
        question: PROMPT.to_string(),
        question_tamil: PROMPT_TAMIL.to_string(),
        image: Some(format!("gifs/{}.mp4", word)),
        options: options.iter().map(|s| s.to_string()).collect(),
        options_tamil: options_tamil.iter().map(|s| s.to_string()).collect(),
        correct_answer,
        explanation: Some(explanation.to_string()),
        explanation_tamil: Some(explanation_tamil.to_string()),
    }
}

fn level(
    id: &str,
    names: (&str, &str),
    descriptions: (&str, &str),
    pass_mark: u32,
    questions: Vec<QuizQuestion>,
) -> QuizLevel {
    QuizLevel {
        id: id.to_string(),
        name: names.0.to_string(),
        name_tamil: names.1.to_string(),
        description: descriptions.0.to_string(),
        description_tamil: descriptions.1.to_string(),
        pass_mark,
        questions,
        unlocked: false,
        completed: false,
        best_score: 0,
    }
}

fn build_levels() -> Vec<QuizLevel> {
    let easy = level(
        "easy",
        ("Easy", "எளிதான"),
        (
            "Basic ISL gestures and common words",
            "அடிப்படை ISL சைகைகள் மற்றும் பொதுவான வார்த்தைகள்",
        ),
        70,
        vec![
            gesture_question(
                1,
                "Tree",
                ["Tree", "Flower", "House", "Car"],
                ["மரம்", "மலர்", "வீடு", "கார்"],
                0,
                "This gesture represents a tree with branches.",
                "இந்த சைகை கிளைகளுடன் ஒரு மரத்தைக் குறிக்கிறது.",
            ),
            gesture_question(
                2,
                "Happy",
                ["Sad", "Happy", "Angry", "Tired"],
                ["வருத்தம்", "மகிழ்ச்சி", "கோபம்", "சோர்வு"],
                1,
                "The gesture with a smile represents happiness.",
                "புன்னகையுடன் கூடிய சைகை மகிழ்ச்சியைக் குறிக்கிறது.",
            ),
            gesture_question(
                3,
                "House",
                ["Building", "House", "Apartment", "Office"],
                ["கட்டிடம்", "வீடு", "அபார்ட்மெண்டு", "அலுவலகம்"],
                1,
                "The house gesture shows the shape of a roof.",
                "வீட்டு சைகை கூரையின் வடிவத்தைக் காட்டுகிறது.",
            ),
            gesture_question(
                4,
                "Car",
                ["Bike", "Car", "Bus", "Train"],
                ["மிதிவண்டி", "கார்", "பஸ்", "ரயில்"],
                1,
                "The car gesture mimics steering a wheel.",
                "காரின் சைகை சக்கரத்தை சுழற்றுவதைப் போல உள்ளது.",
            ),
            gesture_question(
                5,
                "Beautiful",
                ["Ugly", "Beautiful", "Big", "Small"],
                ["அசிங்கமான", "அழகான", "பெரிய", "சிறிய"],
                1,
                "The beautiful gesture shows appreciation with graceful movement.",
                "அழகான சைகை நேர்த்தியான இயக்கத்துடன் பாராட்டைக் காட்டுகிறது.",
            ),
        ],
    );

    let normal = level(
        "normal",
        ("Normal", "இயல்பான"),
        (
            "Intermediate ISL gestures and phrases",
            "இடைநிலை ISL சைகைகள் மற்றும் சொற்றொடர்கள்",
        ),
        70,
        vec![
            gesture_question(
                1,
                "Camera",
                ["Phone", "Camera", "Computer", "Television"],
                ["தொலைபேசி", "கேமரா", "கணினி", "தொலைக்காட்சி"],
                1,
                "The camera gesture mimics taking a photo.",
                "கேமரா சைகை புகைப்படம் எடுப்பதைப் போல உள்ளது.",
            ),
            gesture_question(
                2,
                "Work",
                ["Play", "Work", "Sleep", "Eat"],
                ["விளையாடு", "வேலை", "தூங்கு", "சாப்பிடு"],
                1,
                "The work gesture shows hands moving in work motion.",
                "வேலை சைகை கைகள் வேலை செய்யும் இயக்கத்தில் நகர்வதைக் காட்டுகிறது.",
            ),
            gesture_question(
                3,
                "Clever",
                ["Stupid", "Clever", "Lazy", "Active"],
                ["முட்டாள்", "புத்திசாலி", "சோம்பேறி", "சுறுசுறுப்பான"],
                1,
                "The clever gesture points to the head indicating intelligence.",
                "புத்திசாலி சைகை தலையைச் சுட்டி அறிவைக் குறிக்கிறது.",
            ),
            gesture_question(
                4,
                "Paper",
                ["Book", "Paper", "Pen", "Pencil"],
                ["புத்தகம்", "காகிதம்", "பேனா", "பென்சில்"],
                1,
                "The paper gesture shows flat surface with writing motion.",
                "காகித சைகை எழுதும் இயக்கத்துடன் தட்டையான மேற்பரப்பைக் காட்டுகிறது.",
            ),
            gesture_question(
                5,
                "Sweet",
                ["Sour", "Sweet", "Bitter", "Spicy"],
                ["புளிப்பான", "இனிய", "கசப்பான", "காரமான"],
                1,
                "The sweet gesture shows tasting something delicious.",
                "இனிய சைகை சுவையான ஒன்றை சுவைப்பதைக் காட்டுகிறது.",
            ),
        ],
    );

    let hard = level(
        "hard",
        ("Hard", "கடினமான"),
        (
            "Advanced ISL gestures and complex expressions",
            "மேம்பட்ட ISL சைகைகள் மற்றும் சிக்கலான வெளிப்பாடுகள்",
        ),
        80,
        vec![
            gesture_question(
                1,
                "Generous",
                ["Selfish", "Generous", "Greedy", "Stingy"],
                ["சுயநலம்", "அதிகமான", "பேராசை", "கஞ்சத்தனம்"],
                1,
                "The generous gesture shows giving with open hands.",
                "அதிகமான சைகை திறந்த கைகளுடன் கொடுப்பதைக் காட்டுகிறது.",
            ),
            gesture_question(
                2,
                "Greedy",
                ["Generous", "Greedy", "Kind", "Helpful"],
                ["அதிகமான", "பேராசை", "கருணை", "உதவியான"],
                1,
                "The greedy gesture shows grabbing or hoarding.",
                "பேராசை சைகை பிடித்தல் அல்லது சேமித்து வைத்தலைக் காட்டுகிறது.",
            ),
            gesture_question(
                3,
                "Bright",
                ["Dark", "Bright", "Dim", "Foggy"],
                ["இருண்ட", "பிரகாசமான", "மங்கலான", "மூடுபனி"],
                1,
                "The bright gesture shows light radiating outward.",
                "பிரகாசமான சைகை வெளிப்புறமாக ஒளி பரவுவதைக் காட்டுகிறது.",
            ),
            gesture_question(
                4,
                "Dark",
                ["Light", "Dark", "Bright", "Clear"],
                ["ஒளி", "இருண்ட", "பிரகாசமான", "தெளிவான"],
                1,
                "The dark gesture shows covering or hiding light.",
                "இருண்ட சைகை ஒளியை மறைப்பது அல்லது மூடுவதைக் காட்டுகிறது.",
            ),
            gesture_question(
                5,
                "Short",
                ["Tall", "Short", "Long", "Wide"],
                ["உயரமான", "குறுகிய", "நீளமான", "அகலமான"],
                1,
                "The short gesture shows measuring a small distance.",
                "குறுகிய சைகை சிறிய தூரத்தை அளவிடுவதைக் காட்டுகிறது.",
            ),
        ],
    );

    vec![easy, normal, hard]
}

/// 기본 레벨 목록 (복사본)
pub fn default_levels() -> Vec<QuizLevel> {
    LEVELS.clone()
}

/// 첫 레벨만 열린 기본 스냅샷
pub fn default_snapshot() -> ProgressSnapshot {
    ProgressSnapshot::with_defaults(default_levels())
}

/// 레벨들이 참조하는 미디어 키 (중복 제거, 등장 순서 유지)
pub fn quiz_media_keys(levels: &[QuizLevel]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    levels
        .iter()
        .flat_map(|l| l.questions.iter())
        .filter_map(|q| q.image.clone())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let snapshot = default_snapshot();
        assert!(snapshot.validate().is_ok());
        let ids: Vec<&str> = snapshot.levels.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["easy", "normal", "hard"]);
        assert_eq!(snapshot.levels[2].pass_mark, 80);
    }

    #[test]
    fn test_default_snapshot_only_first_unlocked() {
        let snapshot = default_snapshot();
        assert!(snapshot.levels[0].unlocked);
        assert!(!snapshot.levels[1].unlocked);
        assert!(!snapshot.levels[2].unlocked);
        assert!(snapshot.levels.iter().all(|l| !l.completed && l.best_score == 0));
    }

    #[test]
    fn test_quiz_media_keys_are_unique() {
        let mut levels = default_levels();
        levels.push(levels[0].clone());
        let keys = quiz_media_keys(&levels);
        assert_eq!(keys.len(), 15);
        assert_eq!(keys[0], "gifs/Tree.mp4");
        assert!(keys.contains(&"gifs/Short.mp4".to_string()));
    }
}
