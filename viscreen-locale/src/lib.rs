//! Label lookup for the presentation layer.
//!
//! The session core deals in stable string keys only; this crate maps them to
//! display text. Lookup falls back to English and finally to the key itself,
//! so a missing translation never breaks the flow.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Hi,
    Ta,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

const EN: &[(&str, &str)] = &[
    ("welcome", "Welcome to VisionAI"),
    ("subtitle", "Self-administered eye health screening"),
    ("refractiveTest", "Vision Acuity Test"),
    ("colorBlindTest", "Color Vision Test"),
    ("instructions", "Instructions"),
    ("begin", "Begin Test"),
    ("next", "Next"),
    ("submit", "Submit"),
    ("results", "Results"),
    ("normal", "Normal Vision"),
    ("visitDoctor", "Please visit an eye doctor for further examination"),
    ("readLetter", "What letter do you see?"),
    ("selectNumber", "What number do you see?"),
    ("cantSee", "I can't see clearly"),
    ("dontKnow", "I don't know"),
    ("notSure", "Not sure"),
    ("noNumberVisible", "No number visible"),
    ("leftEye", "Left eye"),
    ("rightEye", "Right eye"),
    ("coverLeftEye", "Cover your LEFT eye and press Enter when ready"),
    ("coverRightEye", "Cover your RIGHT eye and press Enter when ready"),
    ("timedOut", "Time is up, moving on"),
    ("returnToTests", "Return to Tests"),
    ("restart", "Restart test"),
    ("colorBlindNormal", "No signs of color vision deficiency"),
    ("colorBlindMild", "Signs of a mild color vision deficiency"),
    (
        "colorBlindSignificant",
        "Signs of a significant color vision deficiency",
    ),
    (
        "acuityInstructions",
        "Sit 2-3 feet from the screen. Each eye is tested separately: pick \
         the letter you see before the countdown runs out.",
    ),
    (
        "plateInstructions",
        "Look at each plate and pick the number hidden in the dots before \
         the countdown runs out.",
    ),
];

const HI: &[(&str, &str)] = &[
    ("welcome", "VisionAI में आपका स्वागत है"),
    ("refractiveTest", "दृष्टि तीक्ष्णता परीक्षण"),
    ("colorBlindTest", "रंग दृष्टि परीक्षण"),
    ("instructions", "निर्देश"),
    ("begin", "परीक्षण शुरू करें"),
    ("next", "अगला"),
    ("submit", "जमा करें"),
    ("results", "परिणाम"),
    ("normal", "सामान्य दृष्टि"),
    ("visitDoctor", "कृपया आगे की जांच के लिए नेत्र चिकित्सक से मिलें"),
    ("readLetter", "आप कौन सा अक्षर देख रहे हैं?"),
    ("selectNumber", "आप कौन सी संख्या देख रहे हैं?"),
    ("cantSee", "मैं स्पष्ट रूप से नहीं देख सकता"),
];

const TA: &[(&str, &str)] = &[
    ("welcome", "VisionAI க்கு வரவேற்கிறோம்"),
    ("refractiveTest", "பார்வைக் கூர்மை பரிசோதனை"),
    ("colorBlindTest", "வண்ண பார்வை பரிசோதனை"),
    ("instructions", "வழிமுறைகள்"),
    ("begin", "பரிசோதனையைத் தொடங்கவும்"),
    ("next", "அடுத்து"),
    ("submit", "சமர்ப்பிக்கவும்"),
    ("results", "முடிவுகள்"),
    ("normal", "சாதாரண பார்வை"),
    ("visitDoctor", "மேலும் பரிசோதனைக்கு கண் மருத்துவரைப் பார்க்கவும்"),
    ("readLetter", "நீங்கள் எந்த எழுத்தைப் பார்க்கிறீர்கள்?"),
    ("selectNumber", "நீங்கள் எந்த எண்ணைப் பார்க்கிறீர்கள்?"),
    ("cantSee", "என்னால் தெளிவாகப் பார்க்க முடியவில்லை"),
];

lazy_static! {
    static ref TABLES: HashMap<Language, Table> = {
        let mut tables = HashMap::new();
        tables.insert(Language::En, EN.iter().copied().collect());
        tables.insert(Language::Hi, HI.iter().copied().collect());
        tables.insert(Language::Ta, TA.iter().copied().collect());
        tables
    };
}

/// Localized text for `key`, falling back to English, then to the key.
pub fn label<'a>(lang: Language, key: &'a str) -> &'a str {
    if let Some(text) = TABLES.get(&lang).and_then(|t| t.get(key).copied()) {
        return text;
    }
    if let Some(text) = TABLES
        .get(&Language::En)
        .and_then(|t| t.get(key).copied())
    {
        return text;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_lookup() {
        assert_eq!(label(Language::Hi, "begin"), "परीक्षण शुरू करें");
        assert_eq!(label(Language::En, "notSure"), "Not sure");
    }

    #[test]
    fn missing_translation_falls_back_to_english() {
        assert_eq!(label(Language::Ta, "notSure"), "Not sure");
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        assert_eq!(label(Language::En, "someUnknownKey"), "someUnknownKey");
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in [Language::En, Language::Hi, Language::Ta] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }
}
