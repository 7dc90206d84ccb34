/*!
 * Offline word-for-word translation from bundled tables.
 *
 * Each word of the input is looked up in a per-language-pair table and
 * replaced when found; everything else is left as is. There is no request
 * size limit here, so this path does not go through the chunking pipeline.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::errors::TranslationError;
use crate::language_utils;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}']+").expect("word pattern is valid"));

const EN_ES: &[(&str, &str)] = &[
    ("hello", "hola"), ("world", "mundo"), ("this", "esto"), ("is", "es"), ("a", "una"),
    ("test", "prueba"), ("good", "bueno"), ("morning", "mañana"), ("night", "noche"),
    ("thank", "gracias"), ("you", "tú"), ("please", "por favor"), ("yes", "sí"), ("no", "no"),
    ("book", "libro"), ("love", "amor"), ("happy", "feliz"), ("learn", "aprender"),
    ("language", "idioma"), ("translate", "traducir"), ("friend", "amigo"), ("house", "casa"),
    ("water", "agua"), ("food", "comida"), ("the", "el"), ("and", "y"), ("i", "yo"),
    ("my", "mi"), ("name", "nombre"), ("cat", "gato"), ("dog", "perro"),
];

const EN_FR: &[(&str, &str)] = &[
    ("hello", "bonjour"), ("world", "monde"), ("this", "ceci"), ("is", "est"), ("a", "un"),
    ("test", "test"), ("good", "bon"), ("night", "nuit"), ("thank", "merci"), ("you", "vous"),
    ("please", "s'il vous plaît"), ("yes", "oui"), ("no", "non"), ("book", "livre"),
    ("love", "amour"), ("happy", "heureux"), ("learn", "apprendre"), ("language", "langue"),
    ("translate", "traduire"), ("friend", "ami"), ("house", "maison"), ("water", "eau"),
    ("food", "nourriture"), ("the", "le"), ("and", "et"), ("i", "je"), ("my", "mon"),
    ("name", "nom"), ("cat", "chat"), ("dog", "chien"),
];

const EN_DE: &[(&str, &str)] = &[
    ("hello", "hallo"), ("world", "Welt"), ("this", "das"), ("is", "ist"), ("a", "ein"),
    ("test", "Test"), ("good", "gut"), ("night", "Nacht"), ("thank", "danke"), ("you", "du"),
    ("please", "bitte"), ("yes", "ja"), ("no", "nein"), ("book", "Buch"), ("love", "Liebe"),
    ("happy", "glücklich"), ("learn", "lernen"), ("language", "Sprache"),
    ("translate", "übersetzen"), ("friend", "Freund"), ("house", "Haus"), ("water", "Wasser"),
    ("food", "Essen"), ("the", "der"), ("and", "und"), ("i", "ich"), ("my", "mein"),
    ("name", "Name"), ("cat", "Katze"), ("dog", "Hund"),
];

const EN_HI: &[(&str, &str)] = &[
    ("hello", "नमस्ते"), ("world", "दुनिया"), ("this", "यह"), ("is", "है"), ("good", "अच्छा"),
    ("night", "रात"), ("thank", "धन्यवाद"), ("you", "आप"), ("please", "कृपया"),
    ("yes", "हाँ"), ("no", "नहीं"), ("book", "किताब"), ("love", "प्यार"), ("happy", "खुश"),
    ("learn", "सीखना"), ("language", "भाषा"), ("friend", "दोस्त"), ("house", "घर"),
    ("water", "पानी"), ("food", "खाना"), ("and", "और"), ("name", "नाम"),
];

/// Bundled tables keyed by ISO 639-1 pair
fn bundled_tables() -> HashMap<(String, String), HashMap<String, String>> {
    let mut tables = HashMap::new();
    for (target, entries) in [("es", EN_ES), ("fr", EN_FR), ("de", EN_DE), ("hi", EN_HI)] {
        let forward = entries
            .iter()
            .map(|(en, other)| (en.to_string(), other.to_string()))
            .collect::<HashMap<_, _>>();
        let mut reverse = HashMap::new();
        for (en, other) in entries.iter() {
            // Multi-word renderings cannot be matched word by word
            if !other.contains(' ') {
                reverse.entry(other.to_lowercase()).or_insert_with(|| en.to_string());
            }
        }
        tables.insert(("en".to_string(), target.to_string()), forward);
        tables.insert((target.to_string(), "en".to_string()), reverse);
    }
    tables
}

/// Word-for-word translator backed by static tables
#[derive(Debug, Clone)]
pub struct StaticTableTranslator {
    tables: HashMap<(String, String), HashMap<String, String>>,
}

impl Default for StaticTableTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTableTranslator {
    /// Create a translator with the bundled tables
    pub fn new() -> Self {
        Self {
            tables: bundled_tables(),
        }
    }

    /// Add or replace a table for a language pair
    pub fn with_table(
        mut self,
        source_language: &str,
        target_language: &str,
        entries: &[(&str, &str)],
    ) -> Self {
        let table = entries
            .iter()
            .map(|(from, to)| (from.to_lowercase(), to.to_string()))
            .collect();
        self.tables
            .insert((pair_key(source_language), pair_key(target_language)), table);
        self
    }

    /// Whether a table exists for the pair
    pub fn supports_pair(&self, source_language: &str, target_language: &str) -> bool {
        self.table(source_language, target_language).is_some()
    }

    fn table(&self, source_language: &str, target_language: &str) -> Option<&HashMap<String, String>> {
        self.tables
            .get(&(pair_key(source_language), pair_key(target_language)))
    }

    /// Translate by replacing every known word.
    ///
    /// Fails with `UnsupportedLanguagePair` when no table exists and with
    /// `TranslationFailed` when not a single word could be replaced.
    pub fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let table = self.table(source_language, target_language).ok_or_else(|| {
            TranslationError::UnsupportedLanguagePair {
                source_lang: source_language.to_string(),
                target_lang: target_language.to_string(),
            }
        })?;

        let mut matched = 0usize;
        let translated = WORD_PATTERN.replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            match table.get(&word.to_lowercase()) {
                Some(replacement) => {
                    matched += 1;
                    match_case(word, replacement)
                }
                None => word.to_string(),
            }
        });

        debug!("Static table matched {} word(s)", matched);
        if matched == 0 {
            return Err(TranslationError::TranslationFailed(
                "No words in the text matched the dictionary".to_string(),
            ));
        }

        Ok(translated.into_owned())
    }
}

/// Normalize a code for table lookup (`en-US` and `eng` both become `en`)
fn pair_key(code: &str) -> String {
    language_utils::normalize_to_part1_or_part2t(code)
        .unwrap_or_else(|_| language_utils::base_code(code))
}

/// Carry a leading capital over to the replacement
fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
