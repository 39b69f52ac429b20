//! Opening-word suggestions for a new scene

use rand::seq::SliceRandom;

const WORDS: &[&str] = &[
    "LIGHTHOUSE",
    "ORCHARD",
    "SUBMARINE",
    "CATHEDRAL",
    "LANTERN",
    "GLACIER",
    "CARNIVAL",
    "TELESCOPE",
    "BAKERY",
    "TYPEWRITER",
    "AQUARIUM",
    "VOLCANO",
    "LIBRARY",
    "CAROUSEL",
    "OBSERVATORY",
    "GREENHOUSE",
    "ZEPPELIN",
    "HARBOR",
    "LABYRINTH",
    "MOTH",
    "PIANO",
    "DESERT",
    "TRAIN STATION",
    "BEEHIVE",
];

pub struct SuggestionService {
    words: Vec<String>,
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionService {
    pub fn new() -> Self {
        Self::with_words(WORDS.iter().map(|w| w.to_string()))
    }

    /// Custom word list; an empty list falls back to the built-in one
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.into().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Self::new();
        }
        Self { words }
    }

    /// A random word, uppercase
    pub fn suggest(&self) -> String {
        self.words
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| WORDS[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_comes_from_list() {
        let service = SuggestionService::new();
        for _ in 0..20 {
            let word = service.suggest();
            assert!(WORDS.contains(&word.as_str()));
            assert_eq!(word, word.to_uppercase());
        }
    }

    #[test]
    fn test_custom_words_uppercased() {
        let service = SuggestionService::with_words(["  kite "]);
        assert_eq!(service.suggest(), "KITE");
    }

    #[test]
    fn test_empty_custom_list_falls_back() {
        let service = SuggestionService::with_words(Vec::<String>::new());
        assert!(WORDS.contains(&service.suggest().as_str()));
    }
}
