//! # Order Intent Classifier
//!
//! Keyword heuristic that decides whether a free-text message is a genuine
//! sourcing request worth paging the manager for, or just chatter. Purely
//! deterministic: no context, no per-user state.

/// Phrases that are never sourcing requests even when long enough.
/// Matched against the whole trimmed, lowercased message.
const EXCLUDED_PHRASES: &[&str] = &[
    "привет",
    "здравствуйте",
    "добрый день",
    "добрый вечер",
    "спасибо",
    "пока",
    "hello",
    "hi there",
    "good morning",
    "thanks",
    "thank you",
    "ok",
    "okay",
];

/// Substrings that signal sourcing intent, in either supported language.
const ORDER_KEYWORDS: &[&str] = &[
    "купить",
    "заказать",
    "заказ",
    "доставка",
    "цена",
    "стоимость",
    "товар",
    "поставщик",
    "опт",
    "китай",
    "нужен",
    "нужна",
    "ищу",
    "найти",
    "buy",
    "order",
    "price",
    "supplier",
    "wholesale",
    "sourcing",
    "shipping",
    "product",
];

/// Decide whether a message should be treated as a real sourcing request.
///
/// Rules, in order:
/// 1. Messages shorter than 5 characters are rejected.
/// 2. Exact matches to the exclude-phrase list (greetings etc.) are rejected.
/// 3. Any sourcing keyword anywhere in the text accepts.
/// 4. Keyword-free text longer than 20 characters accepts; detailed messages
///    tend to be real requests even when they avoid the keyword list.
///
/// A 5-20 character message with no keyword is rejected. Lengths are counted
/// in characters, not bytes, so Cyrillic input is measured fairly.
pub fn is_real_order(text: &str) -> bool {
    let trimmed = text.trim();
    let char_count = trimmed.chars().count();

    if char_count < 5 {
        return false;
    }

    let lowered = trimmed.to_lowercase();

    if EXCLUDED_PHRASES.contains(&lowered.as_str()) {
        return false;
    }

    if ORDER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }

    char_count > 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_short_messages() {
        assert!(!is_real_order(""));
        assert!(!is_real_order("да"));
        assert!(!is_real_order("hi"));
        assert!(!is_real_order("    ок    "));
    }

    #[test]
    fn rejects_excluded_phrases() {
        assert!(!is_real_order("привет"));
        assert!(!is_real_order("Здравствуйте"));
        assert!(!is_real_order("  Thank you  "));
    }

    #[test]
    fn accepts_keyword_messages() {
        assert!(is_real_order("хочу купить наушники"));
        assert!(is_real_order("Нужен поставщик кабелей"));
        assert!(is_real_order("What is the price?"));
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert!(is_real_order("КУПИТЬ часы"));
        assert!(is_real_order("WHOLESALE electronics"));
    }

    #[test]
    fn long_messages_accepted_without_keywords() {
        let text = "x".repeat(21);
        assert!(is_real_order(&text));
    }

    #[test]
    fn midlength_messages_without_keywords_rejected() {
        // 5-20 characters, no keyword, not an excluded phrase.
        assert!(!is_real_order("abcdef"));
        assert!(!is_real_order("как дела сегодня"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 12 Cyrillic characters = 24 bytes; must still fall in the
        // reject band because no keyword is present.
        assert!(!is_real_order("мммммммммммм"));
    }
}
