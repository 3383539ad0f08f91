//! # User Language Preferences
//!
//! In-memory store of per-user language choices made through the language
//! menu. A stored choice wins over the Telegram client hint; with neither,
//! English is used.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::localization::{detect_language, LocalizationManager};

/// Per-user language selections, keyed by Telegram user id
#[derive(Default)]
pub struct UserLanguages {
    selected: RwLock<HashMap<i64, String>>,
}

impl UserLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an explicit language choice. Unsupported codes are ignored so
    /// a stale callback can never push a user into a language without copy.
    pub fn set(&self, user_id: i64, language: &str, localization: &Arc<LocalizationManager>) {
        if localization.is_language_supported(language) {
            self.selected
                .write()
                .insert(user_id, language.to_string());
        }
    }

    /// Explicit choice if one exists
    pub fn get(&self, user_id: i64) -> Option<String> {
        self.selected.read().get(&user_id).cloned()
    }

    /// Resolve the language for a user: explicit choice, then the Telegram
    /// client hint, then English.
    pub fn resolve(
        &self,
        user_id: i64,
        telegram_hint: Option<&str>,
        localization: &Arc<LocalizationManager>,
    ) -> String {
        if let Some(language) = self.get(user_id) {
            return language;
        }
        detect_language(localization, telegram_hint)
    }
}
