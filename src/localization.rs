use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Localization manager for the BuyerChina bot
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

// Locale resources are compiled in so the binary has no runtime dependency
// on a locales/ directory being shipped alongside it.
const LOCALE_RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("ru", include_str!("../locales/ru/main.ftl")),
];

impl LocalizationManager {
    /// Create a new localization manager with all supported locales loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (locale_str, source) in LOCALE_RESOURCES {
            let locale: LanguageIdentifier = locale_str.parse()?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert((*locale_str).to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram renders the text verbatim; Unicode isolation marks would
        // show up as stray characters around placeables.
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow::anyhow!("invalid fluent resource: {:?}", errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("failed to add fluent resource: {:?}", errors))?;

        Ok(bundle)
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self.bundles.get(language) {
            Some(bundle) => bundle,
            None => {
                // Fallback to English if language not found
                match self.bundles.get("en") {
                    Some(bundle) => bundle,
                    None => return format!("Missing translation: {}", key),
                }
            }
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();

        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut vec![]);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut vec![]);
        }

        value
    }

    /// Get a localized message with arguments in a specific language
    pub fn get_message_with_args_in_language(
        &self,
        key: &str,
        language: &str,
        args: &[(&str, &str)],
    ) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }
}

/// Create a shared localization manager for use across async tasks
pub fn create_localization_manager() -> Result<Arc<LocalizationManager>> {
    Ok(Arc::new(LocalizationManager::new()?))
}

/// Convenience function to get a localized message in the user's language
pub fn t_lang(
    localization: &Arc<LocalizationManager>,
    key: &str,
    language_code: Option<&str>,
) -> String {
    let language = detect_language(localization, language_code);
    localization.get_message_in_language(key, &language, None)
}

/// Convenience function to get a localized message with arguments in the user's language
pub fn t_args_lang(
    localization: &Arc<LocalizationManager>,
    key: &str,
    args: &[(&str, &str)],
    language_code: Option<&str>,
) -> String {
    let language = detect_language(localization, language_code);
    localization.get_message_with_args_in_language(key, &language, args)
}

/// Detect the appropriate language based on the user's Telegram language code
pub fn detect_language(
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> String {
    if let Some(code) = language_code {
        // Extract language code (e.g., "ru-RU" -> "ru", "en-US" -> "en")
        let lang = if code.contains('-') {
            code.split('-').next().unwrap_or("en")
        } else {
            code
        };

        if localization.is_language_supported(lang) {
            return lang.to_string();
        }
    }

    // Default to English if language not supported or not provided
    "en".to_string()
}
