//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use hotspots::localization::LocalizationManager;
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        // Create a new localization manager for each test
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("bot-description", "en", None);
        assert!(!message.is_empty());
        assert!(message.contains("/upload"));
        assert!(message.contains("/download"));
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("nonexistent-key", "en", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_unsupported_language() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("upload-success", "unsupported", None);
        // Should fall back to Russian
        assert_eq!(message, "Данные успешно считаны");
        assert!(!manager.supports("unsupported"));
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("field", "ParkName");

        let message = manager.get_message_in_language("filter-prompt", "ru", Some(&args));
        assert!(message.starts_with("__*Ответьте*__ на данное сообщение"));
        assert!(message.contains("*ParkName*"));

        let message = manager.get_message_with_args("upload-prompt", "ru", &[("format", "json")]);
        assert_eq!(message, "Загрузите json файл для обработки");
    }

    #[test]
    fn test_get_message_missing_args() {
        let manager = setup_localization();

        // Missing arguments must not panic
        let message = manager.get_message_in_language("upload-prompt", "en", None);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_english_localization() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("error-no-data", "en", None);
        let russian_message = manager.get_message_in_language("error-no-data", "ru", None);
        assert_ne!(message, russian_message);
        assert_eq!(russian_message, "Загрузите json или csv файл для обработки");
    }

    #[test]
    fn test_download_caption() {
        let manager = setup_localization();

        assert_eq!(
            manager.get_message_in_language("download-caption", "ru", None),
            "✨Обработанный файл"
        );
    }
}
