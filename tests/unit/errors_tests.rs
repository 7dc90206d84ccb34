/*!
 * Tests for error types and conversions
 */

use linguaflow::errors::{
    AppError, DictionaryError, GrammarError, ProviderError, SpeechError, TranslationError,
};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_timeout_shouldDisplayMilliseconds() {
    let error = ProviderError::Timeout(30000);
    assert_eq!(format!("{}", error), "Request timed out after 30000 ms");
}

#[test]
fn test_providerError_isQuota_shouldOnlyMatchQuotaExhaustion() {
    assert!(ProviderError::QuotaExceeded("daily limit".to_string()).is_quota());
    assert!(!ProviderError::RateLimitExceeded("slow down".to_string()).is_quota());
    assert!(!ProviderError::ConnectionError("reset".to_string()).is_quota());
    assert!(!ProviderError::Timeout(10).is_quota());
}

#[test]
fn test_translationError_unsupportedPair_shouldNameBothLanguages() {
    let error = TranslationError::UnsupportedLanguagePair {
        source_lang: "en".to_string(),
        target_lang: "tlh".to_string(),
    };
    assert_eq!(format!("{}", error), "Unsupported language pair: en -> tlh");
}

#[test]
fn test_grammarError_fromProviderError_shouldWrapCorrectly() {
    let error: GrammarError = ProviderError::ConnectionError("Network down".to_string()).into();
    let display = format!("{}", error);
    assert!(display.contains("Grammar service error"));
    assert!(display.contains("Network down"));
}

#[test]
fn test_dictionaryError_variants_shouldDisplayUserMessages() {
    assert_eq!(
        format!("{}", DictionaryError::EmptyQuery),
        "Please enter a word to search"
    );
    assert!(format!("{}", DictionaryError::NotFound("zzz".to_string())).contains("zzz"));
}

#[test]
fn test_speechError_unsupported_shouldNameCapability() {
    let error = SpeechError::Unsupported("Speech synthesis");
    assert_eq!(format!("{}", error), "Speech synthesis not supported");
}

#[test]
fn test_appError_fromTranslationError_shouldWrapCorrectly() {
    let app_error: AppError = TranslationError::TranslationFailed("quota".to_string()).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Translation error"));
    assert!(display.contains("quota"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(format!("{}", app_error), "Unknown error: something odd");
}
