/*!
 * Tests for provider implementations and test doubles
 */

use skillscribe::errors::ProviderError;
use skillscribe::providers::mock::MockTranslator;
use skillscribe::providers::openai::ChatCompletionRequest;
use skillscribe::providers::Translator;

#[tokio::test]
async fn test_mock_working_shouldMarkTranslationsAndCountCalls() {
    let translator = MockTranslator::working();

    let translated = translator.translate("hello").await.unwrap();
    assert_eq!(translated, "[译] hello");
    assert_eq!(translator.calls(), 1);

    translator.translate("again").await.unwrap();
    assert_eq!(translator.calls(), 2);
}

#[tokio::test]
async fn test_mock_failing_shouldAlwaysReturnRequestFailed() {
    let translator = MockTranslator::failing();

    let error = translator.translate("hello").await.unwrap_err();
    assert!(matches!(error, ProviderError::RequestFailed(_)));
    assert_eq!(translator.calls(), 1);
}

#[tokio::test]
async fn test_mock_intermittent_shouldFailEveryNthCall() {
    let translator = MockTranslator::intermittent(2);

    assert!(translator.translate("one").await.is_ok());
    assert!(translator.translate("two").await.is_err());
    assert!(translator.translate("three").await.is_ok());
    assert!(translator.translate("four").await.is_err());
    assert_eq!(translator.calls(), 4);
}

#[test]
fn test_openai_request_shouldSerializeOnlySetFields() {
    let request = ChatCompletionRequest::new("gpt-4o-mini")
        .add_message("system", "Translate to Chinese.")
        .add_message("user", "Hello")
        .temperature(0.3)
        .max_tokens(500);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "gpt-4o-mini");
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["content"], "Hello");
    let temperature = value["temperature"].as_f64().unwrap();
    assert!((temperature - 0.3).abs() < 1e-6);
    assert_eq!(value["max_tokens"], 500);

    // Unset optional fields stay out of the payload
    let bare = ChatCompletionRequest::new("gpt-4o-mini");
    let value = serde_json::to_value(&bare).unwrap();
    assert!(value.get("temperature").is_none());
    assert!(value.get("max_tokens").is_none());
}

#[test]
fn test_provider_error_display_shouldIncludeContext() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "slow down".to_string(),
    };
    assert!(error.to_string().contains("429"));

    let error = ProviderError::RetriesExhausted {
        attempts: 3,
        last_error: "connection reset".to_string(),
    };
    let rendered = error.to_string();
    assert!(rendered.contains("3"));
    assert!(rendered.contains("connection reset"));
}
