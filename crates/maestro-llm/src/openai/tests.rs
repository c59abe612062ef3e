use super::*;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = OpenAiConfig::new("test-key")
        .with_model("gpt-4o")
        .with_base_url("http://localhost:8080/v1")
        .with_timeout(Duration::from_secs(30));

    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.default_model, "gpt-4o");
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_config_defaults() {
    let config = OpenAiConfig::new("k");
    assert_eq!(config.default_model, DEFAULT_MODEL);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert!(config.base_url.is_none());
}

#[test]
fn test_config_debug_masks_key() {
    let config = OpenAiConfig::new("sk-1234567890abcdefghijklmnop");
    let debug = format!("{:?}", config);
    assert!(debug.contains("sk-1...mnop"));
    assert!(!debug.contains("567890abcdef"));
}

#[test]
fn test_build_request_uses_default_model() {
    let provider = OpenAiProvider::new(OpenAiConfig::new("sk-test-key-123456").with_model("m1"));
    let request = CompletionRequest::from_prompt("hi", Some("sys")).with_max_tokens(50);
    let built = provider.build_request(request);

    assert_eq!(built.model, "m1");
    assert_eq!(built.messages.len(), 2);
    assert_eq!(built.max_completion_tokens, Some(50));
}

#[test]
fn test_build_request_keeps_explicit_model() {
    let provider = OpenAiProvider::new(OpenAiConfig::new("sk-test-key-123456"));
    let request = CompletionRequest::from_prompt("hi", None).with_model("custom");
    assert_eq!(provider.build_request(request).model, "custom");
}
