//! Integration tests for summarizer construction.
//!
//! These tests verify that:
//! - Construction fails fast when either credential is missing
//! - With credentials present, both prompt/model/chain pipelines exist

use ragbot_rag::summarize::{
    GROQ_API_KEY_ENV, NVIDIA_API_KEY_ENV, SummarizeError, Summarizer, SummarizerConfig,
};

fn full_config() -> SummarizerConfig {
    SummarizerConfig {
        groq_api_key: Some("fake-groq".to_string()),
        nvidia_api_key: Some("fake-nvidia".to_string()),
    }
}

#[test]
fn missing_groq_key_fails_construction() {
    let config = SummarizerConfig {
        groq_api_key: None,
        nvidia_api_key: Some("fake-nvidia".to_string()),
    };

    match Summarizer::new(&config) {
        Err(SummarizeError::MissingCredential(var)) => assert_eq!(var, GROQ_API_KEY_ENV),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("construction should have failed"),
    }
}

#[test]
fn missing_nvidia_key_fails_construction() {
    let config = SummarizerConfig {
        groq_api_key: Some("fake-groq".to_string()),
        nvidia_api_key: None,
    };

    match Summarizer::new(&config) {
        Err(SummarizeError::MissingCredential(var)) => assert_eq!(var, NVIDIA_API_KEY_ENV),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("construction should have failed"),
    }
}

#[test]
fn empty_keys_count_as_missing() {
    let config = SummarizerConfig {
        groq_api_key: Some(String::new()),
        nvidia_api_key: Some("fake-nvidia".to_string()),
    };

    assert!(matches!(
        Summarizer::new(&config),
        Err(SummarizeError::MissingCredential(GROQ_API_KEY_ENV))
    ));
}

#[test]
fn both_pipelines_exist_with_credentials() {
    let summarizer = Summarizer::new(&full_config()).expect("construction should succeed");

    assert!(summarizer.text_prompt.template().contains("{element}"));
    assert!(!summarizer.image_prompt.template().is_empty());

    // Chain prompts were built from the same templates
    assert!(
        summarizer
            .text_prompt
            .format("element", "marker")
            .contains("marker")
    );
}
