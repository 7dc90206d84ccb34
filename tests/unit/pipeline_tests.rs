/*!
 * Tests for the chunked translation pipeline
 *
 * Time is paused in the async tests, so inter-chunk delays and request
 * timeouts run instantly and can be measured exactly.
 */

use tokio::time::{Duration, Instant};

use linguaflow::errors::TranslationError;
use linguaflow::providers::mock::MockProvider;
use linguaflow::translation::{
    split_into_chunks, ChunkedTranslationPipeline, PipelineOptions, TranslationRequest,
};

use crate::common::mock_providers::{ScriptedProvider, Step};
use crate::common::{sentence_of_len, text_of_sentences};

fn long_text() -> String {
    // 20 sentences of 60 chars: 1200 chars, packed 8 + 8 + 4
    text_of_sentences(20, 60)
}

#[tokio::test(start_paused = true)]
async fn test_translate_withShortText_shouldSendSingleRequest() {
    let provider = MockProvider::working();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let text = "Hello world. This is a test.";
    let result = pipeline.translate(text, "en", "es").await.unwrap();

    assert_eq!(provider.request_count(), 1);
    assert_eq!(provider.requests()[0].text, text);
    assert_eq!(result, format!("[TRANSLATED to es] {}", text));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withHelloWorldScenario_shouldReturnProviderTranslation() {
    let provider = MockProvider::working().with_custom_response(|req| {
        assert_eq!(req.source_language, "en");
        assert_eq!(req.target_language, "es");
        match req.text.as_str() {
            "Hello world. This is a test." => "Hola mundo. Esto es una prueba.".to_string(),
            other => other.to_string(),
        }
    });
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let result = pipeline
        .translate("Hello world. This is a test.", "en", "es")
        .await
        .unwrap();

    assert_eq!(result, "Hola mundo. Esto es una prueba.");
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withLongText_shouldSendBoundedChunksInOrder() {
    let text = long_text();
    assert_eq!(text.chars().count(), 1200);

    let provider = ScriptedProvider::translating();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());
    let result = pipeline.translate(&text, "en", "fr").await.unwrap();

    let sent = provider.texts();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|t| !t.is_empty() && t.chars().count() <= 500));
    assert_eq!(sent.join(" "), text);

    let expected = sent
        .iter()
        .map(|t| ScriptedProvider::translation_of(t))
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(result, expected);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withFailedMiddleChunk_shouldKeepOriginalTextInPlace() {
    let text = long_text();
    let chunks = split_into_chunks(&text, 500);
    assert_eq!(chunks.len(), 3);

    let provider = ScriptedProvider::new(vec![Step::Translate, Step::NetworkError, Step::Translate]);
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());
    let request = TranslationRequest::new(text.clone(), "en", "de");
    let outcome = pipeline.translate_detailed(&request).await.unwrap();

    assert_eq!(provider.calls().len(), 3);
    assert_eq!(outcome.fallback_count(), 1);
    assert!(!outcome.chunks[1].succeeded);
    assert_eq!(
        outcome.text,
        format!(
            "{} {} {}",
            ScriptedProvider::translation_of(&chunks[0].text),
            chunks[1].text,
            ScriptedProvider::translation_of(&chunks[2].text)
        )
    );
}

#[tokio::test(start_paused = true)]
async fn test_translate_withMalformedPayload_shouldFallBack() {
    let provider = ScriptedProvider::new(vec![Step::Malformed]);
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let result = pipeline.translate("Bonjour.", "fr", "en").await.unwrap();
    assert_eq!(result, "Bonjour.");
}

#[tokio::test(start_paused = true)]
async fn test_translate_withEveryChunkFailing_shouldReturnOriginalText() {
    let text = long_text();
    let provider = MockProvider::failing();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let result = pipeline.translate(&text, "en", "es").await.unwrap();
    assert_eq!(provider.request_count(), 3);
    assert_eq!(result, text);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withQuotaOnSecondChunk_shouldFailWithoutPartialResult() {
    let provider = ScriptedProvider::new(vec![Step::Translate, Step::Quota]);
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let result = pipeline.translate(&long_text(), "en", "es").await;

    match result {
        Err(TranslationError::TranslationFailed(message)) => {
            assert!(message.contains("daily limit reached"));
        }
        other => panic!("expected TranslationFailed, got {:?}", other),
    }
    // The third chunk is never sent
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withQuotaOnSingleChunk_shouldFail() {
    let provider = MockProvider::quota_after(0);
    let pipeline = ChunkedTranslationPipeline::new(provider);

    let result = pipeline.translate("Hello.", "en", "es").await;
    assert!(matches!(result, Err(TranslationError::TranslationFailed(_))));
}

#[tokio::test(start_paused = true)]
async fn test_translate_twiceWithShortText_shouldUseOneChunkEachTime() {
    let provider = MockProvider::working();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let first = pipeline.translate("Same input.", "en", "it").await.unwrap();
    assert_eq!(provider.request_count(), 1);
    let second = pipeline.translate("Same input.", "en", "it").await.unwrap();
    assert_eq!(provider.request_count(), 2);
    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withOversizedSentence_shouldSendItWhole() {
    // Known limitation: the 700 char sentence is not subdivided
    let oversized = sentence_of_len(1, 700);
    let text = format!("Short intro. {} Short outro.", oversized);

    let provider = ScriptedProvider::translating();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());
    let result = pipeline.translate(&text, "en", "es").await;

    assert!(result.is_ok());
    let sent = provider.texts();
    assert_eq!(sent, vec!["Short intro.".to_string(), oversized, "Short outro.".to_string()]);
    assert_eq!(sent[1].chars().count(), 700);
}

#[tokio::test(start_paused = true)]
async fn test_translate_shouldPauseBetweenChunksButNotAfterLast() {
    let provider = ScriptedProvider::translating();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let start = Instant::now();
    pipeline.translate(&long_text(), "en", "es").await.unwrap();
    let elapsed = start.elapsed();

    let calls = provider.calls();
    assert_eq!(calls.len(), 3);
    for pair in calls.windows(2) {
        assert_eq!(pair[1].at - pair[0].at, Duration::from_millis(300));
    }
    assert_eq!(elapsed, Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withCustomDelay_shouldUseIt() {
    let provider = ScriptedProvider::translating();
    let options = PipelineOptions {
        chunk_delay: Duration::from_millis(50),
        ..PipelineOptions::default()
    };
    let pipeline = ChunkedTranslationPipeline::with_options(provider.clone(), options);

    let start = Instant::now();
    pipeline.translate(&long_text(), "en", "es").await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withStalledRequest_shouldTimeOutAndFallBack() {
    let provider = ScriptedProvider::new(vec![Step::Hang]);
    let options = PipelineOptions {
        request_timeout: Duration::from_secs(5),
        ..PipelineOptions::default()
    };
    let pipeline = ChunkedTranslationPipeline::with_options(provider.clone(), options);

    let start = Instant::now();
    let outcome = pipeline
        .translate_detailed(&TranslationRequest::new("Still waiting.", "en", "es"))
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(5));
    assert_eq!(outcome.text, "Still waiting.");
    assert_eq!(outcome.fallback_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withSlowProvider_shouldTimeOutEveryChunk() {
    let provider = MockProvider::slow(60_000);
    let options = PipelineOptions {
        request_timeout: Duration::from_secs(2),
        ..PipelineOptions::default()
    };
    let pipeline = ChunkedTranslationPipeline::with_options(provider.clone(), options);
    let text = long_text();

    let start = Instant::now();
    let outcome = pipeline
        .translate_detailed(&TranslationRequest::new(text.clone(), "en", "es"))
        .await
        .unwrap();

    // Three timeouts plus two pauses between chunks
    assert_eq!(start.elapsed(), Duration::from_millis(6600));
    assert_eq!(provider.request_count(), 3);
    assert_eq!(outcome.fallback_count(), 3);
    assert_eq!(outcome.text, text);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withEmptyResponses_shouldKeepOriginalText() {
    let provider = MockProvider::empty();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let outcome = pipeline
        .translate_detailed(&TranslationRequest::new("Nothing comes back.", "en", "fr"))
        .await
        .unwrap();

    assert_eq!(provider.request_count(), 1);
    assert!(!outcome.is_complete());
    assert_eq!(outcome.text, "Nothing comes back.");
}

#[tokio::test(start_paused = true)]
async fn test_translate_withUnsupportedPair_shouldFailBeforeAnyRequest() {
    let provider = MockProvider::working().without_pair("en", "tlh");
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let result = pipeline.translate("Hello.", "en", "tlh").await;

    match result {
        Err(TranslationError::UnsupportedLanguagePair { source_lang, target_lang }) => {
            assert_eq!(source_lang, "en");
            assert_eq!(target_lang, "tlh");
        }
        other => panic!("expected UnsupportedLanguagePair, got {:?}", other),
    }
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withBlankText_shouldSendNothing() {
    let provider = MockProvider::working();
    let pipeline = ChunkedTranslationPipeline::new(provider.clone());

    let outcome = pipeline
        .translate_detailed(&TranslationRequest::new("  \n ", "en", "es"))
        .await
        .unwrap();

    assert_eq!(outcome.text, "");
    assert!(outcome.chunks.is_empty());
    assert_eq!(provider.request_count(), 0);
}

#[test]
fn test_splitIntoChunks_withSameSentenceLengths_shouldBeDeterministic() {
    let text = long_text();
    let first = split_into_chunks(&text, 500);
    let second = split_into_chunks(&text, 500);

    assert!(first.len() >= 3);
    assert_eq!(first, second);
}
