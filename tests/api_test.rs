use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use medrelay::application::ports::{
    AiProvider, AiProviderError, AudioFetchError, AudioFetcher, AudioStorage, AudioStorageError,
    ConversationRepository, MedicalSummary, PresignedUpload,
};
use medrelay::application::services::{
    ConversationService, IngestionService, SummaryService, TRANSCRIPTION_FALLBACK,
};
use medrelay::domain::{ConversationId, Language, SummaryStyle};
use medrelay::infrastructure::persistence::SqliteConversationRepository;
use medrelay::presentation::config::Settings;
use medrelay::presentation::create_router;
use medrelay::presentation::state::AppState;

const TEST_MAX_AUDIO_BYTES: u64 = 1024;

struct StubProvider;

#[async_trait]
impl AiProvider for StubProvider {
    async fn translate(
        &self,
        text: &str,
        _source: Language,
        target: Language,
    ) -> Result<String, AiProviderError> {
        Ok(format!("[{}] {}", target, text))
    }

    async fn transcribe_audio(
        &self,
        _audio: &[u8],
        _mime_type: &str,
        _language_hint: Language,
    ) -> Result<String, AiProviderError> {
        Ok("I have a headache".to_string())
    }

    async fn summarize_medical(
        &self,
        _lines: &[String],
        _style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError> {
        Ok(MedicalSummary {
            summary: "Patient reports headache".to_string(),
            symptoms: vec!["headache".to_string()],
            diagnoses: vec![],
            medications: vec!["ibuprofen".to_string()],
            follow_up: vec!["return in one week".to_string()],
        })
    }
}

/// Fails every operation and counts how often it was asked.
struct CountingFailingProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl AiProvider for CountingFailingProvider {
    async fn translate(
        &self,
        _text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AiProviderError::RequestFailed("down".to_string()))
    }

    async fn transcribe_audio(
        &self,
        _audio: &[u8],
        _mime_type: &str,
        _language_hint: Language,
    ) -> Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AiProviderError::RequestFailed("down".to_string()))
    }

    async fn summarize_medical(
        &self,
        _lines: &[String],
        _style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AiProviderError::RequestFailed("down".to_string()))
    }
}

/// Succeeds on translate/transcribe but rejects summarization.
struct SummaryErrorProvider {
    error: fn() -> AiProviderError,
}

#[async_trait]
impl AiProvider for SummaryErrorProvider {
    async fn translate(
        &self,
        text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, AiProviderError> {
        Ok(text.to_string())
    }

    async fn transcribe_audio(
        &self,
        _audio: &[u8],
        _mime_type: &str,
        _language_hint: Language,
    ) -> Result<String, AiProviderError> {
        Ok("transcript".to_string())
    }

    async fn summarize_medical(
        &self,
        _lines: &[String],
        _style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError> {
        Err((self.error)())
    }
}

struct StubFetcher {
    payload: Vec<u8>,
}

#[async_trait]
impl AudioFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, AudioFetchError> {
        Ok(self.payload.clone())
    }
}

struct FailingFetcher;

#[async_trait]
impl AudioFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, AudioFetchError> {
        Err(AudioFetchError::UpstreamStatus(404))
    }
}

struct StubStorage;

#[async_trait]
impl AudioStorage for StubStorage {
    async fn presign_upload(
        &self,
        conversation_id: ConversationId,
        _mime_type: &str,
    ) -> Result<PresignedUpload, AudioStorageError> {
        let key = format!("conversations/{}/clip.webm", conversation_id.as_uuid());
        Ok(PresignedUpload {
            upload_url: format!("https://bucket.test/{}?signed", key),
            file_url: format!("https://bucket.test/{}", key),
            object_key: key,
        })
    }
}

async fn test_repository() -> Arc<dyn ConversationRepository> {
    let repository = SqliteConversationRepository::connect("sqlite::memory:", 1)
        .await
        .expect("connect sqlite");
    repository.init_schema().await.expect("init schema");
    Arc::new(repository)
}

async fn create_app_with(
    provider: Arc<dyn AiProvider>,
    audio_fetcher: Arc<dyn AudioFetcher>,
    audio_storage: Option<Arc<dyn AudioStorage>>,
) -> axum::Router {
    let repository = test_repository().await;

    let state = AppState {
        conversation_service: Arc::new(ConversationService::new(Arc::clone(&repository))),
        ingestion_service: Arc::new(IngestionService::new(
            Arc::clone(&repository),
            Arc::clone(&provider),
            audio_fetcher,
            TEST_MAX_AUDIO_BYTES,
        )),
        summary_service: Arc::new(SummaryService::new(
            Arc::clone(&repository),
            Arc::clone(&provider),
        )),
        audio_storage,
        settings: Settings::default(),
    };

    create_router(state)
}

async fn create_app() -> axum::Router {
    create_app_with(
        Arc::new(StubProvider),
        Arc::new(StubFetcher { payload: vec![0; 64] }),
        Some(Arc::new(StubStorage)),
    )
    .await
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_conversation(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/conversations",
            json!({"doctor_language": "en", "patient_language": "es"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

async fn ingest_text(app: &axum::Router, conversation_id: &str, text: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/messages/text",
            json!({
                "conversation_id": conversation_id,
                "role": "doctor",
                "text": text,
                "source_language": "en",
                "target_language": "es",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn given_running_server_when_health_check_then_reports_provider() {
    let app = create_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["provider"], json!("groq"));
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_echoed_on_response() {
    let app = create_app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "test-correlation-id")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-correlation-id"
    );
}

#[tokio::test]
async fn given_valid_languages_when_creating_conversation_then_returns_created() {
    let app = create_app().await;

    let response = app
        .oneshot(post_json(
            "/api/conversations",
            json!({"title": "Checkup", "doctor_language": "en", "patient_language": "zh"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], json!("Checkup"));
    assert_eq!(body["doctor_language"], json!("en"));
    assert_eq!(body["patient_language"], json!("zh"));
}

#[tokio::test]
async fn given_unsupported_language_when_creating_conversation_then_returns_bad_request() {
    let app = create_app().await;

    let response = app
        .oneshot(post_json(
            "/api/conversations",
            json!({"doctor_language": "en", "patient_language": "xx"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("unsupported_language"));
}

#[tokio::test]
async fn given_unknown_conversation_when_fetching_then_returns_not_found() {
    let app = create_app().await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("conversation_not_found"));
}

#[tokio::test]
async fn given_working_provider_when_ingesting_text_then_translation_stored() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let body = ingest_text(&app, &conversation_id, "Take two tablets daily").await;

    assert_eq!(body["translated_text"], json!("[es] Take two tablets daily"));
    assert_eq!(body["used_fallback"], json!(false));
    assert_eq!(body["modality"], json!("text"));
}

#[tokio::test]
async fn given_failing_provider_when_ingesting_text_then_original_stored_with_fallback_marker() {
    let app = create_app_with(
        Arc::new(CountingFailingProvider {
            calls: Arc::new(AtomicUsize::new(0)),
        }),
        Arc::new(StubFetcher { payload: vec![] }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let body = ingest_text(&app, &conversation_id, "Does it hurt here?").await;

    assert_eq!(body["translated_text"], json!("Does it hurt here?"));
    assert_eq!(body["original_text"], json!("Does it hurt here?"));
    assert_eq!(body["used_fallback"], json!(true));
}

#[tokio::test]
async fn given_blank_text_when_ingesting_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/text",
            json!({
                "conversation_id": conversation_id,
                "role": "doctor",
                "text": "   ",
                "source_language": "en",
                "target_language": "es",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("empty_text"));
}

#[tokio::test]
async fn given_unknown_role_when_ingesting_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/text",
            json!({
                "conversation_id": conversation_id,
                "role": "nurse",
                "text": "hello",
                "source_language": "en",
                "target_language": "es",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_role"));
}

#[tokio::test]
async fn given_oversized_audio_when_finalizing_then_rejected_without_provider_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = create_app_with(
        Arc::new(CountingFailingProvider {
            calls: Arc::clone(&calls),
        }),
        Arc::new(StubFetcher {
            payload: vec![0; (TEST_MAX_AUDIO_BYTES + 1) as usize],
        }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/audio/finalize",
            json!({
                "conversation_id": conversation_id,
                "role": "patient",
                "audio_url": "https://bucket.test/audio.webm",
                "source_language": "es",
                "target_language": "en",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("audio_too_large"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_unreachable_audio_when_finalizing_then_returns_bad_gateway() {
    let app = create_app_with(
        Arc::new(StubProvider),
        Arc::new(FailingFetcher),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/audio/finalize",
            json!({
                "conversation_id": conversation_id,
                "role": "patient",
                "audio_url": "https://bucket.test/missing.webm",
                "source_language": "es",
                "target_language": "en",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("audio_fetch_failed"));
}

#[tokio::test]
async fn given_failing_provider_when_finalizing_audio_then_placeholder_stored() {
    let app = create_app_with(
        Arc::new(CountingFailingProvider {
            calls: Arc::new(AtomicUsize::new(0)),
        }),
        Arc::new(StubFetcher { payload: vec![0; 64] }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/audio/finalize",
            json!({
                "conversation_id": conversation_id,
                "role": "patient",
                "audio_url": "https://bucket.test/clip.webm",
                "source_language": "es",
                "target_language": "en",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["transcript_text"], json!(TRANSCRIPTION_FALLBACK));
    assert_eq!(body["translated_text"], json!(TRANSCRIPTION_FALLBACK));
    assert_eq!(body["used_fallback"], json!(true));
}

#[tokio::test]
async fn given_three_messages_when_paging_after_first_then_returns_remaining_two() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let first = ingest_text(&app, &conversation_id, "one").await;
    let second = ingest_text(&app, &conversation_id, "two").await;
    let third = ingest_text(&app, &conversation_id, "three").await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}/messages?after_id={}",
            conversation_id,
            first["id"].as_str().unwrap()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["id"], second["id"]);
    assert_eq!(messages[1]["id"], third["id"]);
    assert_eq!(body["next_after_id"], third["id"]);
}

#[tokio::test]
async fn given_no_cursor_when_listing_then_latest_page_in_ascending_order() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    ingest_text(&app, &conversation_id, "one").await;
    let second = ingest_text(&app, &conversation_id, "two").await;
    let third = ingest_text(&app, &conversation_id, "three").await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}/messages?limit=2",
            conversation_id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["id"], second["id"]);
    assert_eq!(messages[1]["id"], third["id"]);
}

#[tokio::test]
async fn given_unknown_cursor_when_listing_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;
    ingest_text(&app, &conversation_id, "one").await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}/messages?after_id={}",
            conversation_id,
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_cursor"));
}

#[tokio::test]
async fn given_cursor_from_other_conversation_when_listing_then_returns_bad_request() {
    let app = create_app().await;
    let first_conversation = create_conversation(&app).await;
    let second_conversation = create_conversation(&app).await;
    let foreign = ingest_text(&app, &first_conversation, "hello").await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}/messages?after_id={}",
            second_conversation,
            foreign["id"].as_str().unwrap()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_cursor"));
}

#[tokio::test]
async fn given_out_of_range_limit_when_listing_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(get(&format!(
            "/api/conversations/{}/messages?limit=0",
            conversation_id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_limit"));
}

#[tokio::test]
async fn given_blank_query_when_searching_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;
    ingest_text(&app, &conversation_id, "blood pressure reading").await;

    let response = app.oneshot(get("/api/search?q=%20")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("empty_query"));
}

#[tokio::test]
async fn given_no_matches_when_searching_then_returns_empty_list() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;
    ingest_text(&app, &conversation_id, "blood pressure reading").await;

    let response = app
        .oneshot(get("/api/search?q=nonexistent"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_matching_message_when_searching_then_returns_hit_with_snippet() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;
    ingest_text(&app, &conversation_id, "patient reports chest pain").await;
    ingest_text(&app, &conversation_id, "unrelated note").await;

    let response = app
        .oneshot(get("/api/search?q=Chest+Pain"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0]["snippet"],
        json!("patient reports chest pain")
    );
    assert_eq!(results[0]["conversation_id"], json!(conversation_id));
}

#[tokio::test]
async fn given_messages_when_summarizing_then_summary_persisted() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;
    ingest_text(&app, &conversation_id, "my head hurts").await;

    let response = app
        .oneshot(post_json(
            &format!("/api/conversations/{}/summary", conversation_id),
            json!({"style": "clinical"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["summary_text"], json!("Patient reports headache"));
    assert_eq!(body["symptoms"], json!(["headache"]));
    assert_eq!(body["conversation_id"], json!(conversation_id));
}

#[tokio::test]
async fn given_empty_conversation_when_summarizing_then_still_succeeds() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/conversations/{}/summary", conversation_id),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn given_invalid_style_when_summarizing_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/conversations/{}/summary", conversation_id),
            json!({"style": "verbose"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_style"));
}

#[tokio::test]
async fn given_rate_limited_provider_when_summarizing_then_returns_too_many_requests() {
    let app = create_app_with(
        Arc::new(SummaryErrorProvider {
            error: || AiProviderError::RateLimited,
        }),
        Arc::new(StubFetcher { payload: vec![] }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/conversations/{}/summary", conversation_id),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("groq_rate_limited"));
}

#[tokio::test]
async fn given_malformed_summary_json_when_summarizing_then_returns_bad_gateway() {
    let app = create_app_with(
        Arc::new(SummaryErrorProvider {
            error: || AiProviderError::ParseFailed,
        }),
        Arc::new(StubFetcher { payload: vec![] }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/conversations/{}/summary", conversation_id),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("summary_parse_failed"));
}

#[tokio::test]
async fn given_configured_storage_when_presigning_then_returns_upload_urls() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/audio/presign",
            json!({"conversation_id": conversation_id, "mime_type": "audio/webm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["upload_url"].as_str().unwrap().contains("signed"));
    assert!(
        body["object_key"]
            .as_str()
            .unwrap()
            .starts_with(&format!("conversations/{}/", conversation_id))
    );
    assert_eq!(body["expires_in_seconds"], json!(600));
}

#[tokio::test]
async fn given_no_storage_when_presigning_then_reports_not_configured() {
    let app = create_app_with(
        Arc::new(StubProvider),
        Arc::new(StubFetcher { payload: vec![] }),
        None,
    )
    .await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/audio/presign",
            json!({"conversation_id": conversation_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("storage_not_configured"));
}

#[tokio::test]
async fn given_disallowed_mime_type_when_presigning_then_returns_bad_request() {
    let app = create_app().await;
    let conversation_id = create_conversation(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/audio/presign",
            json!({"conversation_id": conversation_id, "mime_type": "video/mp4"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("unsupported_media_type"));
}

#[tokio::test]
async fn given_unknown_conversation_when_presigning_then_returns_not_found() {
    let app = create_app().await;

    let response = app
        .oneshot(post_json(
            "/api/audio/presign",
            json!({"conversation_id": uuid::Uuid::new_v4()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
