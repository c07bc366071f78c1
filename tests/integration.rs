use lesson_plan_generator::{
    ai::{CompletionService, GeminiCompletionClient, MockCompletionClient},
    app::{LessonPlanner, PlannerServices},
    encoder::encode_paths,
    error::GENERIC_FAILURE_MESSAGE,
    export::{build_export, FsExportSink, MockExportSink, UTF8_BOM},
    models::{GenerationRequest, GenerationState, LessonDuration, LessonForm},
    prompts::build_lesson_prompt,
    render::render,
    Error,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PLAN_TEXT: &str = "**I. Mục tiêu**\n- Nêu được khái niệm *quang hợp*\n**II. Tiến trình**";

fn write_doc(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn photosynthesis_form(files: Vec<PathBuf>) -> LessonForm {
    LessonForm {
        topic: "Quang hợp ở thực vật".to_string(),
        duration: LessonDuration::Minutes45,
        files,
    }
}

#[tokio::test]
async fn test_full_workflow_with_mocks_and_disk_export() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "sinh-hoc-11.pdf", b"%PDF-1.7 sample");
    let output_dir = dir.path().join("output");

    let completion = MockCompletionClient::new().with_response(PLAN_TEXT.to_string());
    let probe = completion.clone();
    let mut planner = LessonPlanner::with_services(PlannerServices {
        completion: Box::new(completion),
        sink: Box::new(FsExportSink::new(&output_dir)),
    });
    probe.observe_state(planner.subscribe());

    let state = planner
        .generate(&photosynthesis_form(vec![doc]))
        .await
        .unwrap();
    assert_eq!(state.result().unwrap().raw_text, PLAN_TEXT);

    // Generate control was disabled for the whole request.
    assert_eq!(probe.get_observed_states(), vec![GenerationState::Loading]);
    assert!(!planner.is_busy());

    let rendered = planner.rendered_plan().unwrap();
    assert_eq!(rendered, render(PLAN_TEXT));

    let path = planner.download().await.unwrap().unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "ke-hoach-bai-giang-quang-hợp-ở-thực-vật.docx"
    );

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let body = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    assert!(body.contains(&rendered));
    assert!(body.contains("urn:schemas-microsoft-com:office:word"));
}

#[tokio::test]
async fn test_failure_shows_message_and_no_result() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "notes.txt", b"ghi chu");

    let sink = MockExportSink::new();
    let sink_probe = sink.clone();
    let mut planner = LessonPlanner::with_services(PlannerServices {
        completion: Box::new(MockCompletionClient::new().with_failure("network down".to_string())),
        sink: Box::new(sink),
    });

    let state = planner
        .generate(&photosynthesis_form(vec![doc]))
        .await
        .unwrap();
    assert_eq!(state.failure(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(planner.rendered_plan().is_none());

    assert!(planner.download().await.unwrap().is_none());
    assert_eq!(sink_probe.get_delivery_count(), 0);
}

#[tokio::test]
async fn test_second_file_unreadable_sends_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_doc(dir.path(), "first.pdf", b"%PDF-1.4");
    let second = dir.path().join("removed.pdf");

    let completion = MockCompletionClient::new();
    let probe = completion.clone();
    let mut planner = LessonPlanner::with_services(PlannerServices {
        completion: Box::new(completion),
        sink: Box::new(MockExportSink::new()),
    });

    let state = planner
        .generate(&photosynthesis_form(vec![first.clone(), second.clone()]))
        .await
        .unwrap();
    assert_eq!(state.failure(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(probe.get_call_count(), 0);

    let err = encode_paths(&[first, second]).await.unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[tokio::test]
async fn test_gemini_client_against_mock_server() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "notes.txt", b"Quang hop");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/[^/]+:generateContent$"))
        .and(body_string_contains("Quang hợp ở thực vật"))
        .and(body_string_contains("\"mimeType\":\"text/plain\""))
        .and(body_string_contains("\"data\":\"UXVhbmcgaG9w\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": PLAN_TEXT }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiCompletionClient::new(
        "test-key".to_string(),
        "gemini-2.5-flash".to_string(),
        Duration::from_secs(5),
    )
    .with_base_url(server.uri());

    let request = GenerationRequest {
        prompt_text: build_lesson_prompt("Quang hợp ở thực vật", LessonDuration::Minutes45.label()),
        parts: encode_paths(&[doc]).await.unwrap(),
    };

    let result = client.complete(&request).await.unwrap();
    assert_eq!(result.raw_text, PLAN_TEXT);
}

#[test]
fn test_export_slug_collapses_whitespace_runs() {
    let export = build_export("<em>x</em>", "A   B").unwrap();
    assert_eq!(export.file_name, "ke-hoach-bai-giang-a-b.docx");

    let export = build_export("<em>x</em>", "Quang hợp").unwrap();
    assert_eq!(export.file_name, "ke-hoach-bai-giang-quang-hợp.docx");
}

#[test]
fn test_render_precedence() {
    assert_eq!(render(""), "");
    assert_eq!(render("**a**"), "<strong>a</strong>");
    assert_eq!(render("*a*"), "<em>a</em>");
    assert_eq!(render("**a*b*c**"), "<strong>a*b*c</strong>");
    assert_eq!(render("line1\nline2"), "line1<br />line2");
}
