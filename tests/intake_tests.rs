use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use feedback_lens::ai::InferenceService;
use feedback_lens::ai::client::build_messages_body;
use feedback_lens::api::FeedbackIntake;
use feedback_lens::api::request::HttpRequest;
use feedback_lens::errors::FeedbackError;
use feedback_lens::store::KvStore;
use openai_api_rs::v1::chat_completion::ChatCompletionMessage;
use regex::Regex;
use serde_json::{Value, json};

/// Shared record of what the fakes were asked to do, in call order.
#[derive(Clone, Default)]
struct Calls {
    events: Arc<Mutex<Vec<String>>>,
    stored: Arc<Mutex<HashMap<String, String>>>,
    prompts: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl Calls {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn stored(&self) -> HashMap<String, String> {
        self.stored.lock().unwrap().clone()
    }

    fn prompts(&self) -> Vec<(String, Vec<Value>)> {
        self.prompts.lock().unwrap().clone()
    }
}

struct FakeStore {
    calls: Calls,
    fail: bool,
}

#[async_trait]
impl KvStore for FakeStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), FeedbackError> {
        self.calls.events.lock().unwrap().push(format!("put {key}"));
        if self.fail {
            return Err(FeedbackError::StoreError("store offline".to_string()));
        }
        self.calls
            .stored
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct FakeInference {
    calls: Calls,
    reply: Result<Value, String>,
}

#[async_trait]
impl InferenceService for FakeInference {
    async fn run(
        &self,
        model: &str,
        messages: &[ChatCompletionMessage],
    ) -> Result<Value, FeedbackError> {
        self.calls.events.lock().unwrap().push(format!("run {model}"));
        self.calls
            .prompts
            .lock()
            .unwrap()
            .push((model.to_string(), build_messages_body(messages)));
        self.reply.clone().map_err(FeedbackError::InferenceError)
    }
}

const MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

fn intake_with(reply: Value) -> (FeedbackIntake, Calls) {
    build_intake(Ok(reply), false)
}

fn build_intake(reply: Result<Value, String>, store_fails: bool) -> (FeedbackIntake, Calls) {
    let calls = Calls::default();
    let store = FakeStore {
        calls: calls.clone(),
        fail: store_fails,
    };
    let inference = FakeInference {
        calls: calls.clone(),
        reply,
    };
    (
        FeedbackIntake::new(Box::new(store), Box::new(inference), MODEL),
        calls,
    )
}

fn analysis_reply() -> Value {
    json!({
        "response": "{\"summary\":\"Dashboard is slow and billing is hidden.\",\"sentiment\":\"negative\",\"themes\":[\"performance\",\"billing\",\"support\"],\"urgency\":\"high\"}",
        "usage": { "prompt_tokens": 120, "completion_tokens": 48 }
    })
}

fn body_json(response: &Value) -> Value {
    let body = response["body"].as_str().expect("body is a string");
    serde_json::from_str(body).expect("body is JSON")
}

fn post_event(body: &str) -> Value {
    json!({
        "rawPath": "/",
        "requestContext": { "http": { "method": "POST" } },
        "body": body,
        "isBase64Encoded": false
    })
}

#[tokio::test]
async fn test_post_stores_analyzes_and_responds() {
    let (intake, calls) = intake_with(analysis_reply());

    let response = intake
        .submit(Some(r#"{"text": "  The dashboard takes forever to load.  "}"#))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["headers"]["Content-Type"], "application/json");

    let body = body_json(&response);
    assert_eq!(body["status"], "saved");
    assert_eq!(body["stored"], true);
    assert_eq!(body["raw"], analysis_reply());
    assert_eq!(
        body["parsed"],
        json!({
            "summary": "Dashboard is slow and billing is hidden.",
            "sentiment": "negative",
            "themes": ["performance", "billing", "support"],
            "urgency": "high"
        })
    );

    let key = body["key"].as_str().unwrap();
    let key_re = Regex::new(r"^feedback:\d+$").unwrap();
    assert!(key_re.is_match(key), "unexpected key {key}");

    let stored = calls.stored();
    assert_eq!(
        stored.get(key).map(String::as_str),
        Some("The dashboard takes forever to load.")
    );
}

#[tokio::test]
async fn test_response_body_is_pretty_printed_in_field_order() {
    let (intake, _calls) = intake_with(json!({ "response": "nope" }));
    let at = Utc.timestamp_millis_opt(1_718_000_000_000).unwrap();

    let response = intake
        .submit_at(Some(r#"{"text": "ok"}"#), at)
        .await
        .unwrap();

    let body = response["body"].as_str().unwrap();
    let expected = "{\n  \"status\": \"saved\",\n  \"key\": \"feedback:1718000000000\",\n  \"stored\": true,\n  \"raw\": {\n    \"response\": \"nope\"\n  },\n  \"parsed\": null\n}";
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_prompt_carries_fixed_instruction_and_trimmed_text() {
    let (intake, calls) = intake_with(analysis_reply());

    intake
        .submit(Some(r#"{"text": "\n  Support tickets take days. \t"}"#))
        .await
        .unwrap();

    let prompts = calls.prompts();
    assert_eq!(prompts.len(), 1);
    let (model, messages) = &prompts[0];
    assert_eq!(model, MODEL);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(
        messages[0]["content"],
        feedback_lens::ai::ANALYSIS_SYSTEM_PROMPT
    );
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "Support tickets take days.");
}

#[tokio::test]
async fn test_store_write_happens_before_inference() {
    let (intake, calls) = intake_with(analysis_reply());
    let at = Utc.timestamp_millis_opt(1_718_000_000_555).unwrap();

    intake
        .submit_at(Some(r#"{"text": "pages load slowly"}"#), at)
        .await
        .unwrap();

    assert_eq!(
        calls.events(),
        vec![
            "put feedback:1718000000555".to_string(),
            format!("run {MODEL}"),
        ]
    );
}

#[tokio::test]
async fn test_blank_text_is_rejected_without_side_effects() {
    let bodies = [
        r#"{}"#,
        r#"{"text": null}"#,
        r#"{"text": ""}"#,
        r#"{"text": "   \n\t "}"#,
        r#"["sneaky"]"#,
        "[]",
        "5",
        r#""abc""#,
        "true",
    ];

    for body in bodies {
        let (intake, calls) = intake_with(analysis_reply());

        let response = intake.submit(Some(body)).await.unwrap();

        assert_eq!(response["statusCode"], 400, "body: {body}");
        assert_eq!(response["headers"]["Content-Type"], "application/json");
        assert_eq!(response["body"], r#"{"error":"Missing text"}"#);
        assert!(calls.events().is_empty(), "no calls expected for {body}");
    }
}

#[tokio::test]
async fn test_unparseable_reply_yields_null_parsed_and_verbatim_raw() {
    let replies = [
        json!({ "response": "Sure! Here is the analysis: {summary: ...}" }),
        json!({ "response": null }),
        json!({ "usage": { "prompt_tokens": 3 } }),
        json!({ "response": { "summary": "object, not text" } }),
        json!({ "response": "null" }),
        json!("plain string reply"),
    ];

    for reply in replies {
        let (intake, _calls) = intake_with(reply.clone());

        let response = intake.submit(Some(r#"{"text": "hi"}"#)).await.unwrap();

        assert_eq!(response["statusCode"], 200);
        let body = body_json(&response);
        assert_eq!(body["parsed"], Value::Null, "reply: {reply}");
        assert_eq!(body["raw"], reply);
    }
}

#[tokio::test]
async fn test_non_object_reply_is_returned_as_decoded() {
    for (text, decoded) in [
        ("[1, 2, 3]", json!([1, 2, 3])),
        ("\"hi\"", json!("hi")),
        ("42", json!(42)),
    ] {
        let (intake, _calls) = intake_with(json!({ "response": text }));

        let response = intake.submit(Some(r#"{"text": "hi"}"#)).await.unwrap();

        assert_eq!(body_json(&response)["parsed"], decoded, "reply text: {text}");
    }
}

#[tokio::test]
async fn test_first_candidate_field_is_parsed() {
    let reply = json!({
        "output": "{\"summary\":\"from output\"}",
        "result": "{\"summary\":\"from result\"}"
    });
    let (intake, _calls) = intake_with(reply);

    let response = intake.submit(Some(r#"{"text": "hi"}"#)).await.unwrap();

    assert_eq!(body_json(&response)["parsed"], json!({ "summary": "from result" }));
}

#[tokio::test]
async fn test_same_millisecond_submissions_collide() {
    let (intake, calls) = intake_with(analysis_reply());
    let at = Utc.timestamp_millis_opt(1_718_000_000_777).unwrap();

    let first = intake
        .submit_at(Some(r#"{"text": "first"}"#), at)
        .await
        .unwrap();
    let second = intake
        .submit_at(Some(r#"{"text": "second"}"#), at)
        .await
        .unwrap();

    assert_eq!(body_json(&first)["key"], body_json(&second)["key"]);

    let stored = calls.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored.get("feedback:1718000000777").map(String::as_str),
        Some("second")
    );
}

#[tokio::test]
async fn test_get_serves_page_without_side_effects() {
    let (intake, calls) = intake_with(analysis_reply());

    for event in [
        json!({ "rawPath": "/", "requestContext": { "http": { "method": "GET" } } }),
        json!({
            "rawPath": "/",
            "rawQueryString": "text=hello",
            "queryStringParameters": { "text": "hello" },
            "requestContext": { "http": { "method": "GET" } }
        }),
        json!({ "httpMethod": "PUT", "path": "/", "body": "{\"text\":\"hello\"}" }),
    ] {
        let request = HttpRequest::from_event(&event).unwrap();
        let response = intake.handle(&request).await.unwrap();

        assert_eq!(response["statusCode"], 200);
        assert_eq!(
            response["headers"]["Content-Type"],
            "text/html; charset=utf-8"
        );
        let html = response["body"].as_str().unwrap();
        assert!(html.contains("<title>Feedback Lens</title>"));
        assert!(html.contains("fetch(\"/\""));
    }

    assert!(calls.events().is_empty());
}

#[tokio::test]
async fn test_handle_dispatches_post() {
    let (intake, calls) = intake_with(analysis_reply());
    let request = HttpRequest::from_event(&post_event(r#"{"text": "hi"}"#)).unwrap();

    let response = intake.handle(&request).await.unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(calls.events().len(), 2);
}

#[tokio::test]
async fn test_malformed_body_propagates() {
    let bodies = [
        None,
        Some("not json"),
        Some("null"),
        Some(r#"{"text": 5}"#),
        Some(r#"{"text": ["a"]}"#),
    ];

    for body in bodies {
        let (intake, calls) = intake_with(analysis_reply());

        let result = intake.submit(body).await;

        assert!(
            matches!(result, Err(FeedbackError::ParseError(_))),
            "body: {body:?}"
        );
        assert!(calls.events().is_empty());
    }
}

#[tokio::test]
async fn test_store_failure_propagates_and_skips_inference() {
    let (intake, calls) = build_intake(Ok(analysis_reply()), true);

    let result = intake.submit(Some(r#"{"text": "hi"}"#)).await;

    assert!(matches!(result, Err(FeedbackError::StoreError(_))));
    assert_eq!(calls.events().len(), 1);
    assert!(calls.events()[0].starts_with("put feedback:"));
}

#[tokio::test]
async fn test_inference_failure_propagates_after_store_write() {
    let (intake, calls) = build_intake(Err("model overloaded".to_string()), false);

    let result = intake.submit(Some(r#"{"text": "hi"}"#)).await;

    assert!(matches!(result, Err(FeedbackError::InferenceError(_))));
    assert_eq!(calls.stored().len(), 1);
}
