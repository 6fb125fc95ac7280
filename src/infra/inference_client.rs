// ============================================================
// Layer 6 — Inference Client
// ============================================================
// Blocking HTTP client for a Hugging Face style inference API.
// One client talks to one model endpoint:
//
//   POST {api_base}/{model}
//   Authorization: Bearer {token}        (when a token is set)
//
// Text-to-text models (question generation, summarisation):
//   → {"inputs": "...", "parameters": {...}, "options": {...}}
//   ← [{"generated_text": "..."}]  or  [{"summary_text": "..."}]
//
// Extractive question answering:
//   → {"inputs": {"question": "...", "context": "..."}, ...}
//   ← {"answer": "...", "score": 0.93, "start": 12, "end": 40}
//
// Every request is bounded by the client timeout. Transport
// failures, non-2xx statuses and undecodable bodies all become
// PipelineError::ServiceUnavailable; nothing is retried.
//
// Reference: reqwest::blocking documentation
//            Rust Book §9 (Error Handling)

use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::error::PipelineError;
use crate::domain::question::Answer;
use crate::domain::traits::{GenerationOptions, QuestionAnsweringService, TextGenerationService};

/// Connection settings shared by every model endpoint.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base:     String,
    pub api_token:    Option<String>,
    pub timeout_secs: u64,
}

pub struct InferenceClient {
    http:     Client,
    endpoint: String,
    token:    Option<String>,
    /// Service name used in error messages and logs
    service:  String,
}

// ─── Wire types ───────────────────────────────────────────────────────────────
#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs:     &'a str,
    parameters: &'a GenerationOptions,
    options:    RequestOptions,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context:  &'a str,
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs:  QaInputs<'a>,
    options: RequestOptions,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(alias = "summary_text")]
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    #[serde(default)]
    score:  Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerResponse {
    Many(Vec<QaResponse>),
    One(QaResponse),
}

// ─── Client ───────────────────────────────────────────────────────────────────
impl InferenceClient {
    pub fn new(settings: &ClientSettings, model: &str, service: impl Into<String>) -> Result<Self> {
        let service = service.into();

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| PipelineError::service(&service, e))?;

        let endpoint = endpoint_url(&settings.api_base, model);
        tracing::debug!("Service '{}' → {}", service, endpoint);

        Ok(Self {
            http,
            endpoint,
            token: settings.api_token.clone(),
            service,
        })
    }

    /// POST a JSON body and return the decoded JSON response.
    fn post<B: Serialize>(&self, body: &B) -> Result<Value> {
        let mut request = self.http.post(&self.endpoint).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| PipelineError::service(&self.service, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::service(&self.service, format!("{status} - {body}")).into());
        }

        let json: Value = response
            .json()
            .map_err(|e| PipelineError::service(&self.service, format!("invalid JSON body: {e}")))?;

        tracing::debug!("Raw '{}' response: {}", self.service, json);
        Ok(json)
    }
}

impl TextGenerationService for InferenceClient {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let body = GenerationRequest {
            inputs:     prompt,
            parameters: options,
            options:    RequestOptions { wait_for_model: true },
        };
        let json = self.post(&body)?;
        parse_generated_text(json)
            .map_err(|e| PipelineError::service(&self.service, format!("unexpected response: {e}")).into())
    }
}

impl QuestionAnsweringService for InferenceClient {
    fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        let body = QaRequest {
            inputs:  QaInputs { question, context },
            options: RequestOptions { wait_for_model: true },
        };
        let json = self.post(&body)?;
        parse_answer(json)
            .map_err(|e| PipelineError::service(&self.service, format!("unexpected response: {e}")).into())
    }
}

/// Join base URL and model id with exactly one slash.
pub fn endpoint_url(api_base: &str, model: &str) -> String {
    format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        model.trim_start_matches('/')
    )
}

/// Text of the first generation; an empty list means no output.
pub fn parse_generated_text(json: Value) -> Result<String, serde_json::Error> {
    Ok(match serde_json::from_value::<GenerationResponse>(json)? {
        GenerationResponse::Many(items) => items
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default(),
        GenerationResponse::One(g) => g.generated_text,
    })
}

/// Best answer; an empty list means the model found nothing.
pub fn parse_answer(json: Value) -> Result<Answer, serde_json::Error> {
    let best = match serde_json::from_value::<AnswerResponse>(json)? {
        AnswerResponse::Many(items) => items.into_iter().next(),
        AnswerResponse::One(a) => Some(a),
    };
    Ok(best
        .map(|a| Answer::new(a.answer.trim(), a.score))
        .unwrap_or_else(|| Answer::new("", None)))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        assert_eq!(
            endpoint_url("https://host/models/", "t5-small"),
            "https://host/models/t5-small"
        );
        assert_eq!(
            endpoint_url("https://host/models", "/valhalla/t5-base-qg-hl"),
            "https://host/models/valhalla/t5-base-qg-hl"
        );
    }

    #[test]
    fn test_parse_generated_text_list() {
        let text = parse_generated_text(json!([{ "generated_text": "Q1? <sep> Q2?" }])).unwrap();
        assert_eq!(text, "Q1? <sep> Q2?");
    }

    #[test]
    fn test_parse_summary_text_alias() {
        let text = parse_generated_text(json!([{ "summary_text": "Short." }])).unwrap();
        assert_eq!(text, "Short.");
    }

    #[test]
    fn test_parse_generated_text_single_object_and_empty_list() {
        assert_eq!(parse_generated_text(json!({ "generated_text": "x" })).unwrap(), "x");
        assert_eq!(parse_generated_text(json!([])).unwrap(), "");
    }

    #[test]
    fn test_parse_generated_text_rejects_other_shapes() {
        assert!(parse_generated_text(json!({ "error": "Model is loading" })).is_err());
    }

    #[test]
    fn test_parse_answer() {
        let a = parse_answer(json!({ "answer": " Google ", "score": 0.75, "start": 0, "end": 6 })).unwrap();
        assert_eq!(a.text, "Google");
        assert_eq!(a.confidence, Some(0.75));

        let none = parse_answer(json!([])).unwrap();
        assert_eq!(none.text, "");
        assert_eq!(none.confidence, None);
    }

    #[test]
    fn test_generation_request_shape() {
        let opts = GenerationOptions {
            max_length: Some(150),
            min_length: None,
            do_sample:  false,
        };
        let body = GenerationRequest {
            inputs:     "generate questions: text",
            parameters: &opts,
            options:    RequestOptions { wait_for_model: true },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "inputs": "generate questions: text",
                "parameters": { "max_length": 150, "do_sample": false },
                "options": { "wait_for_model": true }
            })
        );
    }

    #[test]
    fn test_qa_request_shape() {
        let body = QaRequest {
            inputs:  QaInputs { question: "Who?", context: "Google." },
            options: RequestOptions { wait_for_model: true },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["inputs"]["question"], "Who?");
        assert_eq!(v["inputs"]["context"], "Google.");
    }

    /// Serve exactly one HTTP response on a local port and return its base URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        use std::io::{BufRead, BufReader, Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr     = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader  = BufReader::new(stream);

            // Drain the request so the client sees a clean response
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
        });

        format!("http://{addr}")
    }

    fn client_for(api_base: String) -> InferenceClient {
        let settings = ClientSettings {
            api_base,
            api_token:    Some("token".to_string()),
            timeout_secs: 5,
        };
        InferenceClient::new(&settings, "t5-small", "summarization").unwrap()
    }

    #[test]
    fn test_error_status_is_service_unavailable() {
        let client = client_for(serve_once("503 Service Unavailable", r#"{"error":"loading"}"#));
        let err    = client.generate("text", &GenerationOptions::default()).unwrap_err();

        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::ServiceUnavailable { service, reason }) => {
                assert_eq!(service, "summarization");
                assert!(reason.contains("503"), "reason was {reason}");
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_service_unavailable() {
        let client = client_for(serve_once("200 OK", "<html>gateway</html>"));
        let err    = client.answer("Who?", "Google.").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ServiceUnavailable { .. })
        ));
    }

    #[test]
    fn test_success_response_is_decoded() {
        let client = client_for(serve_once("200 OK", r#"[{"summary_text":"Short."}]"#));
        let text   = client.generate("text", &GenerationOptions::default()).unwrap();
        assert_eq!(text, "Short.");
    }

    #[test]
    fn test_unreachable_endpoint_is_service_unavailable() {
        let settings = ClientSettings {
            api_base:     "http://127.0.0.1:9".to_string(),
            api_token:    None,
            timeout_secs: 2,
        };
        let client = InferenceClient::new(&settings, "t5-small", "summarization").unwrap();
        let err    = client.generate("text", &GenerationOptions::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ServiceUnavailable { .. })
        ));
    }
}
