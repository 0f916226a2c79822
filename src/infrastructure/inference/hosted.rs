use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokenizers::{
    PostProcessor, Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy,
};
use tracing::{debug, info};

use super::error::InferenceError;
use crate::domain::errors::DomainResult;
use crate::domain::models::ClassifierConfig;
use crate::domain::ports::{ClassificationCapability, Prediction};

/// Values at or above this are tokenizer placeholders for "no limit".
const UNBOUNDED_MODEL_LENGTH: u64 = 1_000_000;

/// Text classifier served by the Hugging Face inference endpoint.
///
/// Holds the model's own tokenizer so that truncation happens on the same
/// units the model counts.
pub struct HostedClassifier {
    model_id: String,
    tokenizer: Tokenizer,
    max_input_length: usize,
    endpoint: String,
    api_token: Option<String>,
    http: Client,
}

impl std::fmt::Debug for HostedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedClassifier")
            .field("model_id", &self.model_id)
            .field("max_input_length", &self.max_input_length)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HostedClassifier {
    pub fn new(
        model_id: impl Into<String>,
        tokenizer: Tokenizer,
        max_input_length: usize,
        config: &ClassifierConfig,
    ) -> Result<Self, InferenceError> {
        let model_id = model_id.into();
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: format!(
                "{}/{}",
                config.inference_base_url.trim_end_matches('/'),
                model_id
            ),
            model_id,
            tokenizer,
            max_input_length,
            api_token: config.api_token.clone(),
            http,
        })
    }

    /// Download the tokenizer for `model_id` from the Hub and build a classifier.
    ///
    /// Blocking: files are fetched with the synchronous Hub client and cached
    /// under `~/.cache/huggingface/hub/`.
    pub fn load(model_id: &str, config: &ClassifierConfig) -> Result<Self, InferenceError> {
        let load_err = |reason: String| InferenceError::ModelLoad {
            model: model_id.to_string(),
            reason,
        };

        info!(model = model_id, "loading tokenizer from HuggingFace");
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| load_err(format!("failed to initialize HuggingFace API: {e}")))?;
        let repo = api.model(model_id.to_string());

        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err(format!("failed to download tokenizer.json: {e}")))?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_err(format!("failed to parse {}: {e}", tokenizer_path.display())))?;

        let max_input_length = match repo.get("tokenizer_config.json") {
            Ok(path) => read_model_max_length(&path)
                .unwrap_or(config.default_max_input_length),
            Err(e) => {
                debug!(model = model_id, error = %e, "no tokenizer_config.json, using default length");
                config.default_max_input_length
            }
        };

        info!(model = model_id, max_input_length, "tokenizer loaded");
        Self::new(model_id, tokenizer, max_input_length, config)
    }

    async fn request(&self, text: &str) -> Result<Prediction, InferenceError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        top_prediction(&body)
    }
}

#[async_trait]
impl ClassificationCapability for HostedClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    fn encode(&self, text: &str, max_units: usize) -> DomainResult<Vec<u32>> {
        let special_units = self
            .tokenizer
            .get_post_processor()
            .map_or(0, |processor| processor.added_tokens(false));
        if max_units < special_units {
            return Err(InferenceError::Tokenizer(format!(
                "limit of {max_units} units leaves no room for {special_units} special units"
            ))
            .into());
        }

        // Truncation counts the post-processor's special units against max_length.
        let mut tokenizer = self.tokenizer.clone();
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_units,
                strategy: TruncationStrategy::LongestFirst,
                stride: 0,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| InferenceError::Tokenizer(format!("failed to configure truncation: {e}")))?;

        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, units: &[u32]) -> DomainResult<String> {
        Ok(self
            .tokenizer
            .decode(units, true)
            .map_err(|e| InferenceError::Tokenizer(e.to_string()))?)
    }

    async fn infer(&self, text: &str) -> DomainResult<Prediction> {
        Ok(self.request(text).await?)
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    /// One list of scored labels per input.
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Failure { error: String },
}

/// Pick the highest-scoring label out of an inference response body.
fn top_prediction(body: &str) -> Result<Prediction, InferenceError> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;

    let candidates = match parsed {
        InferenceResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        InferenceResponse::Flat(scores) => scores,
        InferenceResponse::Failure { error } => return Err(InferenceError::Remote(error)),
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| Prediction {
            label: best.label,
            score: best.score,
        })
        .ok_or(InferenceError::EmptyPrediction)
}

/// `model_max_length` from a `tokenizer_config.json`, if it is a real bound.
fn read_model_max_length(path: &Path) -> Option<usize> {
    let raw = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
    value
        .get("model_max_length")?
        .as_u64()
        .filter(|n| *n > 0 && *n < UNBOUNDED_MODEL_LENGTH)
        .and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use mockito::{Matcher, Server};
    use std::str::FromStr;

    const WORD_TOKENIZER: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 5, "content": "[CLS]", "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true},
            {"id": 6, "content": "[SEP]", "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 6],
            "cls": ["[CLS]", 5]
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {
                "[UNK]": 0, "the": 1, "build": 2, "is": 3, "broken": 4,
                "[CLS]": 5, "[SEP]": 6
            },
            "unk_token": "[UNK]"
        }
    }"#;

    fn classifier(base_url: &str, token: Option<&str>) -> HostedClassifier {
        let config = ClassifierConfig {
            inference_base_url: base_url.to_string(),
            api_token: token.map(str::to_string),
            ..ClassifierConfig::default()
        };
        let tokenizer = Tokenizer::from_str(WORD_TOKENIZER).unwrap();
        HostedClassifier::new("org/model", tokenizer, 4, &config).unwrap()
    }

    #[test]
    fn test_top_prediction_batched() {
        let body = r#"[[{"label":"NEGATIVE","score":0.9},{"label":"POSITIVE","score":0.1}]]"#;
        let best = top_prediction(body).unwrap();
        assert_eq!(best.label, "NEGATIVE");
        assert!((best.score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_prediction_flat() {
        let body = r#"[{"label":"joy","score":0.2},{"label":"anger","score":0.7}]"#;
        assert_eq!(top_prediction(body).unwrap().label, "anger");
    }

    #[test]
    fn test_top_prediction_errors() {
        assert!(matches!(
            top_prediction(r#"{"error":"Model is loading"}"#),
            Err(InferenceError::Remote(msg)) if msg == "Model is loading"
        ));
        assert!(matches!(top_prediction("[[]]"), Err(InferenceError::EmptyPrediction)));
        assert!(matches!(
            top_prediction("not json"),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_read_model_max_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer_config.json");

        std::fs::write(&path, r#"{"model_max_length": 512}"#).unwrap();
        assert_eq!(read_model_max_length(&path), Some(512));

        std::fs::write(&path, r#"{"model_max_length": 1000000000000000019884624838656}"#)
            .unwrap();
        assert_eq!(read_model_max_length(&path), None);

        std::fs::write(&path, r#"{"do_lower_case": true}"#).unwrap();
        assert_eq!(read_model_max_length(&path), None);
    }

    #[test]
    fn test_encode_decode_with_local_tokenizer() {
        let hosted = classifier("http://unused", None);

        let units = hosted.encode("the build is broken", 16).unwrap();
        assert_eq!(units, vec![5, 1, 2, 3, 4, 6]);
        assert_eq!(hosted.decode(&units).unwrap(), "the build is broken");
    }

    #[test]
    fn test_encode_keeps_special_units_within_limit() {
        let hosted = classifier("http://unused", None);
        let limit = hosted.max_input_length();

        let units = hosted.encode("the build is broken", limit).unwrap();
        assert_eq!(units, vec![5, 1, 2, 6]);

        let decoded = hosted.decode(&units).unwrap();
        assert_eq!(decoded, "the build");
        let reencoded = hosted.encode(&decoded, 16).unwrap();
        assert!(reencoded.len() <= limit);
    }

    #[test]
    fn test_encode_rejects_limit_below_special_units() {
        let hosted = classifier("http://unused", None);
        assert!(matches!(
            hosted.encode("the build", 1),
            Err(DomainError::ClassificationFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_infer_posts_inputs_with_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/org/model")
            .match_header("authorization", "Bearer hf_secret")
            .match_body(Matcher::Json(serde_json::json!({"inputs": "the build"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[[{"label":"NEGATIVE","score":0.97},{"label":"POSITIVE","score":0.03}]]"#)
            .expect(1)
            .create_async()
            .await;

        let hosted = classifier(&server.url(), Some("hf_secret"));
        let prediction = hosted.infer("the build").await.unwrap();

        mock.assert_async().await;
        assert_eq!(prediction.label, "NEGATIVE");
    }

    #[tokio::test]
    async fn test_infer_http_error_is_classification_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/org/model")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let hosted = classifier(&server.url(), None);
        let err = hosted.infer("text").await.unwrap_err();

        assert!(matches!(err, DomainError::ClassificationFailure(msg) if msg.contains("503")));
    }
}
