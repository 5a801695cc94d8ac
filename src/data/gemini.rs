use {
    crate::{
        config::{GEMINI, GeminiConfig},
        error::VisionError,
    },
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

/// Encoded image attached to a model request
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub mime_type: String,
    pub base64: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub structured_output: bool,
    pub reasoning_budget: i32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: GEMINI.generation.temperature,
            structured_output: GEMINI.generation.structured_output,
            reasoning_budget: GEMINI.generation.reasoning_budget,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub instruction_text: String,
    pub image: ImageData,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub text: String,
}

/// The external generative vision model.
///
/// Transport, auth and quota problems come back as `UpstreamFailure`; the
/// reply text is returned untouched for the pipeline to validate.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait VisionModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, VisionError>;
}

// --- WIRE FORMAT (generateContent REST) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: Blob<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u16>,
    message: String,
    #[serde(default)]
    status: Option<String>,
}

fn build_body(request: &ModelRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: &request.instruction_text,
                },
                Part::InlineData {
                    inline_data: Blob {
                        mime_type: &request.image.mime_type,
                        data: &request.image.base64,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: request.options.temperature,
            response_mime_type: request
                .options
                .structured_output
                .then_some("application/json"),
            thinking_config: ThinkingConfig {
                thinking_budget: request.options.reasoning_budget,
            },
        },
    }
}

/// Joins the text parts of the first candidate.
fn response_text(response: GenerateContentResponse) -> Result<String, VisionError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(VisionError::UpstreamFailure(format!(
            "request blocked by the model ({})",
            reason
        )));
    }
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| VisionError::UpstreamFailure("the model returned no candidates".into()))?;
    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".into());
        return Err(VisionError::UpstreamFailure(format!(
            "the model returned no data (finish reason {})",
            reason
        )));
    }
    Ok(text)
}

fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { error }) => {
            let code = error.code.unwrap_or(status.as_u16());
            match error.status {
                Some(tag) => format!("{} {}: {}", code, tag, error.message),
                None => format!("{}: {}", code, error.message),
            }
        }
        Err(_) => format!("HTTP {}", status),
    }
}

/// Google Gemini `generateContent` over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::with_config(&GEMINI, api_key, model)
    }

    pub fn with_config(config: &GeminiConfig, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.endpoint.base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            // An empty key is as good as none
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl VisionModel for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, VisionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            VisionError::UpstreamFailure(format!(
                "missing API key (set {} or pass --api-key)",
                GEMINI.endpoint.api_key_env
            ))
        })?;

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&build_body(request))
            .send()
            .await
            .map_err(|e| VisionError::UpstreamFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VisionError::UpstreamFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(VisionError::UpstreamFailure(describe_api_error(status, &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            VisionError::UpstreamFailure(format!("unreadable service envelope: {}", e))
        })?;
        Ok(ModelResponse {
            text: response_text(parsed)?,
        })
    }
}
