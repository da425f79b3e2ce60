//! AI gateway — stateless request/response boundary to the generative
//! provider.
//!
//! Three operations, all fire-and-forget round trips with no retry logic of
//! their own (retry, if any, is the controller's call):
//!
//! - brand strategy: structured JSON response constrained by a schema
//! - visual asset: single prompt, inline image bytes expected back
//! - marketing content: structured JSON response against the nested
//!   content-package schema
//!
//! [`GenerativeGateway`] is the trait seam the controller is written against;
//! [`GeminiGateway`] is the production implementation over the provider's
//! `generateContent` REST surface.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::artifacts::{BrandKit, ContentPackage};
use crate::config::GeminiConfig;
use crate::error::GatewayError;
use crate::project::ProjectDescriptor;
use crate::prompts;
use crate::schema::response_schema_for;

/// Supported image aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 1:1 — mascot logos.
    #[default]
    Square,
    /// 16:9 — web banners.
    Widescreen,
    /// 9:16 — vertical social formats.
    Portrait,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Widescreen => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary to the external generative service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeGateway: Send + Sync {
    /// Generate the text portion of a brand kit (image fields stay empty).
    async fn brand_strategy(
        &self,
        project: &ProjectDescriptor,
    ) -> Result<BrandKit, GatewayError>;

    /// Render one image; returns a `data:image/...;base64,` URI.
    async fn visual_asset(
        &self,
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<String, GatewayError>;

    /// Generate the full marketing content package.
    async fn marketing_content(
        &self,
        project: &ProjectDescriptor,
        brand: &BrandKit,
    ) -> Result<ContentPackage, GatewayError>;
}

#[async_trait]
impl<T: GenerativeGateway + ?Sized> GenerativeGateway for std::sync::Arc<T> {
    async fn brand_strategy(
        &self,
        project: &ProjectDescriptor,
    ) -> Result<BrandKit, GatewayError> {
        (**self).brand_strategy(project).await
    }

    async fn visual_asset(
        &self,
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<String, GatewayError> {
        (**self).visual_asset(prompt, aspect).await
    }

    async fn marketing_content(
        &self,
        project: &ProjectDescriptor,
        brand: &BrandKit,
    ) -> Result<ContentPackage, GatewayError> {
        (**self).marketing_content(project, brand).await
    }
}

// ---------------------------------------------------------------------------
// Wire types (provider request/response JSON, camelCase)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64-encoded inline payload (image bytes in responses).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// ---------------------------------------------------------------------------
// Response parsing (pure, unit-tested without a network)
// ---------------------------------------------------------------------------

/// Concatenated text of the first candidate's text parts.
fn first_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the structured JSON payload of a text response into `T`.
fn parse_structured<T: DeserializeOwned>(
    response: &GenerateContentResponse,
) -> Result<T, GatewayError> {
    let text = first_text(response)
        .ok_or_else(|| GatewayError::SchemaViolation("response has no text part".into()))?;
    serde_json::from_str(&text)
        .map_err(|err| GatewayError::SchemaViolation(format!("structured payload: {err}")))
}

/// Find the first inline image among the first candidate's parts and return
/// it as a data URI. A response without any image part is a protocol
/// violation, not a benign empty result.
fn extract_image_data_uri(
    response: &GenerateContentResponse,
) -> Result<String, GatewayError> {
    let content = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .ok_or(GatewayError::NoImageReturned)?;

    for part in &content.parts {
        if let Some(inline) = &part.inline_data {
            let mime = if inline.mime_type.is_empty() {
                "image/png"
            } else {
                inline.mime_type.as_str()
            };
            return Ok(format!("data:{mime};base64,{}", inline.data));
        }
    }
    Err(GatewayError::NoImageReturned)
}

// ---------------------------------------------------------------------------
// Production implementation
// ---------------------------------------------------------------------------

/// Gateway over the provider's `generateContent` REST endpoint.
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, model
        );
        debug!(model, prompt_version = prompts::PROMPT_VERSION, "Provider request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(GatewayError::Provider(format!(
                "{status} from provider: {preview}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GenerativeGateway for GeminiGateway {
    #[instrument(skip_all, fields(project = %project.name))]
    async fn brand_strategy(
        &self,
        project: &ProjectDescriptor,
    ) -> Result<BrandKit, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompts::brand_strategy(project))],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(response_schema_for::<BrandKit>()),
                image_config: None,
            }),
        };
        let response = self.generate(&self.config.text_model, &request).await?;
        parse_structured(&response)
    }

    #[instrument(skip_all, fields(aspect = %aspect))]
    async fn visual_asset(
        &self,
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect.as_str().into(),
                }),
                ..Default::default()
            }),
        };
        let response = self.generate(&self.config.image_model, &request).await?;
        extract_image_data_uri(&response)
    }

    #[instrument(skip_all, fields(project = %project.name))]
    async fn marketing_content(
        &self,
        project: &ProjectDescriptor,
        brand: &BrandKit,
    ) -> Result<ContentPackage, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompts::marketing_content(project, brand))],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(response_schema_for::<ContentPackage>()),
                image_config: None,
            }),
        };
        let response = self.generate(&self.config.text_model, &request).await?;
        parse_structured(&response)
    }
}
