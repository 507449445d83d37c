//! Gemini image generation client
//!
//! Talks to the generateContent endpoint with an ordered list of content
//! parts (inline base64 images and text) and extracts the returned image.
//! Failures are classified so the UI can offer the right recovery action.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::director::prompt::{AspectRatio, ModelTier, Resolution};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 120;

fn model_id(tier: ModelTier) -> &'static str {
    match tier {
        ModelTier::Flash => "gemini-2.5-flash-image",
        ModelTier::Pro => "gemini-3-pro-image-preview",
    }
}

/// An encoded image payload as it travels to and from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlob {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageBlob {
    /// Sniff the format of raw uploaded bytes and wrap them as a blob.
    /// Returns None for data the image decoder does not recognize.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let format = image::guess_format(bytes).ok()?;
        Some(Self {
            mime_type: format.to_mime_type().to_string(),
            data: BASE64.encode(bytes),
        })
    }

    /// Displayable data URI for an `img` src attribute
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload back to raw bytes (for export)
    pub fn decode(&self) -> Option<Vec<u8>> {
        BASE64.decode(&self.data).ok()
    }
}

/// One ordered content part of the request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<ImageBlob>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn image(blob: ImageBlob) -> Self {
        Self {
            text: None,
            inline_data: Some(blob),
        }
    }
}

/// Assemble the request part list in the fixed priority order:
/// sketch image first, then reference images in supplied order, text last.
pub fn build_parts(sketch: Option<&ImageBlob>, references: &[ImageBlob], prompt: &str) -> Vec<Part> {
    let mut parts = Vec::with_capacity(references.len() + 2);
    if let Some(sketch) = sketch {
        parts.push(Part::image(sketch.clone()));
    }
    for reference in references {
        parts.push(Part::image(reference.clone()));
    }
    parts.push(Part::text(prompt));
    parts
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: RequestGenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig {
    response_modalities: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<String>,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<ImageBlob>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Why a generation attempt failed
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The API rejected the credentials; the user must re-enter a key
    #[error("the generation API denied access; check your API key in Settings")]
    PermissionDenied(String),
    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The model answered with text instead of an image
    #[error("the model declined to generate an image: {0}")]
    Refusal(String),
    #[error("the model returned no image")]
    NoImage,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Map a non-success HTTP response onto the error taxonomy.
fn classify_api_failure(status: u16, body: String) -> GenerateError {
    if status == 403 || body.contains("PERMISSION_DENIED") {
        GenerateError::PermissionDenied(body)
    } else {
        GenerateError::Api {
            status,
            message: body,
        }
    }
}

/// One fully-specified generation request
#[derive(Debug, Clone)]
pub struct GenerateTask {
    pub model_tier: ModelTier,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub use_grounding: bool,
    pub sketch: Option<ImageBlob>,
    /// Character and edit references, already in priority order
    pub references: Vec<ImageBlob>,
    pub prompt: String,
}

pub struct GenerateClient {
    client: Client,
    api_key: String,
}

impl GenerateClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Run one generation call. No retries; a failure surfaces immediately.
    pub async fn generate(&self, task: &GenerateTask) -> Result<ImageBlob, GenerateError> {
        let image_size = match task.model_tier {
            ModelTier::Pro => Some(task.resolution.as_str().to_string()),
            ModelTier::Flash => None,
        };
        let tools = (task.use_grounding && task.model_tier == ModelTier::Pro).then(|| {
            vec![Tool {
                google_search: serde_json::json!({}),
            }]
        });

        let request = GenerateRequest {
            contents: vec![Content {
                parts: build_parts(task.sketch.as_ref(), &task.references, &task.prompt),
            }],
            generation_config: RequestGenerationConfig {
                response_modalities: vec!["IMAGE"],
                image_config: Some(ImageConfig {
                    aspect_ratio: task.aspect_ratio.as_str().to_string(),
                    image_size,
                }),
            },
            tools,
        };

        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            model_id(task.model_tier),
            self.api_key
        );

        tracing::info!(
            model = model_id(task.model_tier),
            aspect = task.aspect_ratio.as_str(),
            references = task.references.len(),
            sketch = task.sketch.is_some(),
            "dispatching generation request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_failure(status.as_u16(), body));
        }

        let api_response: GenerateResponse = response.json().await?;

        if let Some(error) = api_response.error {
            return Err(classify_api_failure(status.as_u16(), error.message));
        }

        let parts = api_response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .ok_or(GenerateError::NoImage)?;

        let mut refusal: Option<String> = None;
        for part in parts {
            if let Some(image) = part.inline_data {
                return Ok(image);
            }
            if let Some(text) = part.text {
                refusal.get_or_insert(text);
            }
        }

        match refusal {
            Some(text) => Err(GenerateError::Refusal(text)),
            None => Err(GenerateError::NoImage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(tag: &str) -> ImageBlob {
        ImageBlob {
            mime_type: "image/png".to_string(),
            data: tag.to_string(),
        }
    }

    #[test]
    fn parts_are_ordered_sketch_references_text() {
        let sketch = blob("sketch");
        let references = [blob("ref-a"), blob("ref-b")];
        let parts = build_parts(Some(&sketch), &references, "the prompt");

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].inline_data.as_ref().unwrap().data, "sketch");
        assert_eq!(parts[1].inline_data.as_ref().unwrap().data, "ref-a");
        assert_eq!(parts[2].inline_data.as_ref().unwrap().data, "ref-b");
        assert_eq!(parts[3].text.as_deref(), Some("the prompt"));
        assert!(parts[3].inline_data.is_none());
    }

    #[test]
    fn parts_without_sketch_start_with_references() {
        let parts = build_parts(None, &[blob("ref")], "p");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].inline_data.as_ref().unwrap().data, "ref");
        assert_eq!(parts[1].text.as_deref(), Some("p"));
    }

    #[test]
    fn permission_failures_are_classified() {
        assert!(matches!(
            classify_api_failure(403, "forbidden".to_string()),
            GenerateError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_api_failure(400, "status: PERMISSION_DENIED".to_string()),
            GenerateError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_api_failure(500, "boom".to_string()),
            GenerateError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn request_serializes_in_wire_case() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: build_parts(None, &[blob("r")], "p"),
            }],
            generation_config: RequestGenerationConfig {
                response_modalities: vec!["IMAGE"],
                image_config: Some(ImageConfig {
                    aspect_ratio: "16:9".to_string(),
                    image_size: Some("2K".to_string()),
                }),
            },
            tools: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["imageConfig"]["aspectRatio"],
            "16:9"
        );
        assert_eq!(json["generationConfig"]["imageConfig"]["imageSize"], "2K");
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/png");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn blob_round_trips_to_data_uri() {
        let blob = ImageBlob::from_bytes(&png_bytes()).unwrap();
        assert_eq!(blob.mime_type, "image/png");
        assert!(blob.to_data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(blob.decode().unwrap(), png_bytes());
    }

    #[test]
    fn unrecognized_bytes_are_rejected() {
        assert!(ImageBlob::from_bytes(b"definitely not an image").is_none());
    }

    // Minimal 1x1 PNG
    fn png_bytes() -> Vec<u8> {
        let mut out = Vec::new();
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([120, 90, 30]));
        img.write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .unwrap();
        out
    }
}
