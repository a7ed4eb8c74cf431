//! Gemini REST client for caption metadata and Veo background videos.
//!
//! Neither call is part of the generate flow; the result screen offers them
//! as optional extras. Without an API key the caption call falls back to
//! canned text while the video call fails outright.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::error::{GenAiError, GenAiResult};
use crate::model::CaptionMetadata;
use crate::progress::Clock;

const CAPTION_MODEL: &str = "gemini-2.5-flash";
const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";
const DEFAULT_VIDEO_PROMPT: &str =
    "Satisfying abstract geometric shapes moving smoothly, neon colors, dark background";

/// Gemini API client.
pub struct GenAiClient {
    api_key: Option<String>,
    base_url: String,
    poll_interval: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
struct VideoInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    sample_count: u32,
    resolution: &'static str,
    aspect_ratio: &'static str,
}

/// Long-running operation as returned by `predictLongRunning` and polling.
#[derive(Debug, Deserialize)]
struct Operation {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<OperationResponse>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    uri: Option<String>,
}

impl Operation {
    fn video_uri(self) -> Option<String> {
        self.response?
            .generate_video_response?
            .generated_samples
            .into_iter()
            .next()?
            .video?
            .uri
    }
}

/// Returned when no API key is configured.
pub fn missing_key_metadata() -> CaptionMetadata {
    CaptionMetadata {
        caption: "Check out this crazy video! 😱".to_string(),
        hashtags: vec!["#shorts".to_string(), "#viral".to_string()],
    }
}

/// Returned when the request fails for any reason.
pub fn failed_metadata(topic: &str) -> CaptionMetadata {
    CaptionMetadata {
        caption: format!("Must watch: {topic} 🔥"),
        hashtags: vec!["#viral".to_string(), "#fyp".to_string(), "#trending".to_string()],
    }
}

fn caption_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": {
                "type": "STRING",
                "description": "A catchy, short caption under 10 words"
            },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "5 trending hashtags including #fyp"
            }
        },
        "required": ["caption", "hashtags"]
    })
}

/// Appends the API key as a `key` query parameter.
fn with_key(uri: &str, key: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("key", key);
            url.into()
        }
        Err(_) => {
            let sep = if uri.contains('?') { '&' } else { '?' };
            format!("{uri}{sep}key={key}")
        }
    }
}

impl GenAiClient {
    /// Create a client from config; a missing key is not an error here.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.genai_base_url.clone(),
            poll_interval: config.poll_interval,
            client: Client::new(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Caption and hashtags for a video about `topic`. Never fails: falls back
    /// to canned text when there is no key or the call goes wrong.
    pub async fn generate_caption_metadata(&self, topic: &str) -> CaptionMetadata {
        let Some(key) = self.api_key.as_deref() else {
            warn!("No API Key found");
            return missing_key_metadata();
        };

        match self.request_caption(key, topic).await {
            Ok(meta) => {
                info!(caption = %meta.caption, "generated caption metadata");
                meta
            }
            Err(e) => {
                error!("Metadata generation failed: {}", e);
                failed_metadata(topic)
            }
        }
    }

    async fn request_caption(&self, key: &str, topic: &str) -> GenAiResult<CaptionMetadata> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, CAPTION_MODEL
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!(
                        "Generate a viral, clickbaity short caption and 5 trending hashtags for a TikTok/Reel video about: {topic}."
                    ),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: caption_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GenAiError::invalid_response("No text returned"))?;

        Ok(serde_json::from_str(text.trim())?)
    }

    /// Generates a vertical background clip from `prompt` and returns a
    /// playable URI with the key attached, or `None` when the finished
    /// operation carries no video. Polls without a time limit.
    pub async fn generate_background_video<C: Clock>(
        &self,
        prompt: &str,
        clock: &C,
    ) -> GenAiResult<Option<String>> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(GenAiError::MissingApiKey);
        };

        match self.run_video_operation(key, prompt, clock).await {
            Ok(uri) => Ok(uri.map(|u| with_key(&u, key))),
            Err(e) => {
                error!("Veo generation failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_video_operation<C: Clock>(
        &self,
        key: &str,
        prompt: &str,
        clock: &C,
    ) -> GenAiResult<Option<String>> {
        let prompt = if prompt.trim().is_empty() { DEFAULT_VIDEO_PROMPT } else { prompt };
        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.base_url, VIDEO_MODEL
        );
        let request = PredictRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters {
                sample_count: 1,
                resolution: "720p",
                aspect_ratio: "9:16",
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await?;
        let mut operation: Operation = Self::parse(response).await?;
        info!(operation = %operation.name, "video generation started");

        while !operation.done {
            clock.sleep(self.poll_interval).await;
            let response = self
                .client
                .get(format!("{}/v1beta/{}", self.base_url, operation.name))
                .query(&[("key", key)])
                .send()
                .await?;
            operation = Self::parse(response).await?;
        }

        if let Some(err) = operation.error.as_ref() {
            warn!(error = %err, "video operation finished with an error");
        }
        Ok(operation.video_uri())
    }

    async fn parse<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> GenAiResult<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}
