use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

use crate::config::{ModelOptions, PipelineConfig};
use crate::request::ChatMessage;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize)]
pub struct OllamaOptions
{   pub temperature: f32
  , pub top_p: f32
  , pub num_ctx: usize
  , pub frequency_penalty: f32
  , pub presence_penalty: f32
}

impl From<&ModelOptions> for OllamaOptions
{   fn from(o: &ModelOptions) -> Self
    {   OllamaOptions
        {   temperature: o.temperature
          , top_p: o.top_p
          , num_ctx: o.num_ctx
          , frequency_penalty: o.frequency_penalty
          , presence_penalty: o.presence_penalty
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OllamaChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub stream: bool
  , pub options: OllamaOptions
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaChatResponse
{   #[serde(default)]
    pub message: Option<ChatMessage>
  , #[serde(default)]
    pub done: bool
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaErrorResponse
{   pub error: String
}

pub fn chat_url(host: &str) -> String
{   format!("{}/api/chat", host.trim_end_matches('/'))
}

/// One non-streaming call to Ollama's `/api/chat`
pub async fn send_chat(
  http_client: &reqwest::Client
, config: &PipelineConfig
, messages: Vec<ChatMessage>
) -> Result<String, crate::error::Error>
{   debug!("Ollama chat with model: {}", config.model_name);

    let request = OllamaChatRequest
    {   model: config.model_name.clone()
      , messages
      , stream: false
      , options: OllamaOptions::from(&config.options)
    };

    trace!("Ollama request: {:?}", request);

    let response = http_client
      .post(chat_url(&config.model_host))
      .json(&request)
      .send()
      .await
      .map_err(|e| {
        error!("HTTP error: {}", e);
        crate::error::Error::HttpError(e.to_string())
      })?;

    let status = response.status();
    trace!("Ollama response status: {}", status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        let detail = serde_json::from_str::<OllamaErrorResponse>(&error_text)
          .map(|e| e.error)
          .unwrap_or(error_text);
        error!("Ollama API error ({}): {}", status, detail);
        return Err(crate::error::Error::ApiError(
          format!("Ollama {}: {}", status, detail)
        ));
    }

    let chat_response: OllamaChatResponse
      = response.json().await.map_err(|e| {
        error!("Parse error: {}", e);
        crate::error::Error::ParseError(e.to_string())
      })?;

    trace!("Ollama done: {}", chat_response.done);
    chat_response.message
      .map(|m| m.content)
      .ok_or_else(|| {
        error!("No message in response");
        crate::error::Error::EmptyResponse
      })
}
