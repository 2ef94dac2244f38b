use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

use crate::config::PipelineConfig;
use crate::request::ChatMessage;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub top_p: f32
  , pub frequency_penalty: f32
  , pub presence_penalty: f32
  , pub stream: bool
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
  , pub finish_reason: Option<String>
}

pub fn completions_url(host: &str) -> String
{   format!("{}/chat/completions", host.trim_end_matches('/'))
}

/// One non-streaming call to an OpenAI-compatible `/chat/completions`
pub async fn send_chat(
  http_client: &reqwest::Client
, config: &PipelineConfig
, messages: Vec<ChatMessage>
) -> Result<String, crate::error::Error>
{   debug!("Chat completion with model: {}", config.model_name);

    let request = CompletionRequest
    {   model: config.model_name.clone()
      , messages
      , temperature: config.options.temperature
      , top_p: config.options.top_p
      , frequency_penalty: config.options.frequency_penalty
      , presence_penalty: config.options.presence_penalty
      , stream: false
    };

    trace!("Completion request: {:?}", request);

    let mut builder = http_client
      .post(completions_url(&config.model_host))
      .header("Content-Type", "application/json")
      .json(&request);
    if let Some(key) = &config.api_key
    {   builder = builder
          .header("Authorization", format!("Bearer {}", key));
    }

    let response = builder
      .send()
      .await
      .map_err(|e| {
        error!("HTTP error: {}", e);
        crate::error::Error::HttpError(e.to_string())
      })?;

    let status = response.status();
    trace!("Completion response status: {}", status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Completion API error: {}", error_text);
        return Err(crate::error::Error::ApiError(
          format!("{}: {}", status, error_text)
        ));
    }

    let completion: CompletionResponse
      = response.json().await.map_err(|e| {
        error!("Parse error: {}", e);
        crate::error::Error::ParseError(e.to_string())
      })?;

    completion.choices.into_iter().next()
      .map(|c| {
        trace!("Finish reason: {:?}", c.finish_reason);
        c.message.content
      })
      .ok_or_else(|| {
        error!("No choices in response");
        crate::error::Error::EmptyResponse
      })
}
