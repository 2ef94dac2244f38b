//! Configuration for the model client, content sources and pattern store

use serde::{Deserialize, Serialize};
use log::debug;

pub const DEFAULT_MODEL_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "llama3.1";
pub const DEFAULT_FEEDS_DOMAIN: &str = "feeds.bbci.co.uk";
pub const DEFAULT_PATTERNS_URL: &str
  = "https://raw.githubusercontent.com/danielmiessler/fabric/main/patterns";

/// Sampling options forwarded to the model on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions
{   pub temperature: f32
  , pub top_p: f32
  , /// Context window requested from the model
    pub num_ctx: usize
  , pub frequency_penalty: f32
  , pub presence_penalty: f32
}

impl Default for ModelOptions
{   fn default() -> Self
    {   ModelOptions
        {   temperature: 0.5
          , top_p: 1.0
          , num_ctx: 30000
          , frequency_penalty: 0.1
          , presence_penalty: 0.1
        }
    }
}

/// Pipeline configuration.
/// Supplied once at construction and never mutated by components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig
{   /// Chat API flavour spoken by the model host
    pub provider: crate::Provider
  , /// Model server base URL
    pub model_host: String
  , /// Model name
    pub model_name: String
  , /// Bearer key for OpenAI-compatible hosts
    pub api_key: Option<String>
  , /// Model request timeout in seconds
    pub request_timeout_secs: u64
  , pub options: ModelOptions
  , /// Host serving the RSS feeds, without scheme
    pub feeds_domain: String
  , /// Base URL of the remote pattern store
    pub patterns_url: String
  , /// Run the built-in digest template over feeds without a pattern
    pub feed_digest: bool
  , /// Verbose logging of request bodies and fetched content
    pub debug: bool
  , /// Transcript used instead of calling YouTube when debug is on
    pub test_text: Option<String>
}

impl Default for PipelineConfig
{   fn default() -> Self
    {   PipelineConfig
        {   provider: crate::Provider::Ollama
          , model_host: DEFAULT_MODEL_HOST.to_string()
          , model_name: DEFAULT_MODEL_NAME.to_string()
          , api_key: None
          , request_timeout_secs: 180
          , options: ModelOptions::default()
          , feeds_domain: DEFAULT_FEEDS_DOMAIN.to_string()
          , patterns_url: DEFAULT_PATTERNS_URL.to_string()
          , feed_digest: true
          , debug: false
          , test_text: None
        }
    }
}

impl PipelineConfig
{   /// Build a configuration from the process environment,
    /// loading a `.env` file first when one is present.
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   if let Ok(path) = dotenvy::dotenv()
        {   debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    /// Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let mut config = PipelineConfig::default();

        if let Some(provider) = lookup("MODEL_PROVIDER")
        {   config.provider = provider.parse()?;
        }
        if let Some(host) = lookup("OLLAMA_HOST")
        {   config.model_host = host;
        }
        if let Some(model) = lookup("OLLAMA_MODEL_NAME")
        {   config.model_name = model;
        }
        config.api_key = lookup("MODEL_API_KEY")
          .filter(|k| !k.trim().is_empty());
        if let Some(secs) = lookup("MODEL_REQUEST_TIMEOUT_SECS")
        {   config.request_timeout_secs = secs.trim().parse()
              .map_err(|_| crate::error::Error::InvalidConfiguration(
                format!("MODEL_REQUEST_TIMEOUT_SECS={}", secs)
              ))?;
        }
        if let Some(domain) = lookup("BBC_FEEDS_DOMAIN")
        {   config.feeds_domain = domain;
        }
        if let Some(url) = lookup("FABRIC_PATTERNS_URL")
        {   config.patterns_url = url;
        }
        if let Some(flag) = lookup("FEED_DIGEST")
        {   config.feed_digest = parse_flag(&flag);
        }
        if let Some(flag) = lookup("DEBUG")
        {   config.debug = parse_flag(&flag);
        }
        config.test_text = lookup("TEST_TEXT")
          .filter(|t| !t.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.model_host.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model host is empty".to_string()
            ));
        }
        if self.model_name.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model name is empty".to_string()
            ));
        }
        if self.request_timeout_secs == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "request timeout must be positive".to_string()
            ));
        }
        Ok(())
    }

    /// Base URL of the feed host, with scheme
    pub fn feeds_base_url(&self) -> String
    {   if self.feeds_domain.starts_with("http://")
          || self.feeds_domain.starts_with("https://")
        {   self.feeds_domain.trim_end_matches('/').to_string()
        } else
        {   format!("https://{}", self.feeds_domain.trim_end_matches('/'))
        }
    }
}

fn parse_flag(value: &str) -> bool
{   matches!(
      value.trim().to_ascii_lowercase().as_str(),
      "1" | "true" | "yes" | "on"
    )
}
