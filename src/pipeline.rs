//! Hosting shell: lifecycle and entry points of each pipeline

use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::classifier::Classifier;
use crate::client::{ChatModel, ModelClient};
use crate::config::PipelineConfig;
use crate::dispatch::{
  ArticleDispatcher, Dispatcher, FeedDispatcher, NewsDispatcher, VideoDispatcher,
};
use crate::engine::GenerationEngine;
use crate::error::Error;
use crate::filter::{last_user_message, PatternFilter};
use crate::registry::PatternRegistry;
use crate::resolver::{PatternResolver, PromptSource};
use crate::sources::{
  ArticleSource, ContentSource, RssFeedSource, StaticSource, YoutubeTranscriptSource,
};

pub const NO_INFORMATION: &str = "No information found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind
{   YoutubeTranscript
  , NewsDigest
  , PatternFilter
}

impl PipelineKind
{   pub fn title(&self) -> &'static str
    {   match self
        {   PipelineKind::YoutubeTranscript => "Youtube Transcript"
          , PipelineKind::NewsDigest => "BBC News digest"
          , PipelineKind::PatternFilter => "Fabric Patterns"
        }
    }

    pub fn registry(&self) -> PatternRegistry
    {   match self
        {   PipelineKind::YoutubeTranscript => PatternRegistry::video()
          , PipelineKind::NewsDigest => PatternRegistry::news()
          , PipelineKind::PatternFilter => PatternRegistry::filter()
        }
    }
}

impl FromStr for PipelineKind
{   type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_lowercase().as_str()
        {   "video" | "youtube" => Ok(PipelineKind::YoutubeTranscript)
          , "news" | "bbc" => Ok(PipelineKind::NewsDigest)
          , "filter" | "fabric" => Ok(PipelineKind::PatternFilter)
          , other => Err(Error::InvalidConfiguration(
              format!("unknown pipeline '{}'", other)
            ))
        }
    }
}

enum Stage
{   Dispatch(Box<dyn Dispatcher>)
  , Filter(PatternFilter)
}

struct Running
{   stage: Stage
  , model_client: Option<Arc<ModelClient>>
}

/// Owns one pipeline's configuration and, once started, its model
/// client and request handlers
pub struct PipelineHost
{   kind: PipelineKind
  , config: PipelineConfig
  , running: Option<Running>
}

impl PipelineHost
{   pub fn new(kind: PipelineKind, config: PipelineConfig) -> Self
    {   debug!("Creating PipelineHost for {:?}", kind);
        PipelineHost
        {   kind
          , config
          , running: None
        }
    }

    pub fn kind(&self) -> PipelineKind
    {   self.kind
    }

    pub fn config(&self) -> &PipelineConfig
    {   &self.config
    }

    pub fn is_started(&self) -> bool
    {   self.running.is_some()
    }

    /// Spawn the model client and build the handlers.
    /// Must be called from within a tokio runtime.
    pub fn on_startup(&mut self) -> Result<(), Error>
    {   info!("Starting {} pipeline", self.kind.title());
        self.config.validate()?;
        let model_client = Arc::new(ModelClient::new(self.config.clone())?);
        let resolver = Arc::new(
          PatternResolver::new(self.config.patterns_url.clone())
        );
        self.start_with(model_client.clone(), resolver);
        if let Some(running) = self.running.as_mut()
        {   running.model_client = Some(model_client);
        }
        Ok(())
    }

    /// Build the handlers around the given collaborators
    pub fn start_with(
      &mut self
    , model: Arc<dyn ChatModel>
    , prompts: Arc<dyn PromptSource>
    )
    {   let engine = Arc::new(
          GenerationEngine::new(model, prompts, self.config.debug)
        );
        let classifier = Classifier::new(Arc::new(self.kind.registry()));
        let http_client = reqwest::Client::new();

        let stage = match self.kind
        {   PipelineKind::YoutubeTranscript => {
              let source: Arc<dyn ContentSource> = match
                (&self.config.test_text, self.config.debug)
              {   (Some(text), true) => {
                    warn!("Using TEST_TEXT instead of YouTube");
                    Arc::new(StaticSource::new(text.clone()))
                  }
                , _ => Arc::new(YoutubeTranscriptSource::new(http_client))
              };
              Stage::Dispatch(Box::new(VideoDispatcher::new(
                classifier,
                source,
                engine,
                self.config.debug
              )))
            }
          , PipelineKind::NewsDigest => {
              let article = ArticleDispatcher::new(
                classifier.clone(),
                Arc::new(ArticleSource::new(http_client.clone())),
                engine.clone()
              );
              let feed = FeedDispatcher::new(
                classifier.clone(),
                Arc::new(RssFeedSource::new(
                  http_client,
                  self.config.feeds_base_url()
                )),
                engine,
                self.config.feed_digest
              );
              Stage::Dispatch(Box::new(
                NewsDispatcher::new(classifier, article, feed)
              ))
            }
          , PipelineKind::PatternFilter => {
              Stage::Filter(PatternFilter::new(classifier, engine))
            }
        };

        self.running = Some(Running
        {   stage
          , model_client: None
        });
    }

    /// Replace the configuration and restart when running
    pub async fn on_config_updated(&mut self, config: PipelineConfig)
      -> Result<(), Error>
    {   info!("Configuration updated for {}", self.kind.title());
        config.validate()?;
        let was_started = self.is_started();
        self.on_shutdown().await;
        self.config = config;
        if was_started
        {   self.on_startup()?;
        }
        Ok(())
    }

    pub async fn on_shutdown(&mut self)
    {   if let Some(running) = self.running.take()
        {   info!("Stopping {} pipeline", self.kind.title());
            if let Some(client) = running.model_client
            {   if let Err(e) = client.shutdown().await
                {   warn!("Model client shutdown: {}", e);
                }
            }
        }
    }

    /// Handle one chat turn and return the text to display
    pub async fn pipe(&self, user_message: &str, body: &Value) -> String
    {   if self.config.debug
        {   debug!("Body: {}", body);
        }
        if body.get("title").and_then(Value::as_bool).unwrap_or(false)
        {   return self.kind.title().to_string();
        }

        let running = match &self.running
        {   Some(r) => r
          , None => return Error::NotStarted.to_string()
        };

        let text = match &running.stage
        {   Stage::Dispatch(dispatcher) => {
              dispatcher.handle(user_message).await.into_text()
            }
          , Stage::Filter(filter) => {
              let body = json!({
                "messages": [{ "role": "user", "content": user_message }]
              });
              let body = filter.inlet(body).await;
              last_user_message(&body)
                .unwrap_or_default()
                .to_string()
            }
        };

        if text.trim().is_empty()
        {   NO_INFORMATION.to_string()
        } else
        {   text
        }
    }

    /// Filter a chat body before it reaches the model.
    /// Non-filter pipelines pass bodies through untouched.
    pub async fn inlet(&self, body: Value) -> Value
    {   match self.running.as_ref().map(|r| &r.stage)
        {   Some(Stage::Filter(filter)) => filter.inlet(body).await
          , _ => body
        }
    }
}
