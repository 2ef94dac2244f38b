use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use log::{debug, error, info};

use crate::config::PipelineConfig;
use crate::request::ChatMessage;

/// Chat-completion target used by the generation engine
#[async_trait]
pub trait ChatModel: Send + Sync
{   /// Send an ordered message exchange, get the answer text back
    async fn chat(&self, messages: Vec<ChatMessage>)
      -> Result<String, crate::error::Error>;
}

pub type ChatReply = Result<String, crate::error::Error>;

/// Commands for the model client task
pub enum ModelCommand
{   Chat
    {   messages: Vec<ChatMessage>
      , reply: mpsc::UnboundedSender<ChatReply>
    }
  , Shutdown
    {   reply: mpsc::UnboundedSender<Result<(), crate::error::Error>>
    }
}

/// Read-only state shared by every in-flight chat call
pub struct ModelClientState
{   pub config: PipelineConfig
  , pub http_client: reqwest::Client
}

impl ModelClientState
{   pub fn new(config: PipelineConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Initializing ModelClientState");
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.request_timeout_secs))
          .build()
          .map_err(|e| crate::error::Error::InvalidConfiguration(
            e.to_string()
          ))?;
        Ok(ModelClientState
        {   config
          , http_client
        })
    }

    async fn handle_chat(&self, messages: Vec<ChatMessage>) -> ChatReply
    {   // Route to the configured API flavour
        match self.config.provider
        {   crate::Provider::Ollama => {
              crate::providers::ollama::send_chat(
                &self.http_client,
                &self.config,
                messages
              ).await
            }
          , crate::Provider::OpenAiCompatible => {
              crate::providers::openai::send_chat(
                &self.http_client,
                &self.config,
                messages
              ).await
            }
        }
    }
}

/// Public model client - owns the task
pub struct ModelClient
{   tx: mpsc::UnboundedSender<ModelCommand>
  , _task_handle: tokio::task::JoinHandle<()>
}

impl ModelClient
{   /// Create and spawn a new model client.
    /// Must be called from within a tokio runtime.
    pub fn new(config: PipelineConfig)
      -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating ModelClient for {:?} at {}",
          config.provider, config.model_host
        );
        let state = Arc::new(ModelClientState::new(config)?);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let _task_handle = tokio::spawn(async move {
          run_model_loop(cmd_rx, state).await
        });

        Ok(ModelClient
        {   tx: cmd_tx
          , _task_handle
        })
    }

    /// Queue a chat - returns immediately with the reply receiver
    pub fn send_chat(
      &self
    , messages: Vec<ChatMessage>
    ) -> Result<
        mpsc::UnboundedReceiver<ChatReply>,
        crate::error::Error
      >
    {   let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        self.tx
          .send(ModelCommand::Chat {
            messages,
            reply: reply_tx,
          })
          .map_err(|_| {
            error!("Model client channel closed");
            crate::error::Error::Disconnected
          })?;

        Ok(reply_rx)
    }

    /// Gracefully stop the client task
    pub async fn shutdown(&self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down ModelClient");
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

        self.tx
          .send(ModelCommand::Shutdown { reply: reply_tx })
          .map_err(|_| {
            error!("Model client channel already closed");
            crate::error::Error::Disconnected
          })?;

        // Wait for shutdown confirmation
        match reply_rx.recv().await
        {   Some(result) => {
              debug!("Model client shutdown confirmed");
              result
            }
          , None => Err(crate::error::Error::Disconnected)
        }
    }
}

#[async_trait]
impl ChatModel for ModelClient
{   async fn chat(&self, messages: Vec<ChatMessage>) -> ChatReply
    {   let mut reply_rx = self.send_chat(messages)?;
        reply_rx.recv()
          .await
          .unwrap_or(Err(crate::error::Error::Disconnected))
    }
}

/// Main model client loop
///
/// Each chat command is handed to its own task so concurrent requests
/// never wait on each other; the loop itself only routes commands.
async fn run_model_loop(
  mut cmd_rx: mpsc::UnboundedReceiver<ModelCommand>
, state: Arc<ModelClientState>
)
{   debug!("Starting model client loop");

    loop
    { match cmd_rx.recv().await
      {   Some(ModelCommand::Chat { messages, reply }) => {
            debug!("Processing Chat with {} messages", messages.len());
            let state = Arc::clone(&state);
            tokio::spawn(async move {
              let result = state.handle_chat(messages).await;
              let _ = reply.send(result);
            });
          }
        , Some(ModelCommand::Shutdown { reply }) => {
            let _ = reply.send(Ok(()));
            info!("Model client shutting down");
            break;
          }
        , None => {
            debug!("Command channel closed");
            break;
          }
      }
    }
}
