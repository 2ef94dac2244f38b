pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod registry;
pub mod classifier;
pub mod resolver;
pub mod client;
pub mod engine;
pub mod sources;
pub mod dispatch;
pub mod filter;
pub mod pipeline;
use serde::{Deserialize, Serialize};

/*

fabric-pipes routes a chat request to a content source (YouTube
transcript, BBC feed, BBC article), optionally rewrites the content
through a Fabric pattern, and optionally translates the answer.

request ──► Classifier ──► (language, pattern?)
   │                            │
   └──► Dispatcher ──► source ──┴──► GenerationEngine
                                        ├─ PatternResolver (system.md, user.md)
                                        ├─ ChatModel: primary pass
                                        └─ ChatModel: translation pass

fabric-pipes/
├── src/
│   ├── lib.rs          # Re-exports and provider selection
│   ├── error.rs        # Error values rendered as chat text
│   ├── config.rs       # Environment-driven configuration
│   ├── request.rs      # Messages, prompt pairs, generation types
│   ├── registry.rs     # Ordered trigger tables
│   ├── classifier.rs   # Language / pattern detection
│   ├── resolver.rs     # Remote pattern prompts + sanitization
│   ├── client.rs       # Model client task
│   ├── providers/      # Chat API wire formats
│   ├── engine.rs       # Primary + translation passes
│   ├── sources/        # YouTube, RSS, article fetchers
│   ├── dispatch/       # Per-domain request handling
│   ├── filter.rs       # Chat-body inlet filter
│   └── pipeline.rs     # Lifecycle shell
└── tests/

*/

pub use classifier::Classifier;
pub use client::{ChatModel, ModelClient};
pub use config::{ModelOptions, PipelineConfig};
pub use dispatch::Dispatcher;
pub use engine::GenerationEngine;
pub use error::{Error, ErrorKind};
pub use pipeline::{PipelineHost, PipelineKind};
pub use registry::{Language, PatternRef, PatternRegistry};
pub use request::{
  ChatMessage, ClassificationResult, GenerationRequest, GenerationResult,
  PromptPair, Role,
};
pub use resolver::{PatternResolver, PromptSource};
pub use sources::ContentSource;

/// Chat API flavour spoken by the model host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
pub enum Provider
{   /// Ollama native `/api/chat`
    Ollama
  , /// Any `/chat/completions` endpoint (OpenAI, vLLM, LM Studio...)
    OpenAiCompatible
}

impl std::str::FromStr for Provider
{   type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_lowercase().as_str()
        {   "ollama" => Ok(Provider::Ollama)
          , "openai" | "openai-compatible" => Ok(Provider::OpenAiCompatible)
          , other => Err(error::Error::InvalidConfiguration(
              format!("unknown model provider '{}'", other)
            ))
        }
    }
}
