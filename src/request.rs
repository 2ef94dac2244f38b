//! Request, result and message types shared by the pipeline stages

use serde::{Deserialize, Serialize};

use crate::registry::{Language, PatternRef};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

/// One message of a chat exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::User, content: content.into() }
    }
}

/// Language and pattern picked for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult
{   pub language: Language
  , pub pattern: Option<PatternRef>
}

impl Default for ClassificationResult
{   fn default() -> Self
    {   ClassificationResult
        {   language: Language::default()
          , pattern: None
        }
    }
}

/// System and user prompt fragments of a pattern.
/// Either half may hold a fetch-error placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptPair
{   pub system_text: String
  , pub user_text: String
}

/// Input of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest
{   /// Raw content obtained from a source
    pub content: String
  , pub pattern: Option<PatternRef>
  , pub language: Language
}

impl GenerationRequest
{   pub fn new(
      content: impl Into<String>
    , classification: ClassificationResult
    ) -> Self
    {   GenerationRequest
        {   content: content.into()
          , pattern: classification.pattern
          , language: classification.language
        }
    }
}

/// Displayable outcome of a generation: model answer or rendered error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult
{   pub text: String
}

impl GenerationResult
{   pub fn new(text: impl Into<String>) -> Self
    {   GenerationResult { text: text.into() }
    }

    pub fn into_text(self) -> String
    {   self.text
    }
}

impl From<crate::error::Error> for GenerationResult
{   fn from(e: crate::error::Error) -> Self
    {   GenerationResult { text: e.to_string() }
    }
}

impl From<Result<String, crate::error::Error>> for GenerationResult
{   fn from(r: Result<String, crate::error::Error>) -> Self
    {   match r
        {   Ok(text) => GenerationResult { text }
          , Err(e) => e.into()
        }
    }
}
