//! Two-stage generation: pattern transform, then optional translation

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::client::ChatModel;
use crate::error::Error;
use crate::registry::Language;
use crate::request::{ChatMessage, GenerationRequest, GenerationResult, PromptPair};
use crate::resolver::PromptSource;

/// System instruction of the translation pass
pub fn translation_prompt(language: Language) -> String
{   format!("Translate the following text to {}\n", language.display_name())
}

/// User message of the primary pass: template, line break, content.
/// An empty template leaves the content alone.
pub fn compose_user_message(user_text: &str, content: &str) -> String
{   if user_text.is_empty()
    {   content.to_string()
    } else
    {   format!("{}\n{}", user_text, content)
    }
}

/// Drives the resolve → primary call → translation sequence.
///
/// Model failures never escape: they become the answer text and flow
/// through the remaining steps like any other answer.
pub struct GenerationEngine
{   model: Arc<dyn ChatModel>
  , prompts: Arc<dyn PromptSource>
  , debug: bool
}

impl GenerationEngine
{   pub fn new(
      model: Arc<dyn ChatModel>
    , prompts: Arc<dyn PromptSource>
    , debug: bool
    ) -> Self
    {   GenerationEngine
        {   model
          , prompts
          , debug
        }
    }

    pub async fn generate(&self, request: GenerationRequest)
      -> GenerationResult
    {   let GenerationRequest { content, pattern, language } = request;

        let pattern = match pattern
        {   Some(p) => p
          , None => {
              debug!("No pattern selected, returning content unchanged");
              return GenerationResult::new(content);
            }
        };

        debug!("Resolving prompts for pattern: {}", pattern.label());
        let prompts = self.prompts.resolve(&pattern).await;
        self.generate_with_prompts(&prompts, &content, language).await
    }

    /// Run the model steps with an already resolved prompt pair
    pub async fn generate_with_prompts(
      &self
    , prompts: &PromptPair
    , content: &str
    , language: Language
    ) -> GenerationResult
    {   let messages = vec![
          ChatMessage::system(prompts.system_text.clone()),
          ChatMessage::user(
            compose_user_message(&prompts.user_text, content)
          ),
        ];
        if self.debug
        {   debug!("Primary messages: {:?}", messages);
        }

        let answer = self.invoke(messages).await;

        if language.is_default()
        {   return GenerationResult::new(answer);
        }

        debug!("Translating answer to {}", language.display_name());
        let translated = self.invoke(vec![
          ChatMessage::system(translation_prompt(language)),
          ChatMessage::user(answer),
        ]).await;
        GenerationResult::new(translated)
    }

    async fn invoke(&self, messages: Vec<ChatMessage>) -> String
    {   match self.model.chat(messages).await
        {   Ok(text) => {
              trace!("Model answered {} chars", text.len());
              text
            }
          , Err(e) => {
              warn!("Model call failed: {}", e);
              Error::ModelCall(e.to_string()).to_string()
            }
        }
    }
}
