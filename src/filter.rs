//! Chat-body filter that applies a pattern to the last user message

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::classifier::Classifier;
use crate::engine::GenerationEngine;
use crate::request::GenerationRequest;

/// Content of the last `user` message in an OpenAI-style chat body
pub fn last_user_message(body: &Value) -> Option<&str>
{   body.get("messages")?
      .as_array()?
      .iter()
      .rev()
      .find(|m| m.get("role").and_then(Value::as_str) == Some("user"))?
      .get("content")?
      .as_str()
}

fn set_last_user_message(body: &mut Value, content: String) -> bool
{   let messages = match body.get_mut("messages").and_then(Value::as_array_mut)
    {   Some(m) => m
      , None => return false
    };
    match messages
      .iter_mut()
      .rev()
      .find(|m| m.get("role").and_then(Value::as_str) == Some("user"))
    {   Some(message) => {
          message["content"] = Value::String(content);
          true
        }
      , None => false
    }
}

/// Rewrites the user's message with the pattern result before it
/// reaches the chat model
pub struct PatternFilter
{   classifier: Classifier
  , engine: Arc<GenerationEngine>
}

impl PatternFilter
{   pub fn new(
      classifier: Classifier
    , engine: Arc<GenerationEngine>
    ) -> Self
    {   PatternFilter
        {   classifier
          , engine
        }
    }

    /// Returns the body with the last user message replaced when a
    /// pattern applies, or unchanged otherwise
    pub async fn inlet(&self, mut body: Value) -> Value
    {   let user_message = match last_user_message(&body)
        {   Some(m) => m.to_string()
          , None => {
              debug!("No user message in body");
              return body;
            }
        };

        let classification = self.classifier.classify(&user_message);
        if classification.pattern.is_none()
        {   return body;
        }

        let result = self.engine
          .generate(GenerationRequest::new(user_message, classification))
          .await;
        set_last_user_message(&mut body, result.into_text());
        body
    }
}
