use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::classifier::Classifier;
use crate::engine::GenerationEngine;
use crate::request::{GenerationRequest, GenerationResult, PromptPair};
use crate::sources::{ContentSource, FeedCategory};
use super::{fetch_content, Dispatcher};

pub const DIGEST_SYSTEM_PROMPT: &str = "\
You are a JSON format expert. Given an input array formatted with JSON, \
order the results by the \"published\" field descending to return a more \
readable list from the given input. Return only the most recent items, max 25, \
based on the \"published\" field, and don't add any of your comments.
Pay attention to the following fields available in each single row of the \
array: \"title\", \"description\", \"link\", \"published\" and provide a \
response using the following format:
Title: value of the \"title\" field
Description: value of the \"description\" field
Link: value of the \"link\" field
Published at: value of the \"published\" field";

pub const DIGEST_USER_PROMPT: &str = "Input json array:";

/// Prompt pair that turns a JSON feed dump into a readable digest
pub fn digest_prompts() -> PromptPair
{   PromptPair
    {   system_text: DIGEST_SYSTEM_PROMPT.to_string()
      , user_text: DIGEST_USER_PROMPT.to_string()
    }
}

/// Category keyword → RSS feed → pattern or digest
pub struct FeedDispatcher
{   classifier: Classifier
  , source: Arc<dyn ContentSource>
  , engine: Arc<GenerationEngine>
  , digest: bool
}

impl FeedDispatcher
{   pub fn new(
      classifier: Classifier
    , source: Arc<dyn ContentSource>
    , engine: Arc<GenerationEngine>
    , digest: bool
    ) -> Self
    {   FeedDispatcher
        {   classifier
          , source
          , engine
          , digest
        }
    }
}

#[async_trait]
impl Dispatcher for FeedDispatcher
{   fn title(&self) -> &'static str
    {   "BBC News digest"
    }

    async fn handle(&self, request_text: &str) -> GenerationResult
    {   let category = FeedCategory::from_request(request_text);
        debug!("Feed category: {}", category.key());

        let content = match fetch_content(
          self.source.as_ref(),
          category.key()
        ).await
        {   Ok(c) => c
          , Err(e) => return e.into()
        };

        let classification = self.classifier.classify(request_text);
        if classification.pattern.is_none() && self.digest
        {   return self.engine
              .generate_with_prompts(
                &digest_prompts(),
                &content,
                classification.language
              )
              .await;
        }
        self.engine
          .generate(GenerationRequest::new(content, classification))
          .await
    }
}
