use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::classifier::Classifier;
use crate::engine::GenerationEngine;
use crate::error::Error;
use crate::request::{GenerationRequest, GenerationResult};
use crate::sources::article::is_article_url;
use crate::sources::ContentSource;
use super::{fetch_content, require_url, Dispatcher};

/// News article URL → paragraphs → pattern
pub struct ArticleDispatcher
{   classifier: Classifier
  , source: Arc<dyn ContentSource>
  , engine: Arc<GenerationEngine>
}

impl ArticleDispatcher
{   pub fn new(
      classifier: Classifier
    , source: Arc<dyn ContentSource>
    , engine: Arc<GenerationEngine>
    ) -> Self
    {   ArticleDispatcher
        {   classifier
          , source
          , engine
        }
    }

    async fn article(&self, request_text: &str) -> Result<String, Error>
    {   let url = require_url(request_text)?;
        if !is_article_url(&url)
        {   return Err(Error::InvalidArticleUrl(url));
        }
        debug!("Article URL: {}", url);
        fetch_content(self.source.as_ref(), &url).await
    }
}

#[async_trait]
impl Dispatcher for ArticleDispatcher
{   fn title(&self) -> &'static str
    {   "BBC News article"
    }

    async fn handle(&self, request_text: &str) -> GenerationResult
    {   let content = match self.article(request_text).await
        {   Ok(c) => c
          , Err(e) => return e.into()
        };
        let classification = self.classifier.classify(request_text);
        self.engine
          .generate(GenerationRequest::new(content, classification))
          .await
    }
}
