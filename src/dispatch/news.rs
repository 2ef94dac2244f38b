use async_trait::async_trait;
use log::debug;

use crate::classifier::Classifier;
use crate::request::GenerationResult;
use crate::sources::extract_url;
use super::{ArticleDispatcher, Dispatcher, FeedDispatcher};

/// Entry point of the news pipeline.
/// A request with both a pattern and a URL targets one article;
/// anything else reads a category feed.
pub struct NewsDispatcher
{   classifier: Classifier
  , article: ArticleDispatcher
  , feed: FeedDispatcher
}

impl NewsDispatcher
{   pub fn new(
      classifier: Classifier
    , article: ArticleDispatcher
    , feed: FeedDispatcher
    ) -> Self
    {   NewsDispatcher
        {   classifier
          , article
          , feed
        }
    }
}

#[async_trait]
impl Dispatcher for NewsDispatcher
{   fn title(&self) -> &'static str
    {   self.feed.title()
    }

    async fn handle(&self, request_text: &str) -> GenerationResult
    {   let has_pattern = self.classifier
          .classify(request_text)
          .pattern
          .is_some();

        if has_pattern && extract_url(request_text).is_some()
        {   debug!("Routing news request to article");
            self.article.handle(request_text).await
        } else
        {   debug!("Routing news request to feed");
            self.feed.handle(request_text).await
        }
    }
}
