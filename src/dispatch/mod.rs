//! Per-domain request handling: validate, fetch, classify, generate

pub mod article;
pub mod feed;
pub mod news;
pub mod video;

use async_trait::async_trait;
use log::warn;

use crate::error::Error;
use crate::request::GenerationResult;
use crate::sources::ContentSource;

pub use article::ArticleDispatcher;
pub use feed::FeedDispatcher;
pub use news::NewsDispatcher;
pub use video::VideoDispatcher;

/// Turns a free-text request into displayable text
#[async_trait]
pub trait Dispatcher: Send + Sync
{   /// Fixed chat title for this domain
    fn title(&self) -> &'static str;

    async fn handle(&self, request_text: &str) -> GenerationResult;
}

/// Fetch once from `source`; blank content is an empty-result error
pub(crate) async fn fetch_content(
  source: &dyn ContentSource
, reference: &str
) -> Result<String, Error>
{   let content = source.fetch(reference).await.map_err(|e| {
      warn!("Content fetch for {} failed: {}", reference, e);
      e
    })?;
    if content.trim().is_empty()
    {   return Err(Error::EmptyContent(reference.to_string()));
    }
    Ok(content)
}

/// The first URL in the request, or the validation error for its absence
pub(crate) fn require_url(request_text: &str) -> Result<String, Error>
{   crate::sources::extract_url(request_text)
      .ok_or_else(|| Error::InvalidUrl(
        "no URL found in request".to_string()
      ))
}
