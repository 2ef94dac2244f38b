//! Content sources: video transcripts, RSS feeds, news articles

pub mod article;
pub mod feed;
pub mod youtube;

use async_trait::async_trait;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

pub use article::ArticleSource;
pub use feed::{FeedCategory, FeedItem, RssFeedSource};
pub use youtube::YoutubeTranscriptSource;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"https?://(?:[a-zA-Z0-9$-_@.&+!*(),]|%[0-9a-fA-F]{2})+")
    .expect("URL regex is valid")
});

/// First URL found in `text`
pub fn extract_url(text: &str) -> Option<String>
{   URL_REGEX.find(text).map(|m| m.as_str().to_string())
}

/// Produces raw text from a reference (URL or feed category key).
/// An empty string means the source had nothing to offer.
#[async_trait]
pub trait ContentSource: Send + Sync
{   async fn fetch(&self, reference: &str) -> Result<String, Error>;
}

/// Serves a fixed text for every reference
#[derive(Debug, Clone)]
pub struct StaticSource
{   text: String
}

impl StaticSource
{   pub fn new(text: impl Into<String>) -> Self
    {   StaticSource { text: text.into() }
    }
}

#[async_trait]
impl ContentSource for StaticSource
{   async fn fetch(&self, reference: &str) -> Result<String, Error>
    {   trace!("Serving static text for {}", reference);
        Ok(self.text.clone())
    }
}

/// GET `url` and return the body, mapping transport and status failures
pub(crate) async fn get_text(
  http_client: &reqwest::Client
, url: &str
) -> Result<String, Error>
{   trace!("GET {}", url);
    let response = http_client
      .get(url)
      .send()
      .await
      .map_err(|e| Error::FetchError(e.to_string()))?;

    let status = response.status();
    if !status.is_success()
    {   return Err(Error::FetchError(
          format!("'{}' not found ({})", url, status.as_u16())
        ));
    }

    response.text()
      .await
      .map_err(|e| Error::FetchError(e.to_string()))
}

/// Decode the XML/HTML entities found in feed and caption payloads
pub(crate) fn decode_entities(text: &str) -> String
{   static NUMERIC: Lazy<Regex> = Lazy::new(|| {
      Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);")
        .expect("entity regex is valid")
    });

    let named = text
      .replace("&lt;", "<")
      .replace("&gt;", ">")
      .replace("&quot;", "\"")
      .replace("&apos;", "'")
      .replace("&nbsp;", " ");
    let numeric = NUMERIC.replace_all(&named, |caps: &regex::Captures| {
      let code = &caps[1];
      let value = match code.strip_prefix('x')
      {   Some(hex) => u32::from_str_radix(hex, 16).ok()
        , None => code.parse::<u32>().ok()
      };
      value
        .and_then(char::from_u32)
        .map(|c| c.to_string())
        .unwrap_or_default()
    });
    // &amp; last so "&amp;lt;" decodes to "&lt;" and not "<"
    numeric.replace("&amp;", "&")
}
