//! Pattern prompt resolution from the remote pattern store

use async_trait::async_trait;
use log::{debug, trace, warn};

use crate::error::Error;
use crate::registry::PatternRef;
use crate::request::PromptPair;

/// Punctuation kept by [`sanitize`] besides letters, digits and whitespace
const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '-'];

/// Turns a pattern into its prompt pair. Never fails: a half that cannot
/// be obtained is replaced by a descriptive error text.
#[async_trait]
pub trait PromptSource: Send + Sync
{   async fn resolve(&self, pattern: &PatternRef) -> PromptPair;
}

/// Drop every character outside the allow-list.
pub fn sanitize(content: &str) -> String
{   content.chars()
      .filter(|c| is_allowed(*c))
      .collect()
}

fn is_allowed(c: char) -> bool
{   c.is_ascii_alphanumeric()
      || c.is_whitespace()
      || ALLOWED_PUNCTUATION.contains(&c)
}

/// Fetches `<base>/<id>/system.md` and `<base>/<id>/user.md`
#[derive(Debug, Clone)]
pub struct PatternResolver
{   base_url: String
  , http_client: reqwest::Client
}

impl PatternResolver
{   pub fn new(base_url: impl Into<String>) -> Self
    {   Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(
      base_url: impl Into<String>
    , http_client: reqwest::Client
    ) -> Self
    {   let base_url = base_url.into()
          .trim_end_matches('/')
          .to_string();
        debug!("Creating PatternResolver for {}", base_url);
        PatternResolver
        {   base_url
          , http_client
        }
    }

    pub fn system_url(&self, pattern_id: &str) -> String
    {   format!("{}/{}/system.md", self.base_url, pattern_id)
    }

    pub fn user_url(&self, pattern_id: &str) -> String
    {   format!("{}/{}/user.md", self.base_url, pattern_id)
    }

    /// Fetch one prompt fragment, sanitized, or the error text
    async fn fetch_fragment(&self, url: &str) -> String
    {   match self.try_fetch(url).await
        {   Ok(body) => sanitize(&body)
          , Err(e) => {
              warn!("Pattern fragment unavailable at {}: {}", url, e);
              e.to_string()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, Error>
    {   trace!("GET {}", url);
        let response = self.http_client
          .get(url)
          .send()
          .await
          .map_err(|e| Error::PatternFetchError(e.to_string()))?;

        let status = response.status();
        if !status.is_success()
        {   return Err(Error::PatternFetchError(
              format!("{} returned {}", url, status)
            ));
        }

        response.text()
          .await
          .map_err(|e| Error::PatternFetchError(e.to_string()))
    }
}

#[async_trait]
impl PromptSource for PatternResolver
{   async fn resolve(&self, pattern: &PatternRef) -> PromptPair
    {   match pattern
        {   PatternRef::Inline(system_text) => {
              debug!("Using inline pattern");
              PromptPair
              {   system_text: system_text.clone()
                , user_text: String::new()
              }
            }
          , PatternRef::Remote(id) => {
              debug!("Resolving pattern: {}", id);
              let system_url = self.system_url(id);
              let user_url = self.user_url(id);
              let (system_text, user_text) = tokio::join!(
                self.fetch_fragment(&system_url),
                self.fetch_fragment(&user_url)
              );
              PromptPair
              {   system_text
                , user_text
              }
            }
        }
    }
}
