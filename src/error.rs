use std::fmt;

/// Error type for pipeline operations.
/// Implements Clone so it can travel through reply channels and
/// Display so it can be rendered as chat-visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// No usable URL in the request
    InvalidUrl(String)
  , /// URL present but not a recognized video
    InvalidVideoUrl(String)
  , /// URL present but not a news article
    InvalidArticleUrl(String)
  , /// Source reachable but produced nothing usable
    EmptyContent(String)
  , /// Network or HTTP-status failure while fetching content
    FetchError(String)
  , /// Network or HTTP-status failure while fetching a pattern prompt
    PatternFetchError(String)
  , /// The chat call failed
    ModelCall(String)
  , /// HTTP transport error from the model endpoint
    HttpError(String)
  , /// Model endpoint answered with a non-success status
    ApiError(String)
  , /// Failed to parse a response body
    ParseError(String)
  , /// Model response carried no message
    EmptyResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Pipeline used before on_startup
    NotStarted
  , /// Model client task is gone
    Disconnected
  , /// Generic error
    Other(String)
}

/// Coarse classification of an [`Error`], used by callers that need to
/// branch on the failure family rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   Validation
  , Fetch
  , EmptyResult
  , Model
  , Internal
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::InvalidUrl(_)
          | Error::InvalidVideoUrl(_)
          | Error::InvalidArticleUrl(_) => ErrorKind::Validation
          , Error::FetchError(_)
          | Error::PatternFetchError(_) => ErrorKind::Fetch
          , Error::EmptyContent(_) => ErrorKind::EmptyResult
          , Error::ModelCall(_)
          | Error::HttpError(_)
          | Error::ApiError(_)
          | Error::EmptyResponse => ErrorKind::Model
          , Error::ParseError(_)
          | Error::InvalidConfiguration(_)
          | Error::NotStarted
          | Error::Disconnected
          | Error::Other(_) => ErrorKind::Internal
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidUrl(detail) => {
              write!(f, "Error: Invalid URL: {}", detail)
            }
          , Error::InvalidVideoUrl(url) => {
              write!(f,
                "Error: Invalid video URL: '{}' is not a YouTube video",
                url
              )
            }
          , Error::InvalidArticleUrl(url) => {
              write!(f,
                "Error: Invalid article URL: '{}' is not a BBC News article",
                url
              )
            }
          , Error::EmptyContent(reference) => {
              write!(f,
                "Error: failed to find content for {}",
                reference
              )
            }
          , Error::FetchError(msg) => {
              write!(f, "Error: {}", msg)
            }
          , Error::PatternFetchError(msg) => {
              write!(f, "Error fetching pattern prompt: {}", msg)
            }
          , Error::ModelCall(detail) => {
              write!(f,
                "Error with the model call in pattern workflow: {}",
                detail
              )
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::EmptyResponse => {
              write!(f, "Model response contained no message")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::NotStarted => {
              write!(f, "Error: pipeline is not started")
            }
          , Error::Disconnected => {
              write!(f, "Model client disconnected")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
