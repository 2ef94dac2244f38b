use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::classifier::Classifier;
use crate::engine::GenerationEngine;
use crate::error::Error;
use crate::request::{GenerationRequest, GenerationResult};
use crate::sources::youtube::is_youtube_video;
use crate::sources::ContentSource;
use super::{fetch_content, require_url, Dispatcher};

/// YouTube URL → transcript → pattern
pub struct VideoDispatcher
{   classifier: Classifier
  , source: Arc<dyn ContentSource>
  , engine: Arc<GenerationEngine>
  , debug: bool
}

impl VideoDispatcher
{   pub fn new(
      classifier: Classifier
    , source: Arc<dyn ContentSource>
    , engine: Arc<GenerationEngine>
    , debug: bool
    ) -> Self
    {   VideoDispatcher
        {   classifier
          , source
          , engine
          , debug
        }
    }

    async fn transcript(&self, request_text: &str) -> Result<String, Error>
    {   let url = require_url(request_text)?;
        if !is_youtube_video(&url)
        {   return Err(Error::InvalidVideoUrl(url));
        }
        debug!("Video URL: {}", url);

        let transcript = fetch_content(self.source.as_ref(), &url).await?;
        if self.debug
        {   debug!("Transcript: {}", transcript);
        }
        Ok(transcript)
    }
}

#[async_trait]
impl Dispatcher for VideoDispatcher
{   fn title(&self) -> &'static str
    {   "Youtube Transcript"
    }

    async fn handle(&self, request_text: &str) -> GenerationResult
    {   let transcript = match self.transcript(request_text).await
        {   Ok(t) => t
          , Err(e) => return e.into()
        };
        let classification = self.classifier.classify(request_text);
        self.engine
          .generate(GenerationRequest::new(transcript, classification))
          .await
    }
}
