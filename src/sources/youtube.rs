use async_trait::async_trait;
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::Error;
use super::{decode_entities, get_text, ContentSource};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"^https?://(?:(?:www|m|music)\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|embed/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$"
  ).expect("video id regex is valid")
});

static CAPTION_TEXT_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?s)<text\b[^>]*>(.*?)</text>")
    .expect("caption regex is valid")
});

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"<[^>]+>").expect("tag regex is valid")
});

/// Eleven-character id of a YouTube video URL
pub fn video_id(url: &str) -> Option<String>
{   VIDEO_ID_REGEX.captures(url.trim())
      .map(|caps| caps[1].to_string())
}

pub fn is_youtube_video(url: &str) -> bool
{   video_id(url).is_some()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack
{   pub base_url: String
  , #[serde(default)]
    pub language_code: String
  , /// "asr" for generated captions
    #[serde(default)]
    pub kind: Option<String>
}

/// Locate the `captionTracks` array embedded in a watch page
pub fn caption_tracks(page: &str) -> Result<Vec<CaptionTrack>, Error>
{   let key = "\"captionTracks\":";
    let start = match page.find(key)
    {   Some(i) => i + key.len()
      , None => return Ok(vec![])
    };
    let array = balanced_array(&page[start..])
      .ok_or_else(|| Error::ParseError(
        "unterminated captionTracks array".to_string()
      ))?;
    Ok(serde_json::from_str(array)?)
}

/// Slice of `text` holding the JSON array it starts with
fn balanced_array(text: &str) -> Option<&str>
{   if !text.starts_with('[')
    {   return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices()
    {   if in_string
        {   match c
            {   _ if escaped => escaped = false
              , '\\' => escaped = true
              , '"' => in_string = false
              , _ => {}
            }
            continue;
        }
        match c
        {   '"' => in_string = true
          , '[' => depth += 1
          , ']' => {
              depth -= 1;
              if depth == 0
              {   return Some(&text[..=i]);
              }
            }
          , _ => {}
        }
    }
    None
}

/// Flatten a timedtext document into one line of text
pub fn parse_caption_xml(xml: &str) -> String
{   CAPTION_TEXT_REGEX.captures_iter(xml)
      .map(|caps| {
        // captions come double-escaped
        let text = decode_entities(&decode_entities(&caps[1]));
        TAG_REGEX.replace_all(&text, "").replace('\n', " ")
      })
      .map(|line| line.trim().to_string())
      .filter(|line| !line.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
}

/// Fetches a video's captions through its public watch page
#[derive(Debug, Clone)]
pub struct YoutubeTranscriptSource
{   http_client: reqwest::Client
  , preferred_language: String
}

impl YoutubeTranscriptSource
{   pub fn new(http_client: reqwest::Client) -> Self
    {   YoutubeTranscriptSource
        {   http_client
          , preferred_language: "en".to_string()
        }
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self
    {   self.preferred_language = code.into();
        self
    }

    /// Preferred language first, manual captions before generated ones
    fn pick_track<'a>(&self, tracks: &'a [CaptionTrack])
      -> Option<&'a CaptionTrack>
    {   let preferred = |t: &&CaptionTrack| {
          t.language_code == self.preferred_language
            || t.language_code.starts_with(&format!("{}-", self.preferred_language))
        };
        tracks.iter()
          .filter(preferred)
          .find(|t| t.kind.as_deref() != Some("asr"))
          .or_else(|| tracks.iter().find(preferred))
          .or_else(|| tracks.first())
    }
}

#[async_trait]
impl ContentSource for YoutubeTranscriptSource
{   async fn fetch(&self, reference: &str) -> Result<String, Error>
    {   let id = video_id(reference)
          .ok_or_else(|| Error::InvalidVideoUrl(reference.to_string()))?;
        debug!("Fetching transcript for video {}", id);

        let page = get_text(
          &self.http_client,
          &format!("{}{}", WATCH_URL, id)
        ).await?;
        let tracks = caption_tracks(&page)?;
        trace!("Found {} caption tracks", tracks.len());

        let track = match self.pick_track(&tracks)
        {   Some(t) => t
          , None => {
              warn!("No captions available for {}", id);
              return Ok(String::new());
            }
        };

        let xml = get_text(&self.http_client, &track.base_url).await?;
        Ok(parse_caption_xml(&xml))
    }
}
