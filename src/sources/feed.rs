use async_trait::async_trait;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use super::{decode_entities, get_text, ContentSource};

static ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>")
    .expect("item regex is valid")
});

static CDATA_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>")
    .expect("cdata regex is valid")
});

/// BBC News feed sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedCategory
{   TopStories
  , World
  , Uk
  , Business
  , Politics
  , Health
  , Education
  , ScienceAndEnvironment
  , Technology
  , EntertainmentAndArts
  , England
  , NorthernIreland
  , Scotland
  , Wales
  , Africa
  , Asia
  , Australia
  , Europe
  , LatinAmerica
  , MiddleEast
  , UsAndCanada
}

impl FeedCategory
{   /// Every category; keyword scans run in this order
    pub const ALL: [FeedCategory; 21] = [
      FeedCategory::TopStories,
      FeedCategory::World,
      FeedCategory::Uk,
      FeedCategory::Business,
      FeedCategory::Politics,
      FeedCategory::Health,
      FeedCategory::Education,
      FeedCategory::ScienceAndEnvironment,
      FeedCategory::Technology,
      FeedCategory::EntertainmentAndArts,
      FeedCategory::England,
      FeedCategory::NorthernIreland,
      FeedCategory::Scotland,
      FeedCategory::Wales,
      FeedCategory::Africa,
      FeedCategory::Asia,
      FeedCategory::Australia,
      FeedCategory::Europe,
      FeedCategory::LatinAmerica,
      FeedCategory::MiddleEast,
      FeedCategory::UsAndCanada,
    ];

    /// Stable key, e.g. `science_and_environment`
    pub fn key(&self) -> &'static str
    {   match self
        {   FeedCategory::TopStories => "top_stories"
          , FeedCategory::World => "world"
          , FeedCategory::Uk => "uk"
          , FeedCategory::Business => "business"
          , FeedCategory::Politics => "politics"
          , FeedCategory::Health => "health"
          , FeedCategory::Education => "education"
          , FeedCategory::ScienceAndEnvironment => "science_and_environment"
          , FeedCategory::Technology => "technology"
          , FeedCategory::EntertainmentAndArts => "entertainment_and_arts"
          , FeedCategory::England => "england"
          , FeedCategory::NorthernIreland => "northern_ireland"
          , FeedCategory::Scotland => "scotland"
          , FeedCategory::Wales => "wales"
          , FeedCategory::Africa => "africa"
          , FeedCategory::Asia => "asia"
          , FeedCategory::Australia => "australia"
          , FeedCategory::Europe => "europe"
          , FeedCategory::LatinAmerica => "latin_america"
          , FeedCategory::MiddleEast => "middle_east"
          , FeedCategory::UsAndCanada => "us_and_canada"
        }
    }

    /// Path segment below `/news/`
    pub fn path(&self) -> String
    {   match self
        {   FeedCategory::Africa
          | FeedCategory::Asia
          | FeedCategory::Australia
          | FeedCategory::Europe
          | FeedCategory::LatinAmerica
          | FeedCategory::MiddleEast
          | FeedCategory::UsAndCanada => format!("world/{}", self.key())
          , _ => self.key().to_string()
        }
    }

    /// Human name, e.g. "science and environment"
    pub fn phrase(&self) -> String
    {   self.key().replace('_', " ")
    }

    pub fn from_key(key: &str) -> Option<Self>
    {   let key = key.trim().to_lowercase();
        Self::ALL.iter()
          .copied()
          .find(|c| c.key() == key || c.path() == key)
    }

    /// Category named in free text; last match wins, top stories if none
    pub fn from_request(text: &str) -> Self
    {   let text = text.to_lowercase();
        let mut category = FeedCategory::TopStories;
        for candidate in Self::ALL
        {   let pattern = format!(r"\b{}\b", regex::escape(&candidate.phrase()));
            if Regex::new(&pattern).map(|re| re.is_match(&text)).unwrap_or(false)
            {   category = candidate;
            }
        }
        category
    }

    pub fn uri(&self, base_url: &str) -> String
    {   let base_url = base_url.trim_end_matches('/');
        match self
        {   FeedCategory::TopStories => format!("{}/news/rss.xml", base_url)
          , _ => format!("{}/news/{}/rss.xml", base_url, self.path())
        }
    }
}

impl Default for FeedCategory
{   fn default() -> Self
    {   FeedCategory::TopStories
    }
}

/// One news item of a feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedItem
{   pub title: String
  , pub description: String
  , pub link: String
  , pub published: String
}

fn tag_text(item: &str, tag: &str) -> String
{   let pattern = format!(r"(?s)<{0}\b[^>]*>(.*?)</{0}>", regex::escape(tag));
    let raw = Regex::new(&pattern)
      .ok()
      .and_then(|re| re.captures(item).map(|c| c[1].to_string()))
      .unwrap_or_default();
    let unwrapped = CDATA_REGEX.replace_all(&raw, "$1");
    decode_entities(unwrapped.trim())
}

/// Items of an RSS 2.0 document, in document order
pub fn parse_rss_items(xml: &str) -> Vec<FeedItem>
{   ITEM_REGEX.captures_iter(xml)
      .map(|caps| {
        let item = &caps[1];
        FeedItem
        {   title: tag_text(item, "title")
          , description: tag_text(item, "description")
          , link: tag_text(item, "link")
          , published: tag_text(item, "pubDate")
        }
      })
      .collect()
}

/// Fetches a category feed and serializes its items as a JSON array
#[derive(Debug, Clone)]
pub struct RssFeedSource
{   http_client: reqwest::Client
  , base_url: String
}

impl RssFeedSource
{   pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self
    {   RssFeedSource
        {   http_client
          , base_url: base_url.into()
        }
    }

    pub fn base_url(&self) -> &str
    {   &self.base_url
    }
}

#[async_trait]
impl ContentSource for RssFeedSource
{   async fn fetch(&self, reference: &str) -> Result<String, Error>
    {   let category = FeedCategory::from_key(reference)
          .ok_or_else(|| Error::Other(
            format!("unknown feed category '{}'", reference)
          ))?;
        let uri = category.uri(&self.base_url);
        debug!("Fetching {} feed from {}", category.key(), uri);

        let xml = get_text(&self.http_client, &uri).await?;
        let items = parse_rss_items(&xml);
        trace!("Parsed {} feed items", items.len());

        if items.is_empty()
        {   return Ok(String::new());
        }
        Ok(serde_json::to_string(&items)?)
    }
}
