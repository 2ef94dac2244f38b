use async_trait::async_trait;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::Error;
use super::{get_text, ContentSource};

static ARTICLE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^https?://(www\.)?bbc\.(com|co\.uk)/news/(articles|videos)/\w+$")
    .expect("article url regex is valid")
});

/// True for `http(s)://[www.]bbc.(com|co.uk)/news/(articles|videos)/<id>`
pub fn is_article_url(url: &str) -> bool
{   ARTICLE_URL_REGEX.is_match(url)
}

/// Paragraph text of the page's `<article>`, one paragraph per line.
/// `None` when the page has no article element.
pub fn extract_article_text(html: &str) -> Option<String>
{   let document = Html::parse_document(html);
    let article_sel = Selector::parse("article").ok()?;
    let paragraph_sel = Selector::parse("p").ok()?;

    let article = document.select(&article_sel).next()?;
    let mut content = String::new();
    for paragraph in article.select(&paragraph_sel)
    {   let text = paragraph.text().collect::<String>();
        content.push_str(&text);
        content.push('\n');
    }
    Some(content)
}

/// Scrapes the paragraphs of a news article page
#[derive(Debug, Clone)]
pub struct ArticleSource
{   http_client: reqwest::Client
}

impl ArticleSource
{   pub fn new(http_client: reqwest::Client) -> Self
    {   ArticleSource { http_client }
    }
}

#[async_trait]
impl ContentSource for ArticleSource
{   async fn fetch(&self, reference: &str) -> Result<String, Error>
    {   debug!("Fetching article {}", reference);
        let html = get_text(&self.http_client, reference).await?;
        match extract_article_text(&html)
        {   Some(text) => Ok(text)
          , None => {
              warn!("No article element in {}", reference);
              Ok(String::new())
            }
        }
    }
}
