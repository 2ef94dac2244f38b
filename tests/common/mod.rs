#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fabric_pipes::{
  ChatMessage, ChatModel, ContentSource, Error, PatternRef, PromptPair,
  PromptSource,
};

/// Chat model answering from a script and recording every exchange
pub struct MockModel
{   calls: Mutex<Vec<Vec<ChatMessage>>>
  , replies: Mutex<VecDeque<Result<String, Error>>>
}

impl MockModel
{   pub fn new(replies: Vec<Result<String, Error>>) -> Arc<Self>
    {   Arc::new(MockModel
        {   calls: Mutex::new(vec![])
          , replies: Mutex::new(replies.into())
        })
    }

    pub fn answering(answers: &[&str]) -> Arc<Self>
    {   Self::new(answers.iter().map(|a| Ok(a.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>>
    {   self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize
    {   self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockModel
{   async fn chat(&self, messages: Vec<ChatMessage>)
      -> Result<String, Error>
    {   self.calls.lock().unwrap().push(messages);
        self.replies.lock().unwrap()
          .pop_front()
          .unwrap_or_else(|| Ok("unscripted answer".to_string()))
    }
}

/// Prompt source returning a fixed pair
pub struct MockPrompts
{   pair: PromptPair
  , resolved: Mutex<Vec<PatternRef>>
}

impl MockPrompts
{   pub fn new(system_text: &str, user_text: &str) -> Arc<Self>
    {   Arc::new(MockPrompts
        {   pair: PromptPair
            {   system_text: system_text.to_string()
              , user_text: user_text.to_string()
            }
          , resolved: Mutex::new(vec![])
        })
    }

    pub fn resolved(&self) -> Vec<PatternRef>
    {   self.resolved.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptSource for MockPrompts
{   async fn resolve(&self, pattern: &PatternRef) -> PromptPair
    {   self.resolved.lock().unwrap().push(pattern.clone());
        self.pair.clone()
    }
}

/// Content source returning a fixed result
pub struct MockSource
{   result: Result<String, Error>
  , references: Mutex<Vec<String>>
}

impl MockSource
{   pub fn new(result: Result<String, Error>) -> Arc<Self>
    {   Arc::new(MockSource
        {   result
          , references: Mutex::new(vec![])
        })
    }

    pub fn with_text(text: &str) -> Arc<Self>
    {   Self::new(Ok(text.to_string()))
    }

    pub fn references(&self) -> Vec<String>
    {   self.references.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for MockSource
{   async fn fetch(&self, reference: &str) -> Result<String, Error>
    {   self.references.lock().unwrap().push(reference.to_string());
        self.result.clone()
    }
}

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const ARTICLE_URL: &str = "https://www.bbc.com/news/articles/c7497lm99kro";

pub const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title><![CDATA[BBC News]]></title>
    <link>https://www.bbc.co.uk/news</link>
    <item>
      <title><![CDATA[Rates held steady]]></title>
      <description><![CDATA[The central bank kept rates at 5%.]]></description>
      <link>https://www.bbc.com/news/articles/c1</link>
      <pubDate>Mon, 07 Oct 2024 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Storms &amp; floods</title>
      <description>Heavy rain &quot;expected&quot;</description>
      <link>https://www.bbc.com/news/articles/c2</link>
      <pubDate>Mon, 07 Oct 2024 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;
