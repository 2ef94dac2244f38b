//! Static trigger tables mapping request words to languages and patterns

use serde::{Deserialize, Serialize};

pub const TRANSLATE_TO_ENGLISH: &str
  = "Translate the following text to English. \
     Provide only the translated text and nothing else.";
pub const TRANSLATE_TO_ITALIAN: &str
  = "Translate the following text to Italian. \
     Provide only the translated text and nothing else.";

/// Output language of a generation.
/// `English` is the base language and never triggers a translation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language
{   #[default]
    English
  , Italian
}

impl Language
{   pub fn code(&self) -> &'static str
    {   match self
        {   Language::English => "en"
          , Language::Italian => "it"
        }
    }

    /// Name used inside the translation instruction
    pub fn display_name(&self) -> &'static str
    {   match self
        {   Language::English => "English"
          , Language::Italian => "Italian"
        }
    }

    pub fn is_default(&self) -> bool
    {   *self == Language::default()
    }
}

/// What a pattern trigger selects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternRef
{   /// Identifier of a pattern held by the remote store
    Remote(String)
  , /// System instruction carried by the registry itself
    Inline(String)
}

impl PatternRef
{   pub fn remote(id: impl Into<String>) -> Self
    {   PatternRef::Remote(id.into())
    }

    /// Short label for logs
    pub fn label(&self) -> &str
    {   match self
        {   PatternRef::Remote(id) => id
          , PatternRef::Inline(_) => "inline"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTrigger
{   pub phrase: String
  , pub language: Language
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTrigger
{   pub phrase: String
  , pub pattern: PatternRef
}

/// Ordered trigger tables.
/// Iteration order is significant: the classifier keeps the last match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternRegistry
{   languages: Vec<LanguageTrigger>
  , patterns: Vec<PatternTrigger>
}

impl PatternRegistry
{   pub fn new() -> Self
    {   PatternRegistry::default()
    }

    pub fn with_language(
      mut self
    , phrase: &str
    , language: Language
    ) -> Self
    {   self.languages.push(LanguageTrigger
        {   phrase: phrase.to_lowercase()
          , language
        });
        self
    }

    pub fn with_pattern(
      mut self
    , phrase: &str
    , pattern: PatternRef
    ) -> Self
    {   self.patterns.push(PatternTrigger
        {   phrase: phrase.to_lowercase()
          , pattern
        });
        self
    }

    pub fn languages(&self) -> &[LanguageTrigger]
    {   &self.languages
    }

    pub fn patterns(&self) -> &[PatternTrigger]
    {   &self.patterns
    }

    /// True when `pattern` is one of the registered targets
    pub fn contains(&self, pattern: &PatternRef) -> bool
    {   self.patterns.iter().any(|t| &t.pattern == pattern)
    }

    /// Registry for the YouTube transcript pipeline
    pub fn video() -> Self
    {   base_languages()
          .with_language("riassumi", Language::Italian)
          .with_language("analizza", Language::Italian)
          .with_language("estrai saggezza", Language::Italian)
          .with_pattern("extract wisdom", PatternRef::remote("extract_wisdom"))
          .with_pattern("summarize", PatternRef::remote("summarize"))
          .with_pattern(
            "analyze_presentation",
            PatternRef::remote("analyze_presentation")
          )
          .with_pattern("estrai saggezza", PatternRef::remote("extract_wisdom"))
          .with_pattern("riassumi", PatternRef::remote("summarize"))
          .with_pattern("analizza", PatternRef::remote("analyze_presentation"))
    }

    /// Registry for the news digest pipeline
    pub fn news() -> Self
    {   base_languages()
          .with_language("riassumi", Language::Italian)
          .with_pattern("summarize", PatternRef::remote("summarize"))
          .with_pattern("riassumi", PatternRef::remote("summarize"))
    }

    /// Registry for the chat message filter
    pub fn filter() -> Self
    {   base_languages()
          .with_language("riassumi", Language::Italian)
          .with_language("analizza", Language::Italian)
          .with_language("traduci", Language::Italian)
          .with_pattern("summarize", PatternRef::remote("summarize"))
          .with_pattern("riassumi", PatternRef::remote("summarize"))
          .with_pattern("analyze", PatternRef::remote("analyze_presentation"))
          .with_pattern("analizza", PatternRef::remote("analyze_presentation"))
          .with_pattern(
            "translate",
            PatternRef::Inline(TRANSLATE_TO_ENGLISH.to_string())
          )
          .with_pattern(
            "traduci",
            PatternRef::Inline(TRANSLATE_TO_ITALIAN.to_string())
          )
    }
}

fn base_languages() -> PatternRegistry
{   PatternRegistry::new()
      .with_language("en", Language::English)
      .with_language("english", Language::English)
      .with_language("it", Language::Italian)
      .with_language("italian", Language::Italian)
      .with_language("italiano", Language::Italian)
}
