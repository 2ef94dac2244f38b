//! Request classification against a [`PatternRegistry`]

use std::sync::Arc;

use log::{debug, warn};
use regex::Regex;

use crate::registry::{Language, PatternRef, PatternRegistry};
use crate::request::ClassificationResult;

/// Scans request text for language and pattern triggers.
///
/// Every trigger is matched as a whole word, case-insensitively. Triggers
/// are visited in registry order and each positive match replaces the
/// running decision, so the last matching entry wins for both language
/// and pattern.
#[derive(Debug, Clone)]
pub struct Classifier
{   registry: Arc<PatternRegistry>
  , languages: Vec<(Regex, Language)>
  , patterns: Vec<(Regex, PatternRef)>
}

impl Classifier
{   pub fn new(registry: Arc<PatternRegistry>) -> Self
    {   let languages = registry.languages()
          .iter()
          .filter_map(|t| {
            word_regex(&t.phrase).map(|re| (re, t.language))
          })
          .collect();
        let patterns = registry.patterns()
          .iter()
          .filter_map(|t| {
            word_regex(&t.phrase).map(|re| (re, t.pattern.clone()))
          })
          .collect();

        Classifier
        {   registry
          , languages
          , patterns
        }
    }

    pub fn registry(&self) -> &PatternRegistry
    {   &self.registry
    }

    pub fn classify(&self, text: &str) -> ClassificationResult
    {   let text = text.to_lowercase();
        let mut result = ClassificationResult::default();

        for (re, language) in &self.languages
        {   if re.is_match(&text)
            {   result.language = *language;
            }
        }

        for (re, pattern) in &self.patterns
        {   if re.is_match(&text)
            {   result.pattern = Some(pattern.clone());
            }
        }

        debug!(
          "Classified request: language={} pattern={}",
          result.language.code(),
          result.pattern.as_ref().map(|p| p.label()).unwrap_or("none")
        );
        result
    }
}

fn word_regex(phrase: &str) -> Option<Regex>
{   let pattern = format!(r"\b{}\b", regex::escape(&phrase.to_lowercase()));
    match Regex::new(&pattern)
    {   Ok(re) => Some(re)
      , Err(e) => {
          warn!("Skipping trigger '{}': {}", phrase, e);
          None
        }
    }
}
