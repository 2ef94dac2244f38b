use std::sync::Arc;

use fabric_pipes::registry::TRANSLATE_TO_ENGLISH;
use fabric_pipes::{Classifier, Language, PatternRef, PatternRegistry};

fn classifier(registry: PatternRegistry) -> Classifier
{   Classifier::new(Arc::new(registry))
}

#[test]
fn test_empty_text_yields_defaults()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("");
    assert_eq!(result.language, Language::English);
    assert!(result.pattern.is_none());
}

#[test]
fn test_unmatched_request_has_no_pattern()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("what is this video about?");
    assert_eq!(result.language, Language::English);
    assert!(result.pattern.is_none());
}

#[test]
fn test_english_trigger()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify(
      "summarize https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );
    assert_eq!(result.language, Language::English);
    assert_eq!(result.pattern, Some(PatternRef::remote("summarize")));
}

#[test]
fn test_italian_verb_selects_italian_and_pattern()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify(
      "riassumi https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );
    assert_eq!(result.language, Language::Italian);
    assert_eq!(result.pattern, Some(PatternRef::remote("summarize")));
}

#[test]
fn test_matching_is_case_insensitive()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("Extract Wisdom from this, in ITALIAN");
    assert_eq!(result.language, Language::Italian);
    assert_eq!(result.pattern, Some(PatternRef::remote("extract_wisdom")));
}

#[test]
fn test_matching_uses_whole_words()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("I summarized the italians");
    assert_eq!(result.language, Language::English);
    assert!(result.pattern.is_none());
}

#[test]
fn test_last_registry_entry_wins_over_text_order()
{   let c = classifier(PatternRegistry::video());
    // "summarize" is registered before "analizza"
    let forward = c.classify("summarize and analizza");
    let backward = c.classify("analizza and summarize");
    let expected = Some(PatternRef::remote("analyze_presentation"));
    assert_eq!(forward.pattern, expected);
    assert_eq!(backward.pattern, expected);
}

#[test]
fn test_two_triggers_pick_later_entry()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("extract wisdom and summarize");
    assert_eq!(result.pattern, Some(PatternRef::remote("summarize")));
}

#[test]
fn test_custom_registry_order()
{   let registry = PatternRegistry::new()
      .with_pattern("first", PatternRef::remote("one"))
      .with_pattern("second", PatternRef::remote("two"));
    let c = classifier(registry);
    assert_eq!(
      c.classify("second then first").pattern,
      Some(PatternRef::remote("two"))
    );
}

#[test]
fn test_language_last_positive_match_wins()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("english or italian, you pick");
    assert_eq!(result.language, Language::Italian);
}

#[test]
fn test_pronoun_it_counts_as_language_trigger()
{   let c = classifier(PatternRegistry::video());
    let result = c.classify("summarize it");
    assert_eq!(result.language, Language::Italian);
}

#[test]
fn test_news_registry_ignores_video_patterns()
{   let c = classifier(PatternRegistry::news());
    assert!(c.classify("extract wisdom please").pattern.is_none());
    assert_eq!(
      c.classify("summarize the news").pattern,
      Some(PatternRef::remote("summarize"))
    );
}

#[test]
fn test_filter_registry_inline_pattern()
{   let c = classifier(PatternRegistry::filter());
    let result = c.classify("translate to english: ciao a tutti");
    assert_eq!(result.language, Language::English);
    assert_eq!(
      result.pattern,
      Some(PatternRef::Inline(TRANSLATE_TO_ENGLISH.to_string()))
    );
}

#[test]
fn test_registry_contains()
{   let registry = PatternRegistry::video();
    assert!(registry.contains(&PatternRef::remote("extract_wisdom")));
    assert!(!registry.contains(&PatternRef::remote("write_essay")));
}
