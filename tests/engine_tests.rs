mod common;

use std::sync::Arc;

use common::{MockModel, MockPrompts};
use fabric_pipes::engine::translation_prompt;
use fabric_pipes::{
  Error, GenerationEngine, GenerationRequest, Language, PatternRef, PromptPair,
  Role,
};

fn engine(model: Arc<MockModel>, prompts: Arc<MockPrompts>) -> GenerationEngine
{   GenerationEngine::new(model, prompts, false)
}

fn request(pattern: Option<&str>, language: Language) -> GenerationRequest
{   GenerationRequest
    {   content: "the transcript".to_string()
      , pattern: pattern.map(PatternRef::remote)
      , language
    }
}

#[tokio::test]
async fn test_no_pattern_returns_content_unchanged()
{   let model = MockModel::answering(&["should not be used"]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model.clone(), prompts.clone())
      .generate(request(None, Language::Italian))
      .await;

    assert_eq!(result.text, "the transcript");
    assert_eq!(model.call_count(), 0);
    assert!(prompts.resolved().is_empty());
}

#[tokio::test]
async fn test_primary_pass_only_for_default_language()
{   let model = MockModel::answering(&["a summary"]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model.clone(), prompts.clone())
      .generate(request(Some("summarize"), Language::English))
      .await;

    assert_eq!(result.text, "a summary");
    assert_eq!(prompts.resolved(), vec![PatternRef::remote("summarize")]);

    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][0].role, Role::System);
    assert_eq!(calls[0][0].content, "SYS");
    assert_eq!(calls[0][1].role, Role::User);
    assert_eq!(calls[0][1].content, "USER\nthe transcript");
}

#[tokio::test]
async fn test_empty_user_template_sends_content_only()
{   let model = MockModel::answering(&["ok"]);
    let prompts = MockPrompts::new("SYS", "");
    engine(model.clone(), prompts)
      .generate(request(Some("summarize"), Language::English))
      .await;

    assert_eq!(model.calls()[0][1].content, "the transcript");
}

#[tokio::test]
async fn test_non_default_language_adds_translation_pass()
{   let model = MockModel::answering(&["a summary", "un riassunto"]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model.clone(), prompts)
      .generate(request(Some("summarize"), Language::Italian))
      .await;

    assert_eq!(result.text, "un riassunto");

    let calls = model.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1][0].role, Role::System);
    assert_eq!(calls[1][0].content, translation_prompt(Language::Italian));
    assert_eq!(calls[1][0].content, "Translate the following text to Italian\n");
    assert_eq!(calls[1][1].content, "a summary");
}

#[tokio::test]
async fn test_primary_failure_becomes_answer_text()
{   let model = MockModel::new(vec![
      Err(Error::HttpError("connection refused".to_string())),
    ]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model.clone(), prompts)
      .generate(request(Some("summarize"), Language::English))
      .await;

    assert_eq!(
      result.text,
      "Error with the model call in pattern workflow: HTTP error: connection refused"
    );
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_primary_failure_is_still_translated()
{   let model = MockModel::new(vec![
      Err(Error::HttpError("boom".to_string())),
      Ok("Errore con la chiamata al modello".to_string()),
    ]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model.clone(), prompts)
      .generate(request(Some("summarize"), Language::Italian))
      .await;

    let calls = model.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1][1].content.starts_with("Error with the model call"));
    assert_eq!(result.text, "Errore con la chiamata al modello");
}

#[tokio::test]
async fn test_translation_failure_replaces_primary_answer()
{   let model = MockModel::new(vec![
      Ok("a summary".to_string()),
      Err(Error::ApiError("model unloaded".to_string())),
    ]);
    let prompts = MockPrompts::new("SYS", "USER");
    let result = engine(model, prompts)
      .generate(request(Some("summarize"), Language::Italian))
      .await;

    assert_eq!(
      result.text,
      "Error with the model call in pattern workflow: API error: model unloaded"
    );
}

#[tokio::test]
async fn test_placeholder_template_still_carries_content()
{   let model = MockModel::answering(&["answer"]);
    let prompts = MockPrompts::new(
      "Error fetching pattern prompt: offline",
      "Error fetching pattern prompt: offline"
    );
    let result = engine(model.clone(), prompts)
      .generate(request(Some("summarize"), Language::English))
      .await;

    assert_eq!(result.text, "answer");
    assert_eq!(
      model.calls()[0][1].content,
      "Error fetching pattern prompt: offline\nthe transcript"
    );
}

#[tokio::test]
async fn test_generate_with_prompts_skips_resolution()
{   let model = MockModel::answering(&["digest", "sommario"]);
    let prompts = MockPrompts::new("unused", "unused");
    let pair = PromptPair
    {   system_text: "Format this".to_string()
      , user_text: "Input:".to_string()
    };
    let result = engine(model.clone(), prompts.clone())
      .generate_with_prompts(&pair, "[]", Language::Italian)
      .await;

    assert_eq!(result.text, "sommario");
    assert!(prompts.resolved().is_empty());
    assert_eq!(model.calls()[0][1].content, "Input:\n[]");
}
