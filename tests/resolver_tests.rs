use fabric_pipes::resolver::sanitize;
use fabric_pipes::{PatternRef, PatternResolver, PromptSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FETCH_ERROR_PREFIX: &str = "Error fetching pattern prompt:";

#[test]
fn test_sanitize_drops_disallowed_characters()
{   assert_eq!(
      sanitize("# IDENTITY and PURPOSE\n\n- Use *bullets*."),
      " IDENTITY and PURPOSE\n\n- Use bullets."
    );
    assert_eq!(sanitize("{{input}} <tag> `code`"), "input tag code");
    assert_eq!(sanitize("perché"), "perch");
    assert_eq!(sanitize("a.b,c;d:e!f?g-h\ti"), "a.b,c;d:e!f?g-h\ti");
}

#[test]
fn test_sanitize_is_idempotent()
{   let samples = [
      "",
      "plain text",
      "# Title\n* item [link](http://x.y/z?q=1&r=2)",
      "Ünïcödé — “quotes” ‘single’ …",
      "tabs\tand\r\nnewlines",
    ];
    for sample in samples
    {   let once = sanitize(sample);
        assert_eq!(sanitize(&once), once, "sample: {:?}", sample);
    }
}

#[test]
fn test_pattern_urls()
{   let resolver = PatternResolver::new("https://example.com/patterns/");
    assert_eq!(
      resolver.system_url("summarize"),
      "https://example.com/patterns/summarize/system.md"
    );
    assert_eq!(
      resolver.user_url("summarize"),
      "https://example.com/patterns/summarize/user.md"
    );
}

#[tokio::test]
async fn test_resolve_fetches_and_sanitizes_both_halves()
{   let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/summarize/system.md"))
      .respond_with(ResponseTemplate::new(200)
        .set_body_string("# IDENTITY\nYou summarize <things> & stuff."))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/summarize/user.md"))
      .respond_with(ResponseTemplate::new(200)
        .set_body_string("CONTENT:"))
      .expect(1)
      .mount(&server)
      .await;

    let resolver = PatternResolver::new(server.uri());
    let pair = resolver.resolve(&PatternRef::remote("summarize")).await;

    assert_eq!(pair.system_text, " IDENTITY\nYou summarize things  stuff.");
    assert_eq!(pair.user_text, "CONTENT:");
}

#[tokio::test]
async fn test_missing_half_becomes_error_text()
{   let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/extract_wisdom/system.md"))
      .respond_with(ResponseTemplate::new(200)
        .set_body_string("Extract the wisdom."))
      .mount(&server)
      .await;
    // user.md is not mounted, so the server answers 404

    let resolver = PatternResolver::new(server.uri());
    let pair = resolver.resolve(&PatternRef::remote("extract_wisdom")).await;

    assert_eq!(pair.system_text, "Extract the wisdom.");
    assert!(pair.user_text.starts_with(FETCH_ERROR_PREFIX));
    assert!(pair.user_text.contains("404"));
}

#[tokio::test]
async fn test_unreachable_store_never_fails()
{   let resolver = PatternResolver::new("http://127.0.0.1:1");
    let pair = resolver.resolve(&PatternRef::remote("summarize")).await;

    assert!(pair.system_text.starts_with(FETCH_ERROR_PREFIX));
    assert!(pair.user_text.starts_with(FETCH_ERROR_PREFIX));
}

#[tokio::test]
async fn test_inline_pattern_needs_no_store()
{   let resolver = PatternResolver::new("http://127.0.0.1:1");
    let pair = resolver
      .resolve(&PatternRef::Inline("Translate this.".to_string()))
      .await;

    assert_eq!(pair.system_text, "Translate this.");
    assert_eq!(pair.user_text, "");
}
