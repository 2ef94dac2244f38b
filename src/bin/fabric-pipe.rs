use clap::Parser;
use log::error;

use fabric_pipes::{PipelineConfig, PipelineHost, PipelineKind};

/// Run one request through a pipeline and print the answer
#[derive(Parser, Debug)]
#[command(name = "fabric-pipe")]
#[command(version)]
struct Cli
{   /// Pipeline to run: video, news or filter
    pipeline: PipelineKind

  , /// The chat message
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>

  , /// Ask for the chat title instead of an answer
    #[arg(long)]
    title: bool

  , /// Override the model name
    #[arg(long, env = "OLLAMA_MODEL_NAME")]
    model: Option<String>
}

#[tokio::main]
async fn main()
{   let cli = Cli::parse();

    let mut config = match PipelineConfig::from_env()
    {   Ok(c) => c
      , Err(e) => {
          eprintln!("{}", e);
          std::process::exit(2);
        }
    };
    if let Some(model) = cli.model
    {   config.model_name = model;
    }

    let default_level = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or(default_level)
    ).init();

    let mut host = PipelineHost::new(cli.pipeline, config);
    if let Err(e) = host.on_startup()
    {   error!("Startup failed: {}", e);
        std::process::exit(1);
    }

    let message = cli.message.join(" ");
    let body = serde_json::json!({
      "title": cli.title,
      "messages": [{ "role": "user", "content": message }]
    });
    let answer = host.pipe(&message, &body).await;
    println!("{}", answer);

    host.on_shutdown().await;
}
