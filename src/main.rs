use anyhow::Result;
use clap::Parser;
use gemini_exchange::app::App;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-exchange")]
#[command(about = "Ask Gemini questions from the terminal")]
struct CliArgs {
    /// Questions to ask in order. Reads one question per stdin line when omitted.
    #[arg(value_name = "QUERY")]
    queries: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_exchange=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if args.queries.is_empty() {
        info!("Reading questions from stdin");
        app.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
    } else {
        app.run_queries(&args.queries, tokio::io::stdout()).await?;
    }

    Ok(())
}
