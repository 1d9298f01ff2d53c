use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript_api::cli::{Cli, Commands};
use yt_transcript_api::config::{Config, LoggingConfig};
use yt_transcript_api::extractors::{FetchOptions, YoutubeTranscriptFetcher};
use yt_transcript_api::{output, server};

fn init_tracing(verbose: bool, logging: &LoggingConfig) {
    let default_filter = if verbose {
        "yt_transcript_api=debug,tower_http=debug"
    } else {
        "yt_transcript_api=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so `fetch` output on stdout stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let fetcher = YoutubeTranscriptFetcher::new(&config.http)?;
            server::serve(&config, server::AppState::new(fetcher)).await?;
        }
        Commands::Fetch {
            video,
            lang,
            output,
            format,
            timestamps,
        } => {
            let fetcher = YoutubeTranscriptFetcher::new(&config.http)?;

            tracing::info!("Fetching transcript for: {}", video);
            let payload = fetcher.fetch(&video, &FetchOptions { lang }).await?;

            match output {
                Some(path) => {
                    output::save_to_file(&payload, &path, &format, timestamps).await?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&payload, &format, timestamps)?;
                }
            }
        }
        Commands::Config => {
            config.display();
        }
    }

    Ok(())
}
