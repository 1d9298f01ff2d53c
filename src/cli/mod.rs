use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "transcript-api",
    about = "YouTube Transcript API - Fetch caption transcripts for YouTube videos as JSON",
    version,
    long_about = "A small HTTP service and CLI that scrapes the caption track list of a YouTube video and relays the timed-text transcript as JSON. Set PROXY_URL to route requests through a forward proxy."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true, env = "TRANSCRIPT_API_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Interface to listen on (overrides HOST)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Fetch the transcript of a single video
    Fetch {
        /// Video id or YouTube URL
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Language code of the caption track (first track if not specified)
        #[arg(short, long, value_name = "LANG")]
        lang: Option<String>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Include timestamps in text output
        #[arg(long)]
        timestamps: bool,
    },

    /// Show the effective configuration
    Config,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Timed-text JSON as delivered by YouTube
    Json,
    /// Plain text, one caption per line
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}
