use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use fortuna::client::{ApiClient, SubmitOutcome};
use fortuna::config::Config;
use fortuna::moderation::{AdmissionPipeline, Lexicon};
use fortuna::rate_limit::{self, FixedWindowLimiter};
use fortuna::store::{FortuneStore, MemoryStore, SqliteStore, DEFAULT_FORTUNES};
use fortuna::toxicity::{PerspectiveScorer, ToxicityScorer};

/// Fortuna: a community fortune wall.
///
/// Visitors read short fortunes and submit their own; every submission
/// runs through a moderation pipeline before it becomes visible.
#[derive(Parser)]
#[command(name = "fortuna", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and seed the starter fortunes
    Init,

    /// Run the web server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Run the admission checks against a string without persisting it
    Check {
        /// The candidate fortune
        text: String,
    },

    /// Submit one or more fortunes to a running server
    Submit {
        /// The fortunes to submit
        #[arg(required = true)]
        texts: Vec<String>,

        /// Server base URL (defaults to FORTUNA_SERVER_URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Print the fortune wall from a running server
    List {
        /// Server base URL (defaults to FORTUNA_SERVER_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fortuna=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            let store = SqliteStore::open(&config.db_path)?;
            let seeded = store.seed_defaults(DEFAULT_FORTUNES).await?;
            println!("Database initialized at: {}", config.db_path);
            if seeded > 0 {
                println!("Seeded {seeded} starter fortunes");
            } else {
                println!("Store already has fortunes; nothing seeded");
            }
            println!("\nNext: cargo run -- serve");
        }

        Commands::Serve { port, bind } => {
            let store: Arc<dyn FortuneStore> = Arc::new(SqliteStore::open(&config.db_path)?);
            store.seed_defaults(DEFAULT_FORTUNES).await?;
            let pipeline = Arc::new(build_pipeline(&config, store.clone()));
            fortuna::web::run_server(store, pipeline, port, &bind).await?;
        }

        Commands::Check { text } => {
            // The throwaway store makes this a full dry run: every stage
            // of the real pipeline executes, nothing outlives the command.
            let store: Arc<dyn FortuneStore> = Arc::new(MemoryStore::new());
            let pipeline = build_pipeline(&config, store);

            match pipeline.submit(text.trim()).await? {
                fortuna::moderation::Admission::Rejected(reason) => {
                    println!("{} {}", "rejected:".red().bold(), reason);
                }
                _ => {
                    println!("{}", "would be admitted".green().bold());
                    if !config.toxicity_enabled() {
                        println!(
                            "{}",
                            "(toxicity gate skipped: PERSPECTIVE_API_KEY not set)".dimmed()
                        );
                    }
                }
            }
        }

        Commands::Submit { texts, url } => {
            let base_url = url.unwrap_or_else(|| config.server_url.clone());
            let client = ApiClient::new(&base_url);

            // Advisory fixed-window quota, persisted client-side
            let state_path = config.rate_limit_path();
            let mut limiter = FixedWindowLimiter::load(
                &state_path,
                rate_limit::ATTEMPTS_LIMIT,
                rate_limit::window(),
                Utc::now(),
            );

            for text in texts {
                let now = Utc::now();
                if !limiter.consume_attempt(now) {
                    println!(
                        "{} quota exhausted, resets in {}",
                        "rate limited:".yellow().bold(),
                        limiter.countdown(now)
                    );
                    break;
                }

                match client.submit(&text).await? {
                    SubmitOutcome::Accepted => {
                        println!("{} {text}", "admitted:".green().bold());
                    }
                    SubmitOutcome::Duplicate => {
                        println!("{} {text}", "already on the wall:".yellow().bold());
                    }
                    SubmitOutcome::Rejected(reason) => {
                        println!("{} {reason}", "rejected:".red().bold());
                    }
                }
                println!(
                    "{}",
                    format!("{} attempts left this window", limiter.remaining_attempts())
                        .dimmed()
                );
            }

            limiter.save(&state_path)?;
            info!(path = %state_path.display(), "Saved rate-limit state");
        }

        Commands::List { url } => {
            let base_url = url.unwrap_or_else(|| config.server_url.clone());
            let client = ApiClient::new(&base_url);
            let fortunes = client.fetch_fortunes().await?;

            if fortunes.is_empty() {
                println!("The wall is empty.");
            }
            for fortune in fortunes {
                if fortune.is_default {
                    println!("{}  {}", fortune.text, "(starter)".dimmed());
                } else {
                    println!("{}", fortune.text);
                }
            }
        }
    }

    Ok(())
}

/// Wire the lexicon, profile, store and (optional) scorer into a pipeline.
fn build_pipeline(config: &Config, store: Arc<dyn FortuneStore>) -> AdmissionPipeline {
    let lexicon = Lexicon::build();
    info!(variants = lexicon.variant_count(), "Banned lexicon built");

    let scorer: Option<Arc<dyn ToxicityScorer>> = if config.toxicity_enabled() {
        Some(Arc::new(PerspectiveScorer::new(
            config.perspective_api_key.clone(),
        )))
    } else {
        info!("PERSPECTIVE_API_KEY not set; toxicity gate disabled");
        None
    };

    AdmissionPipeline::new(lexicon, config.profile, store, scorer)
}
