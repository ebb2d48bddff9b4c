use anyhow::Context;
use clap::Parser;
use nx_inference::{models::AVAILABLE_MODELS, Config, EntityClassifier, SharedRecognizer};
use nx_scrapers::{ArticleExtractor, FetchConfig, HttpFetcher, PageFetcher, SelectorConfig, StaticFetcher};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};

const TRANSPORT_HINT: &str = "Double check the URL and try again.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract news articles and the entities they mention", long_about = None)]
struct Cli {
    #[arg(long, env = "NX_MODEL", default_value = "gazetteer", help = "Entity model. Available models: gazetteer (default), remote")]
    model: String,
    /// Base URL of the NER service used by the remote model
    #[arg(long, env = "NX_MODEL_URL")]
    model_url: Option<String>,
    /// JSON lexicon replacing the built-in one of the gazetteer model
    #[arg(long)]
    lexicon: Option<PathBuf>,
    /// JSON selector configuration replacing the BBC News layout
    #[arg(long, global = true)]
    selectors: Option<PathBuf>,
    /// Request timeout (e.g. 30s, 1m, 1h 30m). No timeout by default
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch an article and print it as a JSON record
    Extract {
        url: String,
        /// Read the page from a saved HTML file instead of the network
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
    /// Print the people, places and organisations mentioned in a text
    Entities {
        /// Text to analyse. Read from stdin when omitted
        text: Option<String>,
    },
    /// Serve both operations over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

impl Cli {
    fn selector_config(&self) -> anyhow::Result<SelectorConfig> {
        match &self.selectors {
            Some(path) => SelectorConfig::from_file(path)
                .with_context(|| format!("Failed to load selectors from {}", path.display())),
            None => Ok(SelectorConfig::default()),
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: self.timeout,
            ..FetchConfig::default()
        }
    }

    fn inference_config(&self) -> Config {
        Config {
            model: self.model.clone(),
            model_url: self.model_url.clone(),
            lexicon_path: self.lexicon.clone(),
            timeout: self.timeout,
        }
    }

    fn extractor(&self, fetcher: Arc<dyn PageFetcher>) -> anyhow::Result<ArticleExtractor> {
        let config = self.selector_config()?;
        Ok(ArticleExtractor::new("BBC News", fetcher, &config)?)
    }

    fn classifier(&self) -> EntityClassifier {
        EntityClassifier::new(SharedRecognizer::new(self.inference_config()))
    }

    fn print<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{}", json);
        Ok(())
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if !AVAILABLE_MODELS.contains(&cli.model.as_str()) {
        anyhow::bail!(
            "Unknown model '{}'. Available models: {}",
            cli.model,
            AVAILABLE_MODELS.join(", ")
        );
    }

    match &cli.command {
        Commands::Extract { url, from_file } => {
            let fetcher: Arc<dyn PageFetcher> = match from_file {
                Some(path) => {
                    let html = tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Arc::new(StaticFetcher::new().with_page(url.clone(), html))
                }
                None => Arc::new(HttpFetcher::new(&cli.fetch_config())?),
            };
            let record = cli.extractor(fetcher)?.extract(url).await?;
            cli.print(&record)?;
        }
        Commands::Entities { text } => {
            let text = match text {
                Some(text) => text.clone(),
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buffer)
                        .await
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };
            let buckets = cli.classifier().classify(&text).await?;
            cli.print(&buckets)?;
        }
        Commands::Serve { addr } => {
            let fetcher = Arc::new(HttpFetcher::new(&cli.fetch_config())?);
            let state = nx_web::AppState {
                extractor: cli.extractor(fetcher)?,
                classifier: cli.classifier(),
            };
            info!("🚀 Starting server (model: {})", cli.model);
            nx_web::serve(addr, state).await?;
        }
    }
    Ok(())
}

fn is_transport_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<nx_core::Error>()
        .map(nx_core::Error::is_transport)
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    nx_scrapers::init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if is_transport_failure(&err) {
                eprintln!("{}", TRANSPORT_HINT);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
