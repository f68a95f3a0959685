use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sign_gateway::db::{self, SignRepo};
use sign_gateway::speech::WavAudio;
use sign_gateway::{Config, Daemon, daemon, grammar};

/// Sign Gateway - speech and text to sign language gestures
#[derive(Parser)]
#[command(name = "signgw", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "SIGNGW_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Seed the built-in vocabulary into the sign database
    Seed {
        /// Delete existing signs first
        #[arg(long)]
        reset: bool,
    },
    /// Translate text and print the gestures as JSON
    Translate {
        /// Text to translate
        text: String,
    },
    /// Correct the grammar of a sentence
    Grammar {
        /// Sentence to correct
        text: String,
    },
    /// Transcribe a mono 16-bit PCM WAV file
    Transcribe {
        /// Path to the WAV file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,sign_gateway=info",
        1 => "info,sign_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed { reset } => seed(&config, reset),
        Command::Translate { text } => translate(&config, &text),
        Command::Grammar { text } => correct(&config, &text).await,
        Command::Transcribe { file } => transcribe(&config, &file).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting sign gateway"
    );

    let daemon = Daemon::new(config)?;
    daemon.run().await?;
    Ok(())
}

fn seed(config: &Config, reset: bool) -> anyhow::Result<()> {
    let pool = db::init(&config.dictionary.database)?;
    let repo = SignRepo::new(pool);

    let inserted = repo.seed(&db::seed::entries(), reset)?;
    if inserted == 0 {
        println!("Database already seeded ({} signs)", repo.count()?);
    } else {
        println!(
            "Seeded {inserted} signs into {}",
            config.dictionary.database.display()
        );
    }
    Ok(())
}

fn translate(config: &Config, text: &str) -> anyhow::Result<()> {
    let pool = db::init(&config.dictionary.database)?;
    let translator = daemon::load_translator(&pool, config)?;

    let translation = translator.translate(text);
    println!("{}", serde_json::to_string_pretty(&translation)?);
    Ok(())
}

async fn correct(config: &Config, text: &str) -> anyhow::Result<()> {
    let normalizer = daemon::build_normalizer(&config.grammar)?
        .ok_or_else(|| anyhow::anyhow!("grammar correction requires OPENAI_API_KEY or SIGNGW_GRAMMAR_API_KEY"))?;

    println!("{}", grammar::correct(normalizer.as_ref(), text).await?);
    Ok(())
}

async fn transcribe(config: &Config, file: &std::path::Path) -> anyhow::Result<()> {
    let transcriber = daemon::build_transcriber(&config.speech)?.ok_or_else(|| {
        anyhow::anyhow!(
            "speech recognition requires an API key for provider {}",
            config.speech.provider
        )
    })?;

    let bytes = tokio::fs::read(file).await?;
    let audio = WavAudio::parse(bytes)?;
    tracing::debug!(
        sample_rate = audio.sample_rate(),
        seconds = audio.duration().as_secs_f64(),
        "loaded audio"
    );

    println!("{}", transcriber.transcribe(&audio).await?);
    Ok(())
}
