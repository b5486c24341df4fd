//! # yt-sentiment CLI (`ytsent`)
//!
//! The `ytsent` binary runs the comment-sentiment pipeline for one video and
//! exposes its individual stages for inspection.
//!
//! ## Usage
//!
//! ```bash
//! ytsent --config ./ytsent.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ytsent analyze <url>` | Fetch, score and report on a video's comments |
//! | `ytsent score "<text>"` | Score one text under the configured policy |
//! | `ytsent clean "<text>"` | Print the normalized form of a text |
//! | `ytsent id <url>` | Print the video identifier found in a URL |
//! | `ytsent completions <shell>` | Generate a shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! # Full run with the defaults (writes into ./static)
//! YOUTUBE_API_KEY=... ytsent analyze "https://youtu.be/dQw4w9WgXcQ"
//!
//! # Keep every run in its own directory, with a Score column
//! ytsent analyze "https://youtu.be/dQw4w9WgXcQ" --per-run --include-score --out-dir reports
//!
//! # Machine-readable run report on stdout, JSON progress on stderr
//! ytsent --progress json analyze "https://youtu.be/dQw4w9WgXcQ" --json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use yt_sentiment::config::{self, PolicyKind};
use yt_sentiment::models::SentimentLabel;
use yt_sentiment::normalize::TextNormalizer;
use yt_sentiment::pipeline::{Pipeline, RunReport};
use yt_sentiment::progress::ProgressMode;
use yt_sentiment::reference::extract_id;
use yt_sentiment::scoring::SentimentScorer;

/// yt-sentiment CLI: sentiment breakdown of a YouTube video's comments.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. Every setting has a default, so the file is optional.
#[derive(Parser)]
#[command(
    name = "ytsent",
    about = "Score the sentiment of a YouTube video's comments and chart the result",
    version,
    long_about = "ytsent fetches up to a few hundred top-level comments of a YouTube video, \
    labels each one Positive, Negative or Neutral, and writes a CSV export plus a pie chart \
    and a bar chart of the label distribution."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./ytsent.toml`. A missing file means all defaults.
    #[arg(long, global = true, default_value = "./ytsent.toml")]
    config: PathBuf,

    /// Progress reporting on stderr.
    ///
    /// `auto` shows human progress when stderr is a terminal.
    #[arg(long, global = true, value_enum, default_value_t = ProgressArg::Auto)]
    progress: ProgressArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProgressArg {
    Auto,
    Off,
    Human,
    Json,
}

impl ProgressArg {
    fn mode(self) -> ProgressMode {
        match self {
            ProgressArg::Auto => ProgressMode::default_for_tty(),
            ProgressArg::Off => ProgressMode::Off,
            ProgressArg::Human => ProgressMode::Human,
            ProgressArg::Json => ProgressMode::Json,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze the comments of a video.
    ///
    /// Resolves the URL, fetches comments from the YouTube Data API
    /// (credential from `YOUTUBE_API_KEY` unless configured otherwise),
    /// scores them and writes the CSV export and both charts.
    Analyze {
        /// Video URL (`watch?v=`, `youtu.be/` or `embed/` form).
        url: String,

        /// Print the run report as JSON instead of a summary.
        #[arg(long)]
        json: bool,

        /// Write artifacts into this directory instead of `[output].dir`.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Scoring policy: `blended` or `statistical`.
        #[arg(long)]
        policy: Option<PolicyKind>,

        /// Write into a fresh `<video>-<uuid>` sub-directory.
        #[arg(long)]
        per_run: bool,

        /// Add a `Score` column with the numeric polarity.
        #[arg(long)]
        include_score: bool,

        /// Stop fetching once this many comments have been retrieved.
        #[arg(long)]
        max_comments: Option<usize>,
    },

    /// Score a single text and show the component scores.
    Score {
        /// Text to score.
        text: String,

        /// Scoring policy: `blended` or `statistical`.
        #[arg(long)]
        policy: Option<PolicyKind>,

        /// Print the breakdown as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized form of a text.
    Clean {
        /// Text to clean.
        text: String,
    },

    /// Print the video identifier found in a URL.
    Id {
        /// Video URL.
        url: String,
    },

    /// Generate a shell completion script on stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "ytsent", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Clean { text } => {
            println!("{}", TextNormalizer::english().clean(text));
            return Ok(());
        }
        Commands::Id { url } => {
            println!("{}", extract_id(url)?);
            return Ok(());
        }
        _ => {}
    }

    let mut cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Analyze {
            url,
            json,
            out_dir,
            policy,
            per_run,
            include_score,
            max_comments,
        } => {
            if let Some(dir) = out_dir {
                cfg.output.dir = dir;
            }
            if let Some(policy) = policy {
                cfg.scoring.policy = policy;
            }
            if let Some(max) = max_comments {
                cfg.source.max_comments = max;
            }
            cfg.output.per_run |= per_run;
            cfg.output.include_score |= include_score;
            config::validate(&cfg)?;

            let pipeline = Pipeline::from_config(&cfg)?.with_progress(cli.progress.mode().reporter());
            let report = pipeline.run(&url).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
        }
        Commands::Score { text, policy, json } => {
            if let Some(policy) = policy {
                cfg.scoring.policy = policy;
            }
            let scorer = SentimentScorer::from_config(&cfg.scoring)?;
            let breakdown = scorer.explain(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!("label:       {}", breakdown.label);
                println!("polarity:    {:.4}", breakdown.polarity);
                if let Some(lexicon) = breakdown.lexicon {
                    println!("lexicon:     {:.4}", lexicon);
                }
                println!("statistical: {:.4}", breakdown.statistical);
                println!("policy:      {}", breakdown.policy);
                println!("input:       {:?}", breakdown.input);
            }
        }
        Commands::Clean { .. } | Commands::Id { .. } | Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("Video:     {}", report.video.watch_url());
    println!("Policy:    {}", report.policy);
    println!("Comments:  {}", report.comments);
    for label in SentimentLabel::ALL {
        println!(
            "{:<10} {} ({:.1}%)",
            format!("{}:", label),
            report.counts.get(label),
            report.counts.proportion(label) * 100.0
        );
    }
    println!("CSV:       {}", report.bundle.csv.display());
    println!("Pie chart: {}", report.bundle.pie_chart.display());
    println!("Bar chart: {}", report.bundle.bar_chart.display());
}
