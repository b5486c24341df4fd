use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default = "default_text_format")]
    pub text_format: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            page_size: default_page_size(),
            max_comments: default_max_comments(),
            order: default_order(),
            text_format: default_text_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}
fn default_api_key_env() -> String {
    "YOUTUBE_API_KEY".to_string()
}
fn default_page_size() -> u32 {
    100
}
fn default_max_comments() -> usize {
    300
}
fn default_order() -> String {
    "relevance".to_string()
}
fn default_text_format() -> String {
    "plainText".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

/// Which scoring policy labels the comments of a run.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Normalize, then blend the lexicon and statistical models.
    #[default]
    Blended,
    /// Raw text, statistical model only.
    Statistical,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "blended" => Ok(PolicyKind::Blended),
            "statistical" => Ok(PolicyKind::Statistical),
            other => Err(format!(
                "unknown scoring policy '{}': expected blended or statistical",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub blended: BlendedConfig,
    #[serde(default)]
    pub statistical: StatisticalConfig,
    /// Labelled CSV corpus (`label,text`) for the statistical model.
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BlendedConfig {
    #[serde(default = "default_lexicon_weight")]
    pub lexicon_weight: f64,
    #[serde(default = "default_statistical_weight")]
    pub statistical_weight: f64,
    #[serde(default = "default_blended_positive")]
    pub positive_threshold: f64,
    #[serde(default = "default_blended_negative")]
    pub negative_threshold: f64,
}

impl Default for BlendedConfig {
    fn default() -> Self {
        Self {
            lexicon_weight: default_lexicon_weight(),
            statistical_weight: default_statistical_weight(),
            positive_threshold: default_blended_positive(),
            negative_threshold: default_blended_negative(),
        }
    }
}

fn default_lexicon_weight() -> f64 {
    0.6
}
fn default_statistical_weight() -> f64 {
    0.4
}
fn default_blended_positive() -> f64 {
    0.05
}
fn default_blended_negative() -> f64 {
    -0.05
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatisticalConfig {
    #[serde(default = "default_statistical_positive")]
    pub positive_threshold: f64,
    #[serde(default = "default_statistical_negative")]
    pub negative_threshold: f64,
}

impl Default for StatisticalConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_statistical_positive(),
            negative_threshold: default_statistical_negative(),
        }
    }
}

fn default_statistical_positive() -> f64 {
    0.1
}
fn default_statistical_negative() -> f64 {
    -0.1
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_csv_name")]
    pub csv_name: String,
    #[serde(default = "default_pie_chart_name")]
    pub pie_chart_name: String,
    #[serde(default = "default_bar_chart_name")]
    pub bar_chart_name: String,
    /// Write each run into its own sub-directory instead of overwriting.
    #[serde(default)]
    pub per_run: bool,
    /// Add the numeric polarity as a third export column.
    #[serde(default)]
    pub include_score: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            csv_name: default_csv_name(),
            pie_chart_name: default_pie_chart_name(),
            bar_chart_name: default_bar_chart_name(),
            per_run: false,
            include_score: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_csv_name() -> String {
    "comments_sentiment.csv".to_string()
}
fn default_pie_chart_name() -> String {
    "pie_chart.svg".to_string()
}
fn default_bar_chart_name() -> String {
    "bar_chart.svg".to_string()
}

/// Load and validate the config file at `path`.
///
/// A missing file is not an error: every key has a default, so the
/// defaults are returned. A file that exists but fails to parse or
/// validate is.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parse and validate config TOML.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate source
    let source = &config.source;
    if !(1..=100).contains(&source.page_size) {
        bail!("source.page_size must be in 1..=100");
    }
    if source.max_comments == 0 {
        bail!("source.max_comments must be >= 1");
    }
    if source.timeout_secs == 0 {
        bail!("source.timeout_secs must be >= 1");
    }
    if !source.base_url.starts_with("http://") && !source.base_url.starts_with("https://") {
        bail!("source.base_url must start with http:// or https://");
    }
    match source.order.as_str() {
        "relevance" | "time" => {}
        other => bail!(
            "Unknown source.order: '{}'. Must be relevance or time.",
            other
        ),
    }
    match source.text_format.as_str() {
        "plainText" | "html" => {}
        other => bail!(
            "Unknown source.text_format: '{}'. Must be plainText or html.",
            other
        ),
    }

    // Validate scoring
    let blended = &config.scoring.blended;
    for (name, weight) in [
        ("lexicon_weight", blended.lexicon_weight),
        ("statistical_weight", blended.statistical_weight),
    ] {
        if !weight.is_finite() || weight < 0.0 {
            bail!("scoring.blended.{} must be a finite number >= 0", name);
        }
    }
    if blended.negative_threshold >= blended.positive_threshold {
        bail!("scoring.blended.negative_threshold must be below positive_threshold");
    }
    let statistical = &config.scoring.statistical;
    if statistical.negative_threshold >= statistical.positive_threshold {
        bail!("scoring.statistical.negative_threshold must be below positive_threshold");
    }

    // Validate output
    let output = &config.output;
    let names = [
        &output.csv_name,
        &output.pie_chart_name,
        &output.bar_chart_name,
    ];
    if names.iter().any(|n| n.trim().is_empty()) {
        bail!("output file names must not be empty");
    }
    if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
        bail!("output file names must be distinct");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.source.page_size, 100);
        assert_eq!(config.source.max_comments, 300);
        assert_eq!(config.source.order, "relevance");
        assert_eq!(config.scoring.policy, PolicyKind::Blended);
        assert_eq!(config.scoring.blended.lexicon_weight, 0.6);
        assert_eq!(config.scoring.blended.statistical_weight, 0.4);
        assert_eq!(config.scoring.blended.positive_threshold, 0.05);
        assert_eq!(config.scoring.statistical.negative_threshold, -0.1);
        assert_eq!(config.output.dir, PathBuf::from("static"));
        assert!(!config.output.per_run);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Path::new("/definitely/not/here/ytsent.toml")).unwrap();
        assert_eq!(config.source.api_key_env, "YOUTUBE_API_KEY");
    }

    #[test]
    fn overrides_are_read() {
        let config = parse_config(
            r#"
[source]
page_size = 50
max_comments = 120
order = "time"

[scoring]
policy = "statistical"

[scoring.statistical]
positive_threshold = 0.2

[output]
dir = "out"
per_run = true
include_score = true
"#,
        )
        .unwrap();
        assert_eq!(config.source.page_size, 50);
        assert_eq!(config.source.max_comments, 120);
        assert_eq!(config.scoring.policy, PolicyKind::Statistical);
        assert_eq!(config.scoring.statistical.positive_threshold, 0.2);
        assert_eq!(config.scoring.statistical.negative_threshold, -0.1);
        assert!(config.output.per_run);
        assert!(config.output.include_score);
    }

    #[test]
    fn rejects_page_size_above_api_limit() {
        let err = parse_config("[source]\npage_size = 101\n").unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn rejects_zero_cap() {
        assert!(parse_config("[source]\nmax_comments = 0\n").is_err());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = parse_config(
            "[scoring.blended]\npositive_threshold = -0.1\nnegative_threshold = 0.1\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("negative_threshold"));
    }

    #[test]
    fn rejects_negative_weight() {
        assert!(parse_config("[scoring.blended]\nlexicon_weight = -1.0\n").is_err());
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(parse_config("[scoring]\npolicy = \"average\"\n").is_err());
    }

    #[test]
    fn rejects_colliding_output_names() {
        assert!(parse_config("[output]\npie_chart_name = \"comments_sentiment.csv\"\n").is_err());
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("blended".parse::<PolicyKind>(), Ok(PolicyKind::Blended));
        assert_eq!(
            "statistical".parse::<PolicyKind>(),
            Ok(PolicyKind::Statistical)
        );
        assert!("both".parse::<PolicyKind>().is_err());
    }
}
